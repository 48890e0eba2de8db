use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

pub const MAX_TITLE_LEN: usize = 200;
pub const DEFAULT_LIMIT: usize = 50;
pub const MAX_LIMIT: usize = 200;

/// Field name to messages, in the shape returned to HTTP clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("{}", self.summary())]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self { Self::default() }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn field(&self, field: &str) -> Option<&[String]> { self.0.get(field).map(Vec::as_slice) }

    pub fn fields(&self) -> impl Iterator<Item = &str> { self.0.keys().map(String::as_str) }

    fn summary(&self) -> String {
        self.0
            .iter()
            .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{field}: {m}")))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

/// Trims the title and checks it is non-empty and at most 200 characters.
pub fn validate_title(title: &str) -> Result<String, ValidationErrors> {
    let title = title.trim();
    let mut errors = ValidationErrors::new();
    if title.is_empty() {
        errors.add("title", "Title is required.");
    } else if title.chars().count() > MAX_TITLE_LEN {
        errors.add("title", "Title must be at most 200 characters.");
    }
    errors.into_result(title.to_string())
}

/// Resolves paging to `(offset, limit)`, defaulting to `(0, 50)`.
pub fn validate_list(offset: Option<i64>, limit: Option<i64>) -> Result<(usize, usize), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let offset = match offset {
        None => 0,
        Some(o) => usize::try_from(o).unwrap_or_else(|_| {
            errors.add("offset", "Offset must be >= 0.");
            0
        }),
    };
    let limit = match limit {
        None => DEFAULT_LIMIT,
        Some(l) => match usize::try_from(l) {
            Ok(l) if (1..=MAX_LIMIT).contains(&l) => l,
            _ => {
                errors.add("limit", "Limit must be between 1 and 200.");
                DEFAULT_LIMIT
            }
        },
    };
    errors.into_result((offset, limit))
}

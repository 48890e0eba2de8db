use reqwest::{Client, Response, StatusCode, Url};
use thiserror::Error;

use crate::application::dto::{CreateTodoRequest, ListTodosResponse, UpdateTodoRequest};
use crate::domain::todo::Todo;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("todo {0} not found")]
    NotFound(String),

    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Typed client for the todo HTTP API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    http: Client,
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: impl Into<String>) -> Self { Self::with_client(Client::new(), base_url) }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str { &self.base_url }

    pub async fn list(&self, offset: i64, limit: i64) -> Result<ListTodosResponse> {
        let res = self.http.get(self.endpoint(&["todos"])?).query(&[("offset", offset), ("limit", limit)]).send().await?;
        Ok(check(res, None).await?.json().await?)
    }

    pub async fn get(&self, id: &str) -> Result<Todo> {
        let res = self.http.get(self.endpoint(&["todos", id])?).send().await?;
        Ok(check(res, Some(id)).await?.json().await?)
    }

    pub async fn create(&self, request: &CreateTodoRequest) -> Result<Todo> {
        let res = self.http.post(self.endpoint(&["todos"])?).json(request).send().await?;
        Ok(check(res, None).await?.json().await?)
    }

    pub async fn update(&self, id: &str, request: &UpdateTodoRequest) -> Result<Todo> {
        let res = self.http.put(self.endpoint(&["todos", id])?).json(request).send().await?;
        Ok(check(res, Some(id)).await?.json().await?)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let res = self.http.delete(self.endpoint(&["todos", id])?).send().await?;
        check(res, Some(id)).await?;
        Ok(())
    }

    // Each segment is percent-encoded, so an id can never change the route.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(ClientError::InvalidUrl(format!("{:?} is not a valid path segment", bad)));
        }
        let mut url = Url::parse(&self.base_url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn check(res: Response, id: Option<&str>) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
        return Err(ClientError::NotFound(id.to_string()));
    }
    let body = res.text().await.unwrap_or_else(|e| format!("<unreadable body: {e}>"));
    Err(ClientError::Status { status, body })
}

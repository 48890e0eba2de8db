use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use super::dto::{CreateTodoRequest, ListQuery, ListTodosResponse, UpdateTodoRequest};
use super::validation::{ValidationErrors, validate_list, validate_title};
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{NewTodo, Todo, TodoChanges, TodoId};

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationErrors),
}

pub type Result<T> = std::result::Result<T, TodoError>;

/// Validates incoming requests and drives the store. Not-found is reported as
/// `None`/`false`, never as an error.
#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn list(&self, query: ListQuery) -> Result<ListTodosResponse>;
    async fn get(&self, id: TodoId) -> Result<Option<Todo>>;
    async fn create(&self, input: CreateTodoRequest) -> Result<Todo>;
    async fn update(&self, id: TodoId, input: UpdateTodoRequest) -> Result<Option<Todo>>;
    async fn delete(&self, id: TodoId) -> Result<bool>;
}

#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
    clock: Arc<dyn Clock>,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self::with_clock(repo, Arc::new(SystemClock)) }

    pub fn with_clock(repo: R, clock: Arc<dyn Clock>) -> Self { Self { repo, clock } }

    pub fn repository(&self) -> &R { &self.repo }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn list(&self, query: ListQuery) -> Result<ListTodosResponse> {
        let (offset, limit) = validate_list(query.offset, query.limit)?;
        let items = self.repo.list(offset, limit);
        Ok(ListTodosResponse { items, offset, limit })
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>> { Ok(self.repo.get(&id)) }

    async fn create(&self, input: CreateTodoRequest) -> Result<Todo> {
        let title = validate_title(&input.title)?;
        let todo = self.repo.create(NewTodo { title, completed: input.completed.unwrap_or(false) }, self.clock.now());
        tracing::info!(id = %todo.id, "created todo");
        Ok(todo)
    }

    async fn update(&self, id: TodoId, input: UpdateTodoRequest) -> Result<Option<Todo>> {
        let title = validate_title(&input.title)?;
        let updated = self.repo.update(&id, TodoChanges { title, completed: input.completed }, self.clock.now());
        match &updated {
            Some(_) => tracing::info!(%id, "updated todo"),
            None => tracing::info!(%id, "update of missing todo"),
        }
        Ok(updated)
    }

    async fn delete(&self, id: TodoId) -> Result<bool> {
        let removed = self.repo.delete(&id);
        tracing::info!(%id, removed, "deleted todo");
        Ok(removed)
    }
}

use chrono::{DateTime, Utc};

use super::todo::{NewTodo, Todo, TodoChanges, TodoId};

/// Operations on the same id are linearizable. Absence is `None`/`false`, never an error.
pub trait TodoRepository: Send + Sync + 'static {
    // newest first by created_at
    fn list(&self, offset: usize, limit: usize) -> Vec<Todo>;
    fn get(&self, id: &TodoId) -> Option<Todo>;
    fn create(&self, input: NewTodo, now: DateTime<Utc>) -> Todo;
    fn update(&self, id: &TodoId, changes: TodoChanges, now: DateTime<Utc>) -> Option<Todo>;
    fn delete(&self, id: &TodoId) -> bool;
}

use std::collections::HashMap;
use std::collections::hash_map::Entry as MapEntry;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use crate::domain::{
    repository::TodoRepository,
    todo::{NewTodo, Todo, TodoChanges, TodoId},
};

#[derive(Debug, Clone)]
struct Entry {
    // insertion order, breaks ties between equal `created_at`
    seq: u64,
    todo: Todo,
}

#[derive(Debug, Default)]
struct Inner {
    items: HashMap<TodoId, Entry>,
    next_seq: u64,
}

/// In-process todo store. Cloning hands out another handle to the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryTodoStore {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.read().items.len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    // Every mutation is a single map operation, so a poisoned lock still
    // guards a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, Inner> { self.inner.read().unwrap_or_else(|e| e.into_inner()) }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> { self.inner.write().unwrap_or_else(|e| e.into_inner()) }
}

impl TodoRepository for InMemoryTodoStore {
    fn list(&self, offset: usize, limit: usize) -> Vec<Todo> {
        let inner = self.read();
        let mut entries: Vec<&Entry> = inner.items.values().collect();
        entries.sort_unstable_by(|a, b| {
            b.todo.created_at.cmp(&a.todo.created_at).then_with(|| b.seq.cmp(&a.seq))
        });
        entries.into_iter().skip(offset).take(limit).map(|e| e.todo.clone()).collect()
    }

    fn get(&self, id: &TodoId) -> Option<Todo> { self.read().items.get(id).map(|e| e.todo.clone()) }

    fn create(&self, input: NewTodo, now: DateTime<Utc>) -> Todo {
        let mut inner = self.write();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        loop {
            let id = TodoId::new();
            if let MapEntry::Vacant(slot) = inner.items.entry(id) {
                let todo = Todo { id, title: input.title, completed: input.completed, created_at: now, updated_at: now };
                slot.insert(Entry { seq, todo: todo.clone() });
                tracing::debug!(%id, "todo created");
                return todo;
            }
        }
    }

    fn update(&self, id: &TodoId, changes: TodoChanges, now: DateTime<Utc>) -> Option<Todo> {
        let mut inner = self.write();
        let entry = inner.items.get_mut(id)?;
        let todo = &mut entry.todo;
        todo.title = changes.title;
        todo.completed = changes.completed;
        todo.updated_at = now.max(todo.created_at);
        tracing::debug!(%id, "todo updated");
        Some(todo.clone())
    }

    fn delete(&self, id: &TodoId) -> bool {
        let removed = self.write().items.remove(id).is_some();
        if removed { tracing::debug!(%id, "todo deleted"); }
        removed
    }
}

//! Todo lifecycle rules on top of a `TodoStore`.
//!
//! # Design
//! `TodoService` holds no state of its own besides the injected store, so a
//! single instance can be shared across request handlers. Input validation
//! (non-blank text, `done` present on update) happens at the HTTP boundary
//! before any of these methods is called.
//!
//! A todo is either alive (present in the store) or deleted (absent for
//! good). Deleted ids are never handed out again; `create` always yields a
//! new one.

use crate::error::StoreResult;
use crate::store::TodoStore;
use crate::types::{NewTodo, Todo, TodoChanges, TodoId};

/// Stateless mediator between the HTTP boundary and the record store.
#[derive(Debug, Clone)]
pub struct TodoService<S> {
    store: S,
}

impl<S: TodoStore> TodoService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn list(&self) -> StoreResult<Vec<Todo>> {
        self.store.find_all()
    }

    /// Persists a new todo. An absent `done` means not done.
    pub fn create(&self, draft: NewTodo) -> StoreResult<Todo> {
        let todo = self.store.insert(
            &draft.text,
            draft.body.as_deref(),
            draft.done.unwrap_or(false),
        )?;
        tracing::info!(id = todo.id, "todo created");
        Ok(todo)
    }

    /// `None` means no todo with that id exists.
    pub fn get(&self, id: TodoId) -> StoreResult<Option<Todo>> {
        self.store.find_by_id(id)
    }

    /// Replaces every mutable field of `id` with `changes`.
    ///
    /// Returns `None` when `id` does not exist; nothing is created then.
    pub fn update(&self, id: TodoId, changes: TodoChanges) -> StoreResult<Option<Todo>> {
        let updated = self
            .store
            .replace(id, &changes.text, changes.body.as_deref(), changes.done)?;
        if updated.is_some() {
            tracing::info!(id, "todo updated");
        }
        Ok(updated)
    }

    /// Returns whether a todo was removed. Repeating a delete is harmless
    /// and reports `false`.
    pub fn delete(&self, id: TodoId) -> StoreResult<bool> {
        let removed = self.store.delete_by_id(id)?;
        if removed {
            tracing::info!(id, "todo deleted");
        }
        Ok(removed)
    }
}

//! Domain types for the todo service.
//!
//! # Design
//! `Todo` is the persisted record and doubles as the wire representation.
//! The two input shapes deliberately carry no identifier: the store issues
//! ids on insert, and updates are addressed by an id passed alongside the
//! changes, so a client-supplied id has nowhere to go.

use serde::{Deserialize, Serialize};

/// Store-issued identifier. Monotonically increasing and never reused.
pub type TodoId = i64;

/// A single todo record as stored and as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub body: Option<String>,
    pub done: bool,
}

/// Input for creating a todo. `done` falls back to `false` when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTodo {
    pub text: String,
    pub body: Option<String>,
    pub done: Option<bool>,
}

impl NewTodo {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_done(mut self, done: bool) -> Self {
        self.done = Some(done);
        self
    }
}

/// Full replacement of every mutable field of an existing todo.
///
/// There is no patch form: a `None` body clears the stored body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoChanges {
    pub text: String,
    pub body: Option<String>,
    pub done: bool,
}

impl TodoChanges {
    pub fn new(text: impl Into<String>, body: Option<String>, done: bool) -> Self {
        Self {
            text: text.into(),
            body,
            done,
        }
    }
}

//! Request payloads and their validation.
//!
//! Every field is optional at the serde level so that a missing `text` or
//! `done` is reported as a `ValidationError` rather than a generic parse
//! failure. Unknown fields, including any `id`, are dropped during
//! deserialization; the path id is the only one that reaches the service.

use serde::Deserialize;
use thiserror::Error;
use todo_core::{NewTodo, TodoChanges};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("text is required")]
    TextMissing,

    #[error("text must not be blank")]
    TextBlank,

    #[error("done is required")]
    DoneMissing,
}

/// Body of `POST /todos`.
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub text: Option<String>,
    pub body: Option<String>,
    pub done: Option<bool>,
}

impl CreateTodoRequest {
    pub fn validate(self) -> Result<NewTodo, ValidationError> {
        Ok(NewTodo {
            text: require_text(self.text)?,
            body: self.body,
            done: self.done,
        })
    }
}

/// Body of `PUT /todos/{id}`. A full replacement: `text` and `done` are
/// mandatory and an absent `body` clears it.
#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub text: Option<String>,
    pub body: Option<String>,
    pub done: Option<bool>,
}

impl UpdateTodoRequest {
    pub fn validate(self) -> Result<TodoChanges, ValidationError> {
        let text = require_text(self.text)?;
        let done = self.done.ok_or(ValidationError::DoneMissing)?;
        Ok(TodoChanges::new(text, self.body, done))
    }
}

fn require_text(text: Option<String>) -> Result<String, ValidationError> {
    let text = text.ok_or(ValidationError::TextMissing)?;
    if text.trim().is_empty() {
        return Err(ValidationError::TextBlank);
    }
    Ok(text)
}

//! Persistence and lifecycle rules for the todo service.
//!
//! # Overview
//! Stores todo records in SQLite and applies the lifecycle rules the HTTP
//! layer relies on: store-issued ids that are never reused, full-field
//! replacement on update, and "not found" reported as a value.
//!
//! # Design
//! - `TodoStore` is the persistence seam; `SqliteTodoStore` implements it.
//! - `TodoService` takes its store by constructor injection and keeps no
//!   state of its own.
//! - No HTTP or async dependencies live here; the server crate wraps calls
//!   for its runtime.

pub mod db;
pub mod error;
pub mod service;
pub mod store;
pub mod types;

pub use error::{DbError, DbResult, StoreError, StoreResult};
pub use service::TodoService;
pub use store::{SqliteTodoStore, TodoStore};
pub use types::{NewTodo, Todo, TodoChanges, TodoId};

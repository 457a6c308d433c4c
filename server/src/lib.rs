//! HTTP front end for the todo service.
//!
//! # Design
//! Handlers decode and validate the request, hand the typed input to
//! `TodoService`, and translate the outcome into a status code. Store calls
//! are synchronous SQLite work, so they run on tokio's blocking pool.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use todo_core::{StoreResult, Todo, TodoId, TodoService, TodoStore};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod dto;
pub mod error;
mod extract;
pub mod telemetry;

use dto::{CreateTodoRequest, UpdateTodoRequest};
use error::ApiError;
use extract::{JsonBody, PathParam};

type Shared<S> = Arc<TodoService<S>>;

pub fn app<S: TodoStore + 'static>(service: TodoService<S>) -> Router {
    Router::new()
        .route("/todos", get(list_todos::<S>).post(create_todo::<S>))
        .route(
            "/todos/{id}",
            get(get_todo::<S>)
                .put(update_todo::<S>)
                .delete(delete_todo::<S>),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(service))
}

/// Serves the API on `listener` until Ctrl-C.
pub async fn run<S: TodoStore + 'static>(
    listener: TcpListener,
    service: TodoService<S>,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "cannot listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

/// Runs a service call on the blocking pool.
async fn blocking<S, T, F>(service: &Shared<S>, op: F) -> Result<T, ApiError>
where
    S: TodoStore + 'static,
    T: Send + 'static,
    F: FnOnce(&TodoService<S>) -> StoreResult<T> + Send + 'static,
{
    let service = Arc::clone(service);
    let outcome = tokio::task::spawn_blocking(move || op(&service)).await?;
    Ok(outcome?)
}

async fn list_todos<S: TodoStore + 'static>(
    State(service): State<Shared<S>>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = blocking(&service, |service| service.list()).await?;
    Ok(Json(todos))
}

async fn create_todo<S: TodoStore + 'static>(
    State(service): State<Shared<S>>,
    JsonBody(input): JsonBody<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let draft = input.validate()?;
    let todo = blocking(&service, move |service| service.create(draft)).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo<S: TodoStore + 'static>(
    State(service): State<Shared<S>>,
    PathParam(id): PathParam<TodoId>,
) -> Result<Json<Todo>, ApiError> {
    blocking(&service, move |service| service.get(id))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn update_todo<S: TodoStore + 'static>(
    State(service): State<Shared<S>>,
    PathParam(id): PathParam<TodoId>,
    JsonBody(input): JsonBody<UpdateTodoRequest>,
) -> Result<Json<Todo>, ApiError> {
    let changes = input.validate()?;
    blocking(&service, move |service| service.update(id, changes))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn delete_todo<S: TodoStore + 'static>(
    State(service): State<Shared<S>>,
    PathParam(id): PathParam<TodoId>,
) -> Result<StatusCode, ApiError> {
    if blocking(&service, move |service| service.delete(id)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

//! In-memory todo REST API.
//!
//! # Overview
//! Serves `/api/todos` (list, create) and `/api/todos/{id}` (get, update,
//! delete) over JSON. State lives in a `TodoStore` owned by `AppState` and
//! is lost when the process exits.
//!
//! # Design
//! - The store is a plain struct with synchronous methods; the HTTP layer
//!   only extracts input, takes the lock, and maps `StoreError` to a status.
//! - Middleware adds a request-id tracing span and CORS headers.
//! - `app()` builds a router over a fresh store so tests can drive it with
//!   `tower::ServiceExt::oneshot` without a socket.

pub mod config;
pub mod error;
mod middleware;
mod routes;
pub mod store;

use std::future::Future;

use axum::{middleware::from_fn, middleware::from_fn_with_state, Router};
use tokio::net::TcpListener;

pub use config::{CorsPolicy, ServerConfig};
pub use error::{ApiError, StoreError};
pub use middleware::REQUEST_ID_HEADER;
pub use routes::TODOS_PATH;
pub use store::{NewTodo, SharedStore, Todo, TodoPatch, TodoStore};

/// State shared by every handler.
#[derive(Clone, Default)]
pub struct AppState {
    pub store: SharedStore,
}

impl AppState {
    pub fn new(store: TodoStore) -> Self {
        Self {
            store: store.shared(),
        }
    }
}

/// Router over a fresh, empty store that accepts any CORS origin.
pub fn app() -> Router {
    router(AppState::default(), CorsPolicy::Any)
}

pub fn router(state: AppState, cors: CorsPolicy) -> Router {
    // Tracing is outermost so CORS preflights are traced as well.
    routes::todo_routes()
        .layer(from_fn_with_state(cors, middleware::cors))
        .layer(from_fn(middleware::request_tracing))
        .with_state(state)
}

/// Serve a fresh store until the process is killed.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app(), std::future::pending()).await
}

pub async fn serve<F>(
    listener: TcpListener,
    router: Router,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}

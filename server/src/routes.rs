use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::info;

use crate::error::ApiError;
use crate::store::{NewTodo, Todo, TodoPatch};
use crate::AppState;

pub const TODOS_PATH: &str = "/api/todos";

pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route(TODOS_PATH, get(list_todos).post(create_todo))
        .route(
            "/api/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
}

// Framework rejections are turned into `ApiError` so every failure carries
// the same JSON error body.
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(v)| v)
        .map_err(|e| ApiError::InvalidBody(e.body_text()))
}

// An empty body is an empty patch, so an unknown id still yields 404.
fn patch_body(body: &Bytes) -> Result<TodoPatch, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(TodoPatch::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

fn todo_id(id: Result<Path<u64>, PathRejection>) -> Result<u64, ApiError> {
    id.map(|Path(id)| id)
        .map_err(|e| ApiError::InvalidId(e.body_text()))
}

async fn list_todos(State(state): State<AppState>) -> Json<Vec<Todo>> {
    let store = state.store.read().await;
    Json(store.list())
}

async fn create_todo(
    State(state): State<AppState>,
    body: Result<Json<NewTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let input = json_body(body)?;
    let todo = state.store.write().await.create(input)?;
    info!(id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = todo_id(id)?;
    let store = state.store.read().await;
    Ok(Json(store.get(id)?))
}

async fn update_todo(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    body: Bytes,
) -> Result<Json<Todo>, ApiError> {
    let id = todo_id(id)?;
    let patch = patch_body(&body)?;
    let todo = state.store.write().await.update(id, patch)?;
    info!(id, completed = todo.completed, "todo updated");
    Ok(Json(todo))
}

async fn delete_todo(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = todo_id(id)?;
    let todo = state.store.write().await.delete(id)?;
    info!(id, "todo deleted");
    Ok(Json(todo))
}

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header::LOCATION};
use axum::{Json, Router, routing::get};

use crate::application::dto::{CreateTodoRequest, ListQuery, ListTodosResponse, UpdateTodoRequest};
use crate::application::todo_service::TodoService;
use crate::domain::todo::{Todo, TodoId};
use crate::http::types::ApiError;

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub service: S }

pub fn router<S: TodoService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route("/todos", get(list_todos::<S>).post(create_todo::<S>))
        .route("/todos/:id", get(get_todo::<S>).put(update_todo::<S>).delete(delete_todo::<S>))
        .with_state(state)
}

async fn list_todos<S: TodoService>(State(state): State<AppState<S>>, query: Result<Query<ListQuery>, QueryRejection>) -> Result<Json<ListTodosResponse>, ApiError> {
    let Query(query) = query.map_err(rejected)?;
    let page = state.service.list(query).await.map_err(rejected)?;
    Ok(Json(page))
}

async fn get_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    state.service.get(id).await.map_err(rejected)?.map(Json).ok_or_else(ApiError::not_found)
}

async fn create_todo<S: TodoService>(State(state): State<AppState<S>>, payload: Result<Json<CreateTodoRequest>, JsonRejection>) -> Result<(StatusCode, HeaderMap, Json<Todo>), ApiError> {
    let Json(payload) = payload.map_err(rejected)?;
    let todo = state.service.create(payload).await.map_err(rejected)?;
    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/todos/{}", todo.id)) {
        headers.insert(LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(todo)))
}

async fn update_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>, payload: Result<Json<UpdateTodoRequest>, JsonRejection>) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    let Json(payload) = payload.map_err(rejected)?;
    state.service.update(id, payload).await.map_err(rejected)?.map(Json).ok_or_else(ApiError::not_found)
}

async fn delete_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.service.delete(id).await.map_err(rejected)?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(s: &str) -> Result<TodoId, ApiError> {
    s.parse().map_err(|_| {
        tracing::warn!(id = s, "rejected malformed todo id");
        ApiError::invalid_id()
    })
}

fn rejected<E: Into<ApiError> + std::fmt::Display>(e: E) -> ApiError {
    tracing::warn!(error = %e, "rejected todo request");
    e.into()
}

//! Task CRUD endpoints.
//!
//! The same four operations are exposed twice: under `/tasks` behind
//! the session-cookie gate for browsers, and under `/agent/tasks`
//! behind the bearer gate for programmatic clients. Every handler
//! receives the verified identity as an explicit argument and every
//! mutation answers with the owner's full, re-read task list.

use axum::{
    Json,
    extract::{Path, State},
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use brass_lantern_core::TaskId;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use std::sync::Arc;
use tracing::error;

use crate::auth::{AppState, BearerAuth, Identity, SessionAuth};
use crate::db::{Task, TaskRepository};

#[derive(Debug, Serialize, Deserialize)]
pub struct TasksResponse {
    pub tasks: Vec<Task>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    task_text: String,
}

/// Errors from task endpoints.
#[derive(Debug)]
pub enum TaskError {
    /// The request body was missing or not valid JSON.
    InvalidBody,
    /// The task store failed.
    Database { details: String },
}

impl From<sqlx::Error> for TaskError {
    fn from(e: sqlx::Error) -> Self {
        Self::Database {
            details: e.to_string(),
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidBody => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "invalid JSON" })),
            )
                .into_response(),
            Self::Database { details } => {
                error!(error = %details, "task store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

/// Lists the caller's tasks (cookie gate).
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    SessionAuth(identity): SessionAuth,
) -> Result<Json<TasksResponse>, TaskError> {
    list(&state, &identity).await
}

/// Lists the caller's tasks (bearer gate).
pub async fn agent_list_tasks(
    State(state): State<Arc<AppState>>,
    BearerAuth(identity): BearerAuth,
) -> Result<Json<TasksResponse>, TaskError> {
    list(&state, &identity).await
}

/// Creates a task (cookie gate).
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    SessionAuth(identity): SessionAuth,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<Json<TasksResponse>, TaskError> {
    create(&state, &identity, body).await
}

/// Creates a task (bearer gate).
pub async fn agent_create_task(
    State(state): State<Arc<AppState>>,
    BearerAuth(identity): BearerAuth,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<Json<TasksResponse>, TaskError> {
    create(&state, &identity, body).await
}

/// Marks a task completed (cookie gate).
pub async fn complete_task(
    State(state): State<Arc<AppState>>,
    SessionAuth(identity): SessionAuth,
    Path(id): Path<String>,
) -> Result<Json<TasksResponse>, TaskError> {
    complete(&state, &identity, &id).await
}

/// Marks a task completed (bearer gate).
pub async fn agent_complete_task(
    State(state): State<Arc<AppState>>,
    BearerAuth(identity): BearerAuth,
    Path(id): Path<String>,
) -> Result<Json<TasksResponse>, TaskError> {
    complete(&state, &identity, &id).await
}

/// Deletes a task (cookie gate).
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    SessionAuth(identity): SessionAuth,
    Path(id): Path<String>,
) -> Result<Json<TasksResponse>, TaskError> {
    delete(&state, &identity, &id).await
}

/// Deletes a task (bearer gate).
pub async fn agent_delete_task(
    State(state): State<Arc<AppState>>,
    BearerAuth(identity): BearerAuth,
    Path(id): Path<String>,
) -> Result<Json<TasksResponse>, TaskError> {
    delete(&state, &identity, &id).await
}

async fn list(state: &AppState, identity: &Identity) -> Result<Json<TasksResponse>, TaskError> {
    let tasks = repository(state).list(&identity.member_id).await?;
    Ok(Json(TasksResponse { tasks }))
}

async fn create(
    state: &AppState,
    identity: &Identity,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<Json<TasksResponse>, TaskError> {
    let Ok(Json(req)) = body else {
        return Err(TaskError::InvalidBody);
    };
    let tasks = repository(state)
        .add(&identity.member_id, &req.task_text)
        .await?;
    Ok(Json(TasksResponse { tasks }))
}

async fn complete(
    state: &AppState,
    identity: &Identity,
    id: &str,
) -> Result<Json<TasksResponse>, TaskError> {
    let repo = repository(state);
    // An unparseable id cannot name any stored task; same no-op contract
    // as a well-formed id the owner does not hold.
    let tasks = match TaskId::from_str(id) {
        Ok(id) => repo.mark_completed(&identity.member_id, &id).await?,
        Err(_) => repo.list(&identity.member_id).await?,
    };
    Ok(Json(TasksResponse { tasks }))
}

async fn delete(
    state: &AppState,
    identity: &Identity,
    id: &str,
) -> Result<Json<TasksResponse>, TaskError> {
    let repo = repository(state);
    let tasks = match TaskId::from_str(id) {
        Ok(id) => repo.delete(&identity.member_id, &id).await?,
        Err(_) => repo.list(&identity.member_id).await?,
    };
    Ok(Json(TasksResponse { tasks }))
}

fn repository(state: &AppState) -> TaskRepository {
    TaskRepository::new(state.db_pool.clone())
}

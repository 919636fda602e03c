use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Local;
use serde_json::json;

use crate::errors::{AppError, AppResult};
use crate::models::{
    CompletionPayload, CreateTaskPayload, NewTask, Priority, Task, TaskStatus, UpdateTaskPayload,
};
use crate::services::Store;

// Default owner when the client supplies none. The server trusts whatever
// user id it is given; there is no ownership check on any of these routes.
const DEFAULT_USER_ID: i64 = 1;

/// Returns every task row in the store, regardless of owner. A diagnostic
/// affordance rather than a collaborator-facing operation.
pub async fn list_all_tasks(State(store): State<Store>) -> AppResult<Json<Vec<Task>>> {
    let tasks = store.all_tasks().await?;
    Ok(Json(tasks))
}

pub async fn list_user_tasks(
    State(store): State<Store>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<Task>>> {
    tracing::debug!("Listing tasks for user {}", user_id);
    // An empty list is a valid outcome, not an error
    let tasks = store.tasks_for_user(user_id).await?;
    Ok(Json(tasks))
}

#[axum::debug_handler]
pub async fn create_task(
    State(store): State<Store>,
    Json(payload): Json<CreateTaskPayload>,
) -> AppResult<Response> {
    let title = require_title(payload.title)?;

    let new_task = NewTask {
        user_id: payload.user_id.unwrap_or(DEFAULT_USER_ID),
        title,
        description: payload.description.unwrap_or_default(),
        due_date: payload.due_date.unwrap_or_else(|| Local::now().date_naive()),
        priority: payload.priority.unwrap_or(Priority::Medium),
    };

    tracing::info!(
        "Creating task '{}' for user {}",
        new_task.title,
        new_task.user_id
    );

    let id = store.insert_task(&new_task).await?;

    // The created record is assembled from the inputs and the generated id;
    // the row is not read back.
    let task = Task {
        id,
        user_id: new_task.user_id,
        title: new_task.title,
        description: new_task.description,
        due_date: new_task.due_date,
        priority: new_task.priority,
        status: TaskStatus::Pending,
    };

    Ok((StatusCode::CREATED, Json(task)).into_response())
}

#[axum::debug_handler]
pub async fn set_task_completion(
    State(store): State<Store>,
    Path(id): Path<i64>,
    Json(payload): Json<CompletionPayload>,
) -> AppResult<Response> {
    let status = if payload.completed {
        TaskStatus::Completed
    } else {
        TaskStatus::Pending
    };

    tracing::debug!("Updating task {} status to {:?}", id, status);

    if store.set_task_status(id, status).await? == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(Json(json!({ "message": "Status updated" })).into_response())
}

pub async fn update_task(
    State(store): State<Store>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTaskPayload>,
) -> AppResult<Response> {
    let title = require_title(payload.title)?;
    let description = payload.description.unwrap_or_default();
    let due_date = payload.due_date.unwrap_or_else(|| Local::now().date_naive());
    let priority = payload.priority.unwrap_or(Priority::Medium);

    let affected = store
        .update_task(id, &title, &description, due_date, priority)
        .await?;
    if affected == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }

    // Refresh read is a second, independent statement; a concurrent delete
    // between the two surfaces here as 404.
    let task = store
        .get_task(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    Ok(Json(task).into_response())
}

pub async fn delete_task(
    State(store): State<Store>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    tracing::debug!("Deleting task {}", id);

    if store.delete_task(id).await? == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(Json(json!({ "message": "Task deleted" })).into_response())
}

// Missing and empty titles are rejected the same way.
fn require_title(title: Option<String>) -> AppResult<String> {
    match title {
        Some(t) if !t.is_empty() => Ok(t),
        _ => Err(AppError::BadRequest("Title is required".into())),
    }
}

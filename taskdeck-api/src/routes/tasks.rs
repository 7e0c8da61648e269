/// Task endpoints
///
/// As with accounts, the `/me/tasks` family fixes the owner to the actor
/// and the `/admin` family addresses tasks and owners by path id. Ownership
/// enforcement happens inside the repository queries; a member reaching for
/// someone else's task gets 404, never 403.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskdeck_shared::auth::Actor;
use taskdeck_shared::models::Task;

use crate::{app::AppState, error::ApiResult};

/// Task creation request
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    /// Title (non-empty)
    pub title: String,

    /// Description; may be omitted or empty, in which case a sentinel is
    /// stored
    #[serde(default)]
    pub description: String,
}

/// Task creation response
#[derive(Debug, Serialize)]
pub struct CreateTaskResponse {
    /// Id of the created task
    pub id: i64,
}

/// Title update request
#[derive(Debug, Deserialize)]
pub struct UpdateTitleRequest {
    /// New title (non-empty)
    pub title: String,
}

/// Description update request
#[derive(Debug, Deserialize)]
pub struct UpdateDescriptionRequest {
    /// New description; empty resets to the sentinel
    #[serde(default)]
    pub description: String,
}

/// `GET /me/tasks` - the actor's own tasks
pub async fn list_my_tasks(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.tasks.tasks_for_user(actor.id, &actor).await?;
    Ok(Json(tasks))
}

/// `POST /me/tasks`
pub async fn create_my_task(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<CreateTaskResponse>)> {
    let id = state
        .tasks
        .create_task(actor.id, &req.title, &req.description)
        .await?;
    Ok((StatusCode::CREATED, Json(CreateTaskResponse { id })))
}

/// `DELETE /me/tasks/:id`
pub async fn delete_my_task(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.tasks.delete_task(id, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /me/tasks/:id/switch` - flip the completion flag
pub async fn switch_my_task(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.tasks.toggle_status(id, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /me/tasks/:id/title`
pub async fn retitle_my_task(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTitleRequest>,
) -> ApiResult<StatusCode> {
    state.tasks.update_title(id, &req.title, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /me/tasks/:id/description`
pub async fn redescribe_my_task(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateDescriptionRequest>,
) -> ApiResult<StatusCode> {
    state
        .tasks
        .update_description(id, &req.description, &actor)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /admin/tasks` - every task in the store
pub async fn list_all_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.tasks.list_tasks().await?;
    Ok(Json(tasks))
}

/// `GET /admin/users/:id/tasks` - one user's tasks
pub async fn list_user_tasks(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.tasks.tasks_for_user(id, &actor).await?;
    Ok(Json(tasks))
}

/// `POST /admin/users/:id/tasks` - create a task on a user's behalf
pub async fn create_user_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<CreateTaskResponse>)> {
    let id = state
        .tasks
        .create_task(id, &req.title, &req.description)
        .await?;
    Ok((StatusCode::CREATED, Json(CreateTaskResponse { id })))
}

/// `DELETE /admin/tasks/:id`
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.tasks.delete_task(id, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /admin/tasks/:id/switch`
pub async fn switch_task(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.tasks.toggle_status(id, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /admin/tasks/:id/title`
pub async fn retitle_task(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTitleRequest>,
) -> ApiResult<StatusCode> {
    state.tasks.update_title(id, &req.title, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /admin/tasks/:id/description`
pub async fn redescribe_task(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateDescriptionRequest>,
) -> ApiResult<StatusCode> {
    state
        .tasks
        .update_description(id, &req.description, &actor)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults_description() {
        let req: CreateTaskRequest = serde_json::from_str(r#"{"title": "buy milk"}"#).unwrap();
        assert_eq!(req.title, "buy milk");
        assert_eq!(req.description, "");
    }
}

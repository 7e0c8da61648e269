/// User account endpoints
///
/// Two route families share these handlers. The `/me` family fixes the
/// target id to the authenticated actor's own id; the `/admin` family takes
/// the target from the path. Both call the same service operations, and the
/// repository predicate applies to both — it simply always passes for an
/// admin actor.
///
/// `User` serializes without its password hash, so handlers return the
/// model directly.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use taskdeck_shared::auth::{Actor, Role};
use taskdeck_shared::models::User;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

/// Rename request
#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    /// New account name
    pub name: String,
}

/// Password change request
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    /// Current password
    pub old_password: String,

    /// New password (at least 6 characters, different from the old one)
    pub new_password: String,
}

/// Role change request
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    /// New role: "member" or "admin"
    pub role: String,
}

/// `GET /me` - the actor's own account
pub async fn get_me(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<Json<User>> {
    let user = state.users.get_user(actor.id, &actor).await?;
    Ok(Json(user))
}

/// `PATCH /me/rename`
pub async fn rename_me(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(req): Json<RenameRequest>,
) -> ApiResult<StatusCode> {
    state.users.rename(actor.id, &req.name, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /me/password`
pub async fn change_my_password(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<StatusCode> {
    state
        .users
        .change_password(actor.id, &req.old_password, &req.new_password, &actor)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /me` - self-deletion; the account's tasks cascade away
pub async fn delete_me(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<StatusCode> {
    state.users.delete(actor.id, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /admin/users` - every account
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.users.list_users().await?;
    Ok(Json(users))
}

/// `GET /admin/users/:id`
pub async fn get_user(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> ApiResult<Json<User>> {
    let user = state.users.get_user(id, &actor).await?;
    Ok(Json(user))
}

/// `PATCH /admin/users/:id/rename`
pub async fn rename_user(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    Json(req): Json<RenameRequest>,
) -> ApiResult<StatusCode> {
    state.users.rename(id, &req.name, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /admin/users/:id/password`
///
/// Admins still supply the target's current password; the verification step
/// is not waived for them.
pub async fn change_user_password(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<StatusCode> {
    state
        .users
        .change_password(id, &req.old_password, &req.new_password, &actor)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /admin/users/:id/role`
pub async fn update_user_role(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateRoleRequest>,
) -> ApiResult<StatusCode> {
    let role = Role::parse(&req.role)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown role: {}", req.role)))?;

    state.users.update_role(id, role).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /admin/users/:id`
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.users.delete(id, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_request_deserializes() {
        let req: RenameRequest = serde_json::from_str(r#"{"name": "dana"}"#).unwrap();
        assert_eq!(req.name, "dana");
    }

    #[test]
    fn test_role_request_rejects_unknown_role() {
        let req: UpdateRoleRequest = serde_json::from_str(r#"{"role": "root"}"#).unwrap();
        assert!(Role::parse(&req.role).is_none());
    }
}

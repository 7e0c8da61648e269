/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /sign-up` - Register a new account
/// - `POST /login` - Verify credentials and receive a session token
///
/// Both are public. Sign-up always creates a `member`; there is no
/// privileged registration path. Login failures never say whether the name
/// or the password was wrong.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::{app::AppState, error::ApiResult};

/// Sign-up request
#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    /// Account name
    pub name: String,

    /// Password (at least 6 characters)
    pub password: String,
}

/// Sign-up response
#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    /// Id of the created account
    pub id: i64,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Account name
    pub name: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Session token, valid for 24 hours
    pub token: String,
}

/// Registers a new account
///
/// # Errors
///
/// - `400 Bad Request`: empty name or password shorter than 6 characters
/// - `500 Internal Server Error`: hashing or store failure
pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> ApiResult<(StatusCode, Json<SignUpResponse>)> {
    let id = state.users.sign_up(&req.name, &req.password).await?;

    Ok((StatusCode::CREATED, Json(SignUpResponse { id })))
}

/// Verifies credentials and issues a session token
///
/// # Errors
///
/// - `401 Unauthorized`: unknown name or wrong password (indistinguishable)
/// - `500 Internal Server Error`: signing or store failure
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = state.users.authenticate(&req.name, &req.password).await?;

    let token = state
        .signer
        .issue(user.id, user.role)
        .map_err(taskdeck_shared::Error::from)?;

    Ok(Json(LoginResponse { token }))
}

/// Request authentication middleware for Axum
///
/// The request authenticator walks a small state machine per request:
/// no credential → bearer credential present → token verified → actor
/// attached. Any failure before the final state terminates the request as
/// unauthenticated (401). A second, optional gate restricts a route subtree
/// to admin actors and terminates with the distinct `Forbidden` (403) state.
///
/// After successful authentication the [`Actor`] is inserted into the
/// request's extensions; handlers extract it with Axum's `Extension`
/// extractor. It is owned by the request and never mutated afterward.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use axum::{middleware, routing::get, Extension, Router};
/// use taskdeck_shared::auth::middleware::{create_auth_middleware, require_admin};
/// use taskdeck_shared::auth::{Actor, token::TokenSigner};
///
/// async fn whoami(Extension(actor): Extension<Actor>) -> String {
///     format!("actor {}", actor.id)
/// }
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let signer = Arc::new(TokenSigner::new("a-secret-of-at-least-32-bytes-long")?);
///
/// let app: Router = Router::new()
///     .route("/whoami", get(whoami))
///     .layer(middleware::from_fn(create_auth_middleware(signer)));
/// # Ok(())
/// # }
/// ```

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::actor::Actor;
use super::token::TokenSigner;

/// Error type for the request authenticator
#[derive(Debug)]
pub enum AuthError {
    /// No Authorization header was supplied
    MissingCredentials,

    /// The Authorization header was not a Bearer credential
    InvalidFormat,

    /// The bearer token failed verification (malformed, forged, or expired)
    InvalidToken,

    /// The actor is authenticated but lacks the admin role
    AdminOnly,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "missing credentials").into_response()
            }
            AuthError::InvalidFormat => {
                (StatusCode::UNAUTHORIZED, "expected bearer token").into_response()
            }
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid token").into_response(),
            AuthError::AdminOnly => {
                (StatusCode::FORBIDDEN, "this is for admins only").into_response()
            }
        }
    }
}

/// Bearer-token authentication middleware
///
/// Extracts the `Authorization: Bearer <token>` header, verifies the token
/// with the process-wide signer, and attaches the resulting [`Actor`] to the
/// request extensions.
///
/// # Errors
///
/// Returns 401 Unauthorized if the header is missing, is not a Bearer
/// credential, or carries a token that fails verification. The three cases
/// are not distinguished beyond their messages.
pub async fn bearer_auth_middleware(
    signer: Arc<TokenSigner>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidFormat)?;

    let actor = signer.verify(token).map_err(|_| AuthError::InvalidToken)?;

    req.extensions_mut().insert(actor);

    Ok(next.run(req).await)
}

/// Admin gate middleware
///
/// Must run after [`bearer_auth_middleware`]; rejects with 403 Forbidden any
/// request whose actor is not an admin. A request that never passed the
/// authenticator has no actor and is rejected as unauthenticated instead,
/// keeping the two terminal states distinct.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AuthError> {
    let actor = req
        .extensions()
        .get::<Actor>()
        .ok_or(AuthError::MissingCredentials)?;

    if !actor.is_admin() {
        return Err(AuthError::AdminOnly);
    }

    Ok(next.run(req).await)
}

/// Creates a bearer-token middleware closure bound to a signer
///
/// Helper that captures the shared [`TokenSigner`] and returns a function
/// suitable for `axum::middleware::from_fn`.
pub fn create_auth_middleware(
    signer: Arc<TokenSigner>,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AuthError>> + Send>>
       + Clone {
    move |req, next| {
        let signer = signer.clone();
        Box::pin(bearer_auth_middleware(signer, req, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_status_codes() {
        let response = AuthError::MissingCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = AuthError::InvalidFormat.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = AuthError::InvalidToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Forbidden is a distinct terminal state from "not authenticated"
        let response = AuthError::AdminOnly.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

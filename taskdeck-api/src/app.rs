/// Application state and router builder
///
/// Defines the shared application state and builds the Axum router with all
/// routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskdeck_api::{app::{build_router, AppState}, config::Config};
/// use taskdeck_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig {
///     url: config.database.url.clone(),
///     max_connections: config.database.max_connections,
///     ..Default::default()
/// })
/// .await?;
///
/// let state = AppState::new(pool, config)?;
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskdeck_shared::auth::middleware::{create_auth_middleware, require_admin};
use taskdeck_shared::auth::token::TokenSigner;
use taskdeck_shared::repos::{PgTaskRepository, PgUserRepository};
use taskdeck_shared::services::{TaskService, UserService};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Config;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; everything
/// inside is behind an `Arc` or is itself a handle, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Process-wide token signer
    pub signer: Arc<TokenSigner>,

    /// User account service
    pub users: Arc<UserService<PgUserRepository>>,

    /// Task service
    pub tasks: Arc<TaskService<PgTaskRepository>>,
}

impl AppState {
    /// Creates the application state from a pool and configuration
    ///
    /// # Errors
    ///
    /// Fails if the token signer cannot be constructed, which happens
    /// exactly when the configured secret is empty. Treat as fatal.
    pub fn new(db: PgPool, config: Config) -> anyhow::Result<Self> {
        let signer = Arc::new(TokenSigner::new(config.auth.jwt_secret.clone())?);

        let users = Arc::new(UserService::new(
            PgUserRepository::new(db.clone()),
            config.auth.hash_cost,
        ));
        let tasks = Arc::new(TaskService::new(PgTaskRepository::new(db.clone())));

        Ok(Self {
            db,
            config: Arc::new(config),
            signer,
            users,
            tasks,
        })
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /health                      # Health check (public)
/// ├── POST /sign-up                     # Register (public)
/// ├── POST /login                       # Login (public)
/// ├── /me/                              # Authenticated; self-scoped
/// │   ├── GET    /
/// │   ├── PATCH  /rename
/// │   ├── PATCH  /password
/// │   ├── DELETE /
/// │   └── /tasks/
/// │       ├── GET    /
/// │       ├── POST   /
/// │       └── /:id   DELETE, PATCH /switch, /title, /description
/// └── /admin/                           # Authenticated + admin role
///     ├── /users/    GET, POST
///     ├── /users/:id GET, PATCH /rename, /password, /role, DELETE,
///     │              GET /tasks, POST /tasks
///     └── /tasks/    GET; /:id DELETE, PATCH /title, /description, /switch
/// ```
///
/// # Middleware Stack
///
/// The bearer authenticator wraps both subtrees; the admin subtree adds the
/// role gate inside it, so an unauthenticated request on an admin route
/// fails 401 before the gate can fail it 403.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let auth_layer = middleware::from_fn(create_auth_middleware(state.signer.clone()));

    // Public routes: no credentials involved
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/sign-up", post(routes::auth::sign_up))
        .route("/login", post(routes::auth::login));

    // Self-scoped routes: the target id is always the actor's own
    let me_routes = Router::new()
        .route("/", get(routes::users::get_me).delete(routes::users::delete_me))
        .route("/rename", patch(routes::users::rename_me))
        .route("/password", patch(routes::users::change_my_password))
        .route("/tasks", get(routes::tasks::list_my_tasks).post(routes::tasks::create_my_task))
        .route("/tasks/:id", delete(routes::tasks::delete_my_task))
        .route("/tasks/:id/switch", patch(routes::tasks::switch_my_task))
        .route("/tasks/:id/title", patch(routes::tasks::retitle_my_task))
        .route(
            "/tasks/:id/description",
            patch(routes::tasks::redescribe_my_task),
        );

    // Admin routes: target id comes from the path; the repository predicate
    // still applies but always passes for an admin actor
    let admin_routes = Router::new()
        .route(
            "/users",
            get(routes::users::list_users).post(routes::auth::sign_up),
        )
        .route(
            "/users/:id",
            get(routes::users::get_user).delete(routes::users::delete_user),
        )
        .route("/users/:id/rename", patch(routes::users::rename_user))
        .route(
            "/users/:id/password",
            patch(routes::users::change_user_password),
        )
        .route("/users/:id/role", patch(routes::users::update_user_role))
        .route(
            "/users/:id/tasks",
            get(routes::tasks::list_user_tasks).post(routes::tasks::create_user_task),
        )
        .route("/tasks", get(routes::tasks::list_all_tasks))
        .route("/tasks/:id", delete(routes::tasks::delete_task))
        .route("/tasks/:id/switch", patch(routes::tasks::switch_task))
        .route("/tasks/:id/title", patch(routes::tasks::retitle_task))
        .route(
            "/tasks/:id/description",
            patch(routes::tasks::redescribe_task),
        )
        .layer(middleware::from_fn(require_admin));

    Router::new()
        .merge(public_routes)
        .nest(
            "/me",
            me_routes.layer(auth_layer.clone()),
        )
        .nest(
            "/admin",
            admin_routes.layer(auth_layer),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Schema bootstrap
///
/// Creates the `user_role` enum and the `users` and `tasks` tables if they
/// do not exist. Run once at startup, after the pool health check; every
/// statement is idempotent so repeated starts are safe.

use sqlx::PgPool;
use tracing::info;

/// Statements applied in order at startup
const SCHEMA: &[&str] = &[
    // CREATE TYPE has no IF NOT EXISTS; swallow the duplicate_object error
    r#"
    DO $$ BEGIN
        CREATE TYPE user_role AS ENUM ('member', 'admin');
    EXCEPTION
        WHEN duplicate_object THEN NULL;
    END $$
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        role user_role NOT NULL DEFAULT 'member',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tasks (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        is_completed BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS tasks_user_id_idx ON tasks (user_id)",
];

/// Ensures the schema exists
///
/// # Errors
///
/// Returns the first statement failure; the process should treat this as
/// fatal since the application cannot run against a partial schema.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("ensuring database schema");

    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("database schema ready");
    Ok(())
}

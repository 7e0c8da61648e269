/// Resource repositories
///
/// Repository traits plus their Postgres implementations. Every operation
/// that targets a specific resource id takes the requesting [`Actor`] and
/// folds the owner-or-admin predicate into the SQL filter itself:
///
/// ```sql
/// ... WHERE id = $1 AND (owner = $2 OR $3 = 'admin')
/// ```
///
/// Authorization and data access are therefore a single atomic statement —
/// there is no window between a check and the act in which ownership could
/// change. The flip side is that an unauthorized caller observes exactly
/// what a caller of a nonexistent id observes: not found / zero rows
/// affected. That conflation is deliberate; it avoids confirming resource
/// existence to non-owners.
///
/// [`Actor`]: crate::auth::Actor

pub mod tasks;
pub mod users;

pub use tasks::{PgTaskRepository, TaskRepository};
pub use users::{PgUserRepository, UserRepository};

/// Whether a store error is a foreign-key violation (SQLSTATE 23503)
///
/// Used to surface a distinguishable condition when a task's declared owner
/// does not exist, so the service layer can translate it to a domain error
/// instead of a generic store failure.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23503"),
        _ => false,
    }
}

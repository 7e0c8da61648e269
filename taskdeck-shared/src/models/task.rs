/// Task entity
///
/// A task belongs to exactly one user for its whole lifetime; the owner is
/// fixed at creation and there is no operation that changes it. Deleting a
/// user cascades to their tasks via the foreign key.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title TEXT NOT NULL,
///     description TEXT NOT NULL,
///     is_completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel stored in place of an empty description
///
/// The task service normalizes empty input to this value; the column is
/// never stored empty.
pub const NO_DESCRIPTION: &str = "NO DESCRIPTION";

/// Task record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Store-assigned id, positive
    pub id: i64,

    /// Owning user; never changes after creation
    pub user_id: i64,

    /// Title (non-empty)
    pub title: String,

    /// Description; empty input is normalized to [`NO_DESCRIPTION`]
    pub description: String,

    /// Completion flag; toggled, not set
    pub is_completed: bool,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last mutated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a task
#[derive(Debug, Clone)]
pub struct NewTask {
    /// Owning user id; creation fails if this user does not exist
    pub user_id: i64,

    /// Title (trimmed, non-empty)
    pub title: String,

    /// Description, already normalized by the service
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_value() {
        assert_eq!(NO_DESCRIPTION, "NO DESCRIPTION");
    }

    #[test]
    fn test_task_serializes_all_fields() {
        let task = Task {
            id: 1,
            user_id: 7,
            title: "buy milk".to_string(),
            description: NO_DESCRIPTION.to_string(),
            is_completed: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&task).expect("serialize");
        assert!(json.contains("\"user_id\":7"));
        assert!(json.contains("\"is_completed\":false"));
        assert!(json.contains("NO DESCRIPTION"));
    }
}

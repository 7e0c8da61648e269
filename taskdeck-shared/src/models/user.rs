/// User entity
///
/// A user owns their own record and any number of tasks. Passwords are
/// stored only as Argon2id hashes; the plaintext never crosses the
/// service/repository boundary.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE user_role AS ENUM ('member', 'admin');
///
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     name TEXT NOT NULL,
///     password_hash TEXT NOT NULL,
///     role user_role NOT NULL DEFAULT 'member',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::Role;

/// User account record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Store-assigned id, positive, immutable
    pub id: i64,

    /// Display name
    pub name: String,

    /// Argon2id hash of the password; never serialized in responses
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Role; sign-up defaults to `member`, only the dedicated admin-gated
    /// role-update operation may change it
    pub role: Role,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last mutated (refreshed on every mutation)
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a user
///
/// Constructed by the user service after validation and hashing; the
/// repository never sees a plaintext password.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name (trimmed, non-empty)
    pub name: String,

    /// Argon2id password hash (NOT the plaintext!)
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User {
            id: 1,
            name: "alice".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role: Role::Member,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).expect("serialize");
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password_hash"));
        assert!(json.contains("alice"));
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let user = User {
            id: 1,
            name: "root".to_string(),
            password_hash: String::new(),
            role: Role::Admin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).expect("serialize");
        assert!(json.contains("\"role\":\"admin\""));
    }
}

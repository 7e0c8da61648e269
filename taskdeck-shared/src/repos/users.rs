/// User repository
///
/// Store access for user accounts. Single-user reads and writes carry the
/// requesting actor and embed the owner-or-admin predicate in the WHERE
/// clause, so an unauthorized member sees the same "not found" a truly
/// missing id produces. Role changes are the exception: they are only
/// reachable through admin-gated routes, so the statement filters on id
/// alone.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::auth::{Actor, Role};
use crate::error::Error;
use crate::models::{NewUser, User};

/// Store operations on user accounts
///
/// Kept behind a trait so services can be exercised against an in-memory
/// stub without a database.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns every user account
    async fn get_all(&self) -> Result<Vec<User>, Error>;

    /// Returns the user with the given id, if the actor may see it
    async fn get_by_id(&self, id: i64, actor: &Actor) -> Result<User, Error>;

    /// Returns the user with the given name
    ///
    /// Used for login, before any actor identity exists; not predicate
    /// filtered.
    async fn get_by_name(&self, name: &str) -> Result<User, Error>;

    /// Inserts a new account and returns its assigned id
    async fn create(&self, user: NewUser) -> Result<i64, Error>;

    /// Renames the user, if the actor may
    async fn update_name(&self, id: i64, name: &str, actor: &Actor) -> Result<(), Error>;

    /// Replaces the user's password hash, if the actor may
    async fn update_password(&self, id: i64, password_hash: &str, actor: &Actor)
        -> Result<(), Error>;

    /// Sets the user's role
    ///
    /// Admin-only at the route layer; no predicate here.
    async fn update_role(&self, id: i64, role: Role) -> Result<(), Error>;

    /// Deletes the user, if the actor may; owned tasks cascade
    async fn delete(&self, id: i64, actor: &Actor) -> Result<(), Error>;
}

/// PostgreSQL-backed user repository
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_all(&self) -> Result<Vec<User>, Error> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, password_hash, role, created_at, updated_at
             FROM users
             ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn get_by_id(&self, id: i64, actor: &Actor) -> Result<User, Error> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, password_hash, role, created_at, updated_at
             FROM users
             WHERE id = $1 AND (id = $2 OR $3 = 'admin')",
        )
        .bind(id)
        .bind(actor.id)
        .bind(actor.role)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or(Error::UserNotFound)
    }

    async fn get_by_name(&self, name: &str) -> Result<User, Error> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, password_hash, role, created_at, updated_at
             FROM users
             WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or(Error::UserNotFound)
    }

    async fn create(&self, user: NewUser) -> Result<i64, Error> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (name, password_hash)
             VALUES ($1, $2)
             RETURNING id",
        )
        .bind(&user.name)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        debug!(user_id = id, "user created");
        Ok(id)
    }

    async fn update_name(&self, id: i64, name: &str, actor: &Actor) -> Result<(), Error> {
        let result = sqlx::query(
            "UPDATE users
             SET name = $1, updated_at = NOW()
             WHERE id = $2 AND (id = $3 OR $4 = 'admin')",
        )
        .bind(name)
        .bind(id)
        .bind(actor.id)
        .bind(actor.role)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::UserNotFound);
        }
        Ok(())
    }

    async fn update_password(
        &self,
        id: i64,
        password_hash: &str,
        actor: &Actor,
    ) -> Result<(), Error> {
        let result = sqlx::query(
            "UPDATE users
             SET password_hash = $1, updated_at = NOW()
             WHERE id = $2 AND (id = $3 OR $4 = 'admin')",
        )
        .bind(password_hash)
        .bind(id)
        .bind(actor.id)
        .bind(actor.role)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::UserNotFound);
        }
        Ok(())
    }

    async fn update_role(&self, id: i64, role: Role) -> Result<(), Error> {
        let result = sqlx::query(
            "UPDATE users
             SET role = $1, updated_at = NOW()
             WHERE id = $2",
        )
        .bind(role)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RoleNotUpdated);
        }
        Ok(())
    }

    async fn delete(&self, id: i64, actor: &Actor) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1 AND (id = $2 OR $3 = 'admin')")
            .bind(id)
            .bind(actor.id)
            .bind(actor.role)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::UserNotFound);
        }

        debug!(user_id = id, "user deleted");
        Ok(())
    }
}

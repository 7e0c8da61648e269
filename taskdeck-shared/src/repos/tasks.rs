/// Task repository
///
/// Store access for tasks. Every operation on a specific task carries the
/// requesting actor and filters with
/// `(user_id = actor OR actor_role = 'admin')` inside the statement itself,
/// so ownership is enforced by the same query that reads or mutates the row.
/// Zero rows affected on a mutation is reported as the operation-specific
/// error, never silently swallowed.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::auth::Actor;
use crate::error::Error;
use crate::models::{NewTask, Task};
use crate::repos::is_foreign_key_violation;

/// Store operations on tasks
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns every task in the store
    async fn get_all(&self) -> Result<Vec<Task>, Error>;

    /// Returns the tasks owned by the given user, if the actor may see them
    async fn list_by_owner(&self, owner_id: i64, actor: &Actor) -> Result<Vec<Task>, Error>;

    /// Returns the task with the given id, if the actor may see it
    async fn get_by_id(&self, id: i64, actor: &Actor) -> Result<Task, Error>;

    /// Inserts a new task and returns its assigned id
    ///
    /// Fails with [`Error::ForeignKeyViolation`] when the declared owner
    /// does not exist.
    async fn create(&self, task: NewTask) -> Result<i64, Error>;

    /// Replaces the task's title, if the actor may
    async fn update_title(&self, id: i64, title: &str, actor: &Actor) -> Result<(), Error>;

    /// Replaces the task's description, if the actor may
    async fn update_description(
        &self,
        id: i64,
        description: &str,
        actor: &Actor,
    ) -> Result<(), Error>;

    /// Flips the task's completion flag, if the actor may
    async fn toggle_status(&self, id: i64, actor: &Actor) -> Result<(), Error>;

    /// Deletes the task, if the actor may
    async fn delete(&self, id: i64, actor: &Actor) -> Result<(), Error>;
}

/// PostgreSQL-backed task repository
#[derive(Debug, Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn get_all(&self) -> Result<Vec<Task>, Error> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, user_id, title, description, is_completed, created_at, updated_at
             FROM tasks
             ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn list_by_owner(&self, owner_id: i64, actor: &Actor) -> Result<Vec<Task>, Error> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, user_id, title, description, is_completed, created_at, updated_at
             FROM tasks
             WHERE user_id = $1 AND (user_id = $2 OR $3 = 'admin')
             ORDER BY id",
        )
        .bind(owner_id)
        .bind(actor.id)
        .bind(actor.role)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn get_by_id(&self, id: i64, actor: &Actor) -> Result<Task, Error> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, user_id, title, description, is_completed, created_at, updated_at
             FROM tasks
             WHERE id = $1 AND (user_id = $2 OR $3 = 'admin')",
        )
        .bind(id)
        .bind(actor.id)
        .bind(actor.role)
        .fetch_optional(&self.pool)
        .await?;

        task.ok_or(Error::TaskNotFound)
    }

    async fn create(&self, task: NewTask) -> Result<i64, Error> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO tasks (user_id, title, description)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(task.user_id)
        .bind(&task.title)
        .bind(&task.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if is_foreign_key_violation(&err) {
                Error::ForeignKeyViolation
            } else {
                Error::Database(err)
            }
        })?;

        debug!(task_id = id, user_id = task.user_id, "task created");
        Ok(id)
    }

    async fn update_title(&self, id: i64, title: &str, actor: &Actor) -> Result<(), Error> {
        let result = sqlx::query(
            "UPDATE tasks
             SET title = $1, updated_at = NOW()
             WHERE id = $2 AND (user_id = $3 OR $4 = 'admin')",
        )
        .bind(title)
        .bind(id)
        .bind(actor.id)
        .bind(actor.role)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::TitleNotUpdated);
        }
        Ok(())
    }

    async fn update_description(
        &self,
        id: i64,
        description: &str,
        actor: &Actor,
    ) -> Result<(), Error> {
        let result = sqlx::query(
            "UPDATE tasks
             SET description = $1, updated_at = NOW()
             WHERE id = $2 AND (user_id = $3 OR $4 = 'admin')",
        )
        .bind(description)
        .bind(id)
        .bind(actor.id)
        .bind(actor.role)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::DescriptionNotUpdated);
        }
        Ok(())
    }

    async fn toggle_status(&self, id: i64, actor: &Actor) -> Result<(), Error> {
        // The flip happens in the store, so concurrent toggles serialize on
        // the row instead of racing on a read-modify-write.
        let result = sqlx::query(
            "UPDATE tasks
             SET is_completed = NOT is_completed, updated_at = NOW()
             WHERE id = $1 AND (user_id = $2 OR $3 = 'admin')",
        )
        .bind(id)
        .bind(actor.id)
        .bind(actor.role)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::StatusNotSwitched);
        }
        Ok(())
    }

    async fn delete(&self, id: i64, actor: &Actor) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND (user_id = $2 OR $3 = 'admin')")
            .bind(id)
            .bind(actor.id)
            .bind(actor.role)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::TaskNotDeleted);
        }

        debug!(task_id = id, "task deleted");
        Ok(())
    }
}

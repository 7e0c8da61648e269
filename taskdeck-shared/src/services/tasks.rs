/// Task service
///
/// Task lifecycle on top of the repository: creation with description
/// normalization, field updates, completion toggling and deletion. The
/// ownership rule itself lives in the repository queries; this layer only
/// validates inputs and translates repository signals into domain terms.

use tracing::{info, instrument};

use crate::auth::Actor;
use crate::error::Error;
use crate::models::{NewTask, Task, NO_DESCRIPTION};
use crate::repos::TaskRepository;
use crate::services::validate_id;

/// Task operations
#[derive(Debug, Clone)]
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns every task in the store (admin listing)
    pub async fn list_tasks(&self) -> Result<Vec<Task>, Error> {
        self.repo.get_all().await
    }

    /// Returns the tasks owned by one user, subject to the owner-or-admin
    /// rule
    pub async fn tasks_for_user(&self, owner_id: i64, actor: &Actor) -> Result<Vec<Task>, Error> {
        validate_id(owner_id)?;
        self.repo.list_by_owner(owner_id, actor).await
    }

    /// Returns a single task, subject to the owner-or-admin rule
    pub async fn get_task(&self, id: i64, actor: &Actor) -> Result<Task, Error> {
        validate_id(id)?;
        self.repo.get_by_id(id, actor).await
    }

    /// Creates a task owned by `user_id` and returns its id
    ///
    /// The title is trimmed and must be non-empty. An empty description is
    /// stored as the [`NO_DESCRIPTION`] sentinel. A nonexistent owner is
    /// reported as [`Error::NoSuchUser`], translated from the store's
    /// foreign-key rejection.
    #[instrument(skip(self, title, description))]
    pub async fn create_task(
        &self,
        user_id: i64,
        title: &str,
        description: &str,
    ) -> Result<i64, Error> {
        validate_id(user_id)?;
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::EmptyTitle);
        }

        let description = normalize_description(description);
        let id = self
            .repo
            .create(NewTask {
                user_id,
                title: title.to_string(),
                description,
            })
            .await
            .map_err(|err| match err {
                Error::ForeignKeyViolation => Error::NoSuchUser,
                other => other,
            })?;

        info!(task_id = id, user_id, "task created");
        Ok(id)
    }

    /// Replaces a task's title, subject to the owner-or-admin rule
    pub async fn update_title(&self, id: i64, title: &str, actor: &Actor) -> Result<(), Error> {
        validate_id(id)?;
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::EmptyTitle);
        }
        self.repo.update_title(id, title, actor).await
    }

    /// Replaces a task's description, subject to the owner-or-admin rule
    ///
    /// Empty input resets the description to the sentinel rather than
    /// storing an empty string.
    pub async fn update_description(
        &self,
        id: i64,
        description: &str,
        actor: &Actor,
    ) -> Result<(), Error> {
        validate_id(id)?;
        let description = normalize_description(description);
        self.repo.update_description(id, &description, actor).await
    }

    /// Flips a task's completion flag, subject to the owner-or-admin rule
    pub async fn toggle_status(&self, id: i64, actor: &Actor) -> Result<(), Error> {
        validate_id(id)?;
        self.repo.toggle_status(id, actor).await
    }

    /// Deletes a task, subject to the owner-or-admin rule
    pub async fn delete_task(&self, id: i64, actor: &Actor) -> Result<(), Error> {
        validate_id(id)?;
        self.repo.delete(id, actor).await
    }
}

fn normalize_description(description: &str) -> String {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        NO_DESCRIPTION.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    /// In-memory stub holding at most one task, recording calls
    #[derive(Default)]
    struct StubTaskRepo {
        calls: Mutex<Vec<&'static str>>,
        task: Mutex<Option<Task>>,
        /// When set, `create` fails with a foreign-key violation
        missing_owner: bool,
    }

    impl StubTaskRepo {
        fn record(&self, name: &'static str) {
            self.calls.lock().unwrap().push(name);
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TaskRepository for StubTaskRepo {
        async fn get_all(&self) -> Result<Vec<Task>, Error> {
            self.record("get_all");
            Ok(self.task.lock().unwrap().iter().cloned().collect())
        }

        async fn list_by_owner(&self, _owner_id: i64, _actor: &Actor) -> Result<Vec<Task>, Error> {
            self.record("list_by_owner");
            Ok(Vec::new())
        }

        async fn get_by_id(&self, _id: i64, _actor: &Actor) -> Result<Task, Error> {
            self.record("get_by_id");
            self.task.lock().unwrap().clone().ok_or(Error::TaskNotFound)
        }

        async fn create(&self, task: NewTask) -> Result<i64, Error> {
            self.record("create");
            if self.missing_owner {
                return Err(Error::ForeignKeyViolation);
            }
            *self.task.lock().unwrap() = Some(Task {
                id: 1,
                user_id: task.user_id,
                title: task.title,
                description: task.description,
                is_completed: false,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            });
            Ok(1)
        }

        async fn update_title(&self, _id: i64, _title: &str, _actor: &Actor) -> Result<(), Error> {
            self.record("update_title");
            Ok(())
        }

        async fn update_description(
            &self,
            _id: i64,
            _description: &str,
            _actor: &Actor,
        ) -> Result<(), Error> {
            self.record("update_description");
            Ok(())
        }

        async fn toggle_status(&self, _id: i64, _actor: &Actor) -> Result<(), Error> {
            self.record("toggle_status");
            if let Some(task) = self.task.lock().unwrap().as_mut() {
                task.is_completed = !task.is_completed;
                return Ok(());
            }
            Err(Error::StatusNotSwitched)
        }

        async fn delete(&self, _id: i64, _actor: &Actor) -> Result<(), Error> {
            self.record("delete");
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_invalid_id_fails_before_store() {
        let service = TaskService::new(StubTaskRepo::default());
        let actor = Actor::new(1, Role::Admin);

        assert!(matches!(
            service.get_task(0, &actor).await,
            Err(Error::InvalidId)
        ));
        assert!(matches!(
            service.toggle_status(-3, &actor).await,
            Err(Error::InvalidId)
        ));
        assert!(matches!(
            service.create_task(0, "title", "").await,
            Err(Error::InvalidId)
        ));

        assert!(service.repo.calls().is_empty(), "store must not be touched");
    }

    #[tokio::test]
    async fn test_create_normalizes_empty_description() {
        let service = TaskService::new(StubTaskRepo::default());

        service.create_task(7, "buy milk", "   ").await.unwrap();
        let stored = service.repo.task.lock().unwrap().clone().unwrap();
        assert_eq!(stored.description, NO_DESCRIPTION);

        service.create_task(7, "buy milk", " 2% ").await.unwrap();
        let stored = service.repo.task.lock().unwrap().clone().unwrap();
        assert_eq!(stored.description, "2%");
    }

    #[tokio::test]
    async fn test_create_rejects_empty_title() {
        let service = TaskService::new(StubTaskRepo::default());

        assert!(matches!(
            service.create_task(7, "   ", "desc").await,
            Err(Error::EmptyTitle)
        ));
        assert!(service.repo.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_for_missing_owner_reports_no_such_user() {
        let repo = StubTaskRepo {
            missing_owner: true,
            ..Default::default()
        };
        let service = TaskService::new(repo);

        assert!(matches!(
            service.create_task(999, "title", "").await,
            Err(Error::NoSuchUser)
        ));
    }

    #[tokio::test]
    async fn test_double_toggle_restores_status() {
        let service = TaskService::new(StubTaskRepo::default());
        let actor = Actor::new(7, Role::Member);

        service.create_task(7, "buy milk", "").await.unwrap();
        let before = service.repo.task.lock().unwrap().clone().unwrap();

        service.toggle_status(1, &actor).await.unwrap();
        let flipped = service.repo.task.lock().unwrap().clone().unwrap();
        assert_ne!(before.is_completed, flipped.is_completed);

        service.toggle_status(1, &actor).await.unwrap();
        let restored = service.repo.task.lock().unwrap().clone().unwrap();
        assert_eq!(before.is_completed, restored.is_completed);
    }
}

/// User service
///
/// Account lifecycle: sign-up, login verification, renames, password
/// changes, role changes and deletion. Plaintext passwords exist only inside
/// this module's call frames; everything below it sees PHC hash strings.

use tracing::{info, instrument};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::{Actor, Role};
use crate::error::Error;
use crate::models::{NewUser, User};
use crate::repos::UserRepository;
use crate::services::validate_id;

/// Minimum password length in characters (not bytes)
pub const MIN_PASSWORD_CHARS: usize = 6;

/// User account operations
#[derive(Debug, Clone)]
pub struct UserService<R: UserRepository> {
    repo: R,
    hash_cost: u32,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a service with the given repository and Argon2 time cost
    pub fn new(repo: R, hash_cost: u32) -> Self {
        Self { repo, hash_cost }
    }

    /// Returns every user account (admin listing)
    pub async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repo.get_all().await
    }

    /// Returns a single user, subject to the owner-or-admin rule
    pub async fn get_user(&self, id: i64, actor: &Actor) -> Result<User, Error> {
        validate_id(id)?;
        self.repo.get_by_id(id, actor).await
    }

    /// Registers a new account and returns its id
    ///
    /// The name is trimmed and must be non-empty; the password must be at
    /// least [`MIN_PASSWORD_CHARS`] characters. The stored role is always
    /// `member` — there is no privileged sign-up path.
    #[instrument(skip(self, password))]
    pub async fn sign_up(&self, name: &str, password: &str) -> Result<i64, Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(Error::PasswordTooShort);
        }

        let password_hash = hash_password(password, self.hash_cost)?;
        let id = self
            .repo
            .create(NewUser {
                name: name.to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = id, "user signed up");
        Ok(id)
    }

    /// Verifies a name/password pair and returns the account
    ///
    /// An unknown name and a wrong password both fail with
    /// [`Error::InvalidCredentials`]; the caller cannot tell which occurred.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, name: &str, password: &str) -> Result<User, Error> {
        let user = self.repo.get_by_name(name).await.map_err(|err| match err {
            Error::UserNotFound => Error::InvalidCredentials,
            other => other,
        })?;

        if !verify_password(password, &user.password_hash) {
            return Err(Error::InvalidCredentials);
        }

        Ok(user)
    }

    /// Renames a user, subject to the owner-or-admin rule
    pub async fn rename(&self, id: i64, name: &str, actor: &Actor) -> Result<(), Error> {
        validate_id(id)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        self.repo.update_name(id, name, actor).await
    }

    /// Changes a user's password, subject to the owner-or-admin rule
    ///
    /// Requires the current password, verifies it against the stored hash,
    /// and rejects a new password identical to the old one. Existing session
    /// tokens are not invalidated; they expire on their own schedule.
    #[instrument(skip(self, old_password, new_password))]
    pub async fn change_password(
        &self,
        id: i64,
        old_password: &str,
        new_password: &str,
        actor: &Actor,
    ) -> Result<(), Error> {
        validate_id(id)?;
        if old_password.chars().count() < MIN_PASSWORD_CHARS
            || new_password.chars().count() < MIN_PASSWORD_CHARS
        {
            return Err(Error::PasswordTooShort);
        }
        if old_password == new_password {
            return Err(Error::PasswordUnchanged);
        }

        // The fetch runs under the same predicate as the update, so an
        // unauthorized actor fails here with "not found" and never reaches
        // the verification step.
        let user = self.repo.get_by_id(id, actor).await?;
        if !verify_password(old_password, &user.password_hash) {
            return Err(Error::OldPasswordIncorrect);
        }

        let password_hash = hash_password(new_password, self.hash_cost)?;
        self.repo.update_password(id, &password_hash, actor).await?;

        info!(user_id = id, "password changed");
        Ok(())
    }

    /// Sets a user's role
    ///
    /// Reachable only through admin-gated routes; the repository applies no
    /// ownership predicate here.
    pub async fn update_role(&self, id: i64, role: Role) -> Result<(), Error> {
        validate_id(id)?;
        self.repo.update_role(id, role).await
    }

    /// Deletes a user, subject to the owner-or-admin rule
    ///
    /// Self-deletion is permitted; the account's tasks cascade away with it.
    pub async fn delete(&self, id: i64, actor: &Actor) -> Result<(), Error> {
        validate_id(id)?;
        self.repo.delete(id, actor).await
    }
}

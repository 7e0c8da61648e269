/// Domain error taxonomy
///
/// Every repository and service operation returns this error type. The
/// variants are deliberately fine-grained on the mutation side: a conditional
/// `UPDATE`/`DELETE` whose filter (existence AND authorization) matched no row
/// reports a field-specific "not updated" condition, because zero rows
/// affected is the only feedback the store gives us.
///
/// Note that "not found" variants cover both true absence and unauthorized
/// access. The ownership check is folded into the query filter, so the two
/// cases are indistinguishable by design — a non-owner probing for a resource
/// learns nothing about whether it exists.
use crate::auth::password::PasswordError;
use crate::auth::token::TokenError;

/// Unified error type for repositories and services
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Identifier was zero or negative
    #[error("id must be greater than 0")]
    InvalidId,

    /// User name was empty after trimming
    #[error("name must not be empty")]
    EmptyName,

    /// Task title was empty after trimming
    #[error("title must not be empty")]
    EmptyTitle,

    /// Password shorter than the 6-character minimum
    #[error("password must be at least 6 characters")]
    PasswordTooShort,

    /// New password equals the old one
    #[error("new password must be different from the old password")]
    PasswordUnchanged,

    /// Supplied old password does not match the stored hash
    #[error("old password is incorrect")]
    OldPasswordIncorrect,

    /// Login failed; unknown name and wrong password are indistinguishable
    #[error("invalid name or password")]
    InvalidCredentials,

    /// User absent, or the actor may not access it
    #[error("user not found")]
    UserNotFound,

    /// Task absent, or the actor may not access it
    #[error("task not found")]
    TaskNotFound,

    /// Title update matched no row
    #[error("task title was not updated")]
    TitleNotUpdated,

    /// Description update matched no row
    #[error("task description was not updated")]
    DescriptionNotUpdated,

    /// Completion toggle matched no row
    #[error("task status was not switched")]
    StatusNotSwitched,

    /// Delete matched no row
    #[error("task was not deleted")]
    TaskNotDeleted,

    /// Role update matched no row
    #[error("user role was not updated")]
    RoleNotUpdated,

    /// A foreign-key constraint rejected the write (repository-level signal)
    #[error("referenced row does not exist")]
    ForeignKeyViolation,

    /// Task creation referenced a nonexistent owner (domain-level signal)
    #[error("user with this id does not exist")]
    NoSuchUser,

    /// Password hashing failure (internal, unexpected)
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Token issuance/verification failure
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Store-level failure (internal, unexpected)
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_condition() {
        assert_eq!(Error::InvalidId.to_string(), "id must be greater than 0");
        assert_eq!(Error::UserNotFound.to_string(), "user not found");
        assert_eq!(
            Error::TitleNotUpdated.to_string(),
            "task title was not updated"
        );
        assert_eq!(
            Error::NoSuchUser.to_string(),
            "user with this id does not exist"
        );
    }

    #[test]
    fn test_database_error_does_not_leak_into_variant_name() {
        let err = Error::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, Error::Database(_)));
    }
}

/// Domain services
///
/// Input validation and orchestration on top of the repositories. Services
/// are generic over their repository trait so they can be tested against
/// in-memory stubs; the binary instantiates them with the Postgres
/// implementations.
///
/// Validation happens before any store call: an operation given an invalid
/// id or an empty required field fails without touching the repository.

pub mod tasks;
pub mod users;

pub use tasks::TaskService;
pub use users::UserService;

use crate::error::Error;

/// Rejects non-positive ids before they reach the store
pub(crate) fn validate_id(id: i64) -> Result<(), Error> {
    if id <= 0 {
        return Err(Error::InvalidId);
    }
    Ok(())
}

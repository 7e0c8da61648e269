/// Domain entities and their input shapes
///
/// - `user`: User accounts (name, password hash, role)
/// - `task`: Tasks owned by users

pub mod task;
pub mod user;

pub use task::{NewTask, Task, NO_DESCRIPTION};
pub use user::{NewUser, User};

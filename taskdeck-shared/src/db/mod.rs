/// Database utilities
///
/// - `pool`: Connection pool creation and health checking
/// - `schema`: Idempotent schema bootstrap run at startup

pub mod pool;
pub mod schema;

pub mod error;
pub mod repositories;

pub use error::{DbError, Result};
pub use repositories::concert_repository::ConcertRepository;
pub use repositories::user_repository::{PagedUsers, UserFilters, UserRepository, UserUpdate};

/// Embedded schema migrations, run by the server at startup and by tests
/// against in-memory databases.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

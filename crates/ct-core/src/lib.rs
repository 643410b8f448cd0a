pub mod error;
pub mod models;

pub use error::{CoreError, Result};
pub use models::concert::Concert;
pub use models::concert_status::ConcertStatus;
pub use models::role::Role;
pub use models::user::User;

#[cfg(test)]
mod tests;

use chrono::{DateTime, Utc};
use ct_core::User;

/// Build a user with a deterministic creation time so ordering tests are
/// not at the mercy of the wall clock.
pub fn user_created_at(external_id: &str, email: &str, created_at: DateTime<Utc>) -> User {
    let mut user = User::new(external_id.to_string(), email.to_string(), None);
    user.created_at = created_at;
    user.updated_at = created_at;
    user
}

pub fn user(external_id: &str, email: &str) -> User {
    User::new(external_id.to_string(), email.to_string(), None)
}

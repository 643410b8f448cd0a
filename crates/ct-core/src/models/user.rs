//! User entity - local account synchronized with the external identity provider.

use crate::Role;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A local user record.
///
/// `external_id` is the identity provider's subject (`provider|subject`) and
/// uniquely identifies the account, as does `email`. Users are created the
/// first time a subject authenticates and are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub external_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the default role.
    pub fn new(external_id: String, email: String, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            external_id,
            email,
            display_name,
            role: Role::User,
            created_at: now,
            updated_at: now,
        }
    }
}

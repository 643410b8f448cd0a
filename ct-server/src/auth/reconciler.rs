//! Token-to-account reconciliation.
//!
//! Every authenticated request maps its verified claims onto a local user
//! row: created on first sight, refreshed when the token's profile claims
//! drift from what is stored. The local `role` column is never written
//! here; role management stays an administrative concern.

use crate::api::error::{ApiError, Result as ApiResult};

use ct_auth::Claims;
use ct_core::User;
use ct_db::{DbError, UserRepository, UserUpdate};

use sqlx::SqlitePool;

/// Profile attributes machine identities are pinned to. A
/// client-credentials subject carries no profile claims of its own.
const SERVICE_ACCOUNT_EMAIL: &str = "api-service@concert-tickets.com";
const SERVICE_ACCOUNT_NAME: &str = "API Service";

/// What the token says the account should look like.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DesiredProfile {
    email: String,
    display_name: Option<String>,
}

pub struct Reconciler {
    repository: UserRepository,
    /// Namespace prefix for custom claims
    audience: String,
}

impl Reconciler {
    pub fn new(pool: SqlitePool, audience: String) -> Self {
        Self {
            repository: UserRepository::new(pool),
            audience,
        }
    }

    /// Map verified claims to a local user, creating or refreshing the
    /// row as needed.
    ///
    /// Concurrent first logins of the same subject race on the insert;
    /// the loser's unique violation is treated as "someone else created
    /// it" and resolved with a re-fetch, so exactly one row ever exists
    /// per subject.
    pub async fn reconcile(&self, claims: &Claims) -> ApiResult<User> {
        let desired = self.desired_profile(claims);

        if let Some(existing) = self.repository.find_by_external_id(&claims.sub).await? {
            return Ok(self.refresh(existing, &desired).await?);
        }

        let user = User::new(
            claims.sub.clone(),
            desired.email.clone(),
            desired.display_name.clone(),
        );

        match self.repository.create(&user).await {
            Ok(()) => {
                log::info!("User created on first login: {}", user.external_id);
                Ok(user)
            }
            Err(DbError::UniqueViolation { .. }) => {
                // Usually a lost first-login race: the winner's row is
                // ours. When the re-fetch misses, the collision was on a
                // different column (a second machine client hitting the
                // shared service-account email) and the caller sees it.
                match self.repository.find_by_external_id(&claims.sub).await? {
                    Some(existing) => Ok(self.refresh(existing, &desired).await?),
                    None => Err(ApiError::conflict("User already exists")),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Derive the profile the token asserts.
    ///
    /// Human subjects: email straight from the token, display name from
    /// the audience-namespaced claim with `name` as fallback. Machine
    /// subjects get a fixed service-account profile.
    fn desired_profile(&self, claims: &Claims) -> DesiredProfile {
        if claims.is_machine() {
            return DesiredProfile {
                email: SERVICE_ACCOUNT_EMAIL.to_string(),
                display_name: Some(SERVICE_ACCOUNT_NAME.to_string()),
            };
        }

        let email = claims.email.clone().unwrap_or_default();

        let display_name = claims
            .namespaced(&self.audience, "name")
            .map(str::to_string)
            .or_else(|| claims.name.clone())
            .filter(|name| !name.is_empty());

        DesiredProfile {
            email,
            display_name,
        }
    }

    /// Write back only what actually drifted; an unchanged profile is a
    /// pure read and leaves `updated_at` alone.
    async fn refresh(&self, existing: User, desired: &DesiredProfile) -> ApiResult<User> {
        let mut update = UserUpdate::default();

        if !desired.email.is_empty() && desired.email != existing.email {
            update.email = Some(desired.email.clone());
        }
        if desired.display_name != existing.display_name {
            update.display_name = Some(desired.display_name.clone());
        }

        if update.is_empty() {
            return Ok(existing);
        }

        log::debug!("Refreshing profile for {}", existing.external_id);

        match self.repository.update(existing.id, &update).await {
            Ok(Some(user)) => Ok(user),
            // Row vanished or the new email collided with another account;
            // the stored profile stays authoritative for this request
            Ok(None) => Ok(existing),
            Err(DbError::UniqueViolation { .. }) => Ok(existing),
            Err(e) => Err(e.into()),
        }
    }
}

//! Concert entity.

use crate::ConcertStatus;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scheduled concert. Deletion is logical: `deleted_at` marks the row
/// as removed while keeping it fetchable by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concert {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub max_seats: i64,
    pub status: ConcertStatus,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Concert {
    pub fn new(
        title: String,
        location: String,
        date: DateTime<Utc>,
        max_seats: i64,
        status: ConcertStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            location,
            date,
            max_seats,
            status,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    /// Check if concert is deleted (soft delete)
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

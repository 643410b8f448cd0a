use ct_core::{Concert, ConcertStatus};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Concert representation returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcertDto {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub max_seats: i64,
    pub status: ConcertStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Concert> for ConcertDto {
    fn from(concert: Concert) -> Self {
        Self {
            id: concert.id,
            title: concert.title,
            location: concert.location,
            date: concert.date,
            max_seats: concert.max_seats,
            status: concert.status,
            created_at: concert.created_at,
            deleted_at: concert.deleted_at,
        }
    }
}

//! Concert repository. Deletion is logical: rows keep their data and stay
//! fetchable by id after being marked deleted.

use crate::{DbError, Result as DbErrorResult};

use ct_core::{Concert, ConcertStatus};

use std::panic::Location;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

pub struct ConcertRepository {
    pool: SqlitePool,
}

impl ConcertRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, concert: &Concert) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO concerts (id, title, location, date, max_seats, status, created_at, deleted_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(concert.id.to_string())
        .bind(&concert.title)
        .bind(&concert.location)
        .bind(concert.date.timestamp())
        .bind(concert.max_seats)
        .bind(concert.status.as_str())
        .bind(concert.created_at.timestamp())
        .bind(concert.deleted_at.map(|dt| dt.timestamp()))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// True when a non-deleted concert is already booked at this location
    /// and time.
    pub async fn exists_at(&self, location: &str, date: DateTime<Utc>) -> DbErrorResult<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"
                SELECT COUNT(*) FROM concerts
                WHERE location = ? AND date = ? AND deleted_at IS NULL
            "#,
        )
        .bind(location)
        .bind(date.timestamp())
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Fetch by id, including soft-deleted rows.
    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<Concert>> {
        let row = sqlx::query(
            r#"
                SELECT id, title, location, date, max_seats, status, created_at, deleted_at
                FROM concerts
                WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_concert).transpose()
    }

    /// All non-deleted concerts, soonest first.
    pub async fn find_all(&self) -> DbErrorResult<Vec<Concert>> {
        let rows = sqlx::query(
            r#"
                SELECT id, title, location, date, max_seats, status, created_at, deleted_at
                FROM concerts
                WHERE deleted_at IS NULL
                ORDER BY date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_concert).collect()
    }

    /// Mark a concert deleted and return the marked row, or `None` when
    /// the id does not exist.
    pub async fn soft_delete(&self, id: Uuid) -> DbErrorResult<Option<Concert>> {
        let row = sqlx::query(
            r#"
                UPDATE concerts SET deleted_at = ?
                WHERE id = ?
                RETURNING id, title, location, date, max_seats, status, created_at, deleted_at
            "#,
        )
        .bind(Utc::now().timestamp())
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_concert).transpose()
    }
}

#[track_caller]
fn row_to_concert(row: &SqliteRow) -> DbErrorResult<Concert> {
    let id: String = row.try_get("id")?;
    let status: String = row.try_get("status")?;
    let date: i64 = row.try_get("date")?;
    let created_at: i64 = row.try_get("created_at")?;
    let deleted_at: Option<i64> = row.try_get("deleted_at")?;

    Ok(Concert {
        id: Uuid::parse_str(&id).map_err(|e| DbError::Decode {
            message: format!("Invalid UUID in concerts.id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        title: row.try_get("title")?,
        location: row.try_get("location")?,
        date: DateTime::from_timestamp(date, 0).ok_or_else(|| DbError::Decode {
            message: "Invalid timestamp in concerts.date".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?,
        max_seats: row.try_get("max_seats")?,
        status: ConcertStatus::from_str(&status).map_err(|e| DbError::Decode {
            message: format!("Invalid status in concerts.status: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        created_at: DateTime::from_timestamp(created_at, 0).ok_or_else(|| DbError::Decode {
            message: "Invalid timestamp in concerts.created_at".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?,
        deleted_at: deleted_at.and_then(|ts| DateTime::from_timestamp(ts, 0)),
    })
}

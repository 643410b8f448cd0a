//! User directory: persistence-backed lookup, update and listing of local
//! user accounts.
//!
//! This repository exclusively owns the `users` table. There is no delete:
//! accounts created by a first login stay for good.

use crate::{DbError, Result as DbErrorResult};

use ct_core::{Role, User};

use std::panic::Location;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;

/// Listing filters. `search` is a case-insensitive substring match against
/// email or display name.
#[derive(Debug, Clone)]
pub struct UserFilters {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
}

impl Default for UserFilters {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: None,
        }
    }
}

/// One page of the directory plus pagination bookkeeping.
#[derive(Debug, Clone)]
pub struct PagedUsers {
    pub users: Vec<User>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// Partial update. `display_name` distinguishes "leave alone" (`None`)
/// from "set to NULL" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub display_name: Option<Option<String>>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.display_name.is_none()
    }
}

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user. Uniqueness of `external_id` and `email` is
    /// enforced by the schema; a violation surfaces as
    /// [`DbError::UniqueViolation`].
    pub async fn create(&self, user: &User) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO users (id, external_id, email, display_name, role, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.external_id)
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(user.role.as_str())
        .bind(user.created_at.timestamp())
        .bind(user.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(
            r#"
                SELECT id, external_id, email, display_name, role, created_at, updated_at
                FROM users
                WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    pub async fn find_by_external_id(&self, external_id: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(
            r#"
                SELECT id, external_id, email, display_name, role, created_at, updated_at
                FROM users
                WHERE external_id = ?
            "#,
        )
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    /// Apply a partial update and return the resulting row, or `None` when
    /// the id does not exist.
    ///
    /// Update and fetch are one statement (`UPDATE .. RETURNING`), so a
    /// concurrent writer can never be observed between them. An empty
    /// update degenerates to a plain read.
    pub async fn update(&self, id: Uuid, update: &UserUpdate) -> DbErrorResult<Option<User>> {
        if update.is_empty() {
            return self.find_by_id(id).await;
        }

        let set_display_name = update.display_name.is_some();
        let display_name = update.display_name.clone().flatten();

        let row = sqlx::query(
            r#"
                UPDATE users SET
                    email = COALESCE(?, email),
                    display_name = CASE WHEN ? THEN ? ELSE display_name END,
                    updated_at = ?
                WHERE id = ?
                RETURNING id, external_id, email, display_name, role, created_at, updated_at
            "#,
        )
        .bind(&update.email)
        .bind(set_display_name)
        .bind(display_name)
        .bind(Utc::now().timestamp())
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    /// Page through the directory, most recently created first. A page
    /// past the end yields an empty list, not an error.
    pub async fn list_paged(&self, filters: &UserFilters) -> DbErrorResult<PagedUsers> {
        let page = filters.page.max(1);
        let limit = filters.limit.max(1);
        let offset = i64::from(page - 1) * i64::from(limit);

        let pattern = filters
            .search
            .as_deref()
            .map(|s| format!("%{}%", escape_like(s)));

        let total: i64 = sqlx::query_scalar(
            r#"
                SELECT COUNT(*) FROM users
                WHERE ?1 IS NULL
                   OR email LIKE ?1 ESCAPE '\'
                   OR display_name LIKE ?1 ESCAPE '\'
            "#,
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query(
            r#"
                SELECT id, external_id, email, display_name, role, created_at, updated_at
                FROM users
                WHERE ?1 IS NULL
                   OR email LIKE ?1 ESCAPE '\'
                   OR display_name LIKE ?1 ESCAPE '\'
                ORDER BY created_at DESC, id DESC
                LIMIT ?2 OFFSET ?3
            "#,
        )
        .bind(&pattern)
        .bind(i64::from(limit))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let users = rows
            .iter()
            .map(row_to_user)
            .collect::<DbErrorResult<Vec<_>>>()?;

        let total = total.max(0) as u64;
        let total_pages = total.div_ceil(u64::from(limit)) as u32;

        Ok(PagedUsers {
            users,
            total,
            page,
            limit,
            total_pages,
        })
    }
}

/// Escape LIKE wildcards so a search term matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[track_caller]
fn row_to_user(row: &SqliteRow) -> DbErrorResult<User> {
    let id: String = row.try_get("id")?;
    let role: String = row.try_get("role")?;
    let created_at: i64 = row.try_get("created_at")?;
    let updated_at: i64 = row.try_get("updated_at")?;

    Ok(User {
        id: Uuid::parse_str(&id).map_err(|e| DbError::Decode {
            message: format!("Invalid UUID in users.id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        external_id: row.try_get("external_id")?,
        email: row.try_get("email")?,
        display_name: row.try_get("display_name")?,
        role: Role::from_str(&role).map_err(|e| DbError::Decode {
            message: format!("Invalid role in users.role: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        created_at: DateTime::from_timestamp(created_at, 0).ok_or_else(|| DbError::Decode {
            message: "Invalid timestamp in users.created_at".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?,
        updated_at: DateTime::from_timestamp(updated_at, 0).ok_or_else(|| DbError::Decode {
            message: "Invalid timestamp in users.updated_at".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?,
    })
}

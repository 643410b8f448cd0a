use crate::api::error::{ApiError, Result as ApiResult};

use ct_core::{Concert, ConcertStatus};

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Deserialize;

const TITLE_MAX: usize = 255;

/// Body of `POST /api/v1/concerts`.
///
/// Fields stay loosely typed so every violation can be reported in one
/// response instead of bouncing on the first deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConcertRequest {
    pub title: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub max_seats: Option<i64>,
    pub status: Option<String>,
}

impl CreateConcertRequest {
    /// Validate and build the concert to insert. All violations are
    /// collected, not just the first.
    pub fn into_concert(self) -> ApiResult<Concert> {
        let mut violations = Vec::new();

        let title = match self.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() && t.chars().count() <= TITLE_MAX => Some(t.to_string()),
            _ => {
                violations.push("title is required and must be at most 255 characters");
                None
            }
        };

        let location = match self.location.as_deref().map(str::trim) {
            Some(l) if !l.is_empty() => Some(l.to_string()),
            _ => {
                violations.push("location is required");
                None
            }
        };

        let date = match self.date.as_deref() {
            Some(raw) => match DateTime::parse_from_rfc3339(raw) {
                Ok(dt) => Some(dt.with_timezone(&Utc)),
                Err(_) => {
                    violations.push("date must be a valid ISO 8601 timestamp");
                    None
                }
            },
            None => {
                violations.push("date is required");
                None
            }
        };

        let max_seats = match self.max_seats {
            Some(seats) if seats >= 1 => Some(seats),
            _ => {
                violations.push("maxSeats must be a positive integer");
                None
            }
        };

        let status = match self.status.as_deref() {
            None => Some(ConcertStatus::default()),
            Some(raw) => match ConcertStatus::from_str(raw) {
                Ok(status) => Some(status),
                Err(_) => {
                    violations.push("status must be one of scheduled, cancelled, sold_out");
                    None
                }
            },
        };

        if !violations.is_empty() {
            return Err(ApiError::validation(violations.join(", ")));
        }

        // All fields verified present above
        match (title, location, date, max_seats, status) {
            (Some(title), Some(location), Some(date), Some(max_seats), Some(status)) => {
                Ok(Concert::new(title, location, date, max_seats, status))
            }
            _ => Err(ApiError::internal("Concert validation state mismatch")),
        }
    }
}

use crate::api::error::{ApiError, Result as ApiResult};

use ct_db::UserFilters;

use serde::Deserialize;

const MAX_LIMIT: u32 = 100;

/// Raw query parameters for the user listing.
///
/// Everything arrives as strings so that a garbage value (`page=abc`)
/// becomes a 400 with a field-level message instead of an opaque
/// extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

impl ListUsersQuery {
    /// Validate and convert to repository filters. All violations are
    /// collected, not just the first.
    pub fn into_filters(self) -> ApiResult<UserFilters> {
        let mut violations = Vec::new();
        let mut filters = UserFilters::default();

        if let Some(raw) = self.page.as_deref() {
            match raw.parse::<u32>() {
                Ok(page) if page >= 1 => filters.page = page,
                _ => violations.push("page must be a positive integer"),
            }
        }

        if let Some(raw) = self.limit.as_deref() {
            match raw.parse::<u32>() {
                Ok(limit) if (1..=MAX_LIMIT).contains(&limit) => filters.limit = limit,
                _ => violations.push("limit must be between 1 and 100"),
            }
        }

        if let Some(search) = self.search {
            let trimmed = search.trim();
            if !trimmed.is_empty() {
                filters.search = Some(trimmed.to_string());
            }
        }

        if violations.is_empty() {
            Ok(filters)
        } else {
            Err(ApiError::validation(violations.join(", ")))
        }
    }
}

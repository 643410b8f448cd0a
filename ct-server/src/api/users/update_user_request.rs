use crate::api::error::{ApiError, Result as ApiResult};

use ct_db::UserUpdate;

use serde::{Deserialize, Deserializer};

const DISPLAY_NAME_MIN: usize = 2;
const DISPLAY_NAME_MAX: usize = 255;

/// Body of `PUT /api/users/me`.
///
/// `display_name` is kept double-optional so an explicit `null` is
/// distinguishable from an absent field: absent leaves the name alone,
/// `null` is a schema violation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub display_name: Option<Option<String>>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl UpdateUserRequest {
    /// Validate and convert to a repository update. All violations are
    /// collected, not just the first.
    pub fn into_update(self) -> ApiResult<UserUpdate> {
        let mut violations = Vec::new();
        let mut update = UserUpdate::default();

        match self.display_name {
            None => {}
            Some(None) => {
                violations.push("displayName must be between 2 and 255 characters");
            }
            Some(Some(name)) => {
                let trimmed = name.trim();
                let len = trimmed.chars().count();
                if (DISPLAY_NAME_MIN..=DISPLAY_NAME_MAX).contains(&len) {
                    update.display_name = Some(Some(trimmed.to_string()));
                } else {
                    violations.push("displayName must be between 2 and 255 characters");
                }
            }
        }

        if violations.is_empty() {
            Ok(update)
        } else {
            Err(ApiError::validation(violations.join(", ")))
        }
    }
}

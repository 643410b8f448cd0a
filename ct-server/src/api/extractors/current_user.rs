use crate::api::error::ApiError;

use ct_core::User;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// The authenticated user for this request.
///
/// The authentication middleware reconciles the token against the local
/// directory and stashes the resulting [`User`] in request extensions;
/// this extractor pulls it back out. A handler reached without the
/// middleware having run gets a 401, not a panic.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| ApiError::unauthorized("Not authenticated"))
    }
}

//! Request authentication and role gating.
//!
//! `authenticate` runs on every protected route: it verifies the bearer
//! token, reconciles the identity into the local directory and stores the
//! resulting [`User`] in request extensions. `require_admin` layers on top
//! for admin-only routes.

use crate::api::error::{ApiError, Result as ApiResult};
use crate::auth::reconciler::Reconciler;
use crate::state::AppState;

use ct_auth::AuthError;
use ct_core::User;

use std::panic::Location;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use error_location::ErrorLocation;

/// Pull the bearer token out of the Authorization header.
#[track_caller]
fn bearer_token(request: &Request) -> Result<&str, AuthError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| AuthError::MissingHeader {
            location: ErrorLocation::from(Location::caller()),
        })?;

    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AuthError::InvalidScheme {
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(token)
}

/// Verify the request's token and attach the reconciled local user.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let token = bearer_token(&request)?;

    let claims = state.verifier.verify(token).await.map_err(|e| {
        log::warn!("Token rejected: {}", e);
        ApiError::from(e)
    })?;

    let reconciler = Reconciler::new(state.pool.clone(), state.audience.clone());
    let user = reconciler.reconcile(&claims).await?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Reject non-admin callers. Must run after [`authenticate`].
pub async fn require_admin(request: Request, next: Next) -> ApiResult<Response> {
    let user = request
        .extensions()
        .get::<User>()
        .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

    if !user.role.is_admin() {
        log::warn!("Admin route denied for {}", user.external_id);
        return Err(ApiError::forbidden("Admin access required"));
    }

    Ok(next.run(request).await)
}

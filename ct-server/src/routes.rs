//! Route table.
//!
//! `/api/users/*` sits behind the authentication middleware; the listing
//! and by-id lookups additionally require the admin role. Concert routes
//! and `/health` are public.

use crate::api::concerts::concerts::{
    create_concert, delete_concert, get_concert, list_concerts,
};
use crate::api::users::users::{
    get_current_user, get_user_by_id, list_users, update_current_user,
};
use crate::auth::middleware::{authenticate, require_admin};
use crate::health::health;
use crate::state::AppState;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

pub fn build_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/", get(list_users))
        .route("/{id}", get(get_user_by_id))
        .route_layer(middleware::from_fn(require_admin));

    let user_routes = Router::new()
        .route("/me", get(get_current_user).put(update_current_user))
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let concert_routes = Router::new()
        .route("/", post(create_concert).get(list_concerts))
        .route("/{id}", get(get_concert).delete(delete_concert));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/users", user_routes)
        .nest("/api/v1/concerts", concert_routes)
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

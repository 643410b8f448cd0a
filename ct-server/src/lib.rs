pub mod api;
pub mod auth;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::{
    concerts::{
        concert_dto::ConcertDto,
        concerts::{create_concert, delete_concert, get_concert, list_concerts},
        create_concert_request::CreateConcertRequest,
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::current_user::CurrentUser,
    response::{ApiResponse, Pagination},
    users::{
        list_users_query::ListUsersQuery,
        update_user_request::UpdateUserRequest,
        user_dto::UserDto,
        users::{get_current_user, get_user_by_id, list_users, update_current_user},
    },
};

pub use crate::auth::reconciler::Reconciler;
pub use crate::routes::build_router;
pub use crate::state::AppState;

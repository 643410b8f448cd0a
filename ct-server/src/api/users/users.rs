//! User endpoints: self-service profile access plus the admin-only
//! directory listing.

use crate::api::error::{ApiError, Result as ApiResult};
use crate::api::extractors::current_user::CurrentUser;
use crate::api::response::{ApiResponse, Pagination};
use crate::api::users::list_users_query::ListUsersQuery;
use crate::api::users::update_user_request::UpdateUserRequest;
use crate::api::users::user_dto::UserDto;
use crate::state::AppState;

use ct_db::UserRepository;

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

/// GET /api/users/me
pub async fn get_current_user(
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<ApiResponse<UserDto>>> {
    Ok(Json(ApiResponse::new(UserDto::from(user))))
}

/// PUT /api/users/me
pub async fn update_current_user(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<Json<ApiResponse<UserDto>>> {
    let update = request.into_update()?;

    let repository = UserRepository::new(state.pool.clone());
    let updated = repository
        .update(user.id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(ApiResponse::new(UserDto::from(updated))))
}

/// GET /api/users (admin)
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> ApiResult<Json<ApiResponse<Vec<UserDto>>>> {
    let filters = query.into_filters()?;

    let repository = UserRepository::new(state.pool.clone());
    let page = repository.list_paged(&filters).await?;

    let pagination = Pagination {
        total: page.total,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages,
    };

    let users = page.users.into_iter().map(UserDto::from).collect();

    Ok(Json(ApiResponse::paged(users, pagination)))
}

/// GET /api/users/{id} (admin)
///
/// A syntactically invalid id is indistinguishable from an unknown one:
/// both answer 404, so the endpoint leaks nothing about id shape.
pub async fn get_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<UserDto>>> {
    let Ok(id) = Uuid::parse_str(&id) else {
        return Err(ApiError::not_found("User not found"));
    };

    let repository = UserRepository::new(state.pool.clone());
    let user = repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(ApiResponse::new(UserDto::from(user))))
}

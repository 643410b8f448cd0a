//! Concert endpoints. Deletes are soft: a deleted concert disappears from
//! the listing but stays fetchable by id.

use crate::api::concerts::concert_dto::ConcertDto;
use crate::api::concerts::create_concert_request::CreateConcertRequest;
use crate::api::error::{ApiError, Result as ApiResult};
use crate::api::response::ApiResponse;
use crate::state::AppState;

use ct_db::ConcertRepository;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

/// POST /api/v1/concerts
pub async fn create_concert(
    State(state): State<AppState>,
    Json(request): Json<CreateConcertRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ConcertDto>>)> {
    let concert = request.into_concert()?;

    let repository = ConcertRepository::new(state.pool.clone());
    if repository.exists_at(&concert.location, concert.date).await? {
        return Err(ApiError::validation(
            "A concert at this location and time already exists",
        ));
    }
    repository.create(&concert).await?;

    log::info!(
        "Concert created: {} at {} on {}",
        concert.title,
        concert.location,
        concert.date
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(ConcertDto::from(concert))),
    ))
}

/// GET /api/v1/concerts
pub async fn list_concerts(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<ConcertDto>>>> {
    let repository = ConcertRepository::new(state.pool.clone());
    let concerts = repository.find_all().await?;

    let concerts = concerts.into_iter().map(ConcertDto::from).collect();
    Ok(Json(ApiResponse::new(concerts)))
}

/// GET /api/v1/concerts/{id}
///
/// Soft-deleted concerts are still returned here so ticket holders can
/// see what their booking pointed at.
pub async fn get_concert(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<ConcertDto>>> {
    let Ok(id) = Uuid::parse_str(&id) else {
        return Err(ApiError::not_found("Concert not found"));
    };

    let repository = ConcertRepository::new(state.pool.clone());
    let concert = repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Concert not found"))?;

    Ok(Json(ApiResponse::new(ConcertDto::from(concert))))
}

/// DELETE /api/v1/concerts/{id}
pub async fn delete_concert(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<ConcertDto>>> {
    let Ok(id) = Uuid::parse_str(&id) else {
        return Err(ApiError::not_found("Concert not found"));
    };

    let repository = ConcertRepository::new(state.pool.clone());
    let concert = repository
        .soft_delete(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Concert not found"))?;

    log::info!("Concert deleted: {}", concert.id);

    Ok(Json(ApiResponse::new(ConcertDto::from(concert))))
}

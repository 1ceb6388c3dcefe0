use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{
    dto::ratings::{AddRatingRequest, RatingSummary},
    error::AppResult,
    middleware::auth::AuthUser,
    models,
    response::ApiResponse,
    services::rating_service,
    state::AppState,
};

// Products and gallery pieces share one ratings table; the handlers below are
// thin wrappers that fix the source column. Mounted by the products and
// gallery routers.

#[utoipa::path(
    get,
    path = "/api/products/{id}/ratings",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Rating summary", body = ApiResponse<RatingSummary>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Ratings"
)]
pub async fn get_product_ratings(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<RatingSummary>>> {
    let resp = rating_service::summary(&state, id, models::SOURCE_PRODUCT, user.as_ref()).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/products/{id}/ratings",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = AddRatingRequest,
    responses(
        (status = 200, description = "Rating recorded", body = ApiResponse<RatingSummary>),
        (status = 400, description = "Invalid value"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Already rated"),
    ),
    security(("bearer_auth" = [])),
    tag = "Ratings"
)]
pub async fn add_product_rating(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddRatingRequest>,
) -> AppResult<Json<ApiResponse<RatingSummary>>> {
    let resp =
        rating_service::add_rating(&state, id, models::SOURCE_PRODUCT, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/gallery/{id}/ratings",
    params(
        ("id" = Uuid, Path, description = "Gallery item ID")
    ),
    responses(
        (status = 200, description = "Rating summary", body = ApiResponse<RatingSummary>),
        (status = 404, description = "Gallery item not found"),
    ),
    tag = "Ratings"
)]
pub async fn get_gallery_ratings(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<RatingSummary>>> {
    let resp = rating_service::summary(&state, id, models::SOURCE_GALLERY, user.as_ref()).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/gallery/{id}/ratings",
    params(
        ("id" = Uuid, Path, description = "Gallery item ID")
    ),
    request_body = AddRatingRequest,
    responses(
        (status = 200, description = "Rating recorded", body = ApiResponse<RatingSummary>),
        (status = 400, description = "Invalid value"),
        (status = 404, description = "Gallery item not found"),
        (status = 409, description = "Already rated"),
    ),
    security(("bearer_auth" = [])),
    tag = "Ratings"
)]
pub async fn add_gallery_rating(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddRatingRequest>,
) -> AppResult<Json<ApiResponse<RatingSummary>>> {
    let resp =
        rating_service::add_rating(&state, id, models::SOURCE_GALLERY, &user, payload).await?;
    Ok(Json(resp))
}

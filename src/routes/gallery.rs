use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    activity::log_activity,
    dto::gallery::{CreateGalleryItemRequest, GalleryList, UpdateGalleryItemRequest},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::GalleryItem,
    response::{ApiResponse, Meta},
    routes::{params::Pagination, ratings},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_gallery).post(create_item))
        .route(
            "/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route(
            "/{id}/ratings",
            get(ratings::get_gallery_ratings).post(ratings::add_gallery_rating),
        )
}

#[utoipa::path(
    get,
    path = "/api/gallery",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "List gallery items", body = ApiResponse<GalleryList>)
    ),
    tag = "Gallery"
)]
pub async fn list_gallery(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<GalleryList>>> {
    let (page, limit, offset) = pagination.normalize();
    let items = sqlx::query_as::<_, GalleryItem>(
        "SELECT * FROM gallery_items ORDER BY created_at DESC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.pool)
    .await?;

    let total: (i64,) = sqlx::query_as("SELECT count(*) FROM gallery_items")
        .fetch_one(&state.pool)
        .await?;

    let meta = Meta::new(page, limit, total.0);
    Ok(Json(ApiResponse::success(
        "Gallery",
        GalleryList { items },
        Some(meta),
    )))
}

#[utoipa::path(
    get,
    path = "/api/gallery/{id}",
    params(
        ("id" = Uuid, Path, description = "Gallery item ID")
    ),
    responses(
        (status = 200, description = "Get gallery item", body = ApiResponse<GalleryItem>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Gallery"
)]
pub async fn get_item(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<GalleryItem>>> {
    let result = sqlx::query_as::<_, GalleryItem>("SELECT * FROM gallery_items WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    let result = match result {
        Some(g) => g,
        None => return Err(AppError::NotFound),
    };
    Ok(Json(ApiResponse::success("Gallery item", result, None)))
}

#[utoipa::path(
    post,
    path = "/api/gallery",
    request_body = CreateGalleryItemRequest,
    responses(
        (status = 200, description = "Create gallery item", body = ApiResponse<GalleryItem>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Gallery"
)]
pub async fn create_item(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateGalleryItemRequest>,
) -> AppResult<Json<ApiResponse<GalleryItem>>> {
    ensure_admin(&user)?;
    if payload.title.trim().is_empty() || payload.artist.trim().is_empty() {
        return Err(AppError::BadRequest("title and artist are required".into()));
    }
    if payload.price < 0 {
        return Err(AppError::BadRequest("price must not be negative".into()));
    }

    let item = sqlx::query_as::<_, GalleryItem>(
        r#"
        INSERT INTO gallery_items (id, title, artist, price, image_url)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(payload.title)
    .bind(payload.artist)
    .bind(payload.price)
    .bind(payload.image_url)
    .fetch_one(&state.pool)
    .await?;

    if let Err(err) = log_activity(
        &state.pool,
        Some(user.user_id),
        "gallery_item_created",
        Some("gallery_items"),
        Some(serde_json::json!({ "gallery_item_id": item.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "activity log failed");
    }

    Ok(Json(ApiResponse::success(
        "Gallery item created",
        item,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    put,
    path = "/api/gallery/{id}",
    params(
        ("id" = Uuid, Path, description = "Gallery item ID")
    ),
    request_body = UpdateGalleryItemRequest,
    responses(
        (status = 200, description = "Updated gallery item", body = ApiResponse<GalleryItem>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Gallery"
)]
pub async fn update_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateGalleryItemRequest>,
) -> AppResult<Json<ApiResponse<GalleryItem>>> {
    ensure_admin(&user)?;
    if payload.title.trim().is_empty() || payload.artist.trim().is_empty() {
        return Err(AppError::BadRequest("title and artist are required".into()));
    }
    if payload.price < 0 {
        return Err(AppError::BadRequest("price must not be negative".into()));
    }

    let item = sqlx::query_as::<_, GalleryItem>(
        r#"
        UPDATE gallery_items
        SET title = $2, artist = $3, price = $4, image_url = $5
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(payload.title)
    .bind(payload.artist)
    .bind(payload.price)
    .bind(payload.image_url)
    .fetch_optional(&state.pool)
    .await?;

    match item {
        Some(g) => Ok(Json(ApiResponse::success("Updated", g, Some(Meta::empty())))),
        None => Err(AppError::NotFound),
    }
}

#[utoipa::path(
    delete,
    path = "/api/gallery/{id}",
    params(
        ("id" = Uuid, Path, description = "Gallery item ID")
    ),
    responses(
        (status = 200, description = "Deleted gallery item"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Gallery"
)]
pub async fn delete_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    ensure_admin(&user)?;
    let result = sqlx::query("DELETE FROM gallery_items WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}

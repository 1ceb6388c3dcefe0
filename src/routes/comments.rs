use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{
    activity::log_activity,
    dto::comments::{AddCommentRequest, CommentDto, CommentList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::ApiResponse,
    state::AppState,
};

// Mounted under /api/products/{id}/comments by the products router.

#[utoipa::path(
    get,
    path = "/api/products/{id}/comments",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "List product comments", body = ApiResponse<CommentList>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Comments"
)]
pub async fn list_product_comments(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CommentList>>> {
    ensure_product_exists(&state, product_id).await?;

    let items = sqlx::query_as::<_, CommentDto>(
        r#"
        SELECT c.id, u.login AS author, c.text, c.created_at
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.product_id = $1
        ORDER BY c.created_at DESC
        "#,
    )
    .bind(product_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(ApiResponse::success(
        "Comments",
        CommentList { items },
        None,
    )))
}

#[utoipa::path(
    post,
    path = "/api/products/{id}/comments",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = AddCommentRequest,
    responses(
        (status = 200, description = "Comment added", body = ApiResponse<CommentDto>),
        (status = 400, description = "Empty comment"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Comments"
)]
pub async fn add_product_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<AddCommentRequest>,
) -> AppResult<Json<ApiResponse<CommentDto>>> {
    let text = payload.text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("comment text is required".into()));
    }
    ensure_product_exists(&state, product_id).await?;

    let comment = sqlx::query_as::<_, CommentDto>(
        r#"
        WITH inserted AS (
            INSERT INTO comments (id, product_id, user_id, text)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, text, created_at
        )
        SELECT i.id, u.login AS author, i.text, i.created_at
        FROM inserted i
        JOIN users u ON u.id = i.user_id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(product_id)
    .bind(user.user_id)
    .bind(text)
    .fetch_one(&state.pool)
    .await?;

    if let Err(err) = log_activity(
        &state.pool,
        Some(user.user_id),
        "comment_added",
        Some("comments"),
        Some(serde_json::json!({ "product_id": product_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "activity log failed");
    }

    Ok(Json(ApiResponse::success("Comment added", comment, None)))
}

async fn ensure_product_exists(state: &AppState, product_id: Uuid) -> AppResult<()> {
    let exist: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_optional(&state.pool)
        .await?;
    if exist.is_none() {
        return Err(AppError::NotFound);
    }
    Ok(())
}

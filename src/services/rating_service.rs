use uuid::Uuid;

use crate::{
    activity::log_activity,
    dto::ratings::{AddRatingRequest, RatingSummary},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models,
    response::ApiResponse,
    state::AppState,
};

pub async fn summary(
    state: &AppState,
    target_id: Uuid,
    source: &str,
    user: Option<&AuthUser>,
) -> AppResult<ApiResponse<RatingSummary>> {
    ensure_target_exists(state, target_id, source).await?;

    let (average, votes): (f64, i64) = sqlx::query_as(
        "SELECT COALESCE(AVG(value), 0)::float8, COUNT(*) FROM ratings WHERE target_id = $1 AND source = $2",
    )
    .bind(target_id)
    .bind(source)
    .fetch_one(&state.pool)
    .await?;

    let my_rating = match user {
        Some(u) => {
            let row: Option<(i16,)> = sqlx::query_as(
                "SELECT value FROM ratings WHERE target_id = $1 AND source = $2 AND user_id = $3",
            )
            .bind(target_id)
            .bind(source)
            .bind(u.user_id)
            .fetch_optional(&state.pool)
            .await?;
            row.map(|(v,)| v)
        }
        None => None,
    };

    Ok(ApiResponse::success(
        "Ratings",
        RatingSummary {
            average,
            votes,
            my_rating,
        },
        None,
    ))
}

pub async fn add_rating(
    state: &AppState,
    target_id: Uuid,
    source: &str,
    user: &AuthUser,
    payload: AddRatingRequest,
) -> AppResult<ApiResponse<RatingSummary>> {
    if !(1..=5).contains(&payload.value) {
        return Err(AppError::BadRequest("value must be between 1 and 5".into()));
    }
    ensure_target_exists(state, target_id, source).await?;

    // The unique index on (user_id, target_id, source) is the actual guard;
    // a second vote surfaces as 409 even under concurrent submissions.
    sqlx::query(
        "INSERT INTO ratings (id, target_id, source, user_id, value) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(Uuid::new_v4())
    .bind(target_id)
    .bind(source)
    .bind(user.user_id)
    .bind(payload.value)
    .execute(&state.pool)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "already rated"))?;

    if let Err(err) = log_activity(
        &state.pool,
        Some(user.user_id),
        "rating_added",
        Some("ratings"),
        Some(serde_json::json!({ "target_id": target_id, "source": source, "value": payload.value })),
    )
    .await
    {
        tracing::warn!(error = %err, "activity log failed");
    }

    summary(state, target_id, source, Some(user)).await
}

async fn ensure_target_exists(state: &AppState, target_id: Uuid, source: &str) -> AppResult<()> {
    let table = if source == models::SOURCE_PRODUCT {
        "products"
    } else {
        "gallery_items"
    };
    let query = format!("SELECT id FROM {table} WHERE id = $1");
    let exist: Option<(Uuid,)> = sqlx::query_as(&query)
        .bind(target_id)
        .fetch_optional(&state.pool)
        .await?;
    if exist.is_none() {
        return Err(AppError::NotFound);
    }
    Ok(())
}

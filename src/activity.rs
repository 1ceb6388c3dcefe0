use serde_json::Value;
use uuid::Uuid;

use crate::{db::DbPool, error::AppResult, models::Activity};

/// Maximum entries returned by the activity feed, mirroring the dashboard widget.
pub const ACTIVITY_FEED_CAP: i64 = 20;

/// Append an entry to the activity log. Callers treat failures as non-fatal.
pub async fn log_activity(
    pool: &DbPool,
    user_id: Option<Uuid>,
    action: &str,
    target_type: Option<&str>,
    message: Option<Value>,
) -> AppResult<()> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO activity (id, user_id, action, target_type, message)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(action)
    .bind(target_type)
    .bind(message)
    .execute(pool)
    .await?;

    Ok(())
}

/// Newest-first feed for one user, capped at [`ACTIVITY_FEED_CAP`].
pub async fn recent_activity(pool: &DbPool, user_id: Uuid) -> AppResult<Vec<Activity>> {
    let items = sqlx::query_as::<_, Activity>(
        "SELECT * FROM activity WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
    )
    .bind(user_id)
    .bind(ACTIVITY_FEED_CAP)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

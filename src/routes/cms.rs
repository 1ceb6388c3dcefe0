use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    activity::log_activity,
    dto::cms::{ContentList, UpsertContentRequest},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::ContentEntry,
    response::{ApiResponse, Meta},
    state::AppState,
};

// Pages and news share one row shape; the handlers below pin the table the
// same way the rating handlers pin their source.

const TITLE_MAX: usize = 30;

pub fn pages_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pages).post(create_page))
        .route("/{id}", get(get_page).put(update_page).delete(delete_page))
}

pub fn news_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_news).post(create_news))
        .route(
            "/{id}",
            get(get_news_entry).put(update_news).delete(delete_news),
        )
}

fn validate_content(payload: &UpsertContentRequest) -> Result<(), AppError> {
    for (field, value) in [
        ("link_title", &payload.link_title),
        ("title", &payload.title),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!("{field} is required")));
        }
        if value.chars().count() > TITLE_MAX {
            return Err(AppError::BadRequest(format!(
                "{field} should have max {TITLE_MAX} characters"
            )));
        }
    }
    Ok(())
}

async fn list_entries(state: &AppState, table: &'static str) -> AppResult<Vec<ContentEntry>> {
    let sql = format!("SELECT * FROM {table} ORDER BY display_order, created_at");
    let items = sqlx::query_as::<_, ContentEntry>(&sql)
        .fetch_all(&state.pool)
        .await?;
    Ok(items)
}

async fn get_entry(state: &AppState, table: &'static str, id: Uuid) -> AppResult<ContentEntry> {
    let sql = format!("SELECT * FROM {table} WHERE id = $1");
    let entry = sqlx::query_as::<_, ContentEntry>(&sql)
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    entry.ok_or(AppError::NotFound)
}

async fn insert_entry(
    state: &AppState,
    table: &'static str,
    user: &AuthUser,
    payload: UpsertContentRequest,
) -> AppResult<ContentEntry> {
    ensure_admin(user)?;
    validate_content(&payload)?;

    let sql = format!(
        "INSERT INTO {table} (id, link_title, title, content, display_order)
         VALUES ($1, $2, $3, $4, $5) RETURNING *"
    );
    let entry = sqlx::query_as::<_, ContentEntry>(&sql)
        .bind(Uuid::new_v4())
        .bind(payload.link_title)
        .bind(payload.title)
        .bind(payload.content)
        .bind(payload.display_order)
        .fetch_one(&state.pool)
        .await?;

    if let Err(err) = log_activity(
        &state.pool,
        Some(user.user_id),
        "content_created",
        Some(table),
        Some(serde_json::json!({ "id": entry.id, "title": entry.title })),
    )
    .await
    {
        tracing::warn!(error = %err, "activity log failed");
    }

    Ok(entry)
}

async fn update_entry(
    state: &AppState,
    table: &'static str,
    user: &AuthUser,
    id: Uuid,
    payload: UpsertContentRequest,
) -> AppResult<ContentEntry> {
    ensure_admin(user)?;
    validate_content(&payload)?;

    let sql = format!(
        "UPDATE {table}
         SET link_title = $2, title = $3, content = $4, display_order = $5
         WHERE id = $1 RETURNING *"
    );
    let entry = sqlx::query_as::<_, ContentEntry>(&sql)
        .bind(id)
        .bind(payload.link_title)
        .bind(payload.title)
        .bind(payload.content)
        .bind(payload.display_order)
        .fetch_optional(&state.pool)
        .await?;
    entry.ok_or(AppError::NotFound)
}

async fn delete_entry(
    state: &AppState,
    table: &'static str,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<()> {
    ensure_admin(user)?;
    let sql = format!("DELETE FROM {table} WHERE id = $1");
    let result = sqlx::query(&sql).bind(id).execute(&state.pool).await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/pages",
    responses(
        (status = 200, description = "List pages in display order", body = ApiResponse<ContentList>)
    ),
    tag = "CMS"
)]
pub async fn list_pages(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ContentList>>> {
    let items = list_entries(&state, "pages").await?;
    Ok(Json(ApiResponse::success("Pages", ContentList { items }, None)))
}

#[utoipa::path(
    get,
    path = "/api/pages/{id}",
    params(
        ("id" = Uuid, Path, description = "Page ID")
    ),
    responses(
        (status = 200, description = "Get page", body = ApiResponse<ContentEntry>),
        (status = 404, description = "Not Found"),
    ),
    tag = "CMS"
)]
pub async fn get_page(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ContentEntry>>> {
    let entry = get_entry(&state, "pages", id).await?;
    Ok(Json(ApiResponse::success("Page", entry, None)))
}

#[utoipa::path(
    post,
    path = "/api/pages",
    request_body = UpsertContentRequest,
    responses(
        (status = 200, description = "Create page", body = ApiResponse<ContentEntry>),
        (status = 400, description = "Missing or overlong title"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "CMS"
)]
pub async fn create_page(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpsertContentRequest>,
) -> AppResult<Json<ApiResponse<ContentEntry>>> {
    let entry = insert_entry(&state, "pages", &user, payload).await?;
    Ok(Json(ApiResponse::success(
        "Page created",
        entry,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    put,
    path = "/api/pages/{id}",
    params(
        ("id" = Uuid, Path, description = "Page ID")
    ),
    request_body = UpsertContentRequest,
    responses(
        (status = 200, description = "Updated page", body = ApiResponse<ContentEntry>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "CMS"
)]
pub async fn update_page(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpsertContentRequest>,
) -> AppResult<Json<ApiResponse<ContentEntry>>> {
    let entry = update_entry(&state, "pages", &user, id, payload).await?;
    Ok(Json(ApiResponse::success("Updated", entry, Some(Meta::empty()))))
}

#[utoipa::path(
    delete,
    path = "/api/pages/{id}",
    params(
        ("id" = Uuid, Path, description = "Page ID")
    ),
    responses(
        (status = 200, description = "Deleted page"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "CMS"
)]
pub async fn delete_page(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    delete_entry(&state, "pages", &user, id).await?;
    Ok(Json(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    get,
    path = "/api/news",
    responses(
        (status = 200, description = "List news in display order", body = ApiResponse<ContentList>)
    ),
    tag = "CMS"
)]
pub async fn list_news(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ContentList>>> {
    let items = list_entries(&state, "news").await?;
    Ok(Json(ApiResponse::success("News", ContentList { items }, None)))
}

#[utoipa::path(
    get,
    path = "/api/news/{id}",
    params(
        ("id" = Uuid, Path, description = "News entry ID")
    ),
    responses(
        (status = 200, description = "Get news entry", body = ApiResponse<ContentEntry>),
        (status = 404, description = "Not Found"),
    ),
    tag = "CMS"
)]
pub async fn get_news_entry(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ContentEntry>>> {
    let entry = get_entry(&state, "news", id).await?;
    Ok(Json(ApiResponse::success("News entry", entry, None)))
}

#[utoipa::path(
    post,
    path = "/api/news",
    request_body = UpsertContentRequest,
    responses(
        (status = 200, description = "Create news entry", body = ApiResponse<ContentEntry>),
        (status = 400, description = "Missing or overlong title"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "CMS"
)]
pub async fn create_news(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpsertContentRequest>,
) -> AppResult<Json<ApiResponse<ContentEntry>>> {
    let entry = insert_entry(&state, "news", &user, payload).await?;
    Ok(Json(ApiResponse::success(
        "News entry created",
        entry,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    put,
    path = "/api/news/{id}",
    params(
        ("id" = Uuid, Path, description = "News entry ID")
    ),
    request_body = UpsertContentRequest,
    responses(
        (status = 200, description = "Updated news entry", body = ApiResponse<ContentEntry>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "CMS"
)]
pub async fn update_news(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpsertContentRequest>,
) -> AppResult<Json<ApiResponse<ContentEntry>>> {
    let entry = update_entry(&state, "news", &user, id, payload).await?;
    Ok(Json(ApiResponse::success("Updated", entry, Some(Meta::empty()))))
}

#[utoipa::path(
    delete,
    path = "/api/news/{id}",
    params(
        ("id" = Uuid, Path, description = "News entry ID")
    ),
    responses(
        (status = 200, description = "Deleted news entry"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "CMS"
)]
pub async fn delete_news(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    delete_entry(&state, "news", &user, id).await?;
    Ok(Json(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(link_title: &str, title: &str) -> UpsertContentRequest {
        UpsertContentRequest {
            link_title: link_title.into(),
            title: title.into(),
            content: None,
            display_order: 1,
        }
    }

    #[test]
    fn titles_are_required_and_bounded() {
        assert!(validate_content(&payload("About", "About us")).is_ok());
        assert!(validate_content(&payload("", "About us")).is_err());
        assert!(validate_content(&payload("About", "   ")).is_err());
        assert!(validate_content(&payload(&"x".repeat(31), "ok")).is_err());
        assert!(validate_content(&payload(&"x".repeat(30), "ok")).is_ok());
    }
}

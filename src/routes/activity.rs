use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    activity,
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    models::Activity,
    response::ApiResponse,
    routes::params::ActivityQuery,
    state::AppState,
};

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ActivityList {
    #[schema(value_type = Vec<Activity>)]
    pub items: Vec<Activity>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_activity))
}

#[utoipa::path(
    get,
    path = "/api/activity",
    params(
        ("user_id" = Option<Uuid>, Query, description = "Another user's feed (admin only)")
    ),
    responses(
        (status = 200, description = "Recent activity, newest first, capped at 20", body = ApiResponse<ActivityList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Activity"
)]
pub async fn list_activity(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ActivityQuery>,
) -> AppResult<Json<ApiResponse<ActivityList>>> {
    let target = match query.user_id {
        Some(other) if other != user.user_id => {
            ensure_admin(&user)?;
            other
        }
        _ => user.user_id,
    };

    let items = activity::recent_activity(&state.pool, target).await?;
    Ok(Json(ApiResponse::success(
        "Activity",
        ActivityList { items },
        None,
    )))
}

use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::stats::{OrdersChart, PlatformStats},
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    response::ApiResponse,
    services::stats_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/platform", get(platform_stats))
        .route("/orders-last-7-days", get(orders_last_7_days))
}

#[utoipa::path(
    get,
    path = "/api/stats/platform",
    responses(
        (status = 200, description = "Platform-wide stats", body = ApiResponse<PlatformStats>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stats"
)]
pub async fn platform_stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<PlatformStats>>> {
    ensure_admin(&user)?;
    let resp = stats_service::platform_stats(&state.pool).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/stats/orders-last-7-days",
    responses(
        (status = 200, description = "Orders and revenue per day, oldest first", body = ApiResponse<OrdersChart>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stats"
)]
pub async fn orders_last_7_days(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<OrdersChart>>> {
    ensure_admin(&user)?;
    let resp = stats_service::orders_last_7_days(&state.pool).await?;
    Ok(Json(resp))
}

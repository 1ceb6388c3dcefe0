use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct UserStats {
    pub purchased_count: i64,
    pub total_spent: i64,
    pub rated_count: i64,
    pub average_rating: f64,
    pub comments_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlatformStats {
    pub purchased_count: i64,
    pub total_spent: i64,
    pub rated_count: i64,
    pub average_rating: f64,
    pub comments_count: i64,
    pub activities_count: i64,
}

/// Seven aligned buckets, oldest day first, for the dashboard chart.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrdersChart {
    pub days: Vec<String>,
    pub orders: Vec<i64>,
    pub revenue: Vec<i64>,
}

use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::stats::{OrdersChart, PlatformStats, UserStats},
    error::AppResult,
    response::{ApiResponse, Meta},
};

pub async fn user_stats(pool: &DbPool, user_id: Uuid) -> AppResult<ApiResponse<UserStats>> {
    let (purchased_count, total_spent): (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COALESCE(SUM(total_amount), 0)::bigint FROM orders WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    let (rated_count, average_rating): (i64, f64) = sqlx::query_as(
        "SELECT COUNT(*), COALESCE(AVG(value), 0)::float8 FROM ratings WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    let (comments_count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM comments WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

    let data = UserStats {
        purchased_count,
        total_spent,
        rated_count,
        average_rating,
        comments_count,
    };
    Ok(ApiResponse::success("User stats", data, Some(Meta::empty())))
}

pub async fn platform_stats(pool: &DbPool) -> AppResult<ApiResponse<PlatformStats>> {
    let (purchased_count, total_spent): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(total_amount), 0)::bigint FROM orders")
            .fetch_one(pool)
            .await?;

    let (rated_count, average_rating): (i64, f64) =
        sqlx::query_as("SELECT COUNT(*), COALESCE(AVG(value), 0)::float8 FROM ratings")
            .fetch_one(pool)
            .await?;

    let (comments_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments")
        .fetch_one(pool)
        .await?;

    let (activities_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM activity")
        .fetch_one(pool)
        .await?;

    let data = PlatformStats {
        purchased_count,
        total_spent,
        rated_count,
        average_rating,
        comments_count,
        activities_count,
    };
    Ok(ApiResponse::success(
        "Platform stats",
        data,
        Some(Meta::empty()),
    ))
}

pub async fn orders_last_7_days(pool: &DbPool) -> AppResult<ApiResponse<OrdersChart>> {
    let today = Utc::now().date_naive();
    let cutoff = (today - Duration::days(6))
        .and_time(chrono::NaiveTime::MIN)
        .and_utc();

    let rows: Vec<(DateTime<Utc>, i64)> =
        sqlx::query_as("SELECT created_at, total_amount FROM orders WHERE created_at >= $1")
            .bind(cutoff)
            .fetch_all(pool)
            .await?;

    let chart = bucket_last_7_days(today, &rows);
    Ok(ApiResponse::success(
        "Orders last 7 days",
        chart,
        Some(Meta::empty()),
    ))
}

/// Bucket orders into seven aligned day slots ending at `today` (oldest first).
fn bucket_last_7_days(today: NaiveDate, rows: &[(DateTime<Utc>, i64)]) -> OrdersChart {
    let start = today - Duration::days(6);
    let mut days = Vec::with_capacity(7);
    let mut orders = vec![0_i64; 7];
    let mut revenue = vec![0_i64; 7];

    for offset in 0..7 {
        let day = start + Duration::days(offset);
        days.push(day.format("%Y-%m-%d").to_string());
    }

    for (created_at, total_amount) in rows {
        let day = created_at.date_naive();
        let offset = (day - start).num_days();
        if (0..7).contains(&offset) {
            let idx = offset as usize;
            orders[idx] += 1;
            revenue[idx] += total_amount;
        }
    }

    OrdersChart {
        days,
        orders,
        revenue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(date: NaiveDate, hour: u32) -> DateTime<Utc> {
        Utc.from_utc_datetime(&date.and_hms_opt(hour, 0, 0).unwrap())
    }

    #[test]
    fn empty_chart_has_seven_zeroed_buckets() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        let chart = bucket_last_7_days(today, &[]);
        assert_eq!(chart.days.len(), 7);
        assert_eq!(chart.days[0], "2026-08-18");
        assert_eq!(chart.days[6], "2026-08-24");
        assert_eq!(chart.orders, vec![0; 7]);
        assert_eq!(chart.revenue, vec![0; 7]);
    }

    #[test]
    fn orders_land_in_their_day_bucket() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        let rows = vec![
            (at(today, 9), 1000),
            (at(today, 18), 500),
            (at(today - Duration::days(6), 0), 250),
        ];
        let chart = bucket_last_7_days(today, &rows);
        assert_eq!(chart.orders[6], 2);
        assert_eq!(chart.revenue[6], 1500);
        assert_eq!(chart.orders[0], 1);
        assert_eq!(chart.revenue[0], 250);
    }

    #[test]
    fn orders_outside_the_window_are_dropped() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        let rows = vec![(at(today - Duration::days(7), 12), 9999)];
        let chart = bucket_last_7_days(today, &rows);
        assert_eq!(chart.orders, vec![0; 7]);
        assert_eq!(chart.revenue, vec![0; 7]);
    }
}

use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::LockType;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QuerySelect, TransactionTrait};
use uuid::Uuid;

use crate::{
    activity::log_activity,
    dto::cart::{AddToCartRequest, CartItemDto, CartList, ChangeQuantityRequest, QuantityChangeResult},
    entity::cart_items::{Column as CartCol, Entity as CartItems},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{self, CartItem},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

pub async fn list_cart(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<CartList>> {
    let (page, limit, offset) = pagination.normalize();
    // Polymorphic join: each row resolves against products or gallery_items
    // depending on its source. Rows whose target has been deleted are skipped.
    let items = sqlx::query_as::<_, CartRow>(
        r#"
        SELECT ci.id AS cart_item_id, ci.target_id, ci.source, ci.quantity,
               COALESCE(p.name, g.title) AS name,
               COALESCE(p.price, g.price) AS price,
               COALESCE(p.image_url, g.image_url) AS image_url
        FROM cart_items ci
        LEFT JOIN products p ON ci.source = 'product' AND p.id = ci.target_id
        LEFT JOIN gallery_items g ON ci.source = 'gallery' AND g.id = ci.target_id
        WHERE ci.user_id = $1 AND (p.id IS NOT NULL OR g.id IS NOT NULL)
        ORDER BY ci.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user.user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.pool)
    .await?;

    // Same orphan filter as the listing so the total matches what is shown.
    let total: (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM cart_items ci
        LEFT JOIN products p ON ci.source = 'product' AND p.id = ci.target_id
        LEFT JOIN gallery_items g ON ci.source = 'gallery' AND g.id = ci.target_id
        WHERE ci.user_id = $1 AND (p.id IS NOT NULL OR g.id IS NOT NULL)
        "#,
    )
    .bind(user.user_id)
    .fetch_one(&state.pool)
    .await?;

    let items = items
        .into_iter()
        .map(|row| CartItemDto {
            cart_item_id: row.cart_item_id,
            target_id: row.target_id,
            source: row.source,
            name: row.name,
            price: row.price,
            image_url: row.image_url,
            quantity: row.quantity,
        })
        .collect();

    let meta = Meta::new(page, limit, total.0);
    Ok(ApiResponse::success("OK", CartList { items }, Some(meta)))
}

#[derive(sqlx::FromRow)]
struct CartRow {
    cart_item_id: Uuid,
    target_id: Uuid,
    source: String,
    quantity: i32,
    name: String,
    price: i64,
    image_url: Option<String>,
}

pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartItem>> {
    let quantity = payload.quantity.unwrap_or(1);
    if quantity <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }
    if !models::is_valid_source(&payload.source) {
        return Err(AppError::BadRequest("unknown source".to_string()));
    }
    ensure_target_exists(state, payload.target_id, &payload.source).await?;

    // Adding the same target twice merges into one row; the unique index on
    // (user_id, target_id, source) makes the increment atomic.
    let cart_item: CartItem = sqlx::query_as(
        r#"
        INSERT INTO cart_items (id, user_id, target_id, source, quantity)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id, target_id, source)
        DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.user_id)
    .bind(payload.target_id)
    .bind(&payload.source)
    .bind(quantity)
    .fetch_one(&state.pool)
    .await?;

    if let Err(err) = log_activity(
        &state.pool,
        Some(user.user_id),
        "cart_add",
        Some("cart_items"),
        Some(serde_json::json!({ "target_id": payload.target_id, "source": payload.source })),
    )
    .await
    {
        tracing::warn!(error = %err, "activity log failed");
    }
    Ok(ApiResponse::success("OK", cart_item, None))
}

/// Apply a signed delta to a cart row. Runs under a row lock so two tabs
/// cannot interleave lost updates; a result of zero or less removes the row.
pub async fn change_quantity(
    state: &AppState,
    user: &AuthUser,
    cart_item_id: Uuid,
    payload: ChangeQuantityRequest,
) -> AppResult<ApiResponse<QuantityChangeResult>> {
    if payload.delta == 0 {
        return Err(AppError::BadRequest("delta must not be 0".into()));
    }

    let txn = state.orm.begin().await?;

    let item = CartItems::find_by_id(cart_item_id)
        .filter(CartCol::UserId.eq(user.user_id))
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let item = match item {
        Some(i) => i,
        None => return Err(AppError::NotFound),
    };

    let new_quantity = item.quantity.saturating_add(payload.delta);
    let result = if new_quantity <= 0 {
        let id = item.id;
        item.delete(&txn).await?;
        QuantityChangeResult {
            cart_item_id: id,
            quantity: 0,
            removed: true,
        }
    } else {
        let mut active: crate::entity::cart_items::ActiveModel = item.into();
        active.quantity = Set(new_quantity);
        let updated = active.update(&txn).await?;
        QuantityChangeResult {
            cart_item_id: updated.id,
            quantity: updated.quantity,
            removed: false,
        }
    };

    txn.commit().await?;

    Ok(ApiResponse::success("OK", result, None))
}

pub async fn remove_from_cart(
    state: &AppState,
    user: &AuthUser,
    cart_item_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_id = $2")
        .bind(cart_item_id)
        .bind(user.user_id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_activity(
        &state.pool,
        Some(user.user_id),
        "cart_remove",
        Some("cart_items"),
        Some(serde_json::json!({ "cart_item_id": cart_item_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "activity log failed");
    }

    Ok(ApiResponse::success(
        "Removed from cart",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn clear_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<serde_json::Value>> {
    sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
        .bind(user.user_id)
        .execute(&state.pool)
        .await?;

    if let Err(err) = log_activity(
        &state.pool,
        Some(user.user_id),
        "cart_clear",
        Some("cart_items"),
        None,
    )
    .await
    {
        tracing::warn!(error = %err, "activity log failed");
    }

    Ok(ApiResponse::success(
        "Cart cleared",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
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
        return Err(AppError::BadRequest("target not found".to_string()));
    }
    Ok(())
}

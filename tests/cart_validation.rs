mod common;

use storefront_api::{
    dto::cart::{AddToCartRequest, ChangeQuantityRequest},
    error::AppError,
    models,
    routes::params::Pagination,
    services::cart_service,
};

#[tokio::test]
async fn add_to_cart_rejects_bad_input() -> anyhow::Result<()> {
    let state = match common::setup_state().await? {
        Some(s) => s,
        None => return Ok(()),
    };

    let user = common::create_user(&state, "user", "cart-user").await?;
    let product_id = common::create_product(&state, "Edge Print", 1000).await?;

    // Source values are lowercase; anything else is rejected.
    let err = cart_service::add_to_cart(
        &state,
        &user,
        AddToCartRequest {
            target_id: product_id,
            source: "PRODUCTS".into(),
            quantity: Some(1),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = cart_service::add_to_cart(
        &state,
        &user,
        AddToCartRequest {
            target_id: product_id,
            source: models::SOURCE_PRODUCT.into(),
            quantity: Some(0),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = cart_service::add_to_cart(
        &state,
        &user,
        AddToCartRequest {
            target_id: uuid::Uuid::new_v4(),
            source: models::SOURCE_PRODUCT.into(),
            quantity: Some(1),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // A huge delta saturates instead of wrapping around and deleting the row.
    let item = cart_service::add_to_cart(
        &state,
        &user,
        AddToCartRequest {
            target_id: product_id,
            source: models::SOURCE_PRODUCT.into(),
            quantity: Some(1),
        },
    )
    .await?
    .data
    .unwrap();
    let changed = cart_service::change_quantity(
        &state,
        &user,
        item.id,
        ChangeQuantityRequest { delta: i32::MAX },
    )
    .await?
    .data
    .unwrap();
    assert!(!changed.removed);
    assert_eq!(changed.quantity, i32::MAX);

    // Once the target is gone the row is hidden from both items and total.
    sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(product_id)
        .execute(&state.pool)
        .await?;
    let resp = cart_service::list_cart(
        &state,
        &user,
        Pagination {
            page: Some(1),
            per_page: Some(50),
        },
    )
    .await?;
    assert!(resp.data.unwrap().items.is_empty());
    assert_eq!(resp.meta.unwrap().total, Some(0));

    Ok(())
}

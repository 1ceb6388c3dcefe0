mod common;

use storefront_api::{
    dto::{
        cart::{AddToCartRequest, ChangeQuantityRequest},
        orders::UpdateOrderStatusRequest,
    },
    error::AppError,
    models,
    routes::params::{OrderListQuery, Pagination},
    services::{admin_service, cart_service, order_service, stats_service},
};

fn pagination() -> Pagination {
    Pagination {
        page: Some(1),
        per_page: Some(50),
    }
}

// Integration flow: cart merge and quantity transitions, checkout over mixed
// targets, admin status update, user stats.
#[tokio::test]
async fn cart_checkout_and_admin_flow() -> anyhow::Result<()> {
    let state = match common::setup_state().await? {
        Some(s) => s,
        None => return Ok(()),
    };

    let user = common::create_user(&state, "user", "flow-user").await?;
    let admin = common::create_user(&state, "admin", "flow-admin").await?;

    let product_id = common::create_product(&state, "Test Print", 1000).await?;
    let gallery_id = common::create_gallery_item(&state, "Test Canvas", 5000).await?;

    // Adding the same product twice merges into one row.
    cart_service::add_to_cart(
        &state,
        &user,
        AddToCartRequest {
            target_id: product_id,
            source: models::SOURCE_PRODUCT.into(),
            quantity: Some(2),
        },
    )
    .await?;
    let merged = cart_service::add_to_cart(
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
    assert_eq!(merged.quantity, 3);

    let cart = cart_service::list_cart(&state, &user, pagination())
        .await?
        .data
        .unwrap();
    assert_eq!(cart.items.len(), 1);

    // Negative delta decrements; a delta past zero removes the row.
    let changed = cart_service::change_quantity(
        &state,
        &user,
        merged.id,
        ChangeQuantityRequest { delta: -1 },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(changed.quantity, 2);
    assert!(!changed.removed);

    let removed = cart_service::change_quantity(
        &state,
        &user,
        merged.id,
        ChangeQuantityRequest { delta: -5 },
    )
    .await?
    .data
    .unwrap();
    assert!(removed.removed);

    let cart = cart_service::list_cart(&state, &user, pagination())
        .await?
        .data
        .unwrap();
    assert!(cart.items.is_empty());

    // Checkout on an empty cart is rejected server-side.
    let err = order_service::checkout(&state, &user).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // Rebuild the cart with a product and a gallery piece and check out.
    cart_service::add_to_cart(
        &state,
        &user,
        AddToCartRequest {
            target_id: product_id,
            source: models::SOURCE_PRODUCT.into(),
            quantity: Some(2),
        },
    )
    .await?;
    cart_service::add_to_cart(
        &state,
        &user,
        AddToCartRequest {
            target_id: gallery_id,
            source: models::SOURCE_GALLERY.into(),
            quantity: None,
        },
    )
    .await?;

    let checkout = order_service::checkout(&state, &user).await?.data.unwrap();
    assert_eq!(checkout.total_amount, 2 * 1000 + 5000);

    let cart = cart_service::list_cart(&state, &user, pagination())
        .await?
        .data
        .unwrap();
    assert!(cart.items.is_empty(), "checkout should clear the cart");

    let order = order_service::get_order(&state, &user, checkout.order_id)
        .await?
        .data
        .unwrap();
    assert_eq!(order.order.status, "pending");
    assert_eq!(order.items.len(), 2);

    // Admin updates status; non-admin may not.
    let updated = admin_service::update_order_status(
        &state,
        &admin,
        checkout.order_id,
        UpdateOrderStatusRequest {
            status: "shipped".into(),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(updated.status, "shipped");

    let err = admin_service::list_all_orders(
        &state,
        &user,
        OrderListQuery {
            pagination: pagination(),
            status: None,
            sort_order: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let all = admin_service::list_all_orders(
        &state,
        &admin,
        OrderListQuery {
            pagination: pagination(),
            status: Some("shipped".into()),
            sort_order: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert!(all.items.iter().any(|o| o.id == checkout.order_id));

    let stats = stats_service::user_stats(&state.pool, user.user_id)
        .await?
        .data
        .unwrap();
    assert_eq!(stats.purchased_count, 1);
    assert_eq!(stats.total_spent, checkout.total_amount);

    Ok(())
}

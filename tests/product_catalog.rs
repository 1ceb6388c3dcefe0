mod common;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

use storefront_api::{
    dto::{
        comments::AddCommentRequest,
        products::{CreateProductRequest, CreateProductTypeRequest},
    },
    error::AppError,
    routes::{
        comments,
        params::{Pagination, ProductQuery, ProductSortBy, SortOrder},
        product_types, products,
    },
};

fn product_query() -> ProductQuery {
    ProductQuery {
        pagination: Pagination {
            page: Some(1),
            per_page: Some(50),
        },
        q: None,
        type_id: None,
        min_price: None,
        max_price: None,
        sort_by: None,
        sort_order: None,
    }
}

// Drives the product, product-type and comment handlers end to end:
// validation, 404s, list filtering and sorting, and the comment author join.
#[tokio::test]
async fn product_crud_contract() -> anyhow::Result<()> {
    let state = match common::setup_state().await? {
        Some(s) => s,
        None => return Ok(()),
    };

    let admin = common::create_user(&state, "admin", "catalog-admin").await?;
    let shopper = common::create_user(&state, "user", "catalog-user").await?;

    let product_type = product_types::create_type(
        State(state.clone()),
        admin.clone(),
        Json(CreateProductTypeRequest {
            name: "Prints".into(),
            description: None,
        }),
    )
    .await?
    .0
    .data
    .unwrap();

    // Mutations are admin-only.
    let err = products::create_product(
        State(state.clone()),
        shopper.clone(),
        Json(CreateProductRequest {
            code: "PRN-001".into(),
            name: "Sunset Print".into(),
            description: None,
            price: 1000,
            image_url: None,
            type_id: product_type.id,
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    // Required fields and price sign are validated before touching the table.
    let err = products::create_product(
        State(state.clone()),
        admin.clone(),
        Json(CreateProductRequest {
            code: "PRN-001".into(),
            name: "   ".into(),
            description: None,
            price: 1000,
            image_url: None,
            type_id: product_type.id,
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = products::create_product(
        State(state.clone()),
        admin.clone(),
        Json(CreateProductRequest {
            code: "PRN-001".into(),
            name: "Sunset Print".into(),
            description: None,
            price: -1,
            image_url: None,
            type_id: product_type.id,
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = products::create_product(
        State(state.clone()),
        admin.clone(),
        Json(CreateProductRequest {
            code: "PRN-001".into(),
            name: "Sunset Print".into(),
            description: None,
            price: 1000,
            image_url: None,
            type_id: Uuid::new_v4(),
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let sunset = products::create_product(
        State(state.clone()),
        admin.clone(),
        Json(CreateProductRequest {
            code: "PRN-001".into(),
            name: "Sunset Print".into(),
            description: Some("A3 giclee print".into()),
            price: 1000,
            image_url: None,
            type_id: product_type.id,
        }),
    )
    .await?
    .0
    .data
    .unwrap();
    assert_eq!(sunset.code, "PRN-001");
    assert_eq!(sunset.name, "Sunset Print");
    assert_eq!(sunset.price, 1000);

    // Duplicate code surfaces as a conflict, not a 500.
    let err = products::create_product(
        State(state.clone()),
        admin.clone(),
        Json(CreateProductRequest {
            code: "PRN-001".into(),
            name: "Another Print".into(),
            description: None,
            price: 500,
            image_url: None,
            type_id: product_type.id,
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    products::create_product(
        State(state.clone()),
        admin.clone(),
        Json(CreateProductRequest {
            code: "PRN-002".into(),
            name: "Harbor Print".into(),
            description: None,
            price: 2000,
            image_url: None,
            type_id: product_type.id,
        }),
    )
    .await?;

    let err = products::get_product(Path(Uuid::new_v4()), State(state.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let fetched = products::get_product(Path(sunset.id), State(state.clone()))
        .await?
        .0
        .data
        .unwrap();
    assert_eq!(fetched.id, sunset.id);

    // Name search narrows the list.
    let mut query = product_query();
    query.q = Some("harbor".into());
    let listed = products::list_products(State(state.clone()), Query(query))
        .await?
        .0
        .data
        .unwrap();
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].code, "PRN-002");

    // Price bounds and ascending price sort.
    let mut query = product_query();
    query.max_price = Some(1500);
    let listed = products::list_products(State(state.clone()), Query(query))
        .await?
        .0
        .data
        .unwrap();
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].price, 1000);

    let mut query = product_query();
    query.type_id = Some(product_type.id);
    query.sort_by = Some(ProductSortBy::Price);
    query.sort_order = Some(SortOrder::Asc);
    let resp = products::list_products(State(state.clone()), Query(query)).await?;
    let meta = resp.0.meta.unwrap();
    let listed = resp.0.data.unwrap();
    assert_eq!(meta.total, Some(2));
    let prices: Vec<i64> = listed.items.iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![1000, 2000]);

    // Comments: validation, then the author login comes back joined.
    let err = comments::add_product_comment(
        State(state.clone()),
        shopper.clone(),
        Path(sunset.id),
        Json(AddCommentRequest { text: "   ".into() }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = comments::add_product_comment(
        State(state.clone()),
        shopper.clone(),
        Path(Uuid::new_v4()),
        Json(AddCommentRequest {
            text: "Lovely".into(),
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let comment = comments::add_product_comment(
        State(state.clone()),
        shopper.clone(),
        Path(sunset.id),
        Json(AddCommentRequest {
            text: "Lovely colors".into(),
        }),
    )
    .await?
    .0
    .data
    .unwrap();
    assert_eq!(comment.author, "catalog-user");

    let listed = comments::list_product_comments(State(state.clone()), Path(sunset.id))
        .await?
        .0
        .data
        .unwrap();
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].text, "Lovely colors");

    Ok(())
}

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    activity::log_activity,
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::{ProductQuery, ProductSortBy, SortOrder},
    routes::{comments, ratings},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).patch(update_product).delete(delete_product),
        )
        .route(
            "/{id}/comments",
            get(comments::list_product_comments).post(comments::add_product_comment),
        )
        .route(
            "/{id}/ratings",
            get(ratings::get_product_ratings).post(ratings::add_product_rating),
        )
}

const PRODUCT_FILTER: &str = r#"
    ($1::text IS NULL OR name ILIKE '%' || $1 || '%' OR code ILIKE '%' || $1 || '%')
    AND ($2::uuid IS NULL OR type_id = $2)
    AND ($3::bigint IS NULL OR price >= $3)
    AND ($4::bigint IS NULL OR price <= $4)
"#;

#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("q" = Option<String>, Query, description = "Search in name and code"),
        ("type_id" = Option<Uuid>, Query, description = "Filter by product type"),
        ("min_price" = Option<i64>, Query, description = "Minimum price"),
        ("max_price" = Option<i64>, Query, description = "Maximum price"),
        ("sort_by" = Option<String>, Query, description = "created_at, price or name"),
        ("sort_order" = Option<String>, Query, description = "asc or desc"),
    ),
    responses(
        (status = 200, description = "List products", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let (page, limit, offset) = query.pagination.normalize();
    let sort_by = query.sort_by.unwrap_or(ProductSortBy::CreatedAt).as_sql();
    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc).as_sql();

    // Sort fragments come from the enums above, never from raw input.
    let sql = format!(
        "SELECT * FROM products WHERE {PRODUCT_FILTER} ORDER BY {sort_by} {sort_order} LIMIT $5 OFFSET $6"
    );
    let items = sqlx::query_as::<_, Product>(&sql)
        .bind(query.q.as_deref())
        .bind(query.type_id)
        .bind(query.min_price)
        .bind(query.max_price)
        .bind(limit)
        .bind(offset)
        .fetch_all(&state.pool)
        .await?;

    let count_sql = format!("SELECT count(*) FROM products WHERE {PRODUCT_FILTER}");
    let total: (i64,) = sqlx::query_as(&count_sql)
        .bind(query.q.as_deref())
        .bind(query.type_id)
        .bind(query.min_price)
        .bind(query.max_price)
        .fetch_one(&state.pool)
        .await?;

    let meta = Meta::new(page, limit, total.0);
    let data = ProductList { items };
    Ok(Json(ApiResponse::success("Products", data, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let result = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    let result = match result {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    Ok(Json(ApiResponse::success("Product", result, None)))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Create product", body = ApiResponse<Product>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    ensure_admin(&user)?;
    if payload.code.trim().is_empty() || payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("code and name are required".into()));
    }
    if payload.price < 0 {
        return Err(AppError::BadRequest("price must not be negative".into()));
    }

    let type_exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM product_types WHERE id = $1")
        .bind(payload.type_id)
        .fetch_optional(&state.pool)
        .await?;
    if type_exists.is_none() {
        return Err(AppError::BadRequest("product type not found".into()));
    }

    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (id, code, name, description, price, image_url, type_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(payload.code)
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.price)
    .bind(payload.image_url)
    .bind(payload.type_id)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "product code already exists"))?;

    if let Err(err) = log_activity(
        &state.pool,
        Some(user.user_id),
        "product_created",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "activity log failed");
    }

    Ok(Json(ApiResponse::success(
        "Product created",
        product,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<Product>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    ensure_admin(&user)?;
    let existing = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let code = payload.code.unwrap_or(existing.code);
    let name = payload.name.unwrap_or(existing.name);
    let description = payload.description.or(existing.description);
    let price = payload.price.unwrap_or(existing.price);
    let image_url = payload.image_url.or(existing.image_url);
    let type_id = payload.type_id.unwrap_or(existing.type_id);

    if price < 0 {
        return Err(AppError::BadRequest("price must not be negative".into()));
    }

    let product = sqlx::query_as::<_, Product>(
        r#"
        UPDATE products
        SET code = $2, name = $3, description = $4, price = $5, image_url = $6, type_id = $7
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(code)
    .bind(name)
    .bind(description)
    .bind(price)
    .bind(image_url)
    .bind(type_id)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "product code already exists"))?;

    Ok(Json(ApiResponse::success(
        "Updated",
        product,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Deleted product"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    ensure_admin(&user)?;
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}

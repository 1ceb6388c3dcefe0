use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::products::{CreateProductTypeRequest, ProductTypeList, UpdateProductTypeRequest},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::ProductType,
    response::{ApiResponse, Meta},
    state::AppState,
};

const TYPE_NAME_MAX: usize = 30;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_types).post(create_type))
        .route("/{id}", get(get_type).put(update_type).delete(delete_type))
}

fn validate_type_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }
    if name.chars().count() > TYPE_NAME_MAX {
        return Err(AppError::BadRequest(format!(
            "name should have max {TYPE_NAME_MAX} characters"
        )));
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/product-types",
    responses(
        (status = 200, description = "List product types", body = ApiResponse<ProductTypeList>)
    ),
    tag = "ProductTypes"
)]
pub async fn list_types(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductTypeList>>> {
    let items = sqlx::query_as::<_, ProductType>("SELECT * FROM product_types ORDER BY name")
        .fetch_all(&state.pool)
        .await?;
    let data = ProductTypeList { items };
    Ok(Json(ApiResponse::success("Product types", data, None)))
}

#[utoipa::path(
    get,
    path = "/api/product-types/{id}",
    params(
        ("id" = Uuid, Path, description = "Product type ID")
    ),
    responses(
        (status = 200, description = "Get product type", body = ApiResponse<ProductType>),
        (status = 404, description = "Not Found"),
    ),
    tag = "ProductTypes"
)]
pub async fn get_type(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductType>>> {
    let result = sqlx::query_as::<_, ProductType>("SELECT * FROM product_types WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    let result = match result {
        Some(t) => t,
        None => return Err(AppError::NotFound),
    };
    Ok(Json(ApiResponse::success("Product type", result, None)))
}

#[utoipa::path(
    post,
    path = "/api/product-types",
    request_body = CreateProductTypeRequest,
    responses(
        (status = 200, description = "Create product type", body = ApiResponse<ProductType>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "ProductTypes"
)]
pub async fn create_type(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateProductTypeRequest>,
) -> AppResult<Json<ApiResponse<ProductType>>> {
    ensure_admin(&user)?;
    validate_type_name(&payload.name)?;

    let row = sqlx::query_as::<_, ProductType>(
        "INSERT INTO product_types (id, name, description) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(payload.name)
    .bind(payload.description)
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(ApiResponse::success(
        "Product type created",
        row,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    put,
    path = "/api/product-types/{id}",
    params(
        ("id" = Uuid, Path, description = "Product type ID")
    ),
    request_body = UpdateProductTypeRequest,
    responses(
        (status = 200, description = "Updated product type", body = ApiResponse<ProductType>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "ProductTypes"
)]
pub async fn update_type(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductTypeRequest>,
) -> AppResult<Json<ApiResponse<ProductType>>> {
    ensure_admin(&user)?;
    validate_type_name(&payload.name)?;

    let row = sqlx::query_as::<_, ProductType>(
        "UPDATE product_types SET name = $2, description = $3 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(payload.name)
    .bind(payload.description)
    .fetch_optional(&state.pool)
    .await?;

    match row {
        Some(t) => Ok(Json(ApiResponse::success("Updated", t, Some(Meta::empty())))),
        None => Err(AppError::NotFound),
    }
}

#[utoipa::path(
    delete,
    path = "/api/product-types/{id}",
    params(
        ("id" = Uuid, Path, description = "Product type ID")
    ),
    responses(
        (status = 200, description = "Deleted product type"),
        (status = 400, description = "Products still reference this type"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "ProductTypes"
)]
pub async fn delete_type(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    ensure_admin(&user)?;

    let in_use: (i64,) = sqlx::query_as("SELECT count(*) FROM products WHERE type_id = $1")
        .bind(id)
        .fetch_one(&state.pool)
        .await?;
    if in_use.0 > 0 {
        return Err(AppError::BadRequest(
            "products still reference this type".into(),
        ));
    }

    let result = sqlx::query("DELETE FROM product_types WHERE id = $1")
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_name_length_is_bounded() {
        assert!(validate_type_name("Paintings").is_ok());
        assert!(validate_type_name("").is_err());
        assert!(validate_type_name("   ").is_err());
        assert!(validate_type_name(&"x".repeat(31)).is_err());
        assert!(validate_type_name(&"x".repeat(30)).is_ok());
    }
}

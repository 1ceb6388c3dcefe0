use axum::Router;

use crate::state::AppState;

pub mod activity;
pub mod admin;
pub mod cart;
pub mod checkout;
pub mod cms;
pub mod comments;
pub mod doc;
pub mod gallery;
pub mod health;
pub mod orders;
pub mod params;
pub mod product_types;
pub mod products;
pub mod ratings;
pub mod stats;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/product-types", product_types::router())
        .nest("/gallery", gallery::router())
        .nest("/cart", cart::router())
        .nest("/checkout", checkout::router())
        .nest("/orders", orders::router())
        .nest("/users", users::router())
        .nest("/pages", cms::pages_router())
        .nest("/news", cms::news_router())
        .nest("/activity", activity::router())
        .nest("/stats", stats::router())
        .nest("/admin", admin::router())
}

use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        cart::{AddToCartRequest, CartItemDto, CartList, ChangeQuantityRequest, QuantityChangeResult},
        cms::{ContentList, UpsertContentRequest},
        comments::{AddCommentRequest, CommentDto, CommentList},
        gallery::{CreateGalleryItemRequest, GalleryList, UpdateGalleryItemRequest},
        orders::{CheckoutResponse, OrderList, OrderWithItems, UpdateOrderStatusRequest},
        products::{
            CreateProductRequest, CreateProductTypeRequest, ProductList, ProductTypeList,
            UpdateProductRequest, UpdateProductTypeRequest,
        },
        ratings::{AddRatingRequest, RatingSummary},
        stats::{OrdersChart, PlatformStats, UserStats},
    },
    models::{
        Activity, CartItem, Comment, ContentEntry, GalleryItem, Order, OrderItem, Product,
        ProductType, Rating, User,
    },
    response::{ApiResponse, Meta},
    routes::{
        activity, admin, cart, checkout, cms, comments, gallery, health, orders, params,
        product_types, products, ratings, stats, users,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        users::register,
        users::login,
        users::guest,
        users::user_stats,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        product_types::list_types,
        product_types::get_type,
        product_types::create_type,
        product_types::update_type,
        product_types::delete_type,
        gallery::list_gallery,
        gallery::get_item,
        gallery::create_item,
        gallery::update_item,
        gallery::delete_item,
        comments::list_product_comments,
        comments::add_product_comment,
        ratings::get_product_ratings,
        ratings::add_product_rating,
        ratings::get_gallery_ratings,
        ratings::add_gallery_rating,
        cart::cart_list,
        cart::add_to_cart,
        cart::change_quantity,
        cart::remove_from_cart,
        cart::clear_cart,
        checkout::checkout,
        orders::list_orders,
        orders::get_order,
        cms::list_pages,
        cms::get_page,
        cms::create_page,
        cms::update_page,
        cms::delete_page,
        cms::list_news,
        cms::get_news_entry,
        cms::create_news,
        cms::update_news,
        cms::delete_news,
        activity::list_activity,
        stats::platform_stats,
        stats::orders_last_7_days,
        admin::list_all_orders,
        admin::get_order_admin,
        admin::update_order_status,
    ),
    components(
        schemas(
            User,
            Product,
            ProductType,
            GalleryItem,
            CartItem,
            Order,
            OrderItem,
            Comment,
            Rating,
            Activity,
            ContentEntry,
            UpsertContentRequest,
            ContentList,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            CreateProductTypeRequest,
            UpdateProductTypeRequest,
            ProductTypeList,
            CreateGalleryItemRequest,
            UpdateGalleryItemRequest,
            GalleryList,
            AddCommentRequest,
            CommentDto,
            CommentList,
            AddRatingRequest,
            RatingSummary,
            AddToCartRequest,
            ChangeQuantityRequest,
            CartItemDto,
            CartList,
            QuantityChangeResult,
            CheckoutResponse,
            OrderList,
            OrderWithItems,
            UpdateOrderStatusRequest,
            UserStats,
            PlatformStats,
            OrdersChart,
            activity::ActivityList,
            params::Pagination,
            params::ProductQuery,
            params::OrderListQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<GalleryList>,
            ApiResponse<CartList>,
            ApiResponse<OrderList>,
            ApiResponse<OrderWithItems>,
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Users", description = "Registration, login, guest sessions, per-user stats"),
        (name = "Products", description = "Product endpoints"),
        (name = "ProductTypes", description = "Product type endpoints"),
        (name = "Gallery", description = "Gallery endpoints"),
        (name = "Comments", description = "Product comment endpoints"),
        (name = "Ratings", description = "Product and gallery rating endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Checkout", description = "Checkout endpoint"),
        (name = "Orders", description = "Order endpoints"),
        (name = "CMS", description = "Pages and news content"),
        (name = "Activity", description = "Activity feed"),
        (name = "Stats", description = "Dashboard stats"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

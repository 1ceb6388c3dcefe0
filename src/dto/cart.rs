use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub target_id: Uuid,
    pub source: String,
    pub quantity: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeQuantityRequest {
    pub delta: i32,
}

/// Cart row joined with the name/price of whatever it points at.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemDto {
    pub cart_item_id: Uuid,
    pub target_id: Uuid,
    pub source: String,
    pub name: String,
    pub price: i64,
    pub image_url: Option<String>,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CartList {
    #[schema(value_type = Vec<CartItemDto>)]
    pub items: Vec<CartItemDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuantityChangeResult {
    pub cart_item_id: Uuid,
    pub quantity: i32,
    pub removed: bool,
}

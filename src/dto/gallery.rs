use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::GalleryItem;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGalleryItemRequest {
    pub title: String,
    pub artist: String,
    pub price: i64,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateGalleryItemRequest {
    pub title: String,
    pub artist: String,
    pub price: i64,
    pub image_url: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct GalleryList {
    #[schema(value_type = Vec<GalleryItem>)]
    pub items: Vec<GalleryItem>,
}

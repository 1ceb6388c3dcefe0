use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::ContentEntry;

/// Full payload for both create and replace; CMS entries are small enough
/// that partial updates are not worth a second shape.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpsertContentRequest {
    pub link_title: String,
    pub title: String,
    pub content: Option<String>,
    pub display_order: i32,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ContentList {
    #[schema(value_type = Vec<ContentEntry>)]
    pub items: Vec<ContentEntry>,
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddRatingRequest {
    pub value: i16,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingSummary {
    pub average: f64,
    pub votes: i64,
    pub my_rating: Option<i16>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: i64,
    pub listing_id: i64,
    pub guest_id: i64,
    pub booking_id: i64,
    pub rating: i32,
    pub title: String,
    pub comment: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct ReviewResponse {
    pub id: i64,
    pub listing_id: i64,
    pub guest_id: i64,
    pub booking_id: i64,
    pub rating: i32,
    pub title: String,
    pub comment: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub guest_username: String,
    pub listing_title: String,
}

// is_verified is decided by the server from the booking's state; the rating
// range rule lives in the validation module so its message stays distinct.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReview {
    pub listing_id: i64,
    pub booking_id: i64,
    pub rating: i32,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub comment: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateReview {
    pub rating: Option<i32>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub comment: Option<String>,
}

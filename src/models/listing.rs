use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub price_per_night: Decimal,
    pub max_guests: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub amenities: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub host_id: i64,
}

/// Wire representation: the host appears as a joined username, never as a
/// raw foreign key.
#[derive(Debug, Serialize, FromRow)]
pub struct ListingResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub price_per_night: Decimal,
    pub max_guests: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub amenities: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub host_username: String,
}

// Server-controlled fields (id, host, timestamps) are absent on purpose:
// unknown keys in the request body are dropped during deserialization.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateListing {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: String,
    #[validate(length(min = 1, max = 100))]
    pub location: String,
    pub price_per_night: Decimal,
    #[validate(range(min = 1))]
    pub max_guests: i32,
    #[validate(range(min = 1))]
    pub bedrooms: i32,
    #[validate(range(min = 1))]
    pub bathrooms: i32,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateListing {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub location: Option<String>,
    pub price_per_night: Option<Decimal>,
    #[validate(range(min = 1))]
    pub max_guests: Option<i32>,
    #[validate(range(min = 1))]
    pub bedrooms: Option<i32>,
    #[validate(range(min = 1))]
    pub bathrooms: Option<i32>,
    pub amenities: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn spoofed_server_fields_are_dropped_on_create() {
        let payload: CreateListing = serde_json::from_value(serde_json::json!({
            "id": 99,
            "title": "Beach bungalow",
            "description": "Two steps from the water",
            "location": "Mombasa",
            "price_per_night": "120.00",
            "max_guests": 4,
            "bedrooms": 2,
            "bathrooms": 1,
            "amenities": ["wifi", "kitchen"],
            "host_username": "someone_else",
            "created_at": "2020-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(payload.title, "Beach bungalow");
        assert_eq!(payload.amenities, vec!["wifi", "kitchen"]);
        // No field exists to carry the spoofed values forward.
    }

    #[test]
    fn amenities_default_to_empty() {
        let payload: CreateListing = serde_json::from_value(serde_json::json!({
            "title": "City loft",
            "description": "Top floor",
            "location": "Nairobi",
            "price_per_night": "75.50",
            "max_guests": 2,
            "bedrooms": 1,
            "bathrooms": 1
        }))
        .unwrap();

        assert!(payload.amenities.is_empty());
        assert!(payload.is_active.is_none());
    }

    #[test]
    fn non_positive_counts_fail_validation() {
        let payload: CreateListing = serde_json::from_value(serde_json::json!({
            "title": "Shed",
            "description": "Cozy",
            "location": "Kisumu",
            "price_per_night": "10.00",
            "max_guests": 0,
            "bedrooms": 1,
            "bathrooms": 1
        }))
        .unwrap();

        assert!(payload.validate().is_err());
    }

    #[test]
    fn partial_update_validates_only_present_fields() {
        let payload: UpdateListing = serde_json::from_value(serde_json::json!({
            "price_per_night": "99.00"
        }))
        .unwrap();

        assert!(payload.validate().is_ok());
        assert!(payload.title.is_none());
    }
}

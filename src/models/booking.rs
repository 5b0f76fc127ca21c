use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Reservation lifecycle. Transitions are driven externally; any state may
/// be set through the update operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub listing_id: i64,
    pub guest_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub number_of_guests: i32,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wire representation with the joined read-only fields. `total_nights` is
/// recomputed by the query on every read, never stored.
#[derive(Debug, Serialize, FromRow)]
pub struct BookingResponse {
    pub id: i64,
    pub listing_id: i64,
    pub guest_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub number_of_guests: i32,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub guest_username: String,
    pub listing_title: String,
    pub listing_location: String,
    pub total_nights: i32,
}

// The guest, total price and status are server-determined at creation.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBooking {
    pub listing_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[validate(range(min = 1))]
    pub number_of_guests: i32,
    pub special_requests: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBooking {
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
    #[validate(range(min = 1))]
    pub number_of_guests: Option<i32>,
    pub status: Option<BookingStatus>,
    pub special_requests: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(BookingStatus::Confirmed).unwrap(),
            serde_json::json!("confirmed")
        );
        let parsed: BookingStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, BookingStatus::Cancelled);
    }

    #[test]
    fn spoofed_guest_and_price_are_dropped_on_create() {
        let payload: CreateBooking = serde_json::from_value(serde_json::json!({
            "listing_id": 3,
            "guest_id": 42,
            "check_in_date": "2025-07-01",
            "check_out_date": "2025-07-04",
            "number_of_guests": 2,
            "total_price": "0.01",
            "status": "completed"
        }))
        .unwrap();

        assert_eq!(payload.listing_id, 3);
        assert_eq!(payload.number_of_guests, 2);
        // guest_id, total_price and status have nowhere to land.
    }

    #[test]
    fn zero_guests_fails_validation() {
        use validator::Validate;

        let payload: CreateBooking = serde_json::from_value(serde_json::json!({
            "listing_id": 3,
            "check_in_date": "2025-07-01",
            "check_out_date": "2025-07-04",
            "number_of_guests": 0
        }))
        .unwrap();

        assert!(payload.validate().is_err());
    }
}

//! Booking acceptance and pricing rules.
//!
//! These are pure functions: callers pass the ambient current date in
//! explicitly, so the rules can be exercised without a clock or a database.
//! [`validate_and_price`] runs the checks in a fixed order and each rule
//! reports its own violation rather than being coerced into a generic one.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BookingRuleViolation {
    #[error("check-out date must be after check-in date")]
    InvalidDateOrder,
    #[error("check-in date cannot be in the past")]
    CheckInInPast,
    #[error("number of guests ({requested}) exceeds maximum allowed ({max})")]
    GuestCountExceedsCapacity { requested: i32, max: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rating must be between 1 and 5")]
pub struct RatingOutOfRange(pub i32);

pub fn validate_date_order(
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<(), BookingRuleViolation> {
    if check_out <= check_in {
        return Err(BookingRuleViolation::InvalidDateOrder);
    }
    Ok(())
}

pub fn validate_check_in_not_past(
    today: NaiveDate,
    check_in: NaiveDate,
) -> Result<(), BookingRuleViolation> {
    if check_in < today {
        return Err(BookingRuleViolation::CheckInInPast);
    }
    Ok(())
}

pub fn validate_guest_count(requested: i32, max: i32) -> Result<(), BookingRuleViolation> {
    if requested > max {
        return Err(BookingRuleViolation::GuestCountExceedsCapacity { requested, max });
    }
    Ok(())
}

/// Number of nights covered by the stay. At least 1 once the date order
/// rule has passed.
pub fn total_nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Nightly rate times night count, in exact decimal arithmetic.
pub fn quote_total_price(
    price_per_night: Decimal,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Decimal {
    price_per_night * Decimal::from(total_nights(check_in, check_out))
}

/// Runs the acceptance rules in order (date order, past check-in, capacity)
/// and returns the quoted total price on success.
pub fn validate_and_price(
    today: NaiveDate,
    check_in: NaiveDate,
    check_out: NaiveDate,
    requested_guests: i32,
    max_guests: i32,
    price_per_night: Decimal,
) -> Result<Decimal, BookingRuleViolation> {
    validate_date_order(check_in, check_out)?;
    validate_check_in_not_past(today, check_in)?;
    validate_guest_count(requested_guests, max_guests)?;
    Ok(quote_total_price(price_per_night, check_in, check_out))
}

/// Ratings are integers on a 1-5 scale; everything else is rejected.
pub fn validate_rating(rating: i32) -> Result<(), RatingOutOfRange> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(RatingOutOfRange(rating))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn price(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    #[test]
    fn three_night_stay_is_priced_at_rate_times_nights() {
        // 100.00/night, today+5 .. today+8, 2 of max 4 guests
        let total = validate_and_price(
            today(),
            today() + Duration::days(5),
            today() + Duration::days(8),
            2,
            4,
            price(100_00),
        )
        .unwrap();
        assert_eq!(total, price(300_00));
    }

    #[test]
    fn zero_night_stay_is_rejected_as_invalid_date_order() {
        let check_in = today() + Duration::days(5);
        let result = validate_and_price(today(), check_in, check_in, 2, 4, price(100_00));
        assert_eq!(result, Err(BookingRuleViolation::InvalidDateOrder));
    }

    #[test]
    fn reversed_dates_are_rejected_as_invalid_date_order() {
        let result = validate_and_price(
            today(),
            today() + Duration::days(8),
            today() + Duration::days(5),
            2,
            4,
            price(100_00),
        );
        assert_eq!(result, Err(BookingRuleViolation::InvalidDateOrder));
    }

    #[test]
    fn past_check_in_is_rejected_regardless_of_checkout() {
        let result = validate_and_price(
            today(),
            today() - Duration::days(1),
            today() + Duration::days(3),
            2,
            4,
            price(100_00),
        );
        assert_eq!(result, Err(BookingRuleViolation::CheckInInPast));
    }

    #[test]
    fn check_in_today_is_accepted() {
        let total =
            validate_and_price(today(), today(), today() + Duration::days(2), 1, 4, price(80_00))
                .unwrap();
        assert_eq!(total, price(160_00));
    }

    #[test]
    fn date_order_is_checked_before_past_check_in() {
        // Both rules are violated; the date-order rule wins because it runs first.
        let result = validate_and_price(
            today(),
            today() - Duration::days(2),
            today() - Duration::days(5),
            2,
            4,
            price(100_00),
        );
        assert_eq!(result, Err(BookingRuleViolation::InvalidDateOrder));
    }

    #[test]
    fn guest_count_over_capacity_is_rejected() {
        let result = validate_and_price(
            today(),
            today() + Duration::days(5),
            today() + Duration::days(8),
            5,
            4,
            price(100_00),
        );
        assert_eq!(
            result,
            Err(BookingRuleViolation::GuestCountExceedsCapacity { requested: 5, max: 4 })
        );
    }

    #[test]
    fn guest_count_at_capacity_is_accepted() {
        assert!(validate_and_price(
            today(),
            today() + Duration::days(1),
            today() + Duration::days(2),
            4,
            4,
            price(100_00),
        )
        .is_ok());
    }

    #[test]
    fn capacity_violation_message_names_both_counts() {
        let err = validate_guest_count(5, 4).unwrap_err();
        assert_eq!(
            err.to_string(),
            "number of guests (5) exceeds maximum allowed (4)"
        );
    }

    #[test]
    fn pricing_is_exact_at_two_decimal_places() {
        // 123.45 * 2 nights must be 246.90 exactly, no float drift.
        let total = quote_total_price(
            price(123_45),
            today() + Duration::days(1),
            today() + Duration::days(3),
        );
        assert_eq!(total, price(246_90));
    }

    #[test]
    fn single_night_costs_one_nightly_rate() {
        let total = quote_total_price(
            price(59_99),
            today() + Duration::days(1),
            today() + Duration::days(2),
        );
        assert_eq!(total, price(59_99));
    }

    #[test]
    fn total_nights_is_the_calendar_day_difference() {
        assert_eq!(
            total_nights(today(), today() + Duration::days(7)),
            7
        );
    }

    #[test]
    fn ratings_between_one_and_five_are_accepted() {
        for rating in 1..=5 {
            assert!(validate_rating(rating).is_ok());
        }
    }

    #[test]
    fn out_of_range_ratings_are_rejected() {
        for rating in [-1, 0, 6] {
            assert_eq!(validate_rating(rating), Err(RatingOutOfRange(rating)));
        }
    }
}

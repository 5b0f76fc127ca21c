use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::PgPool;
use validator::Validate;

use crate::auth::CurrentActor;
use crate::error::ApiError;
use crate::models::booking::{Booking, BookingResponse, BookingStatus, CreateBooking, UpdateBooking};
use crate::models::listing::Listing;
use crate::validation;

const BOOKING_COLUMNS: &str = "b.id, b.listing_id, b.guest_id, b.check_in_date, \
     b.check_out_date, b.number_of_guests, b.total_price, b.status, b.special_requests, \
     b.created_at, b.updated_at, u.username AS guest_username, l.title AS listing_title, \
     l.location AS listing_location, (b.check_out_date - b.check_in_date) AS total_nights";

async fn fetch_booking(pool: &PgPool, id: i64) -> Result<Option<BookingResponse>, sqlx::Error> {
    sqlx::query_as::<_, BookingResponse>(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings b \
         JOIN users u ON u.id = b.guest_id \
         JOIN listings l ON l.id = b.listing_id \
         WHERE b.id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// True when a confirmed booking on the listing overlaps [check_in, check_out).
/// `exclude_id` skips the booking being updated.
async fn dates_taken<'e, E>(
    executor: E,
    listing_id: i64,
    check_in: chrono::NaiveDate,
    check_out: chrono::NaiveDate,
    exclude_id: Option<i64>,
) -> Result<bool, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Postgres>,
{
    sqlx::query_scalar(
        "SELECT EXISTS ( \
             SELECT 1 FROM bookings \
             WHERE listing_id = $1 \
             AND status = 'confirmed' \
             AND check_in_date < $2 \
             AND check_out_date > $3 \
             AND ($4::BIGINT IS NULL OR id <> $4) \
         )",
    )
    .bind(listing_id)
    .bind(check_out)
    .bind(check_in)
    .bind(exclude_id)
    .fetch_one(executor)
    .await
}

pub async fn list_bookings(pool: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let bookings = sqlx::query_as::<_, BookingResponse>(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings b \
         JOIN users u ON u.id = b.guest_id \
         JOIN listings l ON l.id = b.listing_id \
         ORDER BY b.created_at DESC"
    ))
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(bookings))
}

pub async fn get_booking(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let booking = fetch_booking(pool.get_ref(), id)
        .await?
        .ok_or(ApiError::NotFound("booking"))?;

    Ok(HttpResponse::Ok().json(booking))
}

pub async fn create_booking(
    pool: web::Data<PgPool>,
    actor: CurrentActor,
    body: web::Json<CreateBooking>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate()?;

    let mut tx = pool.begin().await?;

    // 1. The target listing must exist before any rule can run.
    let listing = sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = $1")
        .bind(body.listing_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ApiError::NotFound("listing"))?;

    // 2. Acceptance rules and the price quote, all before any write.
    let today = Utc::now().date_naive();
    let total_price = validation::validate_and_price(
        today,
        body.check_in_date,
        body.check_out_date,
        body.number_of_guests,
        listing.max_guests,
        listing.price_per_night,
    )?;

    // 3. Reject date ranges colliding with a confirmed stay.
    let taken = dates_taken(
        &mut *tx,
        body.listing_id,
        body.check_in_date,
        body.check_out_date,
        None,
    )
    .await?;
    if taken {
        return Err(ApiError::Conflict(
            "listing is already booked for the requested dates".to_string(),
        ));
    }

    // 4. Insert with the server-computed price; the guest is the actor.
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO bookings (listing_id, guest_id, check_in_date, check_out_date, \
         number_of_guests, total_price, status, special_requests) \
         VALUES ($1, $2, $3, $4, $5, $6, 'pending', $7) RETURNING id",
    )
    .bind(body.listing_id)
    .bind(actor.0)
    .bind(body.check_in_date)
    .bind(body.check_out_date)
    .bind(body.number_of_guests)
    .bind(total_price)
    .bind(&body.special_requests)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    let booking = fetch_booking(pool.get_ref(), id)
        .await?
        .ok_or(ApiError::NotFound("booking"))?;

    Ok(HttpResponse::Created().json(booking))
}

pub async fn update_booking(
    pool: web::Data<PgPool>,
    actor: CurrentActor,
    path: web::Path<i64>,
    body: web::Json<UpdateBooking>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let body = body.into_inner();
    body.validate()?;

    let mut tx = pool.begin().await?;

    let current = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ApiError::NotFound("booking"))?;

    if current.guest_id != actor.0 {
        return Err(ApiError::Forbidden);
    }

    let listing = sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = $1")
        .bind(current.listing_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ApiError::NotFound("listing"))?;

    let check_in = body.check_in_date.unwrap_or(current.check_in_date);
    let check_out = body.check_out_date.unwrap_or(current.check_out_date);
    let guests = body.number_of_guests.unwrap_or(current.number_of_guests);
    let status = body.status.unwrap_or(current.status);
    let special_requests = body.special_requests.or_else(|| current.special_requests.clone());

    let dates_changed =
        check_in != current.check_in_date || check_out != current.check_out_date;

    // Re-run the acceptance rules whenever the stay itself changes. The
    // past-check-in rule only applies to dates being moved, so an old
    // booking can still change its guest count or status.
    let mut total_price = current.total_price;
    if dates_changed || guests != current.number_of_guests {
        validation::validate_date_order(check_in, check_out)?;
        if dates_changed {
            validation::validate_check_in_not_past(Utc::now().date_naive(), check_in)?;
        }
        validation::validate_guest_count(guests, listing.max_guests)?;
        total_price = validation::quote_total_price(listing.price_per_night, check_in, check_out);
    }

    // Confirming a booking (or moving a confirmed one) must not collide
    // with another confirmed stay.
    let becomes_confirmed = status == BookingStatus::Confirmed
        && (dates_changed || current.status != BookingStatus::Confirmed);
    if becomes_confirmed {
        let taken = dates_taken(&mut *tx, current.listing_id, check_in, check_out, Some(id)).await?;
        if taken {
            return Err(ApiError::Conflict(
                "listing is already booked for the requested dates".to_string(),
            ));
        }
    }

    sqlx::query(
        "UPDATE bookings SET check_in_date = $1, check_out_date = $2, number_of_guests = $3, \
         total_price = $4, status = $5, special_requests = $6, updated_at = NOW() WHERE id = $7",
    )
    .bind(check_in)
    .bind(check_out)
    .bind(guests)
    .bind(total_price)
    .bind(status)
    .bind(&special_requests)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    let booking = fetch_booking(pool.get_ref(), id)
        .await?
        .ok_or(ApiError::NotFound("booking"))?;

    Ok(HttpResponse::Ok().json(booking))
}

pub async fn delete_booking(
    pool: web::Data<PgPool>,
    actor: CurrentActor,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let current = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
        .bind(id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or(ApiError::NotFound("booking"))?;

    if current.guest_id != actor.0 {
        return Err(ApiError::Forbidden);
    }

    sqlx::query("DELETE FROM bookings WHERE id = $1")
        .bind(id)
        .execute(pool.get_ref())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

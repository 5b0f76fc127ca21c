use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use validator::Validate;

use crate::auth::CurrentActor;
use crate::error::ApiError;
use crate::models::booking::{Booking, BookingStatus};
use crate::models::review::{CreateReview, Review, ReviewResponse, UpdateReview};
use crate::validation;

const REVIEW_COLUMNS: &str = "r.id, r.listing_id, r.guest_id, r.booking_id, r.rating, \
     r.title, r.comment, r.is_verified, r.created_at, r.updated_at, \
     u.username AS guest_username, l.title AS listing_title";

async fn fetch_review(pool: &PgPool, id: i64) -> Result<Option<ReviewResponse>, sqlx::Error> {
    sqlx::query_as::<_, ReviewResponse>(&format!(
        "SELECT {REVIEW_COLUMNS} FROM reviews r \
         JOIN users u ON u.id = r.guest_id \
         JOIN listings l ON l.id = r.listing_id \
         WHERE r.id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_reviews(pool: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let reviews = sqlx::query_as::<_, ReviewResponse>(&format!(
        "SELECT {REVIEW_COLUMNS} FROM reviews r \
         JOIN users u ON u.id = r.guest_id \
         JOIN listings l ON l.id = r.listing_id \
         ORDER BY r.created_at DESC"
    ))
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(reviews))
}

pub async fn get_review(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let review = fetch_review(pool.get_ref(), id)
        .await?
        .ok_or(ApiError::NotFound("review"))?;

    Ok(HttpResponse::Ok().json(review))
}

pub async fn create_review(
    pool: web::Data<PgPool>,
    actor: CurrentActor,
    body: web::Json<CreateReview>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate()?;
    validation::validate_rating(body.rating)?;

    let mut tx = pool.begin().await?;

    let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
        .bind(body.booking_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ApiError::NotFound("booking"))?;

    if booking.listing_id != body.listing_id {
        return Err(ApiError::Validation(
            "booking does not belong to the given listing".to_string(),
        ));
    }

    // Only the guest who stayed can review their booking.
    if booking.guest_id != actor.0 {
        return Err(ApiError::Forbidden);
    }

    // Verification is a server decision: the stay must have completed.
    let is_verified = booking.status == BookingStatus::Completed;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO reviews (listing_id, guest_id, booking_id, rating, title, comment, \
         is_verified) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
    )
    .bind(body.listing_id)
    .bind(actor.0)
    .bind(body.booking_id)
    .bind(body.rating)
    .bind(&body.title)
    .bind(&body.comment)
    .bind(is_verified)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return ApiError::Conflict(
                    "a review for this booking already exists".to_string(),
                );
            }
        }
        ApiError::Database(e)
    })?;

    tx.commit().await?;

    let review = fetch_review(pool.get_ref(), id)
        .await?
        .ok_or(ApiError::NotFound("review"))?;

    Ok(HttpResponse::Created().json(review))
}

pub async fn update_review(
    pool: web::Data<PgPool>,
    actor: CurrentActor,
    path: web::Path<i64>,
    body: web::Json<UpdateReview>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let body = body.into_inner();
    body.validate()?;

    let current = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
        .bind(id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or(ApiError::NotFound("review"))?;

    if current.guest_id != actor.0 {
        return Err(ApiError::Forbidden);
    }

    let rating = body.rating.unwrap_or(current.rating);
    validation::validate_rating(rating)?;

    sqlx::query(
        "UPDATE reviews SET rating = $1, title = $2, comment = $3, updated_at = NOW() \
         WHERE id = $4",
    )
    .bind(rating)
    .bind(body.title.unwrap_or(current.title))
    .bind(body.comment.unwrap_or(current.comment))
    .bind(id)
    .execute(pool.get_ref())
    .await?;

    let review = fetch_review(pool.get_ref(), id)
        .await?
        .ok_or(ApiError::NotFound("review"))?;

    Ok(HttpResponse::Ok().json(review))
}

pub async fn delete_review(
    pool: web::Data<PgPool>,
    actor: CurrentActor,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let current = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
        .bind(id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or(ApiError::NotFound("review"))?;

    if current.guest_id != actor.0 {
        return Err(ApiError::Forbidden);
    }

    sqlx::query("DELETE FROM reviews WHERE id = $1")
        .bind(id)
        .execute(pool.get_ref())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

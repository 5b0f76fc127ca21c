use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use validator::Validate;

use crate::auth::CurrentActor;
use crate::error::ApiError;
use crate::models::listing::{CreateListing, Listing, ListingResponse, UpdateListing};

const LISTING_COLUMNS: &str = "l.id, l.title, l.description, l.location, l.price_per_night, \
     l.max_guests, l.bedrooms, l.bathrooms, l.amenities, l.is_active, \
     l.created_at, l.updated_at, u.username AS host_username";

async fn fetch_listing(pool: &PgPool, id: i64) -> Result<Option<ListingResponse>, sqlx::Error> {
    sqlx::query_as::<_, ListingResponse>(&format!(
        "SELECT {LISTING_COLUMNS} FROM listings l JOIN users u ON u.id = l.host_id WHERE l.id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_listings(pool: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let listings = sqlx::query_as::<_, ListingResponse>(&format!(
        "SELECT {LISTING_COLUMNS} FROM listings l JOIN users u ON u.id = l.host_id \
         ORDER BY l.created_at DESC"
    ))
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(listings))
}

pub async fn get_listing(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let listing = fetch_listing(pool.get_ref(), id)
        .await?
        .ok_or(ApiError::NotFound("listing"))?;

    Ok(HttpResponse::Ok().json(listing))
}

pub async fn create_listing(
    pool: web::Data<PgPool>,
    actor: CurrentActor,
    body: web::Json<CreateListing>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate()?;
    if body.price_per_night.is_sign_negative() {
        return Err(ApiError::Validation(
            "price_per_night must not be negative".to_string(),
        ));
    }

    // The host is always the authenticated actor, never the request body.
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO listings (title, description, location, price_per_night, max_guests, \
         bedrooms, bathrooms, amenities, is_active, host_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING id",
    )
    .bind(&body.title)
    .bind(&body.description)
    .bind(&body.location)
    .bind(body.price_per_night)
    .bind(body.max_guests)
    .bind(body.bedrooms)
    .bind(body.bathrooms)
    .bind(&body.amenities)
    .bind(body.is_active.unwrap_or(true))
    .bind(actor.0)
    .fetch_one(pool.get_ref())
    .await?;

    let listing = fetch_listing(pool.get_ref(), id)
        .await?
        .ok_or(ApiError::NotFound("listing"))?;

    Ok(HttpResponse::Created().json(listing))
}

pub async fn update_listing(
    pool: web::Data<PgPool>,
    actor: CurrentActor,
    path: web::Path<i64>,
    body: web::Json<UpdateListing>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let body = body.into_inner();
    body.validate()?;
    if let Some(price) = body.price_per_night {
        if price.is_sign_negative() {
            return Err(ApiError::Validation(
                "price_per_night must not be negative".to_string(),
            ));
        }
    }

    let current = sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = $1")
        .bind(id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or(ApiError::NotFound("listing"))?;

    // Only the host may change a listing; the host itself never changes.
    if current.host_id != actor.0 {
        return Err(ApiError::Forbidden);
    }

    sqlx::query(
        "UPDATE listings SET title = $1, description = $2, location = $3, price_per_night = $4, \
         max_guests = $5, bedrooms = $6, bathrooms = $7, amenities = $8, is_active = $9, \
         updated_at = NOW() WHERE id = $10",
    )
    .bind(body.title.unwrap_or(current.title))
    .bind(body.description.unwrap_or(current.description))
    .bind(body.location.unwrap_or(current.location))
    .bind(body.price_per_night.unwrap_or(current.price_per_night))
    .bind(body.max_guests.unwrap_or(current.max_guests))
    .bind(body.bedrooms.unwrap_or(current.bedrooms))
    .bind(body.bathrooms.unwrap_or(current.bathrooms))
    .bind(body.amenities.unwrap_or(current.amenities))
    .bind(body.is_active.unwrap_or(current.is_active))
    .bind(id)
    .execute(pool.get_ref())
    .await?;

    let listing = fetch_listing(pool.get_ref(), id)
        .await?
        .ok_or(ApiError::NotFound("listing"))?;

    Ok(HttpResponse::Ok().json(listing))
}

pub async fn delete_listing(
    pool: web::Data<PgPool>,
    actor: CurrentActor,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let current = sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = $1")
        .bind(id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or(ApiError::NotFound("listing"))?;

    if current.host_id != actor.0 {
        return Err(ApiError::Forbidden);
    }

    // Dependent bookings and reviews go with it (ON DELETE CASCADE).
    sqlx::query("DELETE FROM listings WHERE id = $1")
        .bind(id)
        .execute(pool.get_ref())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

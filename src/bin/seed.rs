//! Seeds the database with sample data for manual testing.
//!
//! Inserts a fixed set of users, listings, bookings and reviews. Set
//! `SEED_CLEAR=1` to truncate the tables first.

use chrono::{Duration, NaiveDate, Utc};
use dotenv::dotenv;
use env_logger::Env;
use rust_decimal::Decimal;
use sqlx::PgPool;

use travel_listings_api::db;
use travel_listings_api::models::booking::BookingStatus;
use travel_listings_api::models::user::User;
use travel_listings_api::validation;

const SAMPLE_USERS: &[(&str, &str)] = &[
    ("amina_host", "amina@example.com"),
    ("james_host", "james@example.com"),
    ("lena_guest", "lena@example.com"),
    ("tunde_guest", "tunde@example.com"),
    ("mary_guest", "mary@example.com"),
];

// title, description, location, price-per-night cents, max_guests, bedrooms, bathrooms
const SAMPLE_LISTINGS: &[(&str, &str, &str, i64, i32, i32, i32)] = &[
    (
        "Beachfront Villa",
        "Spacious villa with a private path to the beach.",
        "Diani Beach",
        180_00,
        6,
        3,
        2,
    ),
    (
        "Downtown Studio",
        "Compact studio a short walk from the business district.",
        "Nairobi",
        45_50,
        2,
        1,
        1,
    ),
    (
        "Lakeside Cottage",
        "Quiet cottage overlooking the lake, good for long stays.",
        "Naivasha",
        95_00,
        4,
        2,
        1,
    ),
    (
        "Garden Apartment",
        "Ground-floor apartment with a shared garden and parking.",
        "Mombasa",
        70_25,
        3,
        2,
        1,
    ),
];

const SAMPLE_AMENITIES: &[&[&str]] = &[
    &["wifi", "pool", "kitchen", "parking"],
    &["wifi", "workspace"],
    &["wifi", "kitchen", "fireplace"],
    &["wifi", "garden", "parking"],
];

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let pool = db::get_db_pool().await;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    if std::env::var("SEED_CLEAR").is_ok() {
        log::info!("Clearing existing data...");
        sqlx::query("TRUNCATE users, listings, bookings, reviews RESTART IDENTITY CASCADE")
            .execute(&pool)
            .await
            .expect("Failed to clear tables");
    }

    let users = seed_users(&pool).await;
    let (hosts, guests) = users.split_at(2);

    let listing_ids = seed_listings(&pool, hosts).await;
    let completed = seed_bookings(&pool, guests, &listing_ids).await;
    let reviews = seed_reviews(&pool, &completed).await;

    log::info!(
        "Seeded {} users, {} listings, bookings for each listing, {} reviews",
        users.len(),
        listing_ids.len(),
        reviews
    );
}

async fn seed_users(pool: &PgPool) -> Vec<User> {
    for (username, email) in SAMPLE_USERS {
        sqlx::query(
            "INSERT INTO users (username, email) VALUES ($1, $2) \
             ON CONFLICT (username) DO NOTHING",
        )
        .bind(username)
        .bind(email)
        .execute(pool)
        .await
        .expect("Failed to insert user");
    }

    let usernames: Vec<String> = SAMPLE_USERS.iter().map(|(u, _)| u.to_string()).collect();
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ANY($1) ORDER BY id")
        .bind(&usernames)
        .fetch_all(pool)
        .await
        .expect("Failed to load users")
}

async fn seed_listings(pool: &PgPool, hosts: &[User]) -> Vec<i64> {
    let mut ids = Vec::with_capacity(SAMPLE_LISTINGS.len());

    for (i, (title, description, location, cents, max_guests, bedrooms, bathrooms)) in
        SAMPLE_LISTINGS.iter().enumerate()
    {
        let host = &hosts[i % hosts.len()];
        let amenities: Vec<String> = SAMPLE_AMENITIES[i % SAMPLE_AMENITIES.len()]
            .iter()
            .map(|a| a.to_string())
            .collect();

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO listings (title, description, location, price_per_night, max_guests, \
             bedrooms, bathrooms, amenities, host_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING id",
        )
        .bind(title)
        .bind(description)
        .bind(location)
        .bind(Decimal::new(*cents, 2))
        .bind(max_guests)
        .bind(bedrooms)
        .bind(bathrooms)
        .bind(&amenities)
        .bind(host.id)
        .fetch_one(pool)
        .await
        .expect("Failed to insert listing");

        ids.push(id);
    }

    ids
}

/// Each listing gets one upcoming booking and one completed past stay.
/// Returns (booking id, guest id, listing id) for the completed ones so
/// reviews can reference them.
async fn seed_bookings(
    pool: &PgPool,
    guests: &[User],
    listing_ids: &[i64],
) -> Vec<(i64, i64, i64)> {
    let today = Utc::now().date_naive();
    let mut completed = Vec::new();

    for (i, listing_id) in listing_ids.iter().enumerate() {
        let guest = &guests[i % guests.len()];
        let (cents, max_guests) = (SAMPLE_LISTINGS[i].3, SAMPLE_LISTINGS[i].4);
        let price = Decimal::new(cents, 2);

        let upcoming_in = today + Duration::days(3 + i as i64);
        let upcoming_out = upcoming_in + Duration::days(2 + (i as i64 % 3));
        let status = if i % 2 == 0 {
            BookingStatus::Pending
        } else {
            BookingStatus::Confirmed
        };
        insert_booking(
            pool,
            *listing_id,
            guest.id,
            upcoming_in,
            upcoming_out,
            max_guests.min(2),
            price,
            status,
        )
        .await;

        // Past stays are written directly; the acceptance rules only apply
        // to API-created bookings.
        let past_in = today - Duration::days(40 - i as i64);
        let past_out = past_in + Duration::days(3);
        let booking_id = insert_booking(
            pool,
            *listing_id,
            guest.id,
            past_in,
            past_out,
            1,
            price,
            BookingStatus::Completed,
        )
        .await;
        completed.push((booking_id, guest.id, *listing_id));
    }

    completed
}

#[allow(clippy::too_many_arguments)]
async fn insert_booking(
    pool: &PgPool,
    listing_id: i64,
    guest_id: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
    guests: i32,
    price_per_night: Decimal,
    status: BookingStatus,
) -> i64 {
    let total_price = validation::quote_total_price(price_per_night, check_in, check_out);

    sqlx::query_scalar(
        "INSERT INTO bookings (listing_id, guest_id, check_in_date, check_out_date, \
         number_of_guests, total_price, status, special_requests) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, NULL) RETURNING id",
    )
    .bind(listing_id)
    .bind(guest_id)
    .bind(check_in)
    .bind(check_out)
    .bind(guests)
    .bind(total_price)
    .bind(status)
    .fetch_one(pool)
    .await
    .expect("Failed to insert booking")
}

async fn seed_reviews(pool: &PgPool, completed: &[(i64, i64, i64)]) -> usize {
    const SAMPLE_REVIEWS: &[(i32, &str, &str)] = &[
        (5, "Exactly as described", "Clean, quiet and well located."),
        (4, "Great stay", "Host was responsive, check-in was easy."),
        (3, "Decent value", "A bit noisy at night but otherwise fine."),
    ];

    let mut count = 0;
    for (i, (booking_id, guest_id, listing_id)) in completed.iter().enumerate() {
        let (rating, title, comment) = SAMPLE_REVIEWS[i % SAMPLE_REVIEWS.len()];

        sqlx::query(
            "INSERT INTO reviews (listing_id, guest_id, booking_id, rating, title, comment, \
             is_verified) VALUES ($1, $2, $3, $4, $5, $6, TRUE) \
             ON CONFLICT (guest_id, booking_id) DO NOTHING",
        )
        .bind(listing_id)
        .bind(guest_id)
        .bind(booking_id)
        .bind(rating)
        .bind(title)
        .bind(comment)
        .execute(pool)
        .await
        .expect("Failed to insert review");

        count += 1;
    }

    count
}

use actix_web::HttpResponse;

/// Static map of the available route paths.
pub async fn api_overview() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "overview": "/api",
        "listings": "/api/listings",
        "listing_detail": "/api/listings/{id}",
        "bookings": "/api/bookings",
        "booking_detail": "/api/bookings/{id}",
        "reviews": "/api/reviews",
        "review_detail": "/api/reviews/{id}"
    }))
}

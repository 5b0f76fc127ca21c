//! Service tests for the parts of the HTTP surface that need no database:
//! the overview route map and the actor header extractor.

use actix_web::{test, web, App, HttpResponse};

use travel_listings_api::auth::CurrentActor;
use travel_listings_api::error::ApiError;
use travel_listings_api::handlers::overview::api_overview;

#[actix_web::test]
async fn overview_returns_the_route_map() {
    let app = test::init_service(
        App::new().service(web::scope("/api").route("", web::get().to(api_overview))),
    )
    .await;

    let req = test::TestRequest::get().uri("/api").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["listings"], "/api/listings");
    assert_eq!(body["booking_detail"], "/api/bookings/{id}");
    assert_eq!(body["reviews"], "/api/reviews");
}

async fn whoami(actor: CurrentActor) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().body(actor.0.to_string()))
}

#[actix_web::test]
async fn requests_without_an_actor_header_are_rejected() {
    let app =
        test::init_service(App::new().route("/whoami", web::get().to(whoami))).await;

    let req = test::TestRequest::get().uri("/whoami").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn malformed_actor_headers_are_rejected() {
    let app =
        test::init_service(App::new().route("/whoami", web::get().to(whoami))).await;

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("X-User-Id", "not-a-number"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn a_numeric_actor_header_is_accepted() {
    let app =
        test::init_service(App::new().route("/whoami", web::get().to(whoami))).await;

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("X-User-Id", "7"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"7");
}

use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;

use travel_listings_api::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger and environment
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    log::info!("Connecting to database...");
    let pool = db::get_db_pool().await;

    // Run migrations
    log::info!("Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let bind_addr =
        std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    log::info!("Starting server at http://{bind_addr}");

    let pool_data = web::Data::new(pool);

    HttpServer::new(move || {
        App::new()
            .app_data(pool_data.clone())
            .wrap(middleware::Logger::default())
            .service(
                web::scope("/api")
                    .route("", web::get().to(handlers::overview::api_overview))
                    .service(
                        web::scope("/listings")
                            .route("", web::get().to(handlers::listings::list_listings))
                            .route("", web::post().to(handlers::listings::create_listing))
                            .route("/{id}", web::get().to(handlers::listings::get_listing))
                            .route("/{id}", web::put().to(handlers::listings::update_listing))
                            .route("/{id}", web::patch().to(handlers::listings::update_listing))
                            .route(
                                "/{id}",
                                web::delete().to(handlers::listings::delete_listing),
                            ),
                    )
                    .service(
                        web::scope("/bookings")
                            .route("", web::get().to(handlers::bookings::list_bookings))
                            .route("", web::post().to(handlers::bookings::create_booking))
                            .route("/{id}", web::get().to(handlers::bookings::get_booking))
                            .route("/{id}", web::put().to(handlers::bookings::update_booking))
                            .route("/{id}", web::patch().to(handlers::bookings::update_booking))
                            .route(
                                "/{id}",
                                web::delete().to(handlers::bookings::delete_booking),
                            ),
                    )
                    .service(
                        web::scope("/reviews")
                            .route("", web::get().to(handlers::reviews::list_reviews))
                            .route("", web::post().to(handlers::reviews::create_review))
                            .route("/{id}", web::get().to(handlers::reviews::get_review))
                            .route("/{id}", web::put().to(handlers::reviews::update_review))
                            .route("/{id}", web::patch().to(handlers::reviews::update_review))
                            .route("/{id}", web::delete().to(handlers::reviews::delete_review)),
                    ),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}

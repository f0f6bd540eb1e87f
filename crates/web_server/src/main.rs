//! Main entry point for the hotel booking backend server.
//! This crate wires configuration, the database pool, and the REST routes.

use actix_web::{App, HttpResponse, HttpServer, middleware::Logger, web};
use auth_services::jwt::JwtService;
use auth_services::middleware::AuthMiddleware;
use postgres::database::{create_connection_pool, test_connection};
use web_handlers::*;

mod config;
use config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    log::info!("Starting hotel booking server...");

    // Create database connection pool
    let pool = match create_connection_pool(&config.database_url).await {
        Ok(pool) => {
            log::info!("Database pool created successfully");

            if let Err(e) = test_connection(&pool).await {
                log::error!("Database connection test failed: {}", e);
            }
            pool
        }
        Err(e) => {
            log::error!("Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    // Token service shared by the login handler and the auth middleware
    let jwt_service = JwtService::new(&config.jwt_secret, config.access_token_ttl_minutes);

    let bind_addr = config.bind_addr.clone();
    log::info!("Server will be available at: http://{}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(jwt_service.clone()))
            .wrap(Logger::default())
            .service(
                web::scope("/auth")
                    // Public routes
                    .route("/register", web::post().to(register))
                    .route("/login", web::post().to(login))
                    .route("/logout", web::post().to(logout))
                    // Protected route (requires authentication)
                    .service(
                        web::resource("/me")
                            .route(web::get().to(me))
                            .wrap(AuthMiddleware::new(jwt_service.clone())),
                    ),
            )
            .service(
                web::scope("/hotels")
                    .route("", web::get().to(list_hotels))
                    .route("", web::post().to(create_hotel))
                    .route("/{hotel_id}", web::get().to(get_hotel))
                    .route("/{hotel_id}", web::put().to(replace_hotel))
                    .route("/{hotel_id}", web::patch().to(update_hotel))
                    .route("/{hotel_id}", web::delete().to(delete_hotel))
                    .route("/{hotel_id}/rooms", web::get().to(list_rooms))
                    .route("/{hotel_id}/rooms", web::post().to(create_room))
                    .route("/{hotel_id}/rooms/{room_id}", web::get().to(get_room))
                    .route("/{hotel_id}/rooms/{room_id}", web::put().to(replace_room))
                    .route("/{hotel_id}/rooms/{room_id}", web::patch().to(update_room))
                    .route("/{hotel_id}/rooms/{room_id}", web::delete().to(delete_room)),
            )
            // Booking routes (require authentication)
            .service(
                web::scope("/bookings")
                    .wrap(AuthMiddleware::new(jwt_service.clone()))
                    .route("", web::post().to(create_booking))
                    .route("", web::get().to(list_bookings))
                    .route("/{booking_id}", web::get().to(get_booking)),
            )
            .route(
                "/health",
                web::get().to(|| async { HttpResponse::Ok().body("OK") }),
            )
    })
    .bind(&bind_addr)?
    .run()
    .await
}

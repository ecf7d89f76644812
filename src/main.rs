use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use dotenvy::dotenv;
use log::info;

mod api;
mod models;
mod services;

use api::pix_controller::generate;
use services::middleware::{ApiKeyConfig, ApiKeyMiddleware};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    // Load .env file
    dotenv().ok();
    let api_key = std::env::var("API_KEY").expect("API_KEY environment variable is required");
    let header_name =
        std::env::var("API_KEY_HEADER").unwrap_or_else(|_| "x-api-key".to_string());

    // Get configuration from environment
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .expect("PORT must be a number");

    info!("Starting server at {}:{}", host, port);

    let auth_config = ApiKeyConfig::new(api_key)
        .with_rate_limit(120, 60)
        .with_header_name(&header_name)
        .expect("API_KEY_HEADER must be a valid header name");

    HttpServer::new(move || {
        App::new()
            .wrap(ApiKeyMiddleware::new(auth_config.clone()))
            .wrap(middleware::Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST"])
                    .allowed_headers(vec![
                        actix_web::http::header::AUTHORIZATION,
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            // Register API routes
            .service(web::scope("/api/pix").route("/payload", web::post().to(generate)))
            // Add a health check endpoint
            .route(
                "/health",
                web::get().to(|| async { HttpResponse::Ok().body("Service is running") }),
            )
    })
    .bind((host, port))?
    .run()
    .await
}

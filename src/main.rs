mod api;
mod config;
mod database;
mod middleware;
mod models;
mod pages;
mod services;
mod utils;
mod views;

use actix_cors::Cors;
use actix_web::{middleware::{Compress, Logger}, web, App, HttpServer};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::services::UserService;
use crate::views::Views;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();

    log::info!("🚀 Starting User Admin...");

    // One store for the whole process, shared by every worker
    let users = web::Data::new(UserService::new());
    if config.seed_users {
        services::seed_demo_users(&users)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    }

    let views = Views::new().map_err(|e| {
        log::error!("❌ Failed to load templates: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
    })?;
    let views = web::Data::new(views);

    let bind = config.bind_address();
    log::info!("🌐 Server starting on {}", bind);
    log::info!("👥 User pages at: http://{}/User", bind);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind);
    log::info!("📄 OpenAPI spec at: http://{}/api-docs/openapi.json", bind);

    let cors_origins = config.cors_origins.clone();

    // Start HTTP server
    HttpServer::new(move || {
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .expose_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
            ])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(users.clone())
            .app_data(views.clone())
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(middleware::RequestMetrics)
            .wrap(Compress::default())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone())
            )
            // Health, metrics and /api/v1/users
            .configure(api::configure)
            // Server-rendered pages under /User
            .configure(pages::configure)
    })
    .bind(bind)?
    .run()
    .await
}

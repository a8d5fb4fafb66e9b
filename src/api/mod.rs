pub mod health;
pub mod metrics;
pub mod swagger;
pub mod users;

use actix_web::web;

use crate::utils::AppError;

/// JSON endpoints plus health and metrics.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Malformed bodies get the same JSON envelope as every other API error
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("⚠️ Rejected JSON body: {}", err);
        AppError::InvalidRequest(err.to_string()).into()
    }))
    .route("/health", web::get().to(health::health_check))
        .route("/metrics", web::get().to(metrics::get_metrics))
        .service(
            web::scope("/api/v1/users")
                .route("", web::get().to(users::list_users))
                .route("", web::post().to(users::create_user))
                .route("/{id}", web::get().to(users::get_user))
                .route("/{id}", web::put().to(users::update_user))
                .route("/{id}", web::delete().to(users::delete_user)),
        );
}

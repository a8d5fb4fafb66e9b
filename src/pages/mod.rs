pub mod users;

use actix_web::{web, HttpResponse};

/// Server-rendered user pages, routed the way the browser forms expect.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/",
        web::get().to(|| async {
            HttpResponse::Found()
                .insert_header(("Location", "/User"))
                .finish()
        }),
    )
    .service(
        web::scope("/User")
            .route("", web::get().to(users::index))
            .route("/Index", web::get().to(users::index))
            .route("/Search", web::get().to(users::search))
            .route("/Details/{id}", web::get().to(users::details))
            .route("/Create", web::get().to(users::create_form))
            .route("/Create", web::post().to(users::create))
            .route("/Edit/{id}", web::get().to(users::edit_form))
            .route("/Edit/{id}", web::post().to(users::edit))
            .route("/Delete/{id}", web::get().to(users::delete_confirm))
            .route("/Delete/{id}", web::post().to(users::delete)),
    );
}

use actix_web::{http::StatusCode, HttpResponse};
use minijinja::{Environment, Value};

use crate::utils::AppError;

/// Templates compiled into the binary. Names ending in `.html` get HTML
/// autoescaping from minijinja's default callback.
const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("not_found.html", include_str!("../../templates/not_found.html")),
    ("user/index.html", include_str!("../../templates/user/index.html")),
    ("user/details.html", include_str!("../../templates/user/details.html")),
    ("user/form.html", include_str!("../../templates/user/form.html")),
    ("user/delete.html", include_str!("../../templates/user/delete.html")),
];

pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Views { env })
    }

    pub fn render(&self, name: &str, ctx: Value) -> Result<String, AppError> {
        self.env
            .get_template(name)
            .and_then(|tpl| tpl.render(ctx))
            .map_err(|e| {
                log::error!("❌ Failed to render {}: {}", name, e);
                AppError::Internal(format!("template {} failed to render", name))
            })
    }

    /// Renders `name` into an HTML response with the given status.
    pub fn page(&self, status: StatusCode, name: &str, ctx: Value) -> Result<HttpResponse, AppError> {
        let body = self.render(name, ctx)?;
        Ok(HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body))
    }

    pub fn not_found(&self, message: &str) -> Result<HttpResponse, AppError> {
        self.page(
            StatusCode::NOT_FOUND,
            "not_found.html",
            minijinja::context! { message => message },
        )
    }
}

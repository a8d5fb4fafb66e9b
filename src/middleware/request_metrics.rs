use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::api::metrics;

/// Feeds the `/metrics` counters: every request, and every response with a
/// status of 400 or above.
pub struct RequestMetrics;

impl<S, B> Transform<S, ServiceRequest> for RequestMetrics
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestMetricsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestMetricsMiddleware { service }))
    }
}

pub struct RequestMetricsMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestMetricsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        metrics::increment_request_count();
        let fut = self.service.call(req);

        Box::pin(async move {
            match fut.await {
                Ok(res) => {
                    if res.status().as_u16() >= 400 {
                        metrics::increment_error_count();
                    }
                    Ok(res)
                }
                Err(e) => {
                    metrics::increment_error_count();
                    Err(e)
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::NewUser, services::UserService};
    use actix_web::{http::StatusCode, test, web, App};

    fn metric(text: &str, name: &str) -> u64 {
        text.lines()
            .find_map(|line| line.strip_prefix(name)?.strip_prefix(' '))
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or_else(|| panic!("{} missing from metrics", name))
    }

    #[actix_web::test]
    async fn test_counts_requests_and_errors() {
        let service = UserService::new();
        for (name, email) in [("Ann", "ann@x.com"), ("Bo", "bo@x.com")] {
            service
                .create_user(NewUser { name: name.into(), email: email.into() })
                .unwrap();
        }

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(service))
                .wrap(RequestMetrics)
                .configure(crate::api::configure),
        )
        .await;

        let read_metrics = || test::TestRequest::get().uri("/metrics").to_request();

        let before = String::from_utf8(test::call_and_read_body(&app, read_metrics()).await.to_vec()).unwrap();

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/users/1").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/users/99").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let after = String::from_utf8(test::call_and_read_body(&app, read_metrics()).await.to_vec()).unwrap();

        // 200, 404 and the second /metrics call itself
        assert_eq!(
            metric(&after, "http_requests_total") - metric(&before, "http_requests_total"),
            3
        );
        assert_eq!(
            metric(&after, "http_errors_total") - metric(&before, "http_errors_total"),
            1
        );
        assert_eq!(metric(&after, "users_total"), 2);
    }
}

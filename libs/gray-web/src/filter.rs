//! Service-boundary ingress filter.
//!
//! Internal services sit behind the edge gateway, which already validated
//! and rewrote the gray header; this filter therefore trusts the inbound
//! value without re-validation. The resolved tag is stored in the request
//! extensions and the downstream call runs inside the task-local tag
//! scope, so handler code and egress interceptors observe the same tag for
//! the whole request, on whichever worker it resumes.

use std::future::{ready, Ready};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpRequest,
};
use futures::future::LocalBoxFuture;
use tracing::debug;

use gray_core::{context, GrayConfig, GrayTag, VERSION_HEADER};

/// Middleware resolving the gray tag for requests entering this service.
#[derive(Clone)]
pub struct GrayFilter {
    config: GrayConfig,
}

impl GrayFilter {
    pub fn new(config: GrayConfig) -> Self {
        Self { config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for GrayFilter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = GrayFilterService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(GrayFilterService {
            service,
            config: self.config.clone(),
        }))
    }
}

pub struct GrayFilterService<S> {
    service: S,
    config: GrayConfig,
}

impl<S, B> Service<ServiceRequest> for GrayFilterService<S>
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
        let tag = resolve_tag(&req, &self.config);
        debug!(tag = tag.as_str(), path = req.path(), "resolved inbound gray tag");

        // Handlers read the tag through `gray_tag`; everything else reads
        // it from the task-local scope established below.
        req.extensions_mut().insert(tag);

        let fut = self.service.call(req);
        Box::pin(context::with_tag(tag, fut))
    }
}

fn resolve_tag(req: &ServiceRequest, config: &GrayConfig) -> GrayTag {
    if !config.enabled {
        return GrayTag::Base;
    }
    req.headers()
        .get_all(VERSION_HEADER)
        .filter_map(|value| value.to_str().ok())
        .map(GrayTag::from_header_value)
        .find(GrayTag::is_gray)
        .unwrap_or_default()
}

/// Tag resolved for this request, `Base` when the filter did not run.
pub fn gray_tag(req: &HttpRequest) -> GrayTag {
    req.extensions().get::<GrayTag>().copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    async fn echo_tag() -> HttpResponse {
        HttpResponse::Ok().body(context::current_tag().as_str())
    }

    async fn echo_extension_tag(req: HttpRequest) -> HttpResponse {
        HttpResponse::Ok().body(gray_tag(&req).as_str())
    }

    fn enabled() -> GrayConfig {
        GrayConfig {
            enabled: true,
            matches: Vec::new(),
        }
    }

    #[actix_web::test]
    async fn test_gray_header_scopes_gray_tag() {
        let app = test::init_service(
            App::new()
                .wrap(GrayFilter::new(enabled()))
                .route("/test", web::get().to(echo_tag)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/test")
            .insert_header((VERSION_HEADER, "gray"))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "gray");
    }

    #[actix_web::test]
    async fn test_missing_header_resolves_to_base() {
        let app = test::init_service(
            App::new()
                .wrap(GrayFilter::new(enabled()))
                .route("/test", web::get().to(echo_tag)),
        )
        .await;

        let req = test::TestRequest::get().uri("/test").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "base");
    }

    #[actix_web::test]
    async fn test_unrecognized_value_resolves_to_base() {
        let app = test::init_service(
            App::new()
                .wrap(GrayFilter::new(enabled()))
                .route("/test", web::get().to(echo_tag)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/test")
            .insert_header((VERSION_HEADER, "v2"))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "base");
    }

    #[actix_web::test]
    async fn test_disabled_routing_ignores_gray_header() {
        let app = test::init_service(
            App::new()
                .wrap(GrayFilter::new(GrayConfig::default()))
                .route("/test", web::get().to(echo_tag)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/test")
            .insert_header((VERSION_HEADER, "gray"))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "base");
    }

    #[actix_web::test]
    async fn test_tag_available_from_request_extensions() {
        let app = test::init_service(
            App::new()
                .wrap(GrayFilter::new(enabled()))
                .route("/test", web::get().to(echo_extension_tag)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/test")
            .insert_header((VERSION_HEADER, "gray"))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "gray");
    }

    #[actix_web::test]
    async fn test_tag_does_not_leak_between_requests() {
        let app = test::init_service(
            App::new()
                .wrap(GrayFilter::new(enabled()))
                .route("/test", web::get().to(echo_tag)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/test")
            .insert_header((VERSION_HEADER, "gray"))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "gray");

        // The next untagged request on the same workers must start clean.
        let req = test::TestRequest::get().uri("/test").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "base");
    }
}

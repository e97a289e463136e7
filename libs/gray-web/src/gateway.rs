//! Trust-boundary ingress filter for the edge gateway.
//!
//! The edge is where the effective tag is first assigned. The client may
//! send anything in the `version` header; after classification the filter
//! rewrites that header to exactly the resolved value, so internal hops
//! receive a value this gateway vouched for and can trust it without
//! re-validation.

use std::future::{ready, Ready};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use tracing::debug;

use gray_core::{context, GrayConfig, GrayTag, VERSION_HEADER};

/// Edge-gateway middleware assigning and publishing the effective tag.
///
/// With routing disabled the filter is a pass-through: no header rewrite,
/// and the request scope carries `Base`.
#[derive(Clone)]
pub struct GrayGatewayFilter {
    config: GrayConfig,
}

impl GrayGatewayFilter {
    pub fn new(config: GrayConfig) -> Self {
        Self { config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for GrayGatewayFilter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = GrayGatewayFilterService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(GrayGatewayFilterService {
            service,
            config: self.config.clone(),
        }))
    }
}

pub struct GrayGatewayFilterService<S> {
    service: S,
    config: GrayConfig,
}

impl<S, B> Service<ServiceRequest> for GrayGatewayFilterService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if !self.config.enabled {
            let fut = self.service.call(req);
            return Box::pin(context::with_tag(GrayTag::Base, fut));
        }

        let tag = req
            .headers()
            .get_all(VERSION_HEADER)
            .filter_map(|value| value.to_str().ok())
            .map(GrayTag::from_header_value)
            .find(GrayTag::is_gray)
            .unwrap_or_default();

        // Overwrite whatever the client supplied. Downstream services only
        // ever see a value this gateway resolved.
        req.headers_mut().insert(
            HeaderName::from_static(VERSION_HEADER),
            HeaderValue::from_static(tag.as_str()),
        );
        req.extensions_mut().insert(tag);
        debug!(tag = tag.as_str(), path = req.path(), "edge resolved gray tag");

        let fut = self.service.call(req);
        Box::pin(context::with_tag(tag, fut))
    }
}

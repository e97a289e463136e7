//! Tower layer establishing the request tag scope.
//!
//! An interceptor can rewrite a request but cannot wrap the handler
//! future, so scoping the task-local context happens one level down the
//! stack: this layer reads the inbound gray header off the `http::Request`
//! and runs the inner service future inside that tag's scope. Handler code
//! and its egress interceptors then observe the tag without manual
//! plumbing, and the scope drop clears it on every exit path, including
//! cancellation of the handler future.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use http::Request;
use tower::{Layer, Service};

use gray_core::{context, GrayConfig, GrayTag, VERSION_HEADER};

/// Layer wrapping a tonic server stack (or any `http::Request` service)
/// in the request tag scope.
#[derive(Clone, Default)]
pub struct GrayContextLayer {
    config: GrayConfig,
}

impl GrayContextLayer {
    pub fn new(config: GrayConfig) -> Self {
        Self { config }
    }
}

impl<S> Layer<S> for GrayContextLayer {
    type Service = GrayContextService<S>;

    fn layer(&self, service: S) -> Self::Service {
        GrayContextService {
            inner: service,
            config: self.config.clone(),
        }
    }
}

#[derive(Clone)]
pub struct GrayContextService<S> {
    inner: S,
    config: GrayConfig,
}

impl<S, B> Service<Request<B>> for GrayContextService<S>
where
    S: Service<Request<B>>,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<S::Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        let tag = if self.config.enabled {
            req.headers()
                .get_all(VERSION_HEADER)
                .iter()
                .filter_map(|value| value.to_str().ok())
                .map(GrayTag::from_header_value)
                .find(GrayTag::is_gray)
                .unwrap_or_default()
        } else {
            GrayTag::Base
        };

        let fut = self.inner.call(req);
        Box::pin(context::with_tag(tag, fut))
    }
}

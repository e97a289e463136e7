//! Server-side gray interceptor.
//!
//! Classifies incoming requests from their metadata and stores the
//! resolved tag in request extensions. Classification is a pure decision
//! step: it never fails a request, and a missing or malformed entry
//! resolves to base.

use tonic::metadata::MetadataMap;
use tonic::service::Interceptor;
use tonic::{Request, Status};
use tracing::debug;

use gray_core::{GrayConfig, GrayTag, VERSION_HEADER};

/// Server-side interceptor resolving the gray tag of incoming requests.
///
/// Internal services trust the inbound entry: the edge gateway already
/// validated and rewrote it, so no re-validation happens here. With
/// routing disabled every request resolves to base.
///
/// Handlers read the result through [`crate::GrayTagExt`]. Services whose
/// handlers make downstream calls should prefer [`crate::GrayContextLayer`],
/// which additionally establishes the task-local scope the egress
/// interceptor reads.
#[derive(Clone, Default)]
pub struct GrayServerInterceptor {
    config: GrayConfig,
}

impl GrayServerInterceptor {
    pub fn new(config: GrayConfig) -> Self {
        Self { config }
    }

    fn classify(&self, metadata: &MetadataMap) -> GrayTag {
        if !self.config.enabled {
            return GrayTag::Base;
        }
        metadata
            .get_all(VERSION_HEADER)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(GrayTag::from_header_value)
            .find(GrayTag::is_gray)
            .unwrap_or_default()
    }
}

impl Interceptor for GrayServerInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let tag = self.classify(request.metadata());
        debug!(tag = tag.as_str(), "classified inbound request");
        request.extensions_mut().insert(tag);
        Ok(request)
    }
}

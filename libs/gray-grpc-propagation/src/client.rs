//! Client-side gray interceptor.
//!
//! Reads the task-local request tag immediately before dispatch and, only
//! for gray-tagged scopes, attaches the gray metadata entry to the
//! outgoing request.

use tonic::metadata::AsciiMetadataValue;
use tonic::service::Interceptor;
use tonic::{Request, Status};
use tracing::debug;

use gray_core::{context, VERSION_GRAY, VERSION_HEADER};

/// Client-side interceptor propagating the gray tag to the next hop.
///
/// Base-tagged calls are left untouched: absence of the entry is the
/// downstream default, so services that never opted into gray routing see
/// nothing unusual and the common path carries no extra metadata.
///
/// ## Usage
///
/// ```rust,no_run
/// use gray_grpc_propagation::GrayClientInterceptor;
/// use tonic::transport::Channel;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let channel = Channel::from_static("http://[::1]:50051")
///     .connect()
///     .await?;
///
/// // Attach to any gRPC client
/// // let mut client = SomeServiceClient::with_interceptor(channel, GrayClientInterceptor::new());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Default)]
pub struct GrayClientInterceptor;

impl GrayClientInterceptor {
    pub fn new() -> Self {
        Self
    }
}

impl Interceptor for GrayClientInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        if context::current_tag().is_gray() {
            request
                .metadata_mut()
                .insert(VERSION_HEADER, AsciiMetadataValue::from_static(VERSION_GRAY));
            debug!("attached gray tag to outbound request");
        }
        Ok(request)
    }
}

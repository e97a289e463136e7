//! Request-extension access to the resolved gray tag.

use gray_core::GrayTag;

/// Accessor for the tag stored by [`crate::GrayServerInterceptor`].
///
/// ## Example
///
/// ```rust,no_run
/// use gray_grpc_propagation::GrayTagExt;
/// use tonic::{Request, Response, Status};
///
/// async fn get_profile(request: Request<()>) -> Result<Response<()>, Status> {
///     if request.gray_tag().is_gray() {
///         // candidate-version behavior
///     }
///     Ok(Response::new(()))
/// }
/// ```
pub trait GrayTagExt {
    /// Tag resolved for this request, `Base` when no interceptor ran.
    fn gray_tag(&self) -> GrayTag;
}

impl<T> GrayTagExt for tonic::Request<T> {
    fn gray_tag(&self) -> GrayTag {
        self.extensions().get::<GrayTag>().copied().unwrap_or_default()
    }
}

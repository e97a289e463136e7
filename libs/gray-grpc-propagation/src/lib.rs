//! Gray Tag Propagation for gRPC Microservices
//!
//! This library makes a request's gray/base tag cross tonic service
//! boundaries without touching business payloads: the tag travels as a
//! single metadata entry, attached only when a request is gray-tagged.
//!
//! ## Core Components
//!
//! - **GrayClientInterceptor**: injects the gray metadata entry into
//!   outgoing requests made from a gray-tagged scope
//! - **GrayServerInterceptor**: classifies incoming requests and stores
//!   the resolved tag in request extensions
//! - **GrayTagExt**: request extension trait for reading the resolved tag
//! - **GrayContextLayer**: tower layer establishing the task-local tag
//!   scope around the whole handler future
//!
//! ## Usage Example
//!
//! ### Client Side
//!
//! ```rust,no_run
//! use gray_grpc_propagation::GrayClientInterceptor;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let channel = tonic::transport::Channel::from_static("http://[::1]:50051")
//!     .connect()
//!     .await?;
//!
//! // Gray-tagged scopes mark every request automatically
//! // let mut client = SomeServiceClient::with_interceptor(channel, GrayClientInterceptor::new());
//! # Ok(())
//! # }
//! ```
//!
//! ### Server Side
//!
//! ```rust,no_run
//! use gray_core::GrayConfig;
//! use gray_grpc_propagation::GrayContextLayer;
//!
//! # fn example() {
//! let config = GrayConfig::from_env();
//!
//! // In main.rs, on the server builder:
//! // Server::builder()
//! //     .layer(GrayContextLayer::new(config))
//! //     .add_service(MyServiceServer::new(MyService))
//! # }
//! ```
//!
//! Handler code then reads the tag from the task-local context (or from
//! request extensions via [`GrayTagExt`] when only the interceptor runs),
//! and any downstream client carrying [`GrayClientInterceptor`] forwards
//! it to the next hop.
//!
//! ## Guarantees
//!
//! - Classification never fails a request: missing or malformed metadata
//!   resolves to base
//! - Base-tagged calls carry no extra metadata
//! - The tag scope ends with the handler future on every exit path

mod client;
mod extensions;
mod layer;
mod server;

pub use client::GrayClientInterceptor;
pub use extensions::GrayTagExt;
pub use layer::{GrayContextLayer, GrayContextService};
pub use server::GrayServerInterceptor;

//! # Gray Web Middleware
//!
//! actix-web boundary components for gray-release routing:
//!
//! - [`GrayGatewayFilter`]: trust-boundary (edge gateway) ingress filter.
//!   Resolves the effective tag, rewrites the inbound `version` header to
//!   exactly the resolved value, and scopes the request tag context.
//! - [`GrayFilter`]: service-boundary ingress filter for internal services
//!   sitting behind the edge. Trusts the already-validated header and
//!   scopes the request tag context.
//! - [`gray_tag`]: handler-side accessor for the resolved tag.
//! - [`inject_gray_tag`]: egress decoration for outbound `reqwest` calls.
//!
//! ## Example
//! ```rust,no_run
//! use actix_web::App;
//! use gray_core::GrayConfig;
//! use gray_web::GrayFilter;
//!
//! let config = GrayConfig::from_env();
//! let app = App::new().wrap(GrayFilter::new(config));
//! ```

mod egress;
mod filter;
mod gateway;

pub use egress::inject_gray_tag;
pub use filter::{gray_tag, GrayFilter};
pub use gateway::GrayGatewayFilter;

//! # Gray-Aware Load Balancer
//!
//! Client-side instance selection that respects a request's gray/base tag:
//! gray-tagged calls are steered to instances whose discovery metadata
//! marks them as part of the gray cohort, while untagged calls round-robin
//! across the full fleet. Degrades safely: when the gray cohort has no
//! replica for a service, gray traffic widens back to the full candidate
//! list instead of failing.
//!
//! ## Components
//!
//! - [`ServiceInstance`]: read-only replica snapshot from discovery
//! - [`ServiceInstanceSupplier`]: source of candidate lists, with an
//!   optional [`SelectionObserver`] feedback capability
//! - [`GrayLoadBalancer`]: per-service selector with an atomic rotation
//!   position shared by concurrent callers
//! - [`GrayLoadBalancerFactory`]: registry keeping one balancer (one
//!   rotation position) per target service

mod balancer;
mod error;
mod factory;
mod instance;
mod supplier;

pub use balancer::GrayLoadBalancer;
pub use error::{LoadBalancerError, LoadBalancerResult};
pub use factory::GrayLoadBalancerFactory;
pub use instance::ServiceInstance;
pub use supplier::{SelectionObserver, ServiceInstanceSupplier, StaticInstanceSupplier};

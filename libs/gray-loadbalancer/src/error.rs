//! Load balancer error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadBalancerError {
    /// The supplier produced an empty candidate list. Reported to the
    /// dispatch layer, never retried here.
    #[error("no instance available for service: {service}")]
    NoInstanceAvailable { service: String },
}

pub type LoadBalancerResult<T> = Result<T, LoadBalancerError>;

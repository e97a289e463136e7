//! Candidate list suppliers.

use async_trait::async_trait;

use crate::instance::ServiceInstance;

/// Feedback capability an adaptive supplier may expose.
///
/// Notified with the chosen instance after every successful selection;
/// suppliers without the capability simply return `None` from
/// [`ServiceInstanceSupplier::selection_observer`] and selection proceeds
/// without callback.
pub trait SelectionObserver: Send + Sync {
    fn instance_selected(&self, instance: &ServiceInstance);
}

/// Source of candidate instances for one target service.
///
/// Implemented over the discovery subsystem. Returned lists are immutable
/// snapshots and may change between calls as replicas join and leave.
#[async_trait]
pub trait ServiceInstanceSupplier: Send + Sync {
    /// Target service this supplier serves.
    fn service_id(&self) -> &str;

    /// Fresh candidate snapshot, currently healthy instances only.
    async fn instances(&self) -> Vec<ServiceInstance>;

    /// Optional selection feedback capability.
    fn selection_observer(&self) -> Option<&dyn SelectionObserver> {
        None
    }
}

/// Fixed-list supplier for static wiring and tests.
pub struct StaticInstanceSupplier {
    service_id: String,
    instances: Vec<ServiceInstance>,
}

impl StaticInstanceSupplier {
    pub fn new(service_id: impl Into<String>, instances: Vec<ServiceInstance>) -> Self {
        Self {
            service_id: service_id.into(),
            instances,
        }
    }
}

#[async_trait]
impl ServiceInstanceSupplier for StaticInstanceSupplier {
    fn service_id(&self) -> &str {
        &self.service_id
    }

    async fn instances(&self) -> Vec<ServiceInstance> {
        self.instances.clone()
    }
}

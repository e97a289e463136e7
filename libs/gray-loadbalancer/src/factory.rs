//! Per-service balancer registry.

use std::sync::Arc;

use dashmap::DashMap;

use crate::balancer::GrayLoadBalancer;
use crate::supplier::ServiceInstanceSupplier;

/// Registry keeping one balancer per target service.
///
/// The balancer owns the service's rotation position, so routing every
/// selection for a service through the same factory keeps the rotation
/// fair across all concurrent callers in the process.
#[derive(Default)]
pub struct GrayLoadBalancerFactory {
    balancers: DashMap<String, Arc<GrayLoadBalancer>>,
}

impl GrayLoadBalancerFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Balancer for the supplier's service, created on first use.
    pub fn balancer_for(
        &self,
        supplier: Arc<dyn ServiceInstanceSupplier>,
    ) -> Arc<GrayLoadBalancer> {
        self.balancers
            .entry(supplier.service_id().to_string())
            .or_insert_with(|| Arc::new(GrayLoadBalancer::new(supplier)))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::ServiceInstance;
    use crate::supplier::StaticInstanceSupplier;

    fn supplier(service_id: &str) -> Arc<dyn ServiceInstanceSupplier> {
        Arc::new(StaticInstanceSupplier::new(
            service_id,
            vec![ServiceInstance::new("i-1", "10.0.0.1", 9080)],
        ))
    }

    #[test]
    fn test_same_service_returns_same_balancer() {
        let factory = GrayLoadBalancerFactory::new();

        let first = factory.balancer_for(supplier("user-service"));
        let second = factory.balancer_for(supplier("user-service"));

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_distinct_services_get_distinct_balancers() {
        let factory = GrayLoadBalancerFactory::new();

        let users = factory.balancer_for(supplier("user-service"));
        let orders = factory.balancer_for(supplier("order-service"));

        assert!(!Arc::ptr_eq(&users, &orders));
        assert_eq!(users.service_id(), "user-service");
        assert_eq!(orders.service_id(), "order-service");
    }
}

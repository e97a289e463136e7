//! Gray-aware round-robin selection.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, warn};

use gray_core::{context, GrayTag};

use crate::error::{LoadBalancerError, LoadBalancerResult};
use crate::instance::ServiceInstance;
use crate::supplier::ServiceInstanceSupplier;

/// Client-side balancer for one target service.
///
/// Selection is stateless apart from the rotation position: a single
/// atomic counter shared by all concurrent callers for this service,
/// advanced without locks. Its only contract is a fair wrap-around
/// rotation index; it never identifies a specific instance.
pub struct GrayLoadBalancer {
    service_id: String,
    position: AtomicUsize,
    supplier: Arc<dyn ServiceInstanceSupplier>,
}

impl GrayLoadBalancer {
    /// Balancer seeded at a random rotation offset, so freshly started
    /// callers do not all hammer the same first instance.
    pub fn new(supplier: Arc<dyn ServiceInstanceSupplier>) -> Self {
        Self::with_seed(rand::thread_rng().gen_range(0..1000), supplier)
    }

    pub fn with_seed(seed: usize, supplier: Arc<dyn ServiceInstanceSupplier>) -> Self {
        Self {
            service_id: supplier.service_id().to_string(),
            position: AtomicUsize::new(seed),
            supplier,
        }
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    /// Choose an instance for the current request scope.
    ///
    /// The effective tag comes from the same task-local context the egress
    /// propagator reads, so selection and header propagation cannot
    /// disagree within one request.
    pub async fn choose(&self) -> LoadBalancerResult<ServiceInstance> {
        self.choose_with_tag(context::current_tag()).await
    }

    /// Choose an instance for an explicitly supplied tag.
    pub async fn choose_with_tag(&self, tag: GrayTag) -> LoadBalancerResult<ServiceInstance> {
        let candidates = self.supplier.instances().await;
        let chosen = self.select(candidates, tag)?;

        if let Some(observer) = self.supplier.selection_observer() {
            observer.instance_selected(&chosen);
        }
        Ok(chosen)
    }

    fn select(
        &self,
        candidates: Vec<ServiceInstance>,
        tag: GrayTag,
    ) -> LoadBalancerResult<ServiceInstance> {
        if candidates.is_empty() {
            warn!(service = %self.service_id, "no servers available");
            return Err(LoadBalancerError::NoInstanceAvailable {
                service: self.service_id.clone(),
            });
        }

        let mut working = self.narrow(candidates, tag);

        // Do not move the position when there is only 1 instance; some
        // suppliers have already filtered the list down themselves.
        if working.len() == 1 {
            return Ok(working.swap_remove(0));
        }

        let pos = self.position.fetch_add(1, Ordering::Relaxed);
        let chosen = working.swap_remove(pos % working.len());
        debug!(service = %self.service_id, instance = %chosen.id, "selected instance");
        Ok(chosen)
    }

    /// Narrow candidates by tag.
    ///
    /// Gray requests prefer gray-tagged replicas but widen back to the
    /// full list when the cohort has no replica for this service, so gray
    /// traffic degrades to base routing instead of failing. Base requests
    /// use the full list; gray replicas still serve their share of
    /// baseline load.
    fn narrow(&self, mut candidates: Vec<ServiceInstance>, tag: GrayTag) -> Vec<ServiceInstance> {
        if !tag.is_gray() {
            return candidates;
        }
        if candidates.iter().any(ServiceInstance::is_gray) {
            candidates.retain(ServiceInstance::is_gray);
        } else {
            debug!(
                service = %self.service_id,
                "no gray instance available, widening to full candidate list"
            );
        }
        candidates
    }

    #[cfg(test)]
    fn position(&self) -> usize {
        self.position.load(Ordering::Relaxed)
    }
}

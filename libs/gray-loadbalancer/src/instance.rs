use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use gray_core::{VERSION_GRAY, VERSION_HEADER};

/// One running replica of a downstream service, as reported by discovery.
///
/// Snapshots are read-only here: the selector never mutates a supplier's
/// list or an instance's metadata. Cohort membership rides in the metadata
/// mapping under the gray header name, populated by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInstance {
    pub id: String,
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl ServiceInstance {
    pub fn new(id: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            id: id.into(),
            host: host.into(),
            port,
            metadata: HashMap::new(),
        }
    }

    /// Builder-style metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Dial address in `host:port` form.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether discovery marked this replica as part of the gray cohort.
    pub fn is_gray(&self) -> bool {
        self.metadata.get(VERSION_HEADER).map(String::as_str) == Some(VERSION_GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_instance_is_not_gray() {
        let instance = ServiceInstance::new("user-1", "10.0.0.1", 9080);
        assert!(!instance.is_gray());
    }

    #[test]
    fn test_gray_metadata_marks_instance() {
        let instance =
            ServiceInstance::new("user-2", "10.0.0.2", 9080).with_metadata("version", "gray");
        assert!(instance.is_gray());
    }

    #[test]
    fn test_other_metadata_value_is_not_gray() {
        let instance =
            ServiceInstance::new("user-3", "10.0.0.3", 9080).with_metadata("version", "v2");
        assert!(!instance.is_gray());
    }

    #[test]
    fn test_address_form() {
        let instance = ServiceInstance::new("user-1", "10.0.0.1", 9080);
        assert_eq!(instance.address(), "10.0.0.1:9080");
    }
}

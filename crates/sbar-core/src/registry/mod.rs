//! Plugin-based metric registry
//!
//! The registry maps metric names used in format tables to metric
//! implementations, avoiding a hard-coded match over names.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sbar_core::registry::MetricRegistry;
//!
//! let registry = MetricRegistry::new();
//! sbar_metrics::register(&registry);
//!
//! let metric = registry.get("disk_perc").expect("registered");
//! ```
//!
//! ## Registration
//!
//! Metric crates register themselves during initialization:
//!
//! ```rust,ignore
//! pub fn register(registry: &MetricRegistry) {
//!     registry.register(Arc::new(Hostname));
//! }
//! ```

use crate::traits::Metric;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Registry of available metrics, keyed by [`Metric::name`]
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct MetricRegistry {
    metrics: RwLock<HashMap<String, Arc<dyn Metric>>>,
}

impl MetricRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a metric under its own name
    ///
    /// A metric registered under an existing name replaces the previous one.
    pub fn register(&self, metric: Arc<dyn Metric>) {
        self.register_as(metric.name(), metric);
    }

    /// Register a metric under an explicit name
    ///
    /// Useful for aliases and for test fixtures standing in for real metrics.
    pub fn register_as(&self, name: impl Into<String>, metric: Arc<dyn Metric>) {
        let mut metrics = self.metrics.write().unwrap_or_else(|e| e.into_inner());
        metrics.insert(name.into(), metric);
    }

    /// Look up a metric by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Metric>> {
        let metrics = self.metrics.read().unwrap_or_else(|e| e.into_inner());
        metrics.get(name).cloned()
    }

    /// Check if a metric name is registered
    pub fn has_metric(&self, name: &str) -> bool {
        let metrics = self.metrics.read().unwrap_or_else(|e| e.into_inner());
        metrics.contains_key(name)
    }

    /// List all registered metric names, sorted
    pub fn list_metrics(&self) -> Vec<String> {
        let metrics = self.metrics.read().unwrap_or_else(|e| e.into_inner());
        let mut names: Vec<String> = metrics.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Arity;

    struct MockMetric;

    #[async_trait::async_trait]
    impl Metric for MockMetric {
        async fn sample(&self, _arg: Option<&str>) -> crate::Result<String> {
            Ok("mock".to_string())
        }

        fn arity(&self) -> Arity {
            Arity::NoArg
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }

    #[test]
    fn test_registry_registration() {
        let registry = MetricRegistry::new();

        // Initially empty
        assert!(!registry.has_metric("mock"));

        registry.register(Arc::new(MockMetric));

        assert!(registry.has_metric("mock"));
        assert!(registry.get("mock").is_some());
        assert_eq!(registry.list_metrics(), vec!["mock".to_string()]);
    }

    #[test]
    fn test_register_alias() {
        let registry = MetricRegistry::new();
        registry.register_as("hostname", Arc::new(MockMetric));

        assert!(registry.has_metric("hostname"));
        assert!(!registry.has_metric("mock"));
    }

    #[test]
    fn test_registered_metric_is_callable() {
        let registry = MetricRegistry::new();
        registry.register(Arc::new(MockMetric));

        let metric = registry.get("mock").unwrap();
        let text = tokio_test::block_on(metric.sample(None)).unwrap();
        assert_eq!(text, "mock");
    }
}

//! Format table
//!
//! The format table is the ordered list of `(metric, argument, template)`
//! entries rendered every tick. It is resolved once at startup from
//! [`EntryConfig`] declarations and is immutable afterwards.

use crate::config::EntryConfig;
use crate::error::{Error, Result};
use crate::registry::MetricRegistry;
use crate::traits::{Arity, Metric};
use std::sync::Arc;
use tracing::warn;

/// A resolved format entry
#[derive(Clone)]
pub struct FormatEntry {
    metric: Arc<dyn Metric>,
    arg: Option<String>,
    template: String,
}

impl FormatEntry {
    /// Create an entry from an already resolved metric
    pub fn new(metric: Arc<dyn Metric>, arg: Option<String>, template: impl Into<String>) -> Self {
        Self {
            metric,
            arg,
            template: template.into(),
        }
    }

    /// The metric sampled by this entry
    pub fn metric(&self) -> &Arc<dyn Metric> {
        &self.metric
    }

    /// The configured argument
    pub fn arg(&self) -> Option<&str> {
        self.arg.as_deref()
    }

    /// The display template
    pub fn template(&self) -> &str {
        &self.template
    }

    /// `name` or `name(arg)`, for diagnostics
    pub fn label(&self) -> String {
        match &self.arg {
            Some(arg) => format!("{}({})", self.metric.name(), arg),
            None => self.metric.name().to_string(),
        }
    }
}

impl std::fmt::Debug for FormatEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatEntry")
            .field("metric", &self.metric.name())
            .field("arg", &self.arg)
            .field("template", &self.template)
            .finish()
    }
}

/// Ordered, immutable list of format entries
#[derive(Debug, Clone, Default)]
pub struct FormatTable {
    entries: Vec<FormatEntry>,
}

impl FormatTable {
    /// Build a table from resolved entries
    pub fn from_entries(entries: Vec<FormatEntry>) -> Self {
        Self { entries }
    }

    /// Resolve entry declarations against a metric registry
    ///
    /// # Errors
    ///
    /// - Unknown metric name
    /// - A metric that needs an argument declared without one
    ///
    /// An argument given to a metric that takes none is ignored with a warning.
    pub fn resolve(declarations: &[EntryConfig], registry: &MetricRegistry) -> Result<Self> {
        let mut entries = Vec::with_capacity(declarations.len());

        for decl in declarations {
            let metric = registry.get(&decl.metric).ok_or_else(|| {
                Error::config(format!(
                    "Unknown metric '{}'. Available: {}",
                    decl.metric,
                    registry.list_metrics().join(", ")
                ))
            })?;

            let arg = match (metric.arity(), &decl.arg) {
                (Arity::WithArg, Some(arg)) => Some(arg.clone()),
                (Arity::WithArg, None) => {
                    return Err(Error::config(format!(
                        "Metric '{}' requires an argument",
                        decl.metric
                    )));
                }
                (Arity::NoArg, Some(arg)) => {
                    warn!("Metric '{}' takes no argument, ignoring '{}'", decl.metric, arg);
                    None
                }
                (Arity::NoArg, None) => None,
            };

            entries.push(FormatEntry::new(metric, arg, decl.format.clone()));
        }

        Ok(Self { entries })
    }

    /// Entries in display order
    pub fn entries(&self) -> &[FormatEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, Arity);

    #[async_trait::async_trait]
    impl Metric for Fixed {
        async fn sample(&self, _arg: Option<&str>) -> Result<String> {
            Ok("x".to_string())
        }

        fn arity(&self) -> Arity {
            self.1
        }

        fn name(&self) -> &'static str {
            self.0
        }
    }

    fn registry() -> MetricRegistry {
        let registry = MetricRegistry::new();
        registry.register(Arc::new(Fixed("hostname", Arity::NoArg)));
        registry.register(Arc::new(Fixed("disk_perc", Arity::WithArg)));
        registry
    }

    #[test]
    fn test_resolve_preserves_order() {
        let decls = vec![
            EntryConfig::new("disk_perc").with_arg("/").with_format("/ %s"),
            EntryConfig::new("hostname").with_format(" @ %s"),
        ];

        let table = FormatTable::resolve(&decls, &registry()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.entries()[0].label(), "disk_perc(/)");
        assert_eq!(table.entries()[0].template(), "/ %s");
        assert_eq!(table.entries()[1].label(), "hostname");
    }

    #[test]
    fn test_resolve_unknown_metric() {
        let decls = vec![EntryConfig::new("cpu_freq")];
        let err = FormatTable::resolve(&decls, &registry()).unwrap_err();
        assert!(err.to_string().contains("Unknown metric 'cpu_freq'"));
    }

    #[test]
    fn test_resolve_missing_argument() {
        let decls = vec![EntryConfig::new("disk_perc")];
        let err = FormatTable::resolve(&decls, &registry()).unwrap_err();
        assert!(err.to_string().contains("requires an argument"));
    }

    #[test]
    fn test_resolve_drops_extra_argument() {
        let decls = vec![EntryConfig::new("hostname").with_arg("ignored")];
        let table = FormatTable::resolve(&decls, &registry()).unwrap();
        assert_eq!(table.entries()[0].arg(), None);
    }
}

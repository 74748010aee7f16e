//! Configuration types for the sbar system
//!
//! This module defines the format table declaration and engine settings.
//! The binary ships a static default table; the same structures can be
//! loaded from JSON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default status line capacity in bytes
pub const DEFAULT_LINE_CAPACITY: usize = 4096;

/// Default tick interval
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Main sbar configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SbarConfig {
    /// Format entries, in left-to-right display order
    pub entries: Vec<EntryConfig>,

    /// Optional engine settings
    #[serde(default)]
    pub engine: EngineConfig,
}

impl SbarConfig {
    /// Create a configuration from a list of entries with default engine settings
    pub fn new(entries: Vec<EntryConfig>) -> Self {
        Self {
            entries,
            engine: EngineConfig::default(),
        }
    }

    /// Parse a configuration from JSON text
    pub fn from_json(text: &str) -> Result<Self, crate::Error> {
        let config: SbarConfig = serde_json::from_str(text)?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, crate::Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.entries.is_empty() {
            return Err(crate::Error::config("No format entries configured"));
        }

        for (index, entry) in self.entries.iter().enumerate() {
            if entry.metric.trim().is_empty() {
                return Err(crate::Error::config(format!(
                    "Format entry {} has an empty metric name",
                    index
                )));
            }
        }

        self.engine.validate()
    }
}

/// One format table declaration
///
/// `format` is a printf-like template: the first `%s` is replaced by the
/// metric's text and `%%` renders a literal percent sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryConfig {
    /// Registered metric name (e.g. "datetime", "disk_perc")
    pub metric: String,

    /// Metric argument (mount point, interface, command...)
    #[serde(default)]
    pub arg: Option<String>,

    /// Display template
    #[serde(default = "default_format")]
    pub format: String,
}

impl EntryConfig {
    /// Create a new entry with the bare `%s` template and no argument
    pub fn new(metric: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            arg: None,
            format: default_format(),
        }
    }

    /// Set the metric argument
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = Some(arg.into());
        self
    }

    /// Set the display template
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }
}

fn default_format() -> String {
    "%s".to_string()
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum status line length in bytes
    #[serde(default = "default_line_capacity")]
    pub line_capacity: usize,

    /// Capacity of the engine event channel
    ///
    /// When full, new events are dropped (with a warning log).
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,

    /// Sleep between ticks
    ///
    /// Fixed at one second for the daemon; not read from configuration
    /// files. Tests shorten it.
    #[serde(skip, default = "default_tick_interval")]
    pub tick_interval: Duration,
}

impl EngineConfig {
    /// Validate engine settings
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.line_capacity == 0 {
            return Err(crate::Error::config("line_capacity must be > 0"));
        }
        if self.event_channel_capacity == 0 {
            return Err(crate::Error::config("event_channel_capacity must be > 0"));
        }
        if self.tick_interval.is_zero() {
            return Err(crate::Error::config("tick interval must be > 0"));
        }
        Ok(())
    }

    /// Set the tick interval
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Set the status line capacity
    pub fn with_line_capacity(mut self, capacity: usize) -> Self {
        self.line_capacity = capacity;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            line_capacity: default_line_capacity(),
            event_channel_capacity: default_event_channel_capacity(),
            tick_interval: default_tick_interval(),
        }
    }
}

fn default_line_capacity() -> usize {
    DEFAULT_LINE_CAPACITY
}

fn default_event_channel_capacity() -> usize {
    64
}

fn default_tick_interval() -> Duration {
    DEFAULT_TICK_INTERVAL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_table() {
        let text = r#"{
            "entries": [
                { "metric": "datetime", "arg": "%F %T", "format": "%s" },
                { "metric": "uptime", "format": " | up %s" },
                { "metric": "hostname" }
            ]
        }"#;

        let config = SbarConfig::from_json(text).unwrap();
        assert_eq!(config.entries.len(), 3);
        assert_eq!(config.entries[0].arg.as_deref(), Some("%F %T"));
        assert_eq!(config.entries[1].arg, None);
        assert_eq!(config.entries[2].format, "%s");
        assert_eq!(config.engine.line_capacity, DEFAULT_LINE_CAPACITY);
        assert_eq!(config.engine.tick_interval, DEFAULT_TICK_INTERVAL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_engine_uses_defaults() {
        let text = r#"{ "entries": [ { "metric": "uid" } ], "engine": { "line_capacity": 128 } }"#;

        let config = SbarConfig::from_json(text).unwrap();
        assert_eq!(config.engine.line_capacity, 128);
        assert_eq!(config.engine.event_channel_capacity, 64);
    }

    #[test]
    fn test_empty_table_rejected() {
        let config = SbarConfig::new(Vec::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_metric_name_rejected() {
        let config = SbarConfig::new(vec![EntryConfig::new("  ")]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut config = SbarConfig::new(vec![EntryConfig::new("uid")]);
        config.engine.line_capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_error() {
        let err = SbarConfig::from_json("{ entries: ").unwrap_err();
        assert!(matches!(err, crate::Error::Json(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            br#"{ "entries": [ { "metric": "hostname", "format": "@%s" } ] }"#,
        )
        .unwrap();

        let config = SbarConfig::from_file(file.path()).unwrap();
        assert_eq!(config.entries, vec![EntryConfig::new("hostname").with_format("@%s")]);
    }

    #[test]
    fn test_from_missing_file() {
        let err = SbarConfig::from_file("/nonexistent/sbar.json").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error: Failed to read"));
    }
}

//! Test doubles and common utilities for contract tests
//!
//! This module provides minimal metrics and sinks that record how the
//! engine drives them.

#![allow(dead_code)]

use sbar_core::config::EngineConfig;
use sbar_core::error::{Error, Result};
use sbar_core::table::{FormatEntry, FormatTable};
use sbar_core::traits::{Arity, Metric, StatusSink};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A metric that always returns the same text
pub struct FixedMetric {
    name: &'static str,
    text: String,
    arity: Arity,
}

impl FixedMetric {
    pub fn new(name: &'static str, text: impl Into<String>) -> Self {
        Self {
            name,
            text: text.into(),
            arity: Arity::NoArg,
        }
    }

    pub fn with_arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }
}

#[async_trait::async_trait]
impl Metric for FixedMetric {
    async fn sample(&self, _arg: Option<&str>) -> Result<String> {
        Ok(self.text.clone())
    }

    fn arity(&self) -> Arity {
        self.arity
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// A metric whose source is always unavailable
pub struct FailingMetric {
    name: &'static str,
    call_count: Arc<AtomicUsize>,
}

impl FailingMetric {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times sample() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Create a new FailingMetric that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            name: other.name,
            call_count: Arc::clone(&other.call_count),
        }
    }
}

#[async_trait::async_trait]
impl Metric for FailingMetric {
    async fn sample(&self, _arg: Option<&str>) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Err(Error::metric(format!(
            "{}: No such file or directory (os error 2)",
            self.name
        )))
    }

    fn arity(&self) -> Arity {
        Arity::NoArg
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// A metric that sleeps before answering (stands in for run_command)
pub struct SlowMetric {
    delay: Duration,
    started: Arc<AtomicUsize>,
}

impl SlowMetric {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            started: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn started_count(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            delay: other.delay,
            started: Arc::clone(&other.started),
        }
    }
}

#[async_trait::async_trait]
impl Metric for SlowMetric {
    async fn sample(&self, _arg: Option<&str>) -> Result<String> {
        self.started.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok("slow".to_string())
    }

    fn arity(&self) -> Arity {
        Arity::NoArg
    }

    fn name(&self) -> &'static str {
        "slow"
    }
}

/// A sink that records every call
#[derive(Default)]
pub struct RecordingSink {
    lines: Arc<Mutex<Vec<String>>>,
    teardown_count: Arc<AtomicUsize>,
    publish_after_teardown: Arc<AtomicUsize>,
    closes_after: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `lines` lines, then report the reader as gone
    pub fn closing_after(mut self, lines: usize) -> Self {
        self.closes_after = Some(lines);
        self
    }

    /// Create a new RecordingSink that shares state with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            lines: Arc::clone(&other.lines),
            teardown_count: Arc::clone(&other.teardown_count),
            publish_after_teardown: Arc::clone(&other.publish_after_teardown),
            closes_after: other.closes_after,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn publish_count(&self) -> usize {
        self.lines.lock().unwrap().len()
    }

    pub fn teardown_count(&self) -> usize {
        self.teardown_count.load(Ordering::SeqCst)
    }

    pub fn publish_after_teardown_count(&self) -> usize {
        self.publish_after_teardown.load(Ordering::SeqCst)
    }
}

impl StatusSink for RecordingSink {
    fn publish(&mut self, line: &str) -> Result<()> {
        if self.teardown_count() > 0 {
            self.publish_after_teardown.fetch_add(1, Ordering::SeqCst);
        }
        if self.closes_after.is_some_and(|n| self.publish_count() >= n) {
            return Err(Error::sink_closed("reader went away"));
        }
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }

    fn teardown(&mut self) -> Result<()> {
        self.teardown_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn sink_name(&self) -> &'static str {
        "recording"
    }
}

/// A cloneable in-memory writer for capturing StreamSink output
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Build an entry from any metric
pub fn entry(metric: impl Metric + 'static, arg: Option<&str>, template: &str) -> FormatEntry {
    FormatEntry::new(Arc::new(metric), arg.map(str::to_string), template)
}

/// Single-entry table with a fixed metric
pub fn minimal_table() -> FormatTable {
    FormatTable::from_entries(vec![entry(FixedMetric::new("hostname", "myhost"), None, "%s")])
}

/// Engine settings with a short tick for tests
pub fn fast_config() -> EngineConfig {
    EngineConfig::default().with_tick_interval(Duration::from_millis(20))
}

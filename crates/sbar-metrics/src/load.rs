//! System load and uptime

use crate::sys::{System, SystemSource};
use sbar_core::traits::{Arity, Metric};
use sbar_core::{Error, Result};

/// `load_avg`: 1, 5 and 15 minute load averages
#[derive(Default)]
pub struct LoadAvgMetric<S = System> {
    source: S,
}

impl LoadAvgMetric<System> {
    pub fn new() -> Self {
        Self::with_source(System)
    }
}

impl<S: SystemSource> LoadAvgMetric<S> {
    pub fn with_source(source: S) -> Self {
        Self { source }
    }
}

#[async_trait::async_trait]
impl<S: SystemSource> Metric for LoadAvgMetric<S> {
    async fn sample(&self, _arg: Option<&str>) -> Result<String> {
        let avgs = self
            .source
            .load_average()
            .map_err(|e| Error::metric_io("Failed to get the load avg", &e))?;
        Ok(format_load(avgs))
    }

    fn arity(&self) -> Arity {
        Arity::NoArg
    }

    fn name(&self) -> &'static str {
        "load_avg"
    }
}

/// `uptime`: time since boot as hours and minutes
#[derive(Default)]
pub struct UptimeMetric<S = System> {
    source: S,
}

impl UptimeMetric<System> {
    pub fn new() -> Self {
        Self::with_source(System)
    }
}

impl<S: SystemSource> UptimeMetric<S> {
    pub fn with_source(source: S) -> Self {
        Self { source }
    }
}

#[async_trait::async_trait]
impl<S: SystemSource> Metric for UptimeMetric<S> {
    async fn sample(&self, _arg: Option<&str>) -> Result<String> {
        let secs = self
            .source
            .uptime_secs()
            .map_err(|e| Error::metric_io("Failed to get uptime", &e))?;
        Ok(format_uptime(secs))
    }

    fn arity(&self) -> Arity {
        Arity::NoArg
    }

    fn name(&self) -> &'static str {
        "uptime"
    }
}

pub fn format_load(avgs: [f64; 3]) -> String {
    format!("{:.2} {:.2} {:.2}", avgs[0], avgs[1], avgs[2])
}

/// Hours are not wrapped into days
pub fn format_uptime(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs - hours * 3600) / 60;
    format!("{}h {}m", hours, minutes)
}

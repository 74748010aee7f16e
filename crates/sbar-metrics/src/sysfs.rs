//! Backlight and battery levels from sysfs class directories
//!
//! Both metrics take the device name as their argument and read integer
//! attributes under a configurable class root, so tests can point them at
//! a temporary directory.

use sbar_core::traits::{Arity, Metric, required_arg};
use sbar_core::{Error, Result};
use std::path::{Path, PathBuf};

pub const BACKLIGHT_ROOT: &str = "/sys/class/backlight";
pub const POWER_SUPPLY_ROOT: &str = "/sys/class/power_supply";

async fn read_attribute(path: &Path) -> Result<i64> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::metric_io(format!("Failed to read {}", path.display()), &e))?;

    text.trim()
        .parse()
        .map_err(|_| Error::metric(format!("Malformed value {:?} in {}", text.trim(), path.display())))
}

/// `brightness_perc`: backlight level relative to the device maximum
///
/// Computed as `actual_brightness * 100 / max_brightness`. Older builds
/// divided by a fixed 255, which is only right for devices whose maximum
/// happens to be 255.
pub struct BrightnessMetric {
    root: PathBuf,
}

impl BrightnessMetric {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for BrightnessMetric {
    fn default() -> Self {
        Self::with_root(BACKLIGHT_ROOT)
    }
}

#[async_trait::async_trait]
impl Metric for BrightnessMetric {
    async fn sample(&self, arg: Option<&str>) -> Result<String> {
        let device = self.root.join(required_arg(self.name(), arg)?);
        let actual = read_attribute(&device.join("actual_brightness")).await?;
        let max = read_attribute(&device.join("max_brightness")).await?;
        Ok(brightness_percent(actual, max)?.to_string())
    }

    fn arity(&self) -> Arity {
        Arity::WithArg
    }

    fn name(&self) -> &'static str {
        "brightness_perc"
    }
}

/// Percentage of `max`, clamped to `0..=100`
pub fn brightness_percent(actual: i64, max: i64) -> Result<i64> {
    if max <= 0 {
        return Err(Error::metric(format!("Invalid max_brightness {}", max)));
    }
    Ok((actual.saturating_mul(100) / max).clamp(0, 100))
}

/// `battery_perc`: charge level reported by a power supply
pub struct BatteryMetric {
    root: PathBuf,
}

impl BatteryMetric {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for BatteryMetric {
    fn default() -> Self {
        Self::with_root(POWER_SUPPLY_ROOT)
    }
}

#[async_trait::async_trait]
impl Metric for BatteryMetric {
    async fn sample(&self, arg: Option<&str>) -> Result<String> {
        let supply = self.root.join(required_arg(self.name(), arg)?);
        let capacity = read_attribute(&supply.join("capacity")).await?;
        Ok(capacity.clamp(0, 100).to_string())
    }

    fn arity(&self) -> Arity {
        Arity::WithArg
    }

    fn name(&self) -> &'static str {
        "battery_perc"
    }
}

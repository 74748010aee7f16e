//! Thermal sensors

use sbar_core::traits::{Arity, Metric, required_arg};
use sbar_core::{Error, Result};

/// `temp`: millidegree sensor file rendered as whole degrees Celsius
pub struct TempMetric;

#[async_trait::async_trait]
impl Metric for TempMetric {
    async fn sample(&self, arg: Option<&str>) -> Result<String> {
        let file = required_arg(self.name(), arg)?;
        let text = tokio::fs::read_to_string(file)
            .await
            .map_err(|e| Error::metric_io(format!("Failed to open file {}", file), &e))?;

        let millidegrees = leading_int(&text)
            .ok_or_else(|| Error::metric(format!("No temperature reading in {}", file)))?;

        Ok(format!("{}°C", millidegrees / 1000))
    }

    fn arity(&self) -> Arity {
        Arity::WithArg
    }

    fn name(&self) -> &'static str {
        "temp"
    }
}

/// Parse the first integer in `text`, skipping leading whitespace
fn leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let end = text
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(text.len(), |(i, _)| i);
    text[..end].parse().ok()
}

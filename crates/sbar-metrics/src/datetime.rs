//! Local date and time
//!
//! Day and month names are always English (`%a`, `%b` and friends render
//! as in the C locale); `LC_TIME` is not consulted.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use sbar_core::traits::{Arity, Metric, required_arg};
use sbar_core::{Error, Result};
use std::fmt::{Display, Write};

/// `datetime`: local time rendered with a strftime-style format
pub struct DateTimeMetric;

#[async_trait::async_trait]
impl Metric for DateTimeMetric {
    async fn sample(&self, arg: Option<&str>) -> Result<String> {
        let fmt = required_arg(self.name(), arg)?;
        format_time(&Local::now(), fmt)
    }

    fn arity(&self) -> Arity {
        Arity::WithArg
    }

    fn name(&self) -> &'static str {
        "datetime"
    }
}

/// Render `at` with `fmt`
///
/// An unknown conversion or an empty result is an error.
pub fn format_time<Tz>(at: &DateTime<Tz>, fmt: &str) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let items: Vec<Item<'_>> = StrftimeItems::new(fmt).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(Error::metric(format!("Invalid time format {:?}", fmt)));
    }

    let mut out = String::new();
    write!(out, "{}", at.format_with_items(items.iter()))
        .map_err(|_| Error::metric(format!("Failed to format time with {:?}", fmt)))?;

    if out.is_empty() {
        return Err(Error::metric("Time format produced no output"));
    }

    Ok(out)
}

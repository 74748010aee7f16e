// # Metric Trait
//
// Defines the interface every status metric implements.
//
// ## Implementations
//
// - Linux syscalls and sysfs: `sbar-metrics` crate
// - Test doubles: `tests/common`
//
// ## Usage
//
// ```rust,ignore
// use sbar_core::Metric;
//
// let metric = /* Metric implementation */;
// match metric.sample(Some("/")).await {
//     Ok(text) => println!("{}", text),
//     Err(e) => eprintln!("{}", e),
// }
// ```

use async_trait::async_trait;

/// Whether a metric takes an argument
///
/// Metrics have non-uniform inputs: `hostname` takes nothing, `disk_perc`
/// takes a mount point. Every metric is still invoked through the same
/// [`Metric::sample`] signature; the arity is checked once, when the
/// format table is resolved, not on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Must be configured without an argument
    NoArg,
    /// Requires exactly one string argument
    WithArg,
}

/// Trait for status metric implementations
///
/// # Contract
///
/// - Stateless between invocations; owns no resource that outlives a call
/// - Returns `Err` for any failure (missing file, failed syscall, parse error)
///   and never panics; the composer turns the error into the fallback marker
/// - Should complete quickly relative to the tick interval
///
/// ## Forbidden
/// - ❌ Writing to stdout or the display (use `StatusSink`)
/// - ❌ Retrying internally (the next tick is the retry)
/// - ❌ Spawning background tasks that outlive the call
#[async_trait]
pub trait Metric: Send + Sync {
    /// Produce the metric's current text
    ///
    /// # Parameters
    ///
    /// - `arg`: The configured argument. Always `Some` for [`Arity::WithArg`]
    ///   metrics and `None` for [`Arity::NoArg`] metrics once the table has
    ///   been resolved.
    async fn sample(&self, arg: Option<&str>) -> crate::Result<String>;

    /// Declared arity of this metric
    fn arity(&self) -> Arity;

    /// Metric name used in format tables (e.g. "disk_perc")
    fn name(&self) -> &'static str;
}

/// Extract the required argument of a [`Arity::WithArg`] metric
pub fn required_arg<'a>(metric: &str, arg: Option<&'a str>) -> crate::Result<&'a str> {
    arg.ok_or_else(|| crate::Error::metric(format!("{}: missing argument", metric)))
}

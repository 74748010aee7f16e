//! Host and user identity

use crate::sys::{self, System, SystemSource};
use sbar_core::traits::{Arity, Metric};
use sbar_core::{Error, Result};

/// `hostname`: the machine's host name
#[derive(Default)]
pub struct HostnameMetric<S = System> {
    source: S,
}

impl HostnameMetric<System> {
    pub fn new() -> Self {
        Self::with_source(System)
    }
}

impl<S: SystemSource> HostnameMetric<S> {
    pub fn with_source(source: S) -> Self {
        Self { source }
    }
}

#[async_trait::async_trait]
impl<S: SystemSource> Metric for HostnameMetric<S> {
    async fn sample(&self, _arg: Option<&str>) -> Result<String> {
        self.source
            .hostname()
            .map_err(|e| Error::metric_io("Failed to get hostname", &e))
    }

    fn arity(&self) -> Arity {
        Arity::NoArg
    }

    fn name(&self) -> &'static str {
        "hostname"
    }
}

/// `username`: login name of the effective user
#[derive(Default)]
pub struct UsernameMetric<S = System> {
    source: S,
}

impl UsernameMetric<System> {
    pub fn new() -> Self {
        Self::with_source(System)
    }
}

impl<S: SystemSource> UsernameMetric<S> {
    pub fn with_source(source: S) -> Self {
        Self { source }
    }
}

#[async_trait::async_trait]
impl<S: SystemSource> Metric for UsernameMetric<S> {
    async fn sample(&self, _arg: Option<&str>) -> Result<String> {
        let uid = sys::effective_uid();
        match self.source.user_name(uid) {
            Ok(Some(name)) => Ok(name),
            Ok(None) => Err(Error::metric(format!("No passwd entry for uid {}", uid))),
            Err(e) => Err(Error::metric_io("Failed to get username", &e)),
        }
    }

    fn arity(&self) -> Arity {
        Arity::NoArg
    }

    fn name(&self) -> &'static str {
        "username"
    }
}

/// `uid`: effective user id
///
/// Never fails: `geteuid(2)` always succeeds.
pub struct UidMetric;

#[async_trait::async_trait]
impl Metric for UidMetric {
    async fn sample(&self, _arg: Option<&str>) -> Result<String> {
        Ok(sys::effective_uid().to_string())
    }

    fn arity(&self) -> Arity {
        Arity::NoArg
    }

    fn name(&self) -> &'static str {
        "uid"
    }
}

/// `gid`: real group id
///
/// Never fails: `getgid(2)` always succeeds.
pub struct GidMetric;

#[async_trait::async_trait]
impl Metric for GidMetric {
    async fn sample(&self, _arg: Option<&str>) -> Result<String> {
        Ok(sys::group_id().to_string())
    }

    fn arity(&self) -> Arity {
        Arity::NoArg
    }

    fn name(&self) -> &'static str {
        "gid"
    }
}

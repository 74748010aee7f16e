//! Interface addresses

use crate::sys;
use sbar_core::traits::{Arity, Metric, required_arg};
use sbar_core::{Error, Result};

/// `ip`: first IPv4 address bound to the named interface
pub struct IpMetric;

#[async_trait::async_trait]
impl Metric for IpMetric {
    async fn sample(&self, arg: Option<&str>) -> Result<String> {
        let iface = required_arg(self.name(), arg)?;

        match sys::ipv4_address(iface) {
            Ok(Some(addr)) => Ok(addr.to_string()),
            Ok(None) => Err(Error::metric(format!(
                "No IPv4 address on interface {}",
                iface
            ))),
            Err(e) => Err(Error::metric_io(
                format!("Failed to get IP address for interface {}", iface),
                &e,
            )),
        }
    }

    fn arity(&self) -> Arity {
        Arity::WithArg
    }

    fn name(&self) -> &'static str {
        "ip"
    }
}

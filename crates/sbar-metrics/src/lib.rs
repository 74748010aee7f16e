// # sbar Metrics
//
// Linux metric providers for the sbar status line.
//
// | Metric | Argument | Source |
// |---|---|---|
// | `datetime` | strftime format | local clock |
// | `hostname`, `username`, `uid`, `gid` | none | `gethostname`, passwd database |
// | `ip` | interface | `getifaddrs` |
// | `load_avg`, `uptime` | none | `getloadavg`, `sysinfo` |
// | `disk_free`, `disk_used`, `disk_total`, `disk_perc` | mount path | `statvfs` |
// | `temp` | sensor file | procfs/sysfs file |
// | `run_command` | shell command | `sh -c` |
// | `brightness_perc`, `battery_perc` | device name | sysfs class attributes |
//
// Every provider returns an error instead of a placeholder; the composer
// owns the fallback text.

pub mod command;
pub mod datetime;
pub mod disk;
pub mod host;
pub mod load;
pub mod net;
pub mod sys;
pub mod sysfs;
pub mod temp;

pub use command::CommandMetric;
pub use datetime::DateTimeMetric;
pub use disk::{DiskKind, DiskMetric, FsStatSource, Statvfs};
pub use host::{GidMetric, HostnameMetric, UidMetric, UsernameMetric};
pub use load::{LoadAvgMetric, UptimeMetric};
pub use net::IpMetric;
pub use sys::{System, SystemSource};
pub use sysfs::{BatteryMetric, BrightnessMetric};
pub use temp::TempMetric;

use sbar_core::MetricRegistry;
use std::sync::Arc;

/// Register every built-in metric with the registry
pub fn register(registry: &MetricRegistry) {
    registry.register(Arc::new(DateTimeMetric));
    registry.register(Arc::new(HostnameMetric::new()));
    registry.register(Arc::new(UsernameMetric::new()));
    registry.register(Arc::new(UidMetric));
    registry.register(Arc::new(GidMetric));
    registry.register(Arc::new(IpMetric));
    registry.register(Arc::new(LoadAvgMetric::new()));
    registry.register(Arc::new(UptimeMetric::new()));
    for kind in DiskKind::ALL {
        registry.register(Arc::new(DiskMetric::new(kind)));
    }
    registry.register(Arc::new(TempMetric));
    registry.register(Arc::new(CommandMetric));
    registry.register(Arc::new(BrightnessMetric::default()));
    registry.register(Arc::new(BatteryMetric::default()));
}

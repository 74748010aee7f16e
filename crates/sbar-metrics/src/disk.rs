//! Filesystem usage
//!
//! All four disk metrics share one statistics source. Sizes are computed in
//! `f32` and printed with six decimals, in GiB.

use crate::sys::{self, FsStats};
use sbar_core::traits::{Arity, Metric, required_arg};
use sbar_core::{Error, Result};
use std::io;

const KIB: f32 = 1024.0;

/// Source of filesystem statistics
pub trait FsStatSource: Send + Sync {
    fn stats(&self, path: &str) -> io::Result<FsStats>;
}

/// Production source backed by `statvfs(3)`
#[derive(Debug, Default, Clone, Copy)]
pub struct Statvfs;

impl FsStatSource for Statvfs {
    fn stats(&self, path: &str) -> io::Result<FsStats> {
        sys::statvfs(path)
    }
}

/// Which figure a disk metric reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskKind {
    Free,
    Used,
    Total,
    Percent,
}

impl DiskKind {
    pub const ALL: [DiskKind; 4] = [Self::Free, Self::Used, Self::Total, Self::Percent];

    pub fn metric_name(self) -> &'static str {
        match self {
            Self::Free => "disk_free",
            Self::Used => "disk_used",
            Self::Total => "disk_total",
            Self::Percent => "disk_perc",
        }
    }

    /// Render `stats` for this kind
    pub fn render(self, stats: &FsStats) -> Result<String> {
        let bsize = stats.block_size as f32;
        let blocks = stats.blocks as f32;
        let bfree = stats.blocks_free as f32;

        match self {
            Self::Free => Ok(format!("{:.6}", bsize * bfree / KIB / KIB / KIB)),
            Self::Used => Ok(format!("{:.6}", bsize * (blocks - bfree) / KIB / KIB / KIB)),
            Self::Total => Ok(format!("{:.6}", bsize * blocks / KIB / KIB / KIB)),
            Self::Percent => {
                if stats.blocks == 0 {
                    return Err(Error::metric("Filesystem reports zero blocks"));
                }
                let perc = (100.0 * (1.0 - bfree / blocks)) as i32;
                Ok(format!("{}%", perc))
            }
        }
    }
}

/// `disk_free` / `disk_used` / `disk_total` / `disk_perc` for a mount path
pub struct DiskMetric<S = Statvfs> {
    kind: DiskKind,
    source: S,
}

impl DiskMetric<Statvfs> {
    pub fn new(kind: DiskKind) -> Self {
        Self::with_source(kind, Statvfs)
    }
}

impl<S: FsStatSource> DiskMetric<S> {
    pub fn with_source(kind: DiskKind, source: S) -> Self {
        Self { kind, source }
    }
}

#[async_trait::async_trait]
impl<S: FsStatSource> Metric for DiskMetric<S> {
    async fn sample(&self, arg: Option<&str>) -> Result<String> {
        let mount = required_arg(self.name(), arg)?;
        let stats = self
            .source
            .stats(mount)
            .map_err(|e| Error::metric_io(format!("Failed to get filesystem info for {}", mount), &e))?;
        self.kind.render(&stats)
    }

    fn arity(&self) -> Arity {
        Arity::WithArg
    }

    fn name(&self) -> &'static str {
        self.kind.metric_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedStats(FsStats);

    impl FsStatSource for FixedStats {
        fn stats(&self, _path: &str) -> io::Result<FsStats> {
            Ok(self.0)
        }
    }

    struct MissingMount;

    impl FsStatSource for MissingMount {
        fn stats(&self, _path: &str) -> io::Result<FsStats> {
            Err(io::Error::from_raw_os_error(libc::ENOENT))
        }
    }

    fn quarter_free() -> FsStats {
        FsStats {
            block_size: 4096,
            blocks: 100,
            blocks_free: 25,
        }
    }

    #[test]
    fn test_percent_used() {
        assert_eq!(DiskKind::Percent.render(&quarter_free()).unwrap(), "75%");
    }

    #[test]
    fn test_percent_truncates() {
        let stats = FsStats {
            block_size: 4096,
            blocks: 3,
            blocks_free: 1,
        };
        assert_eq!(DiskKind::Percent.render(&stats).unwrap(), "66%");
    }

    #[test]
    fn test_percent_zero_blocks_fails() {
        let stats = FsStats {
            block_size: 4096,
            blocks: 0,
            blocks_free: 0,
        };
        assert!(DiskKind::Percent.render(&stats).is_err());
    }

    #[test]
    fn test_sizes_in_gib() {
        let stats = FsStats {
            block_size: 4096,
            blocks: 262_144,
            blocks_free: 65_536,
        };
        assert_eq!(DiskKind::Total.render(&stats).unwrap(), "1.000000");
        assert_eq!(DiskKind::Free.render(&stats).unwrap(), "0.250000");
        assert_eq!(DiskKind::Used.render(&stats).unwrap(), "0.750000");
    }

    #[tokio::test]
    async fn test_metric_uses_source() {
        let metric = DiskMetric::with_source(DiskKind::Percent, FixedStats(quarter_free()));
        assert_eq!(metric.name(), "disk_perc");
        assert_eq!(metric.sample(Some("/")).await.unwrap(), "75%");
    }

    #[tokio::test]
    async fn test_missing_mount_fails_with_os_text() {
        let metric = DiskMetric::with_source(DiskKind::Free, MissingMount);
        let err = metric.sample(Some("/mnt/usb")).await.unwrap_err();
        let text = err.to_string();
        assert!(text.contains("/mnt/usb"));
        assert!(text.contains("No such file or directory"));
    }

    #[tokio::test]
    async fn test_statvfs_root() {
        let text = DiskMetric::new(DiskKind::Percent).sample(Some("/")).await.unwrap();
        assert!(text.ends_with('%'));
    }
}

//! Host facts read from the operating system
//!
//! Every function returns `io::Result` carrying the OS error text so the
//! composer's diagnostic names the real cause. The per-host figures are
//! reached through [`SystemSource`], so metrics can be driven by a double.

use nix::ifaddrs::getifaddrs;
use nix::unistd::{Uid, User};
use std::io;
use std::net::{Ipv4Addr, SocketAddrV4};

/// Raw filesystem statistics for one mount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsStats {
    /// Filesystem block size in bytes
    pub block_size: u64,
    /// Total data blocks
    pub blocks: u64,
    /// Free blocks
    pub blocks_free: u64,
}

/// Host-wide figures used by the identity and load metrics
pub trait SystemSource: Send + Sync {
    /// Host name of this machine
    fn hostname(&self) -> io::Result<String>;

    /// 1, 5 and 15 minute load averages
    fn load_average(&self) -> io::Result<[f64; 3]>;

    /// Seconds since boot
    fn uptime_secs(&self) -> io::Result<u64>;

    /// Login name for `uid`, or `None` if the password database has no entry
    fn user_name(&self, uid: Uid) -> io::Result<Option<String>>;
}

/// The running kernel and password database
#[derive(Debug, Default, Clone, Copy)]
pub struct System;

impl SystemSource for System {
    fn hostname(&self) -> io::Result<String> {
        let name = nix::unistd::gethostname()?;
        Ok(name.to_string_lossy().into_owned())
    }

    fn load_average(&self) -> io::Result<[f64; 3]> {
        let mut avgs = [0f64; 3];

        // SAFETY: `getloadavg` writes at most 3 doubles into a 3-element buffer.
        let n = unsafe { libc::getloadavg(avgs.as_mut_ptr(), 3) };
        if n < 3 {
            return Err(io::Error::other("getloadavg returned no samples"));
        }

        Ok(avgs)
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    fn uptime_secs(&self) -> io::Result<u64> {
        let info = nix::sys::sysinfo::sysinfo()?;
        Ok(info.uptime().as_secs())
    }

    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    fn uptime_secs(&self) -> io::Result<u64> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "uptime is only available on Linux",
        ))
    }

    fn user_name(&self, uid: Uid) -> io::Result<Option<String>> {
        let user = User::from_uid(uid)?;
        Ok(user.map(|user| user.name))
    }
}

/// First IPv4 address bound to `iface`, if any
pub fn ipv4_address(iface: &str) -> io::Result<Option<Ipv4Addr>> {
    let addrs = getifaddrs()?;

    let found = addrs
        .filter(|ifa| ifa.interface_name == iface)
        .filter_map(|ifa| ifa.address)
        .find_map(|addr| addr.as_sockaddr_in().map(|sin| *SocketAddrV4::from(*sin).ip()));

    Ok(found)
}

/// Filesystem statistics for the filesystem containing `path`
#[allow(clippy::unnecessary_cast)]
pub fn statvfs(path: &str) -> io::Result<FsStats> {
    let st = nix::sys::statvfs::statvfs(path)?;

    Ok(FsStats {
        block_size: st.block_size() as u64,
        blocks: st.blocks() as u64,
        blocks_free: st.blocks_free() as u64,
    })
}

/// Effective user id
pub fn effective_uid() -> Uid {
    nix::unistd::geteuid()
}

/// Real group id
pub fn group_id() -> nix::unistd::Gid {
    nix::unistd::getgid()
}

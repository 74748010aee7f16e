//! Process lifecycle: run mode, stop flag, signals and daemonization
//!
//! ## State Machine
//!
//! ```text
//! Running ──(SIGINT/SIGTERM)──▶ StopRequested ──(engine teardown)──▶ Stopped
//! ```
//!
//! The state lives in a single atomic byte. Signal listeners only ever
//! perform one store (`Running → StopRequested`); every decision that
//! follows (teardown, exit status) is made by the engine loop at a tick
//! boundary.

use crate::error::{Error, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use tokio::task::JoinHandle;
use tracing::info;

/// Lifecycle states, never reversed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LifecycleState {
    /// Ticking
    Running = 0,
    /// A stop was requested; the loop exits at the next tick boundary
    StopRequested = 1,
    /// The sink has been torn down
    Stopped = 2,
}

impl LifecycleState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => LifecycleState::Running,
            1 => LifecycleState::StopRequested,
            _ => LifecycleState::Stopped,
        }
    }
}

/// Owner of the lifecycle state
///
/// Only the engine moves the state to [`LifecycleState::Stopped`];
/// everything else gets a [`StopHandle`].
#[derive(Debug, Default)]
pub struct Lifecycle {
    state: Arc<AtomicU8>,
}

impl Lifecycle {
    /// Create a lifecycle in the `Running` state
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> LifecycleState {
        LifecycleState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Whether the loop should keep ticking
    pub fn is_running(&self) -> bool {
        self.state() == LifecycleState::Running
    }

    /// A cloneable handle that can only request a stop
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            state: Arc::clone(&self.state),
        }
    }

    pub(crate) fn mark_stopped(&self) {
        self.state
            .store(LifecycleState::Stopped as u8, Ordering::Release);
    }
}

/// Write-only view of the lifecycle state
///
/// Safe to use from signal listeners: `request_stop()` is one atomic
/// compare-and-swap with no allocation, locking or I/O.
#[derive(Debug, Clone)]
pub struct StopHandle {
    state: Arc<AtomicU8>,
}

impl StopHandle {
    /// Move `Running` to `StopRequested`; no effect in any other state
    pub fn request_stop(&self) {
        let _ = self.state.compare_exchange(
            LifecycleState::Running as u8,
            LifecycleState::StopRequested as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }
}

/// Register SIGINT and SIGTERM listeners that request a stop
///
/// Must be called from within a tokio runtime. The OS-level handlers are
/// installed before this function returns, so a signal delivered right
/// after it is never lost.
///
/// # Errors
///
/// Returns an error if either handler cannot be registered; this is fatal
/// for the daemon.
#[cfg(unix)]
pub fn install_signal_handlers(handle: StopHandle) -> Result<JoinHandle<()>> {
    use tokio::signal::unix::{SignalKind, signal};
    use tokio_stream::StreamExt;
    use tokio_stream::wrappers::SignalStream;

    let sigint = signal(SignalKind::interrupt())
        .map_err(|e| Error::lifecycle(format!("Failed to setup SIGINT handler: {}", e)))?;
    let sigterm = signal(SignalKind::terminate())
        .map_err(|e| Error::lifecycle(format!("Failed to setup SIGTERM handler: {}", e)))?;

    let mut signals = SignalStream::new(sigint).merge(SignalStream::new(sigterm));

    Ok(tokio::spawn(async move {
        while signals.next().await.is_some() {
            handle.request_stop();
        }
    }))
}

/// Register a Ctrl-C listener that requests a stop
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
pub fn install_signal_handlers(handle: StopHandle) -> Result<JoinHandle<()>> {
    Ok(tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            handle.request_stop();
        }
    }))
}

/// Where status lines are published
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Root window title of the X display
    WindowTitle,
    /// One line per tick on standard output
    Stdout,
}

/// Startup decisions derived from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Detach from the controlling terminal before opening the sink
    pub daemonize: bool,
    /// Selected sink
    pub mode: RunMode,
}

impl LaunchOptions {
    /// Combine the `-d` and `-o` flags
    ///
    /// # Errors
    ///
    /// Daemonizing while writing to stdout makes no sense; both flags
    /// together are a configuration error.
    pub fn from_flags(daemonize: bool, stdout_only: bool) -> Result<Self> {
        if daemonize && stdout_only {
            return Err(Error::config(
                "daemon mode (-d) and stdout mode (-o) are mutually exclusive",
            ));
        }

        let mode = if stdout_only {
            RunMode::Stdout
        } else {
            RunMode::WindowTitle
        };

        Ok(Self { daemonize, mode })
    }
}

/// Detach from the controlling terminal
///
/// Keeps the working directory and the standard streams open. Must run
/// before any runtime threads or sinks exist, since only the calling
/// thread survives the fork.
#[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))]
pub fn daemonize() -> Result<()> {
    nix::unistd::daemon(true, true).map_err(|e| Error::lifecycle(format!("daemon: {}", e)))?;

    info!("Detached from controlling terminal (pid {})", std::process::id());
    Ok(())
}

/// Daemonizing is only supported where daemon(3) is available
#[cfg(not(any(target_os = "linux", target_os = "android", target_os = "freebsd")))]
pub fn daemonize() -> Result<()> {
    Err(Error::lifecycle("daemon mode is not supported on this platform"))
}

//! Status engine
//!
//! The StatusEngine is responsible for:
//! - Composing one status line per tick from the format table
//! - Publishing it to the active sink
//! - Observing the stop request at tick boundaries
//! - Tearing the sink down exactly once
//!
//! ## Architecture
//!
//! ```text
//!                     ┌──────────────┐
//!  Lifecycle ────────▶│ StatusEngine │────── EngineEvent ──────▶ (observers)
//!  (stop flag)        └──────────────┘
//!                       │          │
//!             compose() │          │ publish() / teardown()
//!                       ▼          ▼
//!              ┌─────────────┐  ┌────────────┐
//!              │ FormatTable │  │ StatusSink │
//!              │  → Metrics  │  │            │
//!              └─────────────┘  └────────────┘
//! ```
//!
//! ## Tick Flow
//!
//! 1. Check the lifecycle state; leave the loop unless `Running`
//! 2. Compose the line (metrics run sequentially, failures fall back)
//! 3. Publish to the sink (errors are logged, the loop continues)
//! 4. Sleep the tick interval
//!
//! A sink that reports itself closed ends the loop as if a stop had been
//! requested; the sink is still torn down and the run returns `Ok`.

pub mod composer;

pub use composer::{Composition, UNKNOWN_STR, compose};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::lifecycle::Lifecycle;
use crate::table::FormatTable;
use crate::traits::StatusSink;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Events emitted by the StatusEngine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Engine started
    Started {
        entries: usize,
        sink: &'static str,
    },

    /// A line was handed to the sink successfully
    TickPublished {
        bytes: usize,
        truncated: bool,
        fallbacks: usize,
    },

    /// The sink rejected a line
    PublishFailed {
        error: String,
    },

    /// Sink torn down, engine stopped
    Stopped {
        ticks: u64,
    },
}

/// Core status engine
///
/// ## Lifecycle
///
/// 1. Create with [`StatusEngine::new()`]
/// 2. Run with [`StatusEngine::run()`], which consumes the engine
/// 3. The loop exits at the first tick boundary after a stop request
/// 4. The sink is torn down and the lifecycle marked `Stopped`
///
/// ## Threading
///
/// Everything runs on the caller's task. Metrics are never sampled in
/// parallel, so a tick takes the sum of all metric latencies.
pub struct StatusEngine {
    /// Entries rendered every tick
    table: FormatTable,

    /// Active sink, exclusively owned
    sink: Box<dyn StatusSink>,

    /// Status line capacity in bytes
    line_capacity: usize,

    /// Sleep between ticks
    tick_interval: Duration,

    /// Event sender for external monitoring
    event_tx: mpsc::Sender<EngineEvent>,

    /// Set once the sink can no longer accept lines
    sink_closed: bool,
}

impl StatusEngine {
    /// Create a new status engine
    ///
    /// # Returns
    ///
    /// A tuple of (engine, event_receiver) where event_receiver yields engine events
    pub fn new(
        table: FormatTable,
        sink: Box<dyn StatusSink>,
        config: &EngineConfig,
    ) -> Result<(Self, mpsc::Receiver<EngineEvent>)> {
        config.validate()?;

        if table.is_empty() {
            return Err(Error::config("Format table is empty"));
        }

        let (tx, rx) = mpsc::channel(config.event_channel_capacity);

        let engine = Self {
            table,
            sink,
            line_capacity: config.line_capacity,
            tick_interval: config.tick_interval,
            event_tx: tx,
            sink_closed: false,
        };

        Ok((engine, rx))
    }

    /// Compose and publish a single line, without sleeping
    pub async fn tick(&mut self) -> Composition {
        let composition = compose(&self.table, self.line_capacity).await;

        match self.sink.publish(composition.line.as_str()) {
            Ok(()) => {
                debug!(
                    "Published {} bytes to {} ({} fallback(s))",
                    composition.line.len(),
                    self.sink.sink_name(),
                    composition.fallbacks
                );
                self.emit_event(EngineEvent::TickPublished {
                    bytes: composition.line.len(),
                    truncated: composition.line.is_truncated(),
                    fallbacks: composition.fallbacks,
                });
            }
            Err(e) => {
                error!("Failed to publish status line: {}", e);
                self.sink_closed |= e.is_sink_closed();
                self.emit_event(EngineEvent::PublishFailed {
                    error: e.to_string(),
                });
            }
        }

        composition
    }

    /// Run the tick loop until a stop is requested or the sink closes
    ///
    /// The stop flag is only read between ticks; a tick in progress (including
    /// a slow external command) always completes first.
    ///
    /// # Returns
    ///
    /// The number of ticks performed.
    pub async fn run(mut self, lifecycle: &Lifecycle) -> Result<u64> {
        info!(
            "Status engine started: {} entries → {}",
            self.table.len(),
            self.sink.sink_name()
        );
        self.emit_event(EngineEvent::Started {
            entries: self.table.len(),
            sink: self.sink.sink_name(),
        });

        let mut ticks: u64 = 0;
        while lifecycle.is_running() {
            self.tick().await;
            ticks += 1;

            if self.sink_closed {
                warn!("{} sink closed, stopping", self.sink.sink_name());
                lifecycle.stop_handle().request_stop();
                break;
            }

            tokio::time::sleep(self.tick_interval).await;
        }

        info!("Loop ended after {} tick(s), tearing down {} sink", ticks, self.sink.sink_name());
        if let Err(e) = self.sink.teardown() {
            error!("Sink teardown failed: {}", e);
        }

        lifecycle.mark_stopped();
        self.emit_event(EngineEvent::Stopped { ticks });
        info!("Engine stopped");

        Ok(ticks)
    }

    /// Emit an engine event
    fn emit_event(&self, event: EngineEvent) {
        // Dropped events only affect observers, never the loop
        match self.event_tx.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!("Event channel full, dropping event. Consider increasing event_channel_capacity.");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {}
        }
    }
}

//! Per-tick status line composition
//!
//! Walks the format table once, in order, sampling each metric and
//! appending its rendered text to a bounded [`StatusLine`]. Metric failures
//! never escape: they are logged and replaced by [`UNKNOWN_STR`].

use crate::status_line::{StatusLine, render_template};
use crate::table::FormatTable;
use tracing::{debug, warn};

/// Fallback marker substituted for a failed metric
pub const UNKNOWN_STR: &str = "n/a";

/// Result of composing one tick
#[derive(Debug, Clone)]
pub struct Composition {
    /// The composed line
    pub line: StatusLine,
    /// Number of entries that fell back to [`UNKNOWN_STR`]
    pub fallbacks: usize,
}

/// Compose one status line from `table`
///
/// Entries are sampled strictly sequentially. Once the line is full the
/// remaining entries are not sampled at all.
pub async fn compose(table: &FormatTable, capacity: usize) -> Composition {
    let mut line = StatusLine::with_capacity(capacity);
    let mut fallbacks = 0;

    for entry in table.entries() {
        let value = match entry.metric().sample(entry.arg()).await {
            Ok(text) => text,
            Err(e) => {
                warn!("{}: {}", entry.label(), e);
                fallbacks += 1;
                UNKNOWN_STR.to_string()
            }
        };

        let piece = render_template(entry.template(), &value);
        if !line.push_bounded(&piece) {
            debug!(
                "Status line full at {} bytes, skipping entries after {}",
                capacity,
                entry.label()
            );
            break;
        }
    }

    Composition { line, fallbacks }
}

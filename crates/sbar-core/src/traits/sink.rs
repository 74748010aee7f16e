// # Status Sink Trait
//
// Defines where a composed status line goes.
//
// ## Implementations
//
// - Window title (X11 root window): `sbar-sink-x11` crate
// - Text stream (stdout): [`crate::sink::StreamSink`]
//
// Exactly one sink is active per run. The engine owns it for the whole run
// and is the only caller of `teardown()`.

/// Destination for composed status lines
pub trait StatusSink: Send {
    /// Publish one status line
    ///
    /// Must make the line visible before returning (flush / sync).
    fn publish(&mut self, line: &str) -> crate::Result<()>;

    /// Release the sink's resources
    ///
    /// Called exactly once, after the last `publish()`.
    fn teardown(&mut self) -> crate::Result<()>;

    /// Short name for logs
    fn sink_name(&self) -> &'static str;
}

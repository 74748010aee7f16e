// # Stream Sink
//
// Writes each status line to a byte stream followed by a line terminator.
//
// ## Purpose
//
// Backs the `-o` mode: one newline-terminated line per tick on stdout,
// consumable by any downstream text reader (bars, pipes, `tail -f`).
//
// ## Line Termination
//
// A line that already ends in `\n` (because the last format entry carries
// one) is written as-is; otherwise a single `\n` is appended. The output is
// therefore always exactly one terminator per tick.
//
// ## Closed Readers
//
// `EPIPE` means the reader is gone for good. It surfaces as
// `Error::SinkClosed` so the engine stops instead of ticking into a dead
// pipe, and teardown treats it as already flushed.

use std::io::{self, ErrorKind, Write};

use crate::traits::StatusSink;
use crate::{Error, Result};

/// Status sink over any `Write` stream
///
/// # Example
///
/// ```rust
/// use sbar_core::sink::StreamSink;
/// use sbar_core::traits::StatusSink;
///
/// let mut sink = StreamSink::new(Vec::new());
/// sink.publish("load 0.42").unwrap();
/// assert_eq!(sink.get_ref().as_slice(), b"load 0.42\n");
/// ```
#[derive(Debug)]
pub struct StreamSink<W: Write + Send> {
    writer: W,
}

impl StreamSink<std::io::Stdout> {
    /// Create a sink writing to the process's standard output
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> StreamSink<W> {
    /// Create a sink over an arbitrary writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Borrow the underlying writer
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consume the sink and return the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> StatusSink for StreamSink<W> {
    fn publish(&mut self, line: &str) -> Result<()> {
        self.writer
            .write_all(line.as_bytes())
            .map_err(|e| write_error("write failed", e))?;

        if !line.ends_with('\n') {
            self.writer
                .write_all(b"\n")
                .map_err(|e| write_error("write failed", e))?;
        }

        self.writer
            .flush()
            .map_err(|e| write_error("flush failed", e))
    }

    fn teardown(&mut self) -> Result<()> {
        match self.writer.flush() {
            Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
            other => other.map_err(|e| write_error("flush failed", e)),
        }
    }

    fn sink_name(&self) -> &'static str {
        "stdout"
    }
}

fn write_error(context: &str, err: io::Error) -> Error {
    if err.kind() == ErrorKind::BrokenPipe {
        Error::sink_closed(format!("{}: {}", context, err))
    } else {
        Error::sink(format!("{}: {}", context, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_terminator() {
        let mut sink = StreamSink::new(Vec::new());
        sink.publish("a").unwrap();
        sink.publish("b").unwrap();
        assert_eq!(sink.into_inner(), b"a\nb\n");
    }

    #[test]
    fn test_existing_terminator_not_doubled() {
        let mut sink = StreamSink::new(Vec::new());
        sink.publish("myhost | 2h 5m\n").unwrap();
        assert_eq!(sink.into_inner(), b"myhost | 2h 5m\n");
    }

    #[test]
    fn test_empty_line_still_terminated() {
        let mut sink = StreamSink::new(Vec::new());
        sink.publish("").unwrap();
        assert_eq!(sink.into_inner(), b"\n");
    }

    struct FailingWriter(ErrorKind);

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(self.0))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(self.0))
        }
    }

    #[test]
    fn test_broken_pipe_closes_sink() {
        let mut sink = StreamSink::new(FailingWriter(ErrorKind::BrokenPipe));
        let err = sink.publish("x").unwrap_err();
        assert!(err.is_sink_closed());
        assert!(sink.teardown().is_ok());
    }

    #[test]
    fn test_other_write_error_is_transient() {
        let mut sink = StreamSink::new(FailingWriter(ErrorKind::StorageFull));
        let err = sink.publish("x").unwrap_err();
        assert!(matches!(err, Error::Sink(_)));
        assert!(sink.teardown().is_err());
    }
}

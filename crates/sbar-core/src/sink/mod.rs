//! Built-in status sink implementations
//!
//! - [`StreamSink`]: Writes one line per tick to a text stream (stdout)

pub mod stream;

pub use stream::StreamSink;

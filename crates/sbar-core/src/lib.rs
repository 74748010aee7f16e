// # sbar-core
//
// Core library for the sbar status line.
//
// ## Architecture Overview
//
// This library provides the metric dispatch engine and the publish loop:
// - **Metric**: Trait for a single source of status text (clock, disk, load...)
// - **MetricRegistry**: Name → metric lookup used to resolve format tables
// - **FormatTable**: Ordered `(metric, argument, template)` entries
// - **StatusLine**: Bounded buffer the line is composed into
// - **StatusSink**: Trait for where the line goes (window title, stdout)
// - **StatusEngine**: Compose → publish → sleep loop with cooperative stop
// - **Lifecycle**: Atomic `Running → StopRequested → Stopped` state
//
// ## Design Principles
//
// 1. **Uniform Dispatch**: Every metric is sampled through one signature
// 2. **Local Failure**: A failing metric becomes `n/a`, never a crash
// 3. **Bounded Output**: The composed line never exceeds its capacity
// 4. **Single Owner**: The engine alone publishes to and tears down the sink
// 5. **Tick-Boundary Cancellation**: Signals only flip a flag

pub mod traits;
pub mod engine;
pub mod registry;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod sink;
pub mod status_line;
pub mod table;

// Re-export core types for convenience
pub use traits::{Arity, Metric, StatusSink};
pub use engine::{EngineEvent, StatusEngine, UNKNOWN_STR};
pub use registry::MetricRegistry;
pub use config::{EngineConfig, EntryConfig, SbarConfig};
pub use error::{Error, Result};
pub use lifecycle::{LaunchOptions, Lifecycle, LifecycleState, RunMode, StopHandle};
pub use sink::StreamSink;
pub use status_line::StatusLine;
pub use table::{FormatEntry, FormatTable};

//! Core traits for the sbar system
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`Metric`]: Produce one piece of status text per tick
//! - [`StatusSink`]: Publish a composed status line

pub mod metric;
pub mod sink;

pub use metric::{Arity, Metric, required_arg};
pub use sink::StatusSink;

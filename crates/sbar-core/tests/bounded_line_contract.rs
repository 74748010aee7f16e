//! Contract Test: Bounded Status Line
//!
//! Constraints verified:
//! - The composed line never exceeds the configured capacity
//! - Entries past the capacity are not sampled
//! - A cut never splits a multi-byte character

mod common;

use common::*;
use sbar_core::engine::compose;
use sbar_core::{FormatTable, StatusEngine};

fn wide_table(entries: usize) -> FormatTable {
    FormatTable::from_entries(
        (0..entries)
            .map(|_| entry(FixedMetric::new("datetime", "2024-01-01 12:00:00"), None, "[%s] "))
            .collect(),
    )
}

#[tokio::test]
async fn line_never_exceeds_capacity() {
    let table = wide_table(40);

    for capacity in [1, 7, 22, 23, 50, 255, 1000] {
        let composition = compose(&table, capacity).await;
        assert!(
            composition.line.len() <= capacity,
            "capacity {} produced {} bytes",
            capacity,
            composition.line.len()
        );
    }
}

#[tokio::test]
async fn overflowing_line_fills_capacity_exactly() {
    // Each rendered piece is 22 bytes; 40 of them overflow 255
    let composition = compose(&wide_table(40), 255).await;

    assert_eq!(composition.line.len(), 255);
    assert!(composition.line.is_truncated());
    assert!(composition.line.as_str().starts_with("[2024-01-01 12:00:00] "));
}

#[tokio::test]
async fn entries_after_full_line_are_not_sampled() {
    let tail = FailingMetric::new("temp");
    let table = FormatTable::from_entries(vec![
        entry(FixedMetric::new("hostname", "a-very-long-hostname"), None, "%s"),
        entry(FailingMetric::sharing_counters_with(&tail), None, " %s"),
    ]);

    let composition = compose(&table, 10).await;

    assert_eq!(composition.line.as_str(), "a-very-lon");
    assert_eq!(tail.call_count(), 0);
    assert_eq!(composition.fallbacks, 0);
}

#[tokio::test]
async fn cut_respects_character_boundaries() {
    let table = FormatTable::from_entries(vec![entry(
        FixedMetric::new("temp", "45°C"),
        None,
        "%s",
    )]);

    // "45°C" is 5 bytes, '°' occupies bytes 2..4
    let composition = compose(&table, 3).await;

    assert_eq!(composition.line.as_str(), "45");
    assert!(composition.line.is_truncated());
}

#[tokio::test]
async fn engine_publishes_truncated_line() {
    let sink = RecordingSink::new();
    let config = fast_config().with_line_capacity(30);
    let (mut engine, _event_rx) = StatusEngine::new(
        wide_table(5),
        Box::new(RecordingSink::sharing_counters_with(&sink)),
        &config,
    )
    .unwrap();

    engine.tick().await;

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].len(), 30);
}

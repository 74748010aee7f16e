//! Built-in format table
//!
//! Used when `SBAR_CONFIG` is not set. Edit and rebuild to change the
//! default line, or point `SBAR_CONFIG` at a JSON file with the same
//! entries.

use sbar_core::config::{EntryConfig, SbarConfig};

/// `(metric, argument, format)` in display order
const DEFAULT_TABLE: &[(&str, Option<&str>, &str)] = &[
    ("load_avg", None, "load %s"),
    ("disk_perc", Some("/"), " | / %s"),
    ("uptime", None, " | up %s"),
    ("username", None, " | %s"),
    ("hostname", None, "@%s"),
    ("datetime", Some("%a %d %b %H:%M"), " | %s"),
];

pub fn default_config() -> SbarConfig {
    let entries = DEFAULT_TABLE
        .iter()
        .map(|&(metric, arg, format)| {
            let entry = EntryConfig::new(metric).with_format(format);
            match arg {
                Some(arg) => entry.with_arg(arg),
                None => entry,
            }
        })
        .collect();

    SbarConfig::new(entries)
}

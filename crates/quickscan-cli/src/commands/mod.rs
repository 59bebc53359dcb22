//! Command handlers.

pub mod generate;
pub mod history;
pub mod scan;

use std::path::Path;

use quickscan_core::history::{HistoryLog, HistoryRecord};

/// Append a record to the history log, best-effort.
///
/// History failures are reported to stderr and never fail the command.
pub fn append_history(path: Option<&Path>, record: &HistoryRecord) {
    let Some(path) = path else {
        return;
    };
    let result = HistoryLog::create(path).and_then(|log| log.append(record));
    if let Err(err) = result {
        eprintln!("Warning: failed to write history: {}", err);
    }
}

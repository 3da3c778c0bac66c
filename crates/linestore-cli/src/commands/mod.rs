//! Command handlers

pub mod config;
pub mod entry;
pub mod query;
pub mod status;
pub mod transfer;

use linestore_core::LogWriter;
use tracing::warn;

/// Append a line to the activity log, when one is configured. Logging is
/// best-effort and never fails the command.
pub(crate) fn log_activity(log: Option<&LogWriter>, line: &str) {
    if let Some(log) = log {
        if let Err(err) = log.write(line) {
            warn!("failed to append activity log: {err}");
        }
    }
}

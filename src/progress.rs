// src/progress.rs
use chrono::NaiveDate;

/// Lightweight progress reporting used by long-running operations (collect/export).
/// The CLI implements this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of days in the range.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one day has been fetched (or parsed, during `parse_all`).
    fn day_done(&mut self, _date: NaiveDate) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

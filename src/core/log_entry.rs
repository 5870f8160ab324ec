//! Log entry structure

use super::location::Location;
use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use std::cell::RefCell;

// Thread-local cache for the thread id to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Numeric id of the current thread, computed once per thread.
///
/// `ThreadId` only exposes its number through `Debug` (`ThreadId(7)`), so the
/// wrapper is stripped off here.
pub fn current_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| {
                let raw = format!("{:?}", std::thread::current().id());
                raw.trim_start_matches("ThreadId(")
                    .trim_end_matches(')')
                    .to_string()
            })
            .clone()
    })
}

/// Snapshot of one logging call, captured on the calling thread.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub location: Location,
    pub thread_id: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: String, location: Location) -> Self {
        Self {
            level,
            message,
            timestamp: Local::now(),
            location,
            thread_id: current_thread_id(),
        }
    }

    /// Replace the capture time, mostly useful for deterministic rendering
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_thread_id(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = thread_id.into();
        self
    }
}

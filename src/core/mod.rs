//! Core logger types and traits

pub mod config;
pub mod dispatch;
pub mod error;
pub mod fields;
pub mod location;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod sink;
pub mod timestamp;

pub use config::{Config, DEFAULT_ASYNC_QUEUE_SIZE, DEFAULT_ASYNC_THREAD_COUNT};
pub use dispatch::{DispatchMode, DEFAULT_SHUTDOWN_TIMEOUT};
pub use error::{LoggerError, Result};
pub use fields::{Field, LogFieldConfig};
pub use location::Location;
pub use log_context::Context;
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::Logger;
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
pub use sink::{Delivery, Sink};

//! # kvalog
//!
//! A structured logging facade: one call site (`info`, `error`, ...) that
//! renders records as JSON or bracketed terminal text and delivers them to
//! console, file and network sinks, inline or through a background queue.
//!
//! ## Features
//!
//! - **Configurable fields**: time, app, process id, thread id, module,
//!   level, `file:line` and message can each be switched on or off
//! - **Two formats**: single-line JSON and human-readable terminal text,
//!   switchable at runtime
//! - **Sync or async**: inline delivery, or a bounded queue with a fixed
//!   worker pool that blocks producers instead of dropping records
//! - **Pluggable network transport**: bring your own HTTP/gRPC/TCP client
//!
//! ```no_run
//! use kvalog::prelude::*;
//!
//! let config = Config::default()
//!     .with_format(OutputFormat::Json)
//!     .with_file("application.log");
//! let logger = Logger::with_context(config, Context::new("FileApp", "MainModule"))?;
//!
//! logger.info("Logging to both console and file");
//! logger.flush();
//! # Ok::<(), LoggerError>(())
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Config, Context, DispatchMode, Field, Location, LogFieldConfig, LogLevel, Logger,
        LoggerError, LoggerMetrics, OutputFormat, Result, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::sinks::NetworkTransport;
}

pub use crate::core::{
    Config, Context, Delivery, DispatchMode, Field, Location, LogEntry, LogFieldConfig, LogLevel,
    Logger, LoggerError, LoggerMetrics, OutputFormat, Result, Sink, DEFAULT_ASYNC_QUEUE_SIZE,
    DEFAULT_ASYNC_THREAD_COUNT, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use crate::sinks::{ConsoleSink, FileSink, NetworkSink, NetworkTransport};

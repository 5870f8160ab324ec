//! Logging macros for ergonomic log message formatting.
//!
//! These macros accept `format!`-style arguments and record the call site
//! through `file!()`/`line!()`. The level is checked first, so arguments of
//! filtered records are never formatted.
//!
//! # Examples
//!
//! ```
//! use kvalog::prelude::*;
//! use kvalog::info;
//!
//! let logger = Logger::new(Config::default())?;
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! # Ok::<(), kvalog::LoggerError>(())
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use kvalog::prelude::*;
/// # let logger = Logger::new(Config::default()).unwrap();
/// use kvalog::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        match (&$logger, $level) {
            (logger, level) => {
                if logger.is_enabled(level) {
                    logger.log_at(
                        level,
                        format!($($arg)+),
                        $crate::Location::new(file!(), line!()),
                    );
                } else {
                    logger.metrics().record_filtered();
                }
            }
        }
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use kvalog::prelude::*;
/// # let logger = Logger::new(Config::default()).unwrap();
/// use kvalog::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use kvalog::prelude::*;
/// # let logger = Logger::new(Config::default()).unwrap();
/// use kvalog::warning;
/// warning!(logger, "Low disk space");
/// warning!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
///
/// # Examples
///
/// ```
/// # use kvalog::prelude::*;
/// # let logger = Logger::new(Config::default()).unwrap();
/// use kvalog::critical;
/// critical!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

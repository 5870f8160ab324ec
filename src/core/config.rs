//! Logger configuration

use super::dispatch::DispatchMode;
use super::error::{LoggerError, Result};
use super::fields::LogFieldConfig;
use super::output_format::OutputFormat;
use crate::sinks::NetworkTransport;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Default capacity of the async record queue
pub const DEFAULT_ASYNC_QUEUE_SIZE: usize = 8192;

/// Default number of async worker threads
pub const DEFAULT_ASYNC_THREAD_COUNT: usize = 1;

/// Everything a [`Logger`] is built from.
///
/// The value is copied into the logger at construction; changing it
/// afterwards does not affect loggers already built from it.
///
/// # Example
///
/// ```no_run
/// use kvalog::{Config, OutputFormat};
///
/// let config = Config::default()
///     .with_format(OutputFormat::Json)
///     .with_file("application.log")
///     .with_async(8192, 2);
/// ```
///
/// [`Logger`]: super::Logger
#[derive(Clone)]
pub struct Config {
    pub format: OutputFormat,
    pub fields: LogFieldConfig,
    pub mode: DispatchMode,

    /// Write records to stdout
    pub log_to_console: bool,
    /// Write records to this file, truncated when the logger is built
    pub log_file_path: Option<PathBuf>,
    /// Hand records to this transport while it reports a connection
    pub network_transport: Option<Arc<dyn NetworkTransport>>,

    /// Queue capacity in async mode
    pub async_queue_size: usize,
    /// Worker threads in async mode, at least one is always started
    pub async_thread_count: usize,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_fields(mut self, fields: LogFieldConfig) -> Self {
        self.fields = fields;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.log_to_console = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file_path = Some(path.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_network_transport(mut self, transport: Arc<dyn NetworkTransport>) -> Self {
        self.network_transport = Some(transport);
        self
    }

    /// Switch to async delivery with the given queue capacity and worker count
    #[must_use = "builder methods return a new value"]
    pub fn with_async(mut self, queue_size: usize, thread_count: usize) -> Self {
        self.mode = DispatchMode::Async;
        self.async_queue_size = queue_size;
        self.async_thread_count = thread_count;
        self
    }

    /// Worker count actually started in async mode
    pub fn effective_thread_count(&self) -> usize {
        self.async_thread_count.max(1)
    }

    /// Check settings that would otherwise only fail once the logger runs
    pub fn validate(&self) -> Result<()> {
        if self.mode == DispatchMode::Async && self.async_queue_size == 0 {
            return Err(LoggerError::config(
                "Config",
                "async_queue_size must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            fields: LogFieldConfig::default(),
            mode: DispatchMode::default(),
            log_to_console: true,
            log_file_path: None,
            network_transport: None,
            async_queue_size: DEFAULT_ASYNC_QUEUE_SIZE,
            async_thread_count: DEFAULT_ASYNC_THREAD_COUNT,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("format", &self.format)
            .field("fields", &self.fields)
            .field("mode", &self.mode)
            .field("log_to_console", &self.log_to_console)
            .field("log_file_path", &self.log_file_path)
            .field("network_transport", &self.network_transport.is_some())
            .field("async_queue_size", &self.async_queue_size)
            .field("async_thread_count", &self.async_thread_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.format, OutputFormat::Terminal);
        assert_eq!(config.mode, DispatchMode::Sync);
        assert!(config.log_to_console);
        assert!(config.log_file_path.is_none());
        assert!(config.network_transport.is_none());
        assert_eq!(config.async_queue_size, 8192);
        assert_eq!(config.async_thread_count, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_queue_rejected_in_async_mode() {
        let config = Config::default().with_async(0, 1);
        assert!(matches!(
            config.validate(),
            Err(LoggerError::InvalidConfiguration { .. })
        ));

        // Only async mode uses the queue
        let mut config = Config::default();
        config.async_queue_size = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_thread_count_floor() {
        let config = Config::default().with_async(16, 0);
        assert_eq!(config.effective_thread_count(), 1);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Config::default();
        let mut copy = original.clone();
        copy.log_to_console = false;
        assert!(original.log_to_console);
    }
}

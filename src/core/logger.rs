//! Main logger implementation

use super::{
    config::Config,
    dispatch::{DispatchMode, Dispatcher, DEFAULT_SHUTDOWN_TIMEOUT},
    error::Result,
    fields::LogFieldConfig,
    location::Location,
    log_context::Context,
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    output_format::OutputFormat,
    sink::SinkSet,
};
use crate::sinks::NetworkTransport;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

/// A configured logger: field selection, output format, sinks and a
/// dispatch engine.
///
/// Records below the minimum level are discarded before they are rendered.
/// Field selection, output format and minimum level can be changed at any
/// time through `&self`; each change is atomic on its own, but ordering
/// against records logged concurrently from other threads is up to the
/// caller. Sinks and dispatch mode are fixed at construction.
///
/// # Example
///
/// ```no_run
/// use kvalog::{Config, Context, Logger, OutputFormat};
///
/// let config = Config::default().with_format(OutputFormat::Json);
/// let logger = Logger::with_context(config, Context::new("MyApplication", "MainModule"))?;
///
/// logger.info("Application started successfully");
/// logger.warning("Cache miss for key: user_123");
/// # Ok::<(), kvalog::LoggerError>(())
/// ```
pub struct Logger {
    config: Config,
    context: Context,
    process_id: u32,
    min_level: RwLock<LogLevel>,
    fields: RwLock<LogFieldConfig>,
    format: RwLock<OutputFormat>,
    sinks: Arc<SinkSet>,
    dispatcher: Dispatcher,
    /// Metrics for observability (delivered, dropped, filtered, ...)
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Build a logger with an empty context
    ///
    /// # Errors
    ///
    /// Fails if the log file cannot be opened, the async settings are
    /// invalid, or a worker thread cannot be spawned.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_context(config, Context::default())
    }

    /// Build a logger stamping every record with `context`
    pub fn with_context(config: Config, context: Context) -> Result<Self> {
        config.validate()?;

        let metrics = Arc::new(LoggerMetrics::new());
        let sinks = Arc::new(SinkSet::resolve(&config, Arc::clone(&metrics))?);
        let dispatcher = Dispatcher::new(&config, Arc::clone(&sinks), Arc::clone(&metrics))?;

        Ok(Self {
            min_level: RwLock::new(LogLevel::Trace),
            fields: RwLock::new(config.fields),
            format: RwLock::new(config.format),
            config,
            context,
            process_id: std::process::id(),
            sinks,
            dispatcher,
            metrics,
        })
    }

    /// Build a new logger with `source`'s current configuration and a new context
    ///
    /// The new logger opens its own sinks and starts its own workers; nothing
    /// is shared with `source` except the network transport, if any.
    pub fn with_config_from(source: &Logger, context: Context) -> Result<Self> {
        Self::with_context(source.current_config(), context)
    }

    /// Build an independent logger with the same configuration and context
    ///
    /// Like [`with_config_from`](Self::with_config_from) this reopens the log
    /// file, which truncates it.
    pub fn try_clone(&self) -> Result<Self> {
        Self::with_context(self.current_config(), self.context.clone())
    }

    fn current_config(&self) -> Config {
        let mut config = self.config.clone();
        config.fields = *self.fields.read();
        config.format = *self.format.read();
        config.network_transport = self.sinks.network_transport();
        config
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn set_field_config(&self, fields: LogFieldConfig) {
        *self.fields.write() = fields;
    }

    pub fn field_config(&self) -> LogFieldConfig {
        *self.fields.read()
    }

    pub fn set_output_format(&self, format: OutputFormat) {
        *self.format.write() = format;
    }

    pub fn output_format(&self) -> OutputFormat {
        *self.format.read()
    }

    /// Replace the transport behind this logger's network sink
    ///
    /// Returns `false`, and changes nothing, when the logger was built
    /// without a network transport.
    pub fn set_network_transport(&self, transport: Arc<dyn NetworkTransport>) -> bool {
        self.sinks.set_network_transport(transport)
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn dispatch_mode(&self) -> DispatchMode {
        self.dispatcher.mode()
    }

    /// Process id stamped on every record, captured at construction
    pub fn process_id(&self) -> u32 {
        self.process_id
    }

    /// Names of the active sinks, in fan-out order
    pub fn sink_names(&self) -> Vec<String> {
        self.sinks.names()
    }

    /// Whether a record at `level` would currently be emitted
    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level.passes(*self.min_level.read())
    }

    /// Log at `level`, attributing the record to the caller's location
    #[track_caller]
    #[inline]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.log_at(level, message, Location::caller());
    }

    /// Log at `level` with an explicit call-site location
    pub fn log_at(&self, level: LogLevel, message: impl Into<String>, location: Location) {
        if !self.is_enabled(level) {
            self.metrics.record_filtered();
            return;
        }

        let entry = LogEntry::new(level, message.into(), location);
        let line = self.render(&entry);
        self.dispatcher.dispatch(line);
    }

    /// Render an entry with the current format, field selection and context
    pub fn render(&self, entry: &LogEntry) -> String {
        let fields = *self.fields.read();
        let format = *self.format.read();
        format.render(entry, &self.context, &fields, self.process_id)
    }

    #[track_caller]
    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log_at(LogLevel::Trace, message, Location::caller());
    }

    #[track_caller]
    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log_at(LogLevel::Debug, message, Location::caller());
    }

    #[track_caller]
    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log_at(LogLevel::Info, message, Location::caller());
    }

    #[track_caller]
    #[inline]
    pub fn warning(&self, message: impl Into<String>) {
        self.log_at(LogLevel::Warning, message, Location::caller());
    }

    #[track_caller]
    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log_at(LogLevel::Error, message, Location::caller());
    }

    #[track_caller]
    #[inline]
    pub fn critical(&self, message: impl Into<String>) {
        self.log_at(LogLevel::Critical, message, Location::caller());
    }

    /// Wait until every record logged before this call has been handed to
    /// the sinks, then flush sink buffers
    ///
    /// In sync mode there is no queue to drain and only the buffers are flushed.
    pub fn flush(&self) {
        self.dispatcher.flush();
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use kvalog::{Config, Logger};
    ///
    /// let logger = Logger::new(Config::default().with_console(false))?;
    /// logger.info("nobody listens");
    ///
    /// let metrics = logger.metrics();
    /// println!("Dropped: {}", metrics.dropped_count());
    /// println!("Drop rate: {:.2}%", metrics.drop_rate());
    /// # Ok::<(), kvalog::LoggerError>(())
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Gracefully shutdown the logger with a custom timeout
    ///
    /// Drains the async queue, joins the workers and flushes the sinks.
    /// Records logged afterwards are written inline on the caller's thread.
    /// Dropping the logger does the same with [`DEFAULT_SHUTDOWN_TIMEOUT`].
    ///
    /// Returns `true` if shutdown completed within `timeout`.
    ///
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        self.dispatcher.shutdown(timeout)
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.dispatcher.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped logs (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fields::Field;
    use crate::sinks::network::tests::RecordingTransport;
    use std::sync::atomic::Ordering;

    fn network_logger(config: Config) -> (Logger, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::default());
        let logger = Logger::with_context(
            config
                .with_console(false)
                .with_network_transport(transport.clone()),
            Context::new("Svc", "Main"),
        )
        .unwrap();
        (logger, transport)
    }

    #[test]
    fn test_defaults() {
        let logger = Logger::new(Config::default().with_console(false)).unwrap();
        assert_eq!(logger.level(), LogLevel::Trace);
        assert_eq!(logger.output_format(), OutputFormat::Terminal);
        assert_eq!(logger.field_config(), LogFieldConfig::all());
        assert_eq!(logger.dispatch_mode(), DispatchMode::Sync);
        assert_eq!(logger.process_id(), std::process::id());
        assert!(logger.sink_names().is_empty());
    }

    #[test]
    fn test_leveled_methods_capture_call_site() {
        let (logger, transport) = network_logger(Config::default().with_format(OutputFormat::Json));

        let line = line!() + 1;
        logger.info("ready");

        let lines = transport.lines.lock();
        let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(value["file"], format!("logger.rs:{}", line));
        assert_eq!(value["level"], "INF");
        assert_eq!(value["app"], "Svc");
    }

    #[test]
    fn test_level_filter_counts_filtered() {
        let (logger, transport) = network_logger(Config::default());
        logger.set_level(LogLevel::Warning);

        logger.debug("hidden");
        logger.info("hidden");
        logger.warning("shown");
        logger.critical("shown");

        assert_eq!(transport.lines.lock().len(), 2);
        assert_eq!(logger.metrics().filtered_count(), 2);

        logger.set_level(LogLevel::Off);
        logger.critical("hidden");
        assert_eq!(transport.lines.lock().len(), 2);
    }

    #[test]
    fn test_off_is_never_emitted() {
        let (logger, transport) = network_logger(Config::default());
        logger.log(LogLevel::Off, "sentinel");
        assert!(transport.lines.lock().is_empty());
    }

    #[test]
    fn test_runtime_mutators() {
        let (logger, transport) = network_logger(Config::default());

        logger.set_field_config(LogFieldConfig::none().with(Field::Message, true));
        logger.info("terminal");
        logger.set_output_format(OutputFormat::Json);
        logger.info("json");

        assert_eq!(
            *transport.lines.lock(),
            vec![" terminal".to_string(), r#"{"message":"json"}"#.to_string()]
        );
    }

    #[test]
    fn test_disconnected_transport_is_counted() {
        let (logger, transport) = network_logger(Config::default());
        transport.offline.store(true, Ordering::SeqCst);
        logger.error("dropped");

        assert!(transport.lines.lock().is_empty());
        assert_eq!(logger.metrics().network_skipped(), 1);
        assert_eq!(logger.metrics().dropped_count(), 0);
    }

    #[test]
    fn test_derived_logger_copies_current_config() {
        let (logger, transport) = network_logger(Config::default());
        logger.set_output_format(OutputFormat::Json);
        logger.set_field_config(
            LogFieldConfig::none()
                .with(Field::AppName, true)
                .with(Field::Message, true),
        );

        let derived = Logger::with_config_from(&logger, Context::new("SubService", "")).unwrap();
        derived.info("inherited");

        assert_eq!(derived.output_format(), OutputFormat::Json);
        assert_eq!(derived.context().app_name, "SubService");
        assert_eq!(
            transport.lines.lock().last().unwrap(),
            r#"{"app":"SubService","message":"inherited"}"#
        );

        // Separate engines: mutating the source leaves the derived logger alone
        logger.set_output_format(OutputFormat::Terminal);
        assert_eq!(derived.output_format(), OutputFormat::Json);
    }

    #[test]
    fn test_try_clone_keeps_context() {
        let (logger, _transport) = network_logger(Config::default());
        let copy = logger.try_clone().unwrap();
        assert_eq!(copy.context(), logger.context());
        assert_eq!(copy.sink_names(), vec!["network".to_string()]);
    }

    #[test]
    fn test_swap_transport_through_logger() {
        let (logger, first) = network_logger(Config::default());
        let second = Arc::new(RecordingTransport::default());

        logger.info("one");
        assert!(logger.set_network_transport(second.clone()));
        logger.info("two");

        assert_eq!(first.lines.lock().len(), 1);
        assert_eq!(second.lines.lock().len(), 1);

        let plain = Logger::new(Config::default().with_console(false)).unwrap();
        assert!(!plain.set_network_transport(second));
    }

    #[test]
    fn test_derived_loggers_follow_swapped_transport() {
        let (logger, old) = network_logger(Config::default());
        let new = Arc::new(RecordingTransport::default());
        assert!(logger.set_network_transport(new.clone()));

        let derived = Logger::with_config_from(&logger, Context::new("SubService", "")).unwrap();
        derived.info("from derived");
        let copy = logger.try_clone().unwrap();
        copy.info("from copy");

        assert!(old.lines.lock().is_empty());
        assert_eq!(new.lines.lock().len(), 2);
    }

    #[test]
    fn test_terminal_message_reaches_transport_unchanged() {
        let (logger, transport) = network_logger(Config::default());
        logger.set_field_config(LogFieldConfig::none().with(Field::Message, true));

        logger.info("a\tb");
        logger.info("a\\tb");

        assert_eq!(
            *transport.lines.lock(),
            vec![" a\tb".to_string(), " a\\tb".to_string()]
        );
    }

    #[test]
    fn test_invalid_async_config_fails() {
        let result = Logger::new(Config::default().with_async(0, 2));
        assert!(result.is_err());
    }
}

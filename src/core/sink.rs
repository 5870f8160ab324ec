//! Sink trait and the per-logger sink set

use super::{config::Config, error::Result, metrics::LoggerMetrics};
use crate::sinks::{ConsoleSink, FileSink, NetworkSink, NetworkTransport};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Outcome of handing a line to a sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The line was appended to the sink's medium
    Written,
    /// The sink declined the line without error, e.g. a disconnected transport
    Skipped,
}

/// A destination for fully rendered lines.
///
/// Sinks append the line verbatim (plus a line terminator where the medium
/// needs one) and never reformat it. Each sink guards its own medium, so
/// several workers may call into one sink concurrently.
pub trait Sink: Send + Sync {
    fn append_line(&self, line: &str) -> Result<Delivery>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}

/// Sinks resolved for one logger at construction time.
pub(crate) struct SinkSet {
    sinks: Vec<Arc<dyn Sink>>,
    network: Option<Arc<NetworkSink>>,
    metrics: Arc<LoggerMetrics>,
}

impl SinkSet {
    /// Open every destination the config asks for.
    ///
    /// The file is truncated on open; failing to open it fails the whole set.
    pub(crate) fn resolve(config: &Config, metrics: Arc<LoggerMetrics>) -> Result<Self> {
        let mut sinks: Vec<Arc<dyn Sink>> = Vec::with_capacity(3);

        if config.log_to_console {
            sinks.push(Arc::new(ConsoleSink::new()));
        }

        if let Some(ref path) = config.log_file_path {
            sinks.push(Arc::new(FileSink::create(path)?));
        }

        let network = config
            .network_transport
            .as_ref()
            .map(|transport| Arc::new(NetworkSink::new(Arc::clone(transport))));
        if let Some(ref network) = network {
            sinks.push(Arc::clone(network) as Arc<dyn Sink>);
        }

        Ok(Self {
            sinks,
            network,
            metrics,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_sinks(sinks: Vec<Arc<dyn Sink>>, metrics: Arc<LoggerMetrics>) -> Self {
        Self {
            sinks,
            network: None,
            metrics,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub(crate) fn names(&self) -> Vec<String> {
        self.sinks.iter().map(|s| s.name().to_string()).collect()
    }

    /// Swap the network sink's transport. Returns `false` when this set has
    /// no network sink.
    pub(crate) fn set_network_transport(&self, transport: Arc<dyn NetworkTransport>) -> bool {
        match self.network {
            Some(ref network) => {
                network.set_transport(transport);
                true
            }
            None => false,
        }
    }

    /// Transport currently behind the network sink, if there is one
    pub(crate) fn network_transport(&self) -> Option<Arc<dyn NetworkTransport>> {
        self.network.as_ref().map(|network| network.transport())
    }

    /// Hand one rendered line to every sink.
    ///
    /// Each sink is isolated: an error or a panic in one sink is reported and
    /// counted, and the remaining sinks still receive the line.
    pub(crate) fn deliver(&self, line: &str) {
        if self.is_empty() {
            return;
        }

        let mut has_error = false;

        for sink in &self.sinks {
            match catch_unwind(AssertUnwindSafe(|| sink.append_line(line))) {
                Ok(Ok(Delivery::Written)) => {}
                Ok(Ok(Delivery::Skipped)) => {
                    self.metrics.record_network_skipped();
                }
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Sink '{}' failed: {}", sink.name(), e);
                    has_error = true;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Sink '{}' panicked: {}. \
                         Other sinks continue to function.",
                        sink.name(),
                        panic_message(&panic_info)
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            self.metrics.record_dropped();
        } else {
            self.metrics.record_logged();
        }
    }

    /// Flush every sink, isolating failures the same way as [`deliver`](Self::deliver)
    pub(crate) fn flush(&self) {
        for sink in &self.sinks {
            match catch_unwind(AssertUnwindSafe(|| sink.flush())) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Sink '{}' flush failed: {}", sink.name(), e);
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Sink '{}' panicked during flush: {}",
                        sink.name(),
                        panic_message(&panic_info)
                    );
                }
            }
        }
    }
}

pub(crate) fn panic_message(panic_info: &Box<dyn Any + Send>) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

//! Network sink for remote logging
//!
//! The sink does not speak any protocol itself. It hands each line to a
//! [`NetworkTransport`] supplied by the application (HTTP, gRPC, a TCP
//! stream, ...), and only while that transport reports a connection.

use crate::core::{Delivery, Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

/// Transport a [`NetworkSink`] delegates to.
///
/// Implementations are shared through `Arc`, so one transport may back
/// several loggers at once.
///
/// # Example
///
/// ```
/// use kvalog::NetworkTransport;
///
/// struct StdoutTransport;
///
/// impl NetworkTransport for StdoutTransport {
///     fn send(&self, line: &str) {
///         println!("[remote] {line}");
///     }
///
///     fn is_connected(&self) -> bool {
///         true
///     }
/// }
/// ```
pub trait NetworkTransport: Send + Sync {
    /// Hand over one rendered record. Delivery guarantees are up to the
    /// transport; it may queue or send asynchronously.
    fn send(&self, line: &str);

    /// Whether records should currently be sent at all
    fn is_connected(&self) -> bool;
}

/// Sink forwarding lines to a swappable [`NetworkTransport`].
///
/// Sending and swapping both hold the sink's lock, so a swap never races
/// with an in-flight send.
pub struct NetworkSink {
    transport: Mutex<Arc<dyn NetworkTransport>>,
}

impl NetworkSink {
    pub fn new(transport: Arc<dyn NetworkTransport>) -> Self {
        Self {
            transport: Mutex::new(transport),
        }
    }

    /// Replace the transport; records after this call go to the new one
    pub fn set_transport(&self, transport: Arc<dyn NetworkTransport>) {
        *self.transport.lock() = transport;
    }

    pub fn transport(&self) -> Arc<dyn NetworkTransport> {
        Arc::clone(&self.transport.lock())
    }
}

impl Sink for NetworkSink {
    fn append_line(&self, line: &str) -> Result<Delivery> {
        let transport = self.transport.lock();
        if !transport.is_connected() {
            return Ok(Delivery::Skipped);
        }
        transport.send(line);
        Ok(Delivery::Written)
    }

    fn flush(&self) -> Result<()> {
        // Buffering, if any, belongs to the transport
        Ok(())
    }

    fn name(&self) -> &str {
        "network"
    }
}

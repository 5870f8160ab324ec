//! Sink implementations

pub mod console;
pub mod file;
pub mod network;

pub use console::ConsoleSink;
pub use file::FileSink;
pub use network::{NetworkSink, NetworkTransport};

pub use crate::core::{Delivery, Sink};

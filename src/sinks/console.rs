//! Console sink implementation

use crate::core::{Delivery, Result, Sink};
use std::io::Write;

/// Writes each line to stdout.
///
/// The stdout handle is locked for the duration of one line, so lines from
/// concurrent workers never interleave.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for ConsoleSink {
    fn append_line(&self, line: &str) -> Result<Delivery> {
        let mut out = std::io::stdout().lock();
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
        Ok(Delivery::Written)
    }

    fn flush(&self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

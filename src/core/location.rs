//! Call-site location attached to every record

use std::fmt;

/// Source file and line a logging call originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    file: &'static str,
    line: u32,
}

impl Location {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Location of the caller of the enclosing `#[track_caller]` function.
    #[track_caller]
    #[inline]
    pub fn caller() -> Self {
        std::panic::Location::caller().into()
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    /// File name with any directory prefix removed.
    ///
    /// Both `/` and `\` count as separators so paths recorded on Windows
    /// render the same way.
    pub fn file_name(&self) -> &'static str {
        match self.file.rfind(['/', '\\']) {
            Some(pos) => &self.file[pos + 1..],
            None => self.file,
        }
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl From<&'static std::panic::Location<'static>> for Location {
    fn from(location: &'static std::panic::Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }
}

/// Renders as `file:line` with the directory prefix stripped.
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_name(), self.line)
    }
}

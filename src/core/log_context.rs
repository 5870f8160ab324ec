//! Per-logger context attached to every record

use serde::{Deserialize, Serialize};

/// Application and module name stamped on every record of a logger.
///
/// Either name may be left empty, in which case the field is omitted from
/// the output regardless of the field selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Context {
    pub app_name: String,
    pub module_name: String,
}

impl Context {
    pub fn new(app_name: impl Into<String>, module_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            module_name: module_name.into(),
        }
    }

    /// Non-empty application name
    pub fn app_name(&self) -> Option<&str> {
        Some(self.app_name.as_str()).filter(|s| !s.is_empty())
    }

    /// Non-empty module name
    pub fn module_name(&self) -> Option<&str> {
        Some(self.module_name.as_str()).filter(|s| !s.is_empty())
    }
}

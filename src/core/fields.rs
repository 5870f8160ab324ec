//! Field selection for rendered records

use serde::{Deserialize, Serialize};

/// One of the fixed fields a rendered record can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Time,
    AppName,
    ProcessId,
    ThreadId,
    ModuleName,
    Level,
    File,
    Message,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Time,
        Field::AppName,
        Field::ProcessId,
        Field::ThreadId,
        Field::ModuleName,
        Field::Level,
        Field::File,
        Field::Message,
    ];
}

/// Toggles deciding which fields appear in a rendered record.
///
/// Every field is enabled by default. App and module names are additionally
/// omitted whenever the logger's context leaves them empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogFieldConfig {
    pub include_time: bool,
    pub include_app_name: bool,
    pub include_process_id: bool,
    pub include_thread_id: bool,
    pub include_module_name: bool,
    pub include_log_level: bool,
    pub include_file: bool,
    pub include_message: bool,
}

impl LogFieldConfig {
    /// All fields enabled
    pub const fn all() -> Self {
        Self {
            include_time: true,
            include_app_name: true,
            include_process_id: true,
            include_thread_id: true,
            include_module_name: true,
            include_log_level: true,
            include_file: true,
            include_message: true,
        }
    }

    /// All fields disabled
    pub const fn none() -> Self {
        Self {
            include_time: false,
            include_app_name: false,
            include_process_id: false,
            include_thread_id: false,
            include_module_name: false,
            include_log_level: false,
            include_file: false,
            include_message: false,
        }
    }

    #[inline]
    pub fn should_include(&self, field: Field) -> bool {
        match field {
            Field::Time => self.include_time,
            Field::AppName => self.include_app_name,
            Field::ProcessId => self.include_process_id,
            Field::ThreadId => self.include_thread_id,
            Field::ModuleName => self.include_module_name,
            Field::Level => self.include_log_level,
            Field::File => self.include_file,
            Field::Message => self.include_message,
        }
    }

    pub fn set(&mut self, field: Field, enabled: bool) {
        let flag = match field {
            Field::Time => &mut self.include_time,
            Field::AppName => &mut self.include_app_name,
            Field::ProcessId => &mut self.include_process_id,
            Field::ThreadId => &mut self.include_thread_id,
            Field::ModuleName => &mut self.include_module_name,
            Field::Level => &mut self.include_log_level,
            Field::File => &mut self.include_file,
            Field::Message => &mut self.include_message,
        };
        *flag = enabled;
    }

    #[must_use]
    pub fn with(mut self, field: Field, enabled: bool) -> Self {
        self.set(field, enabled);
        self
    }
}

impl Default for LogFieldConfig {
    fn default() -> Self {
        Self::all()
    }
}

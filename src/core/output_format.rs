//! Output formats for rendered records
//!
//! Two formats share one field ordering:
//! - Terminal: bracketed, human-readable segments (default)
//! - Json: a single-line JSON object
//!
//! Both honour the logger's [`LogFieldConfig`] and drop app/module names
//! that the [`Context`] leaves empty.

use super::fields::{Field, LogFieldConfig};
use super::log_context::Context;
use super::log_entry::LogEntry;
use super::timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Output format for rendered records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Machine-readable JSON object
    ///
    /// Example: `{"time":"2025-01-08 10:30:45.123","app":"Svc","level":"INF","message":"ready"}`
    Json,

    /// Human-readable bracketed text (default)
    ///
    /// Example: `[2025-01-08 10:30:45.123][Svc][Main][PID:81][TID:2][INF][main.rs:42] ready`
    #[default]
    Terminal,
}

/// Ordered JSON shape of a record. Field order here is the key order on the wire.
#[derive(Serialize)]
struct JsonRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    app: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    process_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    module: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

impl OutputFormat {
    /// Render a captured entry according to this output format
    pub fn render(
        &self,
        entry: &LogEntry,
        context: &Context,
        fields: &LogFieldConfig,
        process_id: u32,
    ) -> String {
        match self {
            OutputFormat::Json => Self::render_json(entry, context, fields, process_id),
            OutputFormat::Terminal => Self::render_terminal(entry, context, fields, process_id),
        }
    }

    /// Render as a single-line JSON object without trailing newline
    pub fn render_json(
        entry: &LogEntry,
        context: &Context,
        fields: &LogFieldConfig,
        process_id: u32,
    ) -> String {
        let include = |field| fields.should_include(field);

        let record = JsonRecord {
            time: include(Field::Time).then(|| timestamp::format_local(&entry.timestamp)),
            app: context.app_name().filter(|_| include(Field::AppName)),
            process_id: include(Field::ProcessId).then(|| process_id.to_string()),
            thread_id: include(Field::ThreadId).then_some(entry.thread_id.as_str()),
            module: context.module_name().filter(|_| include(Field::ModuleName)),
            level: include(Field::Level).then(|| entry.level.tag()),
            file: include(Field::File).then(|| entry.location.to_string()),
            message: include(Field::Message).then_some(entry.message.as_str()),
        };

        serde_json::to_string(&record).unwrap_or_default()
    }

    /// Render as bracketed terminal text
    pub fn render_terminal(
        entry: &LogEntry,
        context: &Context,
        fields: &LogFieldConfig,
        process_id: u32,
    ) -> String {
        let include = |field| fields.should_include(field);
        let mut out = String::with_capacity(96 + entry.message.len());

        // Writing into a String cannot fail
        if include(Field::Time) {
            let _ = write!(out, "[{}]", timestamp::format_local(&entry.timestamp));
        }
        if let Some(app) = context.app_name().filter(|_| include(Field::AppName)) {
            let _ = write!(out, "[{}]", app);
        }
        if let Some(module) = context.module_name().filter(|_| include(Field::ModuleName)) {
            let _ = write!(out, "[{}]", module);
        }
        if include(Field::ProcessId) {
            let _ = write!(out, "[PID:{}]", process_id);
        }
        if include(Field::ThreadId) {
            let _ = write!(out, "[TID:{}]", entry.thread_id);
        }
        if include(Field::Level) {
            let _ = write!(out, "[{}]", entry.level.tag());
        }
        if include(Field::File) {
            let _ = write!(out, "[{}]", entry.location);
        }
        if include(Field::Message) {
            out.push(' ');
            out.push_str(&entry.message);
        }

        out
    }
}

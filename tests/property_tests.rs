//! Property-based tests using proptest
//!
//! These tests verify invariants that should hold for all inputs:
//! - Emitted keys and segments match the field selection exactly
//! - Level filtering is monotonic in the minimum level
//! - Level tags and names are total and parse back
//! - Location display never carries directory components

use chrono::{Local, TimeZone};
use kvalog::prelude::*;
use kvalog::LogEntry;
use proptest::prelude::*;

const JSON_KEYS: [(Field, &str); 8] = [
    (Field::Time, "time"),
    (Field::AppName, "app"),
    (Field::ProcessId, "process_id"),
    (Field::ThreadId, "thread_id"),
    (Field::ModuleName, "module"),
    (Field::Level, "level"),
    (Field::File, "file"),
    (Field::Message, "message"),
];

fn field_config(flags: [bool; 8]) -> LogFieldConfig {
    Field::ALL
        .iter()
        .zip(flags)
        .fold(LogFieldConfig::none(), |config, (field, on)| {
            config.with(*field, on)
        })
}

fn level_strategy() -> impl Strategy<Value = LogLevel> {
    let mut levels = vec![LogLevel::Off];
    levels.extend(LogLevel::ALL);
    prop::sample::select(levels)
}

fn name_strategy(prefix: &'static str) -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z]{0,5}".prop_map(move |rest| format!("{}{}", prefix, rest)),
    ]
}

fn fixed_entry(level: LogLevel, message: &str) -> LogEntry {
    let timestamp = Local
        .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
        .single()
        .expect("unambiguous local time");
    LogEntry::new(level, message.to_string(), Location::new("src/main.rs", 42))
        .with_timestamp(timestamp)
        .with_thread_id("7")
}

fn expected_keys(fields: &LogFieldConfig, context: &Context) -> Vec<&'static str> {
    JSON_KEYS
        .iter()
        .filter(|(field, _)| fields.should_include(*field))
        .filter(|(field, _)| match field {
            Field::AppName => !context.app_name.is_empty(),
            Field::ModuleName => !context.module_name.is_empty(),
            _ => true,
        })
        .map(|(_, key)| *key)
        .collect()
}

fn keys_in_order(line: &str) -> Vec<&'static str> {
    let mut found: Vec<(usize, &'static str)> = JSON_KEYS
        .iter()
        .filter_map(|(_, key)| line.find(&format!("\"{}\":", key)).map(|pos| (pos, *key)))
        .collect();
    found.sort();
    found.into_iter().map(|(_, key)| key).collect()
}

proptest! {
    #[test]
    fn test_json_keys_follow_field_selection(
        flags in any::<[bool; 8]>(),
        app in name_strategy("app"),
        module in name_strategy("mod"),
        message in "[a-z ]{0,24}",
        level in level_strategy(),
    ) {
        let fields = field_config(flags);
        let context = Context::new(app, module);
        let entry = fixed_entry(level, &message);

        let line = OutputFormat::Json.render(&entry, &context, &fields, 81);

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        let object = value.as_object().unwrap();
        let expected = expected_keys(&fields, &context);
        prop_assert_eq!(object.len(), expected.len());
        prop_assert_eq!(keys_in_order(&line), expected);
        prop_assert!(!line.contains('\n'));

        if fields.include_message {
            prop_assert_eq!(object["message"].as_str(), Some(message.as_str()));
        }
        if fields.include_process_id {
            prop_assert_eq!(object["process_id"].as_str(), Some("81"));
        }
    }

    #[test]
    fn test_terminal_segments_follow_field_selection(
        flags in any::<[bool; 8]>(),
        app in name_strategy("app"),
        module in name_strategy("mod"),
        message in "[a-z]{1,24}",
        level in level_strategy(),
    ) {
        let fields = field_config(flags);
        let context = Context::new(app.clone(), module.clone());
        let entry = fixed_entry(level, &message);

        let line = OutputFormat::Terminal.render(&entry, &context, &fields, 81);

        prop_assert_eq!(line.contains("[PID:81]"), fields.include_process_id);
        prop_assert_eq!(line.contains("[TID:7]"), fields.include_thread_id);
        prop_assert_eq!(line.contains("[main.rs:42]"), fields.include_file);
        prop_assert_eq!(line.contains("[2025-01-08 10:30:45.000]"), fields.include_time);
        prop_assert_eq!(line.contains(&format!("[{}]", level.tag())), fields.include_log_level);
        if !app.is_empty() {
            prop_assert_eq!(line.contains(&format!("[{}]", app)), fields.include_app_name);
        }
        if !module.is_empty() {
            prop_assert_eq!(line.contains(&format!("[{}]", module)), fields.include_module_name);
        }
        let suffix = format!(" {}", message);
        prop_assert_eq!(line.ends_with(&suffix), fields.include_message);
        prop_assert!(!line.contains("[]"));
    }

    #[test]
    fn test_filtering_is_monotonic(level in level_strategy(), min in level_strategy()) {
        let passes = level.passes(min);
        if passes {
            // Raising the record level never filters it out
            for higher in LogLevel::ALL.iter().filter(|l| **l >= level) {
                prop_assert!(higher.passes(min));
            }
            // Lowering the minimum never filters it out, short of Off
            for lower in LogLevel::ALL.iter().filter(|l| **l <= min && **l != LogLevel::Off) {
                prop_assert!(level.passes(*lower));
            }
        }
        if level == LogLevel::Off || min == LogLevel::Off {
            prop_assert!(!passes);
        }
    }

    #[test]
    fn test_level_names_parse_back(level in level_strategy()) {
        prop_assert_eq!(level.to_str().parse::<LogLevel>().unwrap(), level);
        prop_assert_eq!(level.to_str().to_lowercase().parse::<LogLevel>().unwrap(), level);
        prop_assert_eq!(level.tag().len(), 3);
    }

    #[test]
    fn test_location_display_has_no_directories(
        dirs in prop::collection::vec("[a-z]{1,6}", 0..4),
        name in "[a-z]{1,8}\\.rs",
        line in 1u32..100_000,
        windows in any::<bool>(),
    ) {
        let separator = if windows { "\\" } else { "/" };
        let mut path = dirs.join(separator);
        if !path.is_empty() {
            path.push_str(separator);
        }
        path.push_str(&name);
        let path: &'static str = Box::leak(path.into_boxed_str());

        let location = Location::new(path, line);
        prop_assert_eq!(location.file_name(), name.as_str());
        prop_assert_eq!(location.to_string(), format!("{}:{}", name, line));
    }
}

#[test]
fn test_every_level_has_a_distinct_tag() {
    let tags: Vec<&str> = LogLevel::ALL
        .iter()
        .filter(|l| **l != LogLevel::Off)
        .map(|l| l.tag())
        .collect();
    assert_eq!(tags, vec!["TRC", "DBG", "INF", "WRN", "ERR", "CRT"]);
    assert_eq!(LogLevel::Off.tag(), "INF");
}

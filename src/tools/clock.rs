//! Current time in a few display formats

use chrono::{DateTime, Local, SecondsFormat, Utc};

/// Output format selector for `get_current_time`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFormat {
    /// RFC 3339 in UTC
    Iso,
    /// Milliseconds since the Unix epoch
    Timestamp,
    /// Local wall-clock time
    #[default]
    Local,
}

impl TimeFormat {
    /// Parse a selector; anything unrecognized falls back to `Local`
    pub fn parse(selector: &str) -> Self {
        match selector.trim().to_lowercase().as_str() {
            "iso" => TimeFormat::Iso,
            "timestamp" => TimeFormat::Timestamp,
            _ => TimeFormat::Local,
        }
    }

    pub fn render(&self, now: DateTime<Local>) -> String {
        match self {
            TimeFormat::Iso => format!(
                "Current time (ISO): {}",
                now.with_timezone(&Utc)
                    .to_rfc3339_opts(SecondsFormat::Millis, true)
            ),
            TimeFormat::Timestamp => {
                format!("Current time (timestamp): {}", now.timestamp_millis())
            }
            TimeFormat::Local => format!("Current time: {}", format_local(now)),
        }
    }
}

/// `YYYY-MM-DD HH:MM:SS` in local time
pub fn format_local(now: DateTime<Local>) -> String {
    now.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn current_time(format: TimeFormat) -> String {
    format.render(Local::now())
}

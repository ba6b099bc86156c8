use jiff::tz::TimeZone;

use crate::error::ExportError;

/// Locale-style en-US rendering, e.g. `3/14/2025, 9:05:00 PM`.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// How submission timestamps are rendered in the export.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Zone the submission time is shown in.
    pub time_zone: TimeZone,

    /// `strftime`-style pattern understood by `jiff`.
    pub timestamp_format: String,
}

impl ExportOptions {
    /// Options for a named zone. `"system"` selects the host's zone;
    /// anything else is looked up as an IANA name (e.g. `"Europe/Berlin"`).
    pub fn for_zone(name: &str, timestamp_format: impl Into<String>) -> Result<Self, ExportError> {
        let time_zone = if name.eq_ignore_ascii_case("system") {
            TimeZone::system()
        } else {
            TimeZone::get(name)
                .map_err(|_| ExportError::TimeZone(name.to_string()))?
        };
        Ok(Self {
            time_zone,
            timestamp_format: timestamp_format.into(),
        })
    }

    pub fn utc() -> Self {
        Self {
            time_zone: TimeZone::UTC,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            time_zone: TimeZone::system(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

//! Runtime settings for the timeclock engine.
//!
//! Settings resolve the policy choices the product has not pinned down
//! yet (open break at clock-out, wage rate basis) and carry the default
//! hourly rate used while the rate history is empty.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{TimeclockError, TimeclockResult};

/// How an unterminated break is treated when the session is clocked out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BreakPolicy {
    /// Deduct nothing for the open break.
    #[default]
    Ignore,
    /// Deduct from break start until the clock-out instant.
    DeductUntilClockOut,
    /// Refuse the clock-out until the break is ended.
    BlockClockOut,
}

/// Which rate a wage computation uses per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RatePolicy {
    /// The rate active at query time, applied to every record.
    ///
    /// This is what the dashboard has always done. It misprices months
    /// worked before a rate change; see [`RatePolicy::RateAtWorkDate`].
    #[default]
    CurrentRate,
    /// The rate whose interval contains each record's work day.
    RateAtWorkDate,
}

/// Engine settings, loadable from a YAML file.
///
/// # Example
///
/// ```
/// use timeclock::config::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.default_hourly_rate.to_string(), "1000");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rate assumed while the rate history is empty or unreachable.
    pub default_hourly_rate: Decimal,
    /// Treatment of a break left open at clock-out.
    pub break_policy: BreakPolicy,
    /// Rate basis for wage computation.
    pub rate_policy: RatePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_hourly_rate: Decimal::ONE_THOUSAND,
            break_policy: BreakPolicy::default(),
            rate_policy: RatePolicy::default(),
        }
    }
}

impl Settings {
    /// Loads settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`TimeclockError::SettingsNotFound`] when the file does not
    /// exist and [`TimeclockError::SettingsParseError`] when it cannot be
    /// parsed.
    pub fn load(path: impl AsRef<Path>) -> TimeclockResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TimeclockError::SettingsNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = fs::read_to_string(path).map_err(|e| TimeclockError::SettingsParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        serde_yaml::from_str(&contents).map_err(|e| TimeclockError::SettingsParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.default_hourly_rate, Decimal::ONE_THOUSAND);
        assert_eq!(settings.break_policy, BreakPolicy::Ignore);
        assert_eq!(settings.rate_policy, RatePolicy::CurrentRate);
    }

    #[test]
    fn test_parse_full_settings() {
        let yaml = r#"
default_hourly_rate: "1200"
break_policy: deduct_until_clock_out
rate_policy: rate_at_work_date
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.default_hourly_rate, Decimal::new(1200, 0));
        assert_eq!(settings.break_policy, BreakPolicy::DeductUntilClockOut);
        assert_eq!(settings.rate_policy, RatePolicy::RateAtWorkDate);
    }

    #[test]
    fn test_parse_partial_settings_uses_defaults() {
        let yaml = "break_policy: block_clock_out\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.break_policy, BreakPolicy::BlockClockOut);
        assert_eq!(settings.default_hourly_rate, Decimal::ONE_THOUSAND);
    }

    #[test]
    fn test_load_missing_file_is_typed_error() {
        let result = Settings::load("/definitely/missing/settings.yaml");
        assert!(matches!(
            result,
            Err(TimeclockError::SettingsNotFound { .. })
        ));
    }
}

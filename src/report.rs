//! Human-readable checkpoint reports
//!
//! Renders a sequence of checkpoints as alternating timestamp and duration
//! lines:
//!
//! ```text
//! [18.10.2026 14:03:07] First check point
//! 3 Seconds
//! [18.10.2026 14:03:10] Second check point
//! 4 Seconds
//! [18.10.2026 14:03:14] Third check point
//! ```
//!
//! Timestamps are the checker's wall-clock start shifted by each
//! checkpoint's distance from the checker's monotonic start.

use crate::checker::TimeChecker;
use crate::checkpoint::CheckPoint;
use crate::clock::Clock;
use crate::error::{Result, TimeCheckerError};
use crate::unit::TimeUnit;
use serde::{Deserialize, Serialize};
use std::io::Write;
use time::format_description::{self, OwnedFormatItem};

/// `dd.MM.yyyy HH:mm:ss`, 24-hour clock
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "[day].[month].[year] [hour]:[minute]:[second]";

/// How reports are rendered
///
/// # Example
/// ```
/// use checkpoint_timer::{ReportConfig, TimeUnit};
///
/// let config = ReportConfig::from_toml_str(r#"unit = "millis""#).unwrap();
/// assert_eq!(config.unit, TimeUnit::Millis);
/// assert_eq!(config.timestamp_format, ReportConfig::default().timestamp_format);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Unit the durations between entries are printed in
    pub unit: TimeUnit,

    /// `time` crate format description for the bracketed timestamps
    pub timestamp_format: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            unit: TimeUnit::Seconds,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl ReportConfig {
    pub fn with_unit(unit: TimeUnit) -> Self {
        Self {
            unit,
            ..Self::default()
        }
    }

    /// Load a config from TOML; missing keys take their defaults
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    fn parsed_format(&self) -> Result<OwnedFormatItem> {
        if self.timestamp_format.trim().is_empty() {
            return Err(TimeCheckerError::InvalidArgument(
                "timestamp format is empty".to_string(),
            ));
        }
        format_description::parse_owned::<2>(&self.timestamp_format)
            .map_err(|e| TimeCheckerError::InvalidFormat(e.to_string()))
    }
}

impl<C: Clock> TimeChecker<C> {
    /// Report over every recorded checkpoint
    pub fn report(&self, unit: TimeUnit) -> Result<String> {
        self.render_report(&self.checkpoints(), unit)
    }

    /// Write the full report to `writer`
    pub fn write_report<W: Write>(&self, writer: &mut W, unit: TimeUnit) -> Result<()> {
        let report = self.report(unit)?;
        writer.write_all(report.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Report over `sequence` with the default timestamp format
    pub fn render_report(&self, sequence: &[CheckPoint], unit: TimeUnit) -> Result<String> {
        self.render_report_with(sequence, &ReportConfig::with_unit(unit))
    }

    /// Report over `sequence`
    ///
    /// Sequences shorter than two entries have no pairs and render as an
    /// empty string. Every entry must belong to this checker.
    pub fn render_report_with(&self, sequence: &[CheckPoint], config: &ReportConfig) -> Result<String> {
        let format = config.parsed_format()?;
        if !config.unit.is_supported() {
            return Err(TimeCheckerError::UnsupportedUnit(config.unit.name().to_string()));
        }
        for checkpoint in sequence {
            self.check_interaction(checkpoint)?;
        }

        let mut out = String::new();
        for (i, pair) in sequence.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            if i == 0 {
                out.push_str(&self.entry_line(prev, &format)?);
            }
            out.push_str(&format!(
                "{} {}\n",
                self.duration_between(prev, next, config.unit)?,
                config.unit
            ));
            out.push_str(&self.entry_line(next, &format)?);
        }
        Ok(out)
    }

    fn entry_line(&self, checkpoint: &CheckPoint, format: &OwnedFormatItem) -> Result<String> {
        let at = self
            .wall_clock_of(checkpoint)?
            .format(format)
            .map_err(|e| TimeCheckerError::InvalidFormat(e.to_string()))?;
        Ok(format!("[{}] {}\n", at, checkpoint.description()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MockClock;

    fn three_checkpoints() -> (TimeChecker<MockClock>, Vec<CheckPoint>) {
        let clock = MockClock::new(0);
        let checker = TimeChecker::with_clock(clock.clone());
        let mut recorded = Vec::new();
        for (at, name) in [(3, "First"), (6, "Second"), (10, "Third")] {
            clock.set(at * 1_000_000_000);
            recorded.push(checker.record_checkpoint(name));
        }
        (checker, recorded)
    }

    fn stamp(checker: &TimeChecker<MockClock>, cp: &CheckPoint) -> String {
        let format = format_description::parse_owned::<2>(DEFAULT_TIMESTAMP_FORMAT).unwrap();
        checker.wall_clock_of(cp).unwrap().format(&format).unwrap()
    }

    #[test]
    fn test_report_layout() {
        let (checker, cps) = three_checkpoints();
        let report = checker.report(TimeUnit::Seconds).unwrap();

        let expected = format!(
            "[{}] First\n3 Seconds\n[{}] Second\n4 Seconds\n[{}] Third\n",
            stamp(&checker, &cps[0]),
            stamp(&checker, &cps[1]),
            stamp(&checker, &cps[2]),
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn test_report_of_sub_range() {
        let (checker, cps) = three_checkpoints();
        let tail = checker.after_or_eq(&cps[1]).unwrap();
        let report = checker.render_report(&tail, TimeUnit::Millis).unwrap();

        assert_eq!(report.lines().count(), 3);
        assert!(report.lines().nth(1).unwrap() == "4000 Millis");
        assert!(report.ends_with("] Third\n"));
    }

    #[test]
    fn test_short_sequences_render_empty() {
        let (checker, cps) = three_checkpoints();
        assert_eq!(checker.render_report(&[], TimeUnit::Seconds).unwrap(), "");
        assert_eq!(checker.render_report(&cps[..1], TimeUnit::Seconds).unwrap(), "");
    }

    #[test]
    fn test_report_rejects_foreign_entries() {
        let (checker, mut cps) = three_checkpoints();
        let other = TimeChecker::with_clock(MockClock::new(0));
        cps.push(other.record_checkpoint("stranger"));

        assert!(matches!(
            checker.render_report(&cps, TimeUnit::Seconds),
            Err(TimeCheckerError::ForeignCheckpoint { .. })
        ));
    }

    #[test]
    fn test_report_rejects_unsupported_unit() {
        let (checker, _) = three_checkpoints();
        assert!(matches!(
            checker.report(TimeUnit::Micros),
            Err(TimeCheckerError::UnsupportedUnit(_))
        ));
    }

    #[test]
    fn test_custom_timestamp_format() {
        let (checker, cps) = three_checkpoints();
        let config = ReportConfig {
            unit: TimeUnit::Seconds,
            timestamp_format: "[hour]:[minute]".to_string(),
        };
        let report = checker.render_report_with(&cps[..2], &config).unwrap();
        let first_line = report.lines().next().unwrap();

        // "[HH:MM] First"
        assert_eq!(first_line.len(), "[00:00] First".len());
    }

    #[test]
    fn test_bad_timestamp_format() {
        let (checker, cps) = three_checkpoints();
        let config = ReportConfig {
            unit: TimeUnit::Seconds,
            timestamp_format: "[not_a_component]".to_string(),
        };
        assert!(matches!(
            checker.render_report_with(&cps, &config),
            Err(TimeCheckerError::InvalidFormat(_))
        ));

        let blank = ReportConfig {
            timestamp_format: "  ".to_string(),
            ..ReportConfig::default()
        };
        assert!(matches!(
            checker.render_report_with(&cps, &blank),
            Err(TimeCheckerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_write_report_to_sink() {
        let (checker, _) = three_checkpoints();
        let mut sink = Vec::new();
        checker.write_report(&mut sink, TimeUnit::Seconds).unwrap();

        let written = String::from_utf8(sink).unwrap();
        assert_eq!(written, checker.report(TimeUnit::Seconds).unwrap());
    }

    #[test]
    fn test_config_from_toml() {
        let config = ReportConfig::from_toml_str(
            r#"
            unit = "minutes"
            timestamp_format = "[year]-[month]-[day]"
            "#,
        )
        .unwrap();
        assert_eq!(config.unit, TimeUnit::Minutes);
        assert_eq!(config.timestamp_format, "[year]-[month]-[day]");

        assert_eq!(ReportConfig::from_toml_str("").unwrap(), ReportConfig::default());
    }

    #[test]
    fn test_config_from_bad_toml() {
        assert!(matches!(
            ReportConfig::from_toml_str(r#"unit = "fortnights""#),
            Err(TimeCheckerError::Config(_))
        ));
        assert!(matches!(
            ReportConfig::from_toml_str("unit = ["),
            Err(TimeCheckerError::Config(_))
        ));
    }
}

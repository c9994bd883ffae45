//! Time units for duration queries and reports

use crate::error::{Result, TimeCheckerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SECOND: u64 = 1_000_000_000;
const NANOS_PER_MINUTE: u64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MINUTE;

/// Unit a duration is expressed in
///
/// Only `Nanos`, `Millis`, `Seconds`, `Minutes` and `Hours` can be used for
/// durations. `Micros` and `Days` are named so that requests for them can be
/// rejected with [`TimeCheckerError::UnsupportedUnit`] instead of being
/// silently mapped onto something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Nanos,
    Micros,
    Millis,
    #[default]
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Nanoseconds in one unit, `None` for unsupported units
    pub fn nanos_per_unit(self) -> Option<u64> {
        match self {
            TimeUnit::Nanos => Some(1),
            TimeUnit::Millis => Some(NANOS_PER_MILLI),
            TimeUnit::Seconds => Some(NANOS_PER_SECOND),
            TimeUnit::Minutes => Some(NANOS_PER_MINUTE),
            TimeUnit::Hours => Some(NANOS_PER_HOUR),
            TimeUnit::Micros | TimeUnit::Days => None,
        }
    }

    pub fn is_supported(self) -> bool {
        self.nanos_per_unit().is_some()
    }

    /// Convert a nanosecond count into whole units, truncating
    ///
    /// # Example
    /// ```
    /// use checkpoint_timer::TimeUnit;
    ///
    /// assert_eq!(TimeUnit::Seconds.convert(7_999_999_999).unwrap(), 7);
    /// assert!(TimeUnit::Days.convert(1).is_err());
    /// ```
    pub fn convert(self, nanos: u64) -> Result<u64> {
        self.nanos_per_unit()
            .map(|per_unit| nanos / per_unit)
            .ok_or_else(|| TimeCheckerError::UnsupportedUnit(self.name().to_string()))
    }

    pub fn name(self) -> &'static str {
        match self {
            TimeUnit::Nanos => "Nanos",
            TimeUnit::Micros => "Micros",
            TimeUnit::Millis => "Millis",
            TimeUnit::Seconds => "Seconds",
            TimeUnit::Minutes => "Minutes",
            TimeUnit::Hours => "Hours",
            TimeUnit::Days => "Days",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeUnit {
    type Err = TimeCheckerError;

    /// Parse a unit name, case-insensitively
    ///
    /// Accepts full names (`"seconds"`) and short forms (`"s"`, `"ms"`).
    /// Blank input is an invalid argument; anything unrecognised is an
    /// unsupported unit.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        if name.is_empty() {
            return Err(TimeCheckerError::InvalidArgument(
                "time unit name is empty".to_string(),
            ));
        }

        match name.to_ascii_lowercase().as_str() {
            "ns" | "nano" | "nanos" | "nanoseconds" => Ok(TimeUnit::Nanos),
            "us" | "micro" | "micros" | "microseconds" => Ok(TimeUnit::Micros),
            "ms" | "milli" | "millis" | "milliseconds" => Ok(TimeUnit::Millis),
            "s" | "sec" | "secs" | "second" | "seconds" => Ok(TimeUnit::Seconds),
            "m" | "min" | "mins" | "minute" | "minutes" => Ok(TimeUnit::Minutes),
            "h" | "hour" | "hours" => Ok(TimeUnit::Hours),
            "d" | "day" | "days" => Ok(TimeUnit::Days),
            _ => Err(TimeCheckerError::UnsupportedUnit(name.to_string())),
        }
    }
}

//! Checkpoint Timer - named, timestamped checkpoints for in-process timing
//!
//! A [`TimeChecker`] records checkpoints as a program runs and answers
//! questions about them afterwards: how long between two checkpoints, how
//! long since the first one, which checkpoints fall before, after or between
//! given ones. Recording is safe from any number of threads at once, and
//! queries only accept checkpoints the queried checker produced.
//!
//! # Example
//!
//! ```
//! use checkpoint_timer::{TimeChecker, TimeUnit};
//!
//! let checker = TimeChecker::new();
//! let start = checker.record_checkpoint("start");
//! let done = checker.record_checkpoint("done");
//!
//! let elapsed = checker.duration_between(&start, &done, TimeUnit::Nanos).unwrap();
//! assert_eq!(checker.between_or_eq(&done, &start).unwrap(), vec![start, done]);
//! # let _ = elapsed;
//! ```

pub mod checker;
pub mod checkpoint;
pub mod clock;
pub mod error;
pub mod report;
pub mod unit;

pub use checker::TimeChecker;
pub use checkpoint::{CheckPoint, CheckerId};
pub use clock::{Clock, MockClock, SystemClock};
pub use error::{Result, TimeCheckerError};
pub use report::ReportConfig;
pub use unit::TimeUnit;

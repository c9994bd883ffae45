//! Thread-safe ordered checkpoint log
//!
//! A [`TimeChecker`] is one measurement session. Callers record named
//! checkpoints as execution passes interesting points, then hand the returned
//! values back to query ordered slices of the log or the time elapsed between
//! two of them.
//!
//! # Ordering
//!
//! The log keeps call order: the entry appended first is the one whose
//! caller entered the critical section first. Under concurrent recording
//! that is not necessarily timestamp order.
//!
//! # Provenance
//!
//! Positional queries only accept checkpoints recorded by the same checker.
//! Anything else fails with [`TimeCheckerError::ForeignCheckpoint`] before
//! the log is consulted.
//!
//! # Example
//!
//! ```
//! use checkpoint_timer::{MockClock, TimeChecker, TimeUnit};
//!
//! let clock = MockClock::new(0);
//! let checker = TimeChecker::with_clock(clock.clone());
//!
//! clock.set(3_000_000_000);
//! let load = checker.record_checkpoint("load");
//! clock.set(6_000_000_000);
//! let parse = checker.record_checkpoint("parse");
//!
//! assert_eq!(checker.duration_between(&load, &parse, TimeUnit::Seconds).unwrap(), 3);
//! assert_eq!(checker.before_or_eq(&parse).unwrap(), vec![load, parse]);
//! ```

use crate::checkpoint::{CheckPoint, CheckerId};
use crate::clock::{Clock, SystemClock};
use crate::error::{Result, TimeCheckerError};
use crate::unit::TimeUnit;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use time::OffsetDateTime;

/// An instrumentation session holding an append-only log of checkpoints
pub struct TimeChecker<C: Clock = SystemClock> {
    id: CheckerId,
    /// Wall-clock time at construction, only used to label reports
    wall_clock_start: OffsetDateTime,
    /// Clock reading at construction
    monotonic_start: u64,
    clock: C,
    checkpoints: Mutex<Vec<CheckPoint>>,
}

impl TimeChecker<SystemClock> {
    /// Start a session on the system monotonic clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for TimeChecker<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TimeChecker<C> {
    /// Start a session on an injected clock
    pub fn with_clock(clock: C) -> Self {
        let id = CheckerId::next();
        let wall_clock_start =
            OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        let monotonic_start = clock.now();

        tracing::debug!(checker = %id, monotonic_start, "time checker started");

        Self {
            id,
            wall_clock_start,
            monotonic_start,
            clock,
            checkpoints: Mutex::new(Vec::new()),
        }
    }

    pub fn id(&self) -> CheckerId {
        self.id
    }

    pub fn wall_clock_start(&self) -> OffsetDateTime {
        self.wall_clock_start
    }

    pub fn monotonic_start(&self) -> u64 {
        self.monotonic_start
    }

    /// Record a checkpoint at the current clock reading
    ///
    /// The log keeps its own copy; the returned value is independent of it.
    pub fn record_checkpoint(&self, description: impl Into<String>) -> CheckPoint {
        let checkpoint = CheckPoint::new(self.clock.now(), description.into(), self.id);

        let mut entries = self.entries();
        entries.push(checkpoint.clone());
        tracing::trace!(
            checker = %self.id,
            position = entries.len() - 1,
            timestamp = checkpoint.timestamp(),
            description = checkpoint.description(),
            "checkpoint recorded"
        );

        checkpoint
    }

    /// Absolute time between two checkpoints, truncated to `unit`
    ///
    /// Pure arithmetic: neither checkpoint has to belong to this checker and
    /// the argument order does not matter.
    pub fn duration_between(&self, a: &CheckPoint, b: &CheckPoint, unit: TimeUnit) -> Result<u64> {
        unit.convert(a.timestamp().abs_diff(b.timestamp()))
    }

    /// Time from the first recorded checkpoint to `checkpoint`
    pub fn duration_before(&self, checkpoint: &CheckPoint, unit: TimeUnit) -> Result<u64> {
        self.check_interaction(checkpoint)?;
        let first = self
            .entries()
            .first()
            .cloned()
            .ok_or(TimeCheckerError::EmptySequence)?;
        self.duration_between(&first, checkpoint, unit)
    }

    /// `checkpoint` and everything recorded after it
    pub fn after_or_eq(&self, checkpoint: &CheckPoint) -> Result<Vec<CheckPoint>> {
        self.check_interaction(checkpoint)?;
        let entries = self.entries();
        let index = locate(&entries, checkpoint)?;
        Ok(entries[index..].to_vec())
    }

    /// Everything recorded up to and including `checkpoint`
    pub fn before_or_eq(&self, checkpoint: &CheckPoint) -> Result<Vec<CheckPoint>> {
        self.check_interaction(checkpoint)?;
        let entries = self.entries();
        let index = locate(&entries, checkpoint)?;
        Ok(entries[..=index].to_vec())
    }

    /// The stored range spanning `a` and `b`, both inclusive
    ///
    /// Arguments may be given in either order. The range runs between the
    /// two stored positions, so it is never empty even when the log holds
    /// the checkpoints out of timestamp order.
    pub fn between_or_eq(&self, a: &CheckPoint, b: &CheckPoint) -> Result<Vec<CheckPoint>> {
        self.check_interaction(a)?;
        self.check_interaction(b)?;
        let entries = self.entries();
        let first = locate(&entries, a)?;
        let second = locate(&entries, b)?;
        let (lower, upper) = if first <= second {
            (first, second)
        } else {
            (second, first)
        };
        Ok(entries[lower..=upper].to_vec())
    }

    /// Wall-clock instant a checkpoint was recorded at
    pub fn wall_clock_of(&self, checkpoint: &CheckPoint) -> Result<OffsetDateTime> {
        self.check_interaction(checkpoint)?;
        let offset = checkpoint.timestamp().saturating_sub(self.monotonic_start);
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        self.wall_clock_start
            .checked_add(time::Duration::nanoseconds(offset))
            .ok_or_else(|| {
                TimeCheckerError::InvalidArgument(format!(
                    "check point '{}' is out of the representable wall-clock range",
                    checkpoint.description()
                ))
            })
    }

    /// Copy of the whole log in recorded order
    pub fn checkpoints(&self) -> Vec<CheckPoint> {
        self.entries().clone()
    }

    pub fn first(&self) -> Option<CheckPoint> {
        self.entries().first().cloned()
    }

    pub fn last(&self) -> Option<CheckPoint> {
        self.entries().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Reject checkpoints recorded by another checker
    pub(crate) fn check_interaction(&self, checkpoint: &CheckPoint) -> Result<()> {
        if checkpoint.owner() != self.id {
            return Err(TimeCheckerError::ForeignCheckpoint {
                description: checkpoint.description().to_string(),
                owner: checkpoint.owner(),
                checker: self.id,
            });
        }
        Ok(())
    }

    // The log is only ever changed by a single push, so a panic elsewhere
    // cannot leave it half-written; recover the guard instead of failing.
    fn entries(&self) -> MutexGuard<'_, Vec<CheckPoint>> {
        self.checkpoints
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Position of the first stored entry equal to `checkpoint`
fn locate(entries: &[CheckPoint], checkpoint: &CheckPoint) -> Result<usize> {
    entries
        .iter()
        .position(|entry| entry == checkpoint)
        .ok_or_else(|| TimeCheckerError::CheckpointNotFound {
            description: checkpoint.description().to_string(),
        })
}

impl<C: Clock> fmt::Debug for TimeChecker<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeChecker")
            .field("id", &self.id)
            .field("wall_clock_start", &self.wall_clock_start)
            .field("monotonic_start", &self.monotonic_start)
            .field("checkpoints", &*self.entries())
            .finish()
    }
}

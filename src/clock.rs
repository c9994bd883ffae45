//! Monotonic nanosecond time sources
//!
//! A [`TimeChecker`](crate::TimeChecker) never reads the system timer
//! directly; it asks an injected [`Clock`]. Production code uses
//! [`SystemClock`], tests hand in a [`MockClock`] and drive it by hand.
//!
//! # Example
//!
//! ```
//! use checkpoint_timer::clock::{Clock, MockClock};
//!
//! let clock = MockClock::new(0);
//! let handle = clock.clone();
//!
//! handle.advance_ms(250);
//! assert_eq!(clock.now(), 250_000_000);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

/// Monotonic non-decreasing nanosecond clock
///
/// Readings are only meaningful relative to other readings of the same
/// clock. They are not tied to wall-clock time and must not move backwards
/// when the system clock is adjusted.
pub trait Clock: Send + Sync {
    /// Current reading in nanoseconds
    fn now(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> u64 {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> u64 {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> u64 {
        (**self).now()
    }
}

/// Process-wide anchor all [`SystemClock`] readings are measured from
static ANCHOR: OnceLock<Instant> = OnceLock::new();

/// Clock backed by [`std::time::Instant`]
///
/// Reports the nanoseconds elapsed since the first `SystemClock` reading in
/// the process, so every instance shares one zero-point. A `u64` holds
/// roughly 584 years of nanoseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        let anchor = ANCHOR.get_or_init(Instant::now);
        u64::try_from(anchor.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Deterministic clock for tests
///
/// Clones share the same reading, so a test can keep one handle and move
/// another into the code under test.
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    now: Arc<AtomicU64>,
}

impl MockClock {
    /// Create a mock clock reading `start` nanoseconds
    pub fn new(start: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start)),
        }
    }

    /// Jump to an absolute reading
    ///
    /// Setting an earlier value than the current one breaks the monotonic
    /// contract; that is allowed here so tests can model out-of-order
    /// recordings.
    pub fn set(&self, nanos: u64) {
        self.now.store(nanos, Ordering::SeqCst);
    }

    /// Move forward by `nanos`
    pub fn advance(&self, nanos: u64) {
        self.now.fetch_add(nanos, Ordering::SeqCst);
    }

    /// Move forward by `millis` milliseconds
    pub fn advance_ms(&self, millis: u64) {
        self.advance(millis.saturating_mul(1_000_000));
    }
}

impl Clock for MockClock {
    fn now(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

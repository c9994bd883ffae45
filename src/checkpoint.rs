//! Recorded checkpoint values and checker identities

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of process-unique checker identities
static NEXT_CHECKER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a [`TimeChecker`](crate::TimeChecker)
///
/// Allocated from a process-wide counter, so no two checkers created in the
/// same process ever share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CheckerId(u64);

impl CheckerId {
    /// Allocate a fresh identity
    pub(crate) fn next() -> Self {
        Self(NEXT_CHECKER_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[cfg(test)]
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CheckerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "checker-{}", self.0)
    }
}

/// A single named instant recorded by a [`TimeChecker`](crate::TimeChecker)
///
/// Immutable once created. Two checkpoints are equal when timestamp,
/// description and owner all match; cloning yields an independent value that
/// compares equal to the original.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CheckPoint {
    timestamp: u64,
    description: String,
    owner: CheckerId,
}

impl CheckPoint {
    pub(crate) fn new(timestamp: u64, description: String, owner: CheckerId) -> Self {
        Self {
            timestamp,
            description,
            owner,
        }
    }

    /// Monotonic clock reading in nanoseconds
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Identity of the checker that recorded this checkpoint
    pub fn owner(&self) -> CheckerId {
        self.owner
    }
}

impl fmt::Display for CheckPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}ns", self.description, self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checker_ids_are_unique() {
        let a = CheckerId::next();
        let b = CheckerId::next();
        assert_ne!(a, b);
        assert!(b.as_u64() > a.as_u64());
    }

    #[test]
    fn test_checker_id_display() {
        assert_eq!(CheckerId::from_raw(12).to_string(), "checker-12");
    }

    #[test]
    fn test_clone_is_equal_by_value() {
        let original = CheckPoint::new(10, "parse".to_string(), CheckerId::from_raw(1));
        let copy = original.clone();

        assert_eq!(copy, original);
        assert_eq!(copy.timestamp(), 10);
        assert_eq!(copy.description(), "parse");
        assert_eq!(copy.owner(), CheckerId::from_raw(1));
    }

    #[test]
    fn test_equality_covers_every_field() {
        let owner = CheckerId::from_raw(1);
        let base = CheckPoint::new(10, "a".to_string(), owner);

        assert_ne!(base, CheckPoint::new(11, "a".to_string(), owner));
        assert_ne!(base, CheckPoint::new(10, "b".to_string(), owner));
        assert_ne!(base, CheckPoint::new(10, "a".to_string(), CheckerId::from_raw(2)));
    }

    #[test]
    fn test_empty_description_allowed() {
        let cp = CheckPoint::new(0, String::new(), CheckerId::from_raw(1));
        assert_eq!(cp.description(), "");
        assert_eq!(cp.to_string(), " @ 0ns");
    }
}

//! In-flight (sample, codec) pairs.

use crate::error::{HarnessError, Result};
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

/// A (sample, codec) pair, by position in the run's ordered lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    pub sample: usize,
    pub codec: usize,
}

impl PairKey {
    pub fn new(sample: usize, codec: usize) -> Self {
        Self { sample, codec }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(sample #{}, codec #{})", self.sample, self.codec)
    }
}

/// Pairs dispatched but not yet settled.
///
/// `remaining` counts down once per settlement and is the only source of
/// truth for [`PendingWork::is_drained`].
#[derive(Debug, Default)]
pub struct PendingWork {
    in_flight: HashMap<PairKey, Instant>,
    remaining: usize,
}

impl PendingWork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a pair as in flight, remembering when it started.
    pub fn insert(&mut self, key: PairKey, started: Instant) -> Result<()> {
        if self.in_flight.contains_key(&key) {
            return Err(HarnessError::DuplicatePair(key));
        }
        self.in_flight.insert(key, started);
        self.remaining += 1;
        Ok(())
    }

    /// Remove a settled pair and return its start instant.
    pub fn settle(&mut self, key: PairKey) -> Result<Instant> {
        let started = self
            .in_flight
            .remove(&key)
            .ok_or(HarnessError::UnknownPair(key))?;
        self.remaining -= 1;
        Ok(started)
    }

    pub fn is_drained(&self) -> bool {
        self.remaining == 0
    }

    pub fn len(&self) -> usize {
        self.remaining
    }

    pub fn is_empty(&self) -> bool {
        self.is_drained()
    }

    /// In-flight pairs in dispatch order
    pub fn keys(&self) -> Vec<PairKey> {
        let mut keys: Vec<_> = self.in_flight.keys().copied().collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown() {
        let mut pending = PendingWork::new();
        assert!(pending.is_drained());

        let now = Instant::now();
        pending.insert(PairKey::new(0, 0), now).unwrap();
        pending.insert(PairKey::new(0, 1), now).unwrap();
        assert_eq!(pending.len(), 2);

        assert_eq!(pending.settle(PairKey::new(0, 1)).unwrap(), now);
        assert!(!pending.is_drained());
        pending.settle(PairKey::new(0, 0)).unwrap();
        assert!(pending.is_drained());
    }

    #[test]
    fn test_duplicate_pair_rejected() {
        let mut pending = PendingWork::new();
        let key = PairKey::new(1, 2);
        pending.insert(key, Instant::now()).unwrap();

        let err = pending.insert(key, Instant::now()).unwrap_err();
        assert!(matches!(err, HarnessError::DuplicatePair(k) if k == key));
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn test_settle_twice_rejected() {
        let mut pending = PendingWork::new();
        let key = PairKey::new(0, 0);
        pending.insert(key, Instant::now()).unwrap();
        pending.settle(key).unwrap();

        assert!(matches!(pending.settle(key), Err(HarnessError::UnknownPair(_))));
        assert!(pending.is_drained());
    }

    #[test]
    fn test_keys_sorted() {
        let mut pending = PendingWork::new();
        let now = Instant::now();
        for key in [PairKey::new(1, 0), PairKey::new(0, 3), PairKey::new(0, 1)] {
            pending.insert(key, now).unwrap();
        }
        assert_eq!(
            pending.keys(),
            vec![PairKey::new(0, 1), PairKey::new(0, 3), PairKey::new(1, 0)]
        );
    }
}

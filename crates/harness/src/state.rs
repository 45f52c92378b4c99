//! Run lifecycle.

use std::fmt;
use tracing::debug;

/// Phase of a benchmark run. Runs only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunState {
    Idle,
    FetchingSamples,
    Dispatching,
    Draining,
    Reported,
}

impl RunState {
    /// The phase after this one; `Reported` is terminal
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::FetchingSamples),
            Self::FetchingSamples => Some(Self::Dispatching),
            Self::Dispatching => Some(Self::Draining),
            Self::Draining => Some(Self::Reported),
            Self::Reported => None,
        }
    }

    /// Move to the next phase, logging the transition.
    ///
    /// Returns false, leaving the state unchanged, when already terminal.
    pub fn advance(&mut self) -> bool {
        match self.next() {
            Some(next) => {
                debug!(from = %self, to = %next, "Run state");
                *self = next;
                true
            }
            None => false,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Reported
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::FetchingSamples => "fetching-samples",
            Self::Dispatching => "dispatching",
            Self::Draining => "draining",
            Self::Reported => "reported",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_only() {
        let mut state = RunState::Idle;
        let mut seen = vec![state];
        while state.advance() {
            seen.push(state);
        }
        assert_eq!(
            seen,
            vec![
                RunState::Idle,
                RunState::FetchingSamples,
                RunState::Dispatching,
                RunState::Draining,
                RunState::Reported,
            ]
        );
        assert!(state.is_terminal());
        assert!(!state.advance());
    }
}

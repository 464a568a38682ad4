//! Lifecycle of a recorded unit.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatsStatus {
    Pending,
    Skipped,
    Started,
    Submitted,
    Running,
    Successful,
    Stopped,
    Failed,
}

impl StatsStatus {
    pub fn as_str(&self) -> &'static str {
        use StatsStatus::*;
        match self {
            Pending => "PENDING",
            Skipped => "SKIPPED",
            Started => "STARTED",
            Submitted => "SUBMITTED",
            Running => "RUNNING",
            Successful => "SUCCESSFUL",
            Stopped => "STOPPED",
            Failed => "FAILED",
        }
    }

    /// Terminal states accept no further transitions.
    pub fn is_finished(&self) -> bool {
        use StatsStatus::*;
        matches!(self, Skipped | Successful | Stopped | Failed)
    }

    /// Transitions only move forward. `Skipped` is reachable only from
    /// `Pending`; `Stopped` and `Failed` from any unfinished state.
    pub fn can_transition_to(&self, next: StatsStatus) -> bool {
        use StatsStatus::*;
        if self.is_finished() {
            return false;
        }
        match next {
            Skipped => *self == Pending,
            Stopped | Failed => true,
            Successful => *self == Running,
            Pending => false,
            Started | Submitted | Running => next.rank() > self.rank(),
        }
    }

    fn rank(&self) -> u8 {
        use StatsStatus::*;
        match self {
            Pending => 0,
            Started => 1,
            Submitted => 2,
            Running => 3,
            Skipped | Successful | Stopped | Failed => 4,
        }
    }
}

impl fmt::Display for StatsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::StatsStatus::*;

    #[test]
    fn forward_only() {
        assert!(Pending.can_transition_to(Started));
        assert!(Pending.can_transition_to(Running));
        assert!(Running.can_transition_to(Successful));
        assert!(!Running.can_transition_to(Started));
        assert!(!Started.can_transition_to(Successful));
        assert!(!Started.can_transition_to(Skipped));
        assert!(Submitted.can_transition_to(Failed));
    }

    #[test]
    fn finished_is_terminal() {
        for done in [Skipped, Successful, Stopped, Failed] {
            assert!(done.is_finished());
            assert!(!done.can_transition_to(Running));
            assert!(!done.can_transition_to(Failed));
        }
    }
}

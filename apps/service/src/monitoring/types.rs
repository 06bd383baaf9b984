use std::fmt;

/// Phase of the reconciliation loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Iterating targets
    Probing,
    /// Waiting for the next cycle
    Idle,
    /// Cancelled; the loop task has finished
    Stopped,
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopState::Probing => write!(f, "probing"),
            LoopState::Idle => write!(f, "idle"),
            LoopState::Stopped => write!(f, "stopped"),
        }
    }
}

/// Outcome of one reconciliation cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Targets returned by the store listing
    pub targets: usize,
    /// Targets actually probed
    pub probed: usize,
    /// Availability writes issued successfully
    pub changed: usize,
    /// Writes that failed and were skipped
    pub failed_updates: usize,
    /// The target listing itself failed, nothing was probed
    pub listing_failed: bool,
    /// Cancellation stopped the cycle early
    pub cancelled: bool,
}

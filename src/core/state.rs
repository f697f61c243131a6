//! Machine states derived from the held item and recent history.
//!
//! The machine does not store its state. It is recomputed from what the
//! machine holds and from the tail of its transaction log whenever asked.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure - no side effects.
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Conceptual state of a pick-and-place machine.
///
/// # Example
///
/// ```rust
/// use picker::core::{MachineState, State};
///
/// assert!(MachineState::RetriesExhausted.is_final());
/// assert!(MachineState::FaultedPendingRetry.is_error());
/// assert!(!MachineState::Holding.is_error());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum MachineState {
    /// Nothing held and the last transaction (if any) passed
    Idle,
    /// An item is held and the last transaction passed
    Holding,
    /// The last transaction failed and retries remain
    FaultedPendingRetry,
    /// The last transaction failed and the retry budget is spent
    RetriesExhausted,
}

impl State for MachineState {
    fn name(&self) -> &str {
        match self {
            Self::Idle => "Idle",
            Self::Holding => "Holding",
            Self::FaultedPendingRetry => "FaultedPendingRetry",
            Self::RetriesExhausted => "RetriesExhausted",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::RetriesExhausted)
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::FaultedPendingRetry | Self::RetriesExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(MachineState::Idle.name(), "Idle");
        assert_eq!(MachineState::Holding.name(), "Holding");
        assert_eq!(
            MachineState::FaultedPendingRetry.name(),
            "FaultedPendingRetry"
        );
        assert_eq!(MachineState::RetriesExhausted.name(), "RetriesExhausted");
    }

    #[test]
    fn only_exhaustion_is_final() {
        assert!(!MachineState::Idle.is_final());
        assert!(!MachineState::Holding.is_final());
        assert!(!MachineState::FaultedPendingRetry.is_final());
        assert!(MachineState::RetriesExhausted.is_final());
    }

    #[test]
    fn failed_states_are_errors() {
        assert!(!MachineState::Idle.is_error());
        assert!(!MachineState::Holding.is_error());
        assert!(MachineState::FaultedPendingRetry.is_error());
        assert!(MachineState::RetriesExhausted.is_error());
    }

    #[test]
    fn state_serializes_correctly() {
        let state = MachineState::Holding;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: MachineState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}

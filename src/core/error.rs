//! Errors for invalid input to the machine and its slot store.

use thiserror::Error;

/// Programming errors that abort a call instead of being recorded.
///
/// Recoverable conditions (illegal pick/place, simulated faults, retry
/// exhaustion) are never reported through this type; they are outcome
/// codes inside a [`Transaction`](crate::core::Transaction).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MachineError {
    #[error("Slot index {index} out of range (slot count: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Action '{0}' invalid")]
    InvalidAction(String),

    #[error("No operation in history to retry")]
    NothingToRetry,

    #[error("Item '{id}' is already stored in a slot")]
    DuplicateItem { id: String },
}

//! Core types of the pick-and-place engine.
//!
//! This module contains the pure building blocks:
//! - Items and the fixed-size slot store that holds them
//! - Operations and the outcome codes of each step
//! - The legality checker
//! - Immutable transactions and the bounded transaction log
//! - Machine states derived from history
//!
//! Nothing here draws random numbers or touches equipment; that lives in
//! [`crate::effects`].

mod checker;
mod error;
mod history;
mod item;
mod operation;
mod slots;
mod state;

pub use checker::{check, check_code, check_operation};
pub use error::MachineError;
pub use history::{Transaction, TransactionLog, Verdict, STEPS_PER_TRANSACTION};
pub use item::{Item, ItemError};
pub use operation::{
    Action, ActuationOutcome, CheckOutcome, Operation, Outcome, ReadOutcome, RetryOutcome,
    SlotOutcome, StepOutcome,
};
pub use slots::{SlotStore, DEFAULT_NUM_SLOTS};
pub use state::{MachineState, State};

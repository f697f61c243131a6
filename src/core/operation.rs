//! Operations and the outcome codes recorded for each of their steps.

use super::error::MachineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Common behaviour of every subsystem's outcome code.
///
/// Severity `0` is reserved for the success code of each subsystem.
pub trait Outcome {
    /// Name of the outcome for display and logging.
    fn name(&self) -> &'static str;

    /// Numeric severity; zero means success.
    fn severity(&self) -> u8;

    /// Whether this is the subsystem's success code.
    fn is_success(&self) -> bool {
        self.severity() == 0
    }
}

outcome_enum! {
    /// Result of the legality check run before any actuation.
    pub enum CheckOutcome {
        Success = 0,
        /// Pick requested while the machine already holds an item
        MachineOccupied = 1,
        /// Place requested while the machine holds nothing
        MachineEmpty = 2,
        /// Place requested onto an occupied slot
        SlotOccupied = 3,
        /// Pick requested from an empty slot
        SlotEmpty = 4,
    }
}

outcome_enum! {
    /// Result of driving the actuator.
    pub enum ActuationOutcome {
        Success = 0,
        Faulted = 1,
    }
}

outcome_enum! {
    /// Result of reading the identifying tag after actuation.
    pub enum ReadOutcome {
        Success = 0,
        ReadError = 1,
    }
}

outcome_enum! {
    /// Result of evaluating the retry bound.
    pub enum RetryOutcome {
        Success = 0,
        RetriesExceeded = 1,
    }
}

outcome_enum! {
    /// Result of a direct slot store mutation.
    pub enum SlotOutcome {
        Success = 0,
        LocationOccupied = 1,
        ItemNotPresent = 2,
        DuplicateItem = 3,
    }
}

/// The kind of movement a machine performs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Action {
    Pick,
    Place,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pick => "PICK",
            Self::Place => "PLACE",
        }
    }

    /// Raw equipment code of the action.
    pub fn code(&self) -> u8 {
        match self {
            Self::Pick => 0,
            Self::Place => 1,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Action {
    type Error = MachineError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Pick),
            1 => Ok(Self::Place),
            other => Err(MachineError::InvalidAction(other.to_string())),
        }
    }
}

impl FromStr for Action {
    type Err = MachineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pick" => Ok(Self::Pick),
            "place" => Ok(Self::Place),
            _ => Err(MachineError::InvalidAction(s.to_string())),
        }
    }
}

/// An action aimed at one slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Operation {
    pub action: Action,
    pub slot: usize,
}

impl Operation {
    pub fn new(action: Action, slot: usize) -> Self {
        Self { action, slot }
    }

    pub fn pick(slot: usize) -> Self {
        Self::new(Action::Pick, slot)
    }

    pub fn place(slot: usize) -> Self {
        Self::new(Action::Place, slot)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} slot {}", self.action, self.slot)
    }
}

/// One recorded step of a transaction.
///
/// Steps skipped because the legality check failed are `NotAttempted`;
/// they carry no severity and do not count as recorded outcomes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum StepOutcome {
    Check(CheckOutcome),
    Actuation(ActuationOutcome),
    Read(ReadOutcome),
    Retry(RetryOutcome),
    NotAttempted,
}

impl StepOutcome {
    pub fn is_attempted(&self) -> bool {
        !matches!(self, Self::NotAttempted)
    }

    pub fn severity(&self) -> u8 {
        match self {
            Self::Check(o) => o.severity(),
            Self::Actuation(o) => o.severity(),
            Self::Read(o) => o.severity(),
            Self::Retry(o) => o.severity(),
            Self::NotAttempted => 0,
        }
    }

    /// True for the success code of any subsystem.
    pub fn is_success(&self) -> bool {
        self.is_attempted() && self.severity() == 0
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Check(o) => o.name(),
            Self::Actuation(o) => o.name(),
            Self::Read(o) => o.name(),
            Self::Retry(o) => o.name(),
            Self::NotAttempted => "NotAttempted",
        }
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<CheckOutcome> for StepOutcome {
    fn from(outcome: CheckOutcome) -> Self {
        Self::Check(outcome)
    }
}

impl From<ActuationOutcome> for StepOutcome {
    fn from(outcome: ActuationOutcome) -> Self {
        Self::Actuation(outcome)
    }
}

impl From<ReadOutcome> for StepOutcome {
    fn from(outcome: ReadOutcome) -> Self {
        Self::Read(outcome)
    }
}

impl From<RetryOutcome> for StepOutcome {
    fn from(outcome: RetryOutcome) -> Self {
        Self::Retry(outcome)
    }
}

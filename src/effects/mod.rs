//! The imperative shell around the pure core.
//!
//! Everything that touches equipment or draws random numbers lives here:
//!
//! - **Fault simulation**: actuation and tag reads with injected faults
//!   from a pluggable [`FaultSource`]
//! - **Machine**: the retry engine that runs operations, records
//!   transactions and enforces the retry bound

mod faults;
mod machine;

pub use faults::{FaultKind, FaultSimulator, FaultSource, RandomFaults, ScriptedFaults};
pub use machine::Machine;

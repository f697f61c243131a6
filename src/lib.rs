//! Picker: a retryable pick-and-place engine over slotted storage
//!
//! Picker models a machine that picks items out of a fixed row of slots and
//! places them back, recording every attempt as an immutable transaction.
//! Failed attempts can be retried, and the retry bound is enforced by
//! scanning the machine's own bounded transaction history.
//!
//! # Core Concepts
//!
//! - **Slot store**: fixed-size storage, each slot empty or holding one item
//! - **Checker**: pure legality rules for pick and place
//! - **Fault simulation**: actuator and tag read faults from an injectable source
//! - **Machine**: runs operations, records transactions, enforces the retry bound
//! - **Observer**: injected sink for structured events
//!
//! # Example
//!
//! ```rust
//! use picker::config::MachineConfig;
//! use picker::core::{Item, MachineState, Verdict};
//! use picker::effects::{Machine, ScriptedFaults};
//!
//! let mut machine = Machine::builder()
//!     .config(MachineConfig { simulate_faults: true, ..MachineConfig::default() })
//!     .fault_source(ScriptedFaults::new().tag_read([true]))
//!     .build()
//!     .unwrap();
//! let mut slots = machine.new_slot_store();
//! slots.add(0, Item::tray("A1")).unwrap();
//!
//! // The tray moves, but the tag read fails.
//! let txn = machine.pick(&mut slots, 0).unwrap();
//! assert_eq!(txn.verdict(), Verdict::Fail);
//! assert_eq!(machine.state(), MachineState::FaultedPendingRetry);
//!
//! // Retrying re-checks legality: the machine now holds the tray.
//! let retry = machine.retry(&mut slots).unwrap();
//! assert!(retry.is_retry());
//! ```

#[macro_use]
mod macros;

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod effects;
pub mod enforcement;
pub mod observer;

// Re-export commonly used types
pub use crate::core::{Action, Item, MachineState, Operation, SlotStore, Transaction, Verdict};
pub use config::MachineConfig;
pub use effects::Machine;

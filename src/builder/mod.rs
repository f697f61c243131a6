//! Builder API for ergonomic machine construction.
//!
//! # Example
//!
//! ```rust
//! use picker::builder::{MachineBuilder, MachineConfigBuilder};
//! use picker::effects::ScriptedFaults;
//!
//! let config = MachineConfigBuilder::new()
//!     .simulate_faults(true)
//!     .num_slots(4)
//!     .build()
//!     .unwrap();
//!
//! let machine = MachineBuilder::new()
//!     .config(config)
//!     .fault_source(ScriptedFaults::new().tag_read([true]))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(machine.new_slot_store().len(), 4);
//! ```

pub mod config;
pub mod machine;

pub use config::MachineConfigBuilder;
pub use machine::MachineBuilder;

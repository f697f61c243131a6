//! Machine configuration.
//!
//! The crate never reads files or the environment. A configuration
//! supplier builds a [`MachineConfig`] (directly, through
//! [`MachineConfigBuilder`](crate::builder::MachineConfigBuilder), or by
//! deserializing it) and hands it to the machine.
//!
//! Validation uses Stillwater's `Validation` so that every violation is
//! reported at once instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use picker::config::{ConfigError, MachineConfig};
//!
//! let config = MachineConfig {
//!     rfid_fault_rate: 1.5,
//!     max_retries: 0,
//!     ..MachineConfig::default()
//! };
//!
//! match config.validate() {
//!     Err(ConfigError::Invalid(violations)) => assert_eq!(violations.len(), 2),
//!     Ok(()) => panic!("expected violations"),
//! }
//! ```

pub mod error;

pub use error::{ConfigError, ConfigViolation};

use crate::core::DEFAULT_NUM_SLOTS;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Default retry bound.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Default probability of an actuator fault when simulating.
pub const DEFAULT_ACTUATOR_FAULT_RATE: f64 = 0.0;

/// Default probability of a tag read fault when simulating.
pub const DEFAULT_RFID_FAULT_RATE: f64 = 0.25;

/// Statically shaped machine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Inject simulated faults; when false every equipment call succeeds
    pub simulate_faults: bool,
    /// Probability in [0, 1] that an actuation faults
    pub actuator_fault_rate: f64,
    /// Probability in [0, 1] that a tag read fails
    pub rfid_fault_rate: f64,
    /// Consecutive retries allowed before `RetriesExceeded`
    pub max_retries: usize,
    /// Number of slots in a store built from this configuration
    pub num_slots: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            simulate_faults: false,
            actuator_fault_rate: DEFAULT_ACTUATOR_FAULT_RATE,
            rfid_fault_rate: DEFAULT_RFID_FAULT_RATE,
            max_retries: DEFAULT_MAX_RETRIES,
            num_slots: DEFAULT_NUM_SLOTS,
        }
    }
}

impl MachineConfig {
    /// Simulation enabled with a 10% actuator and 25% tag read fault rate.
    pub fn simulating() -> Self {
        Self {
            simulate_faults: true,
            actuator_fault_rate: 0.10,
            ..Self::default()
        }
    }

    /// Check every field, accumulating all violations.
    pub fn validation(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let checks = vec![
            check_rate("actuator_fault_rate", self.actuator_fault_rate),
            check_rate("rfid_fault_rate", self.rfid_fault_rate),
            if self.max_retries >= 1 {
                Validation::success(())
            } else {
                Validation::fail(ConfigViolation::ZeroRetries)
            },
            if self.num_slots >= 1 {
                Validation::success(())
            } else {
                Validation::fail(ConfigViolation::ZeroSlots)
            },
        ];

        Validation::all_vec(checks).map(|_| ())
    }

    /// Like [`validation`](Self::validation), as a `Result`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.validation() {
            Validation::Success(_) => Ok(()),
            Validation::Failure(violations) => {
                Err(ConfigError::Invalid(violations.iter().cloned().collect()))
            }
        }
    }
}

fn check_rate(field: &'static str, value: f64) -> Validation<(), NonEmptyVec<ConfigViolation>> {
    if (0.0..=1.0).contains(&value) {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::RateOutOfRange { field, value })
    }
}

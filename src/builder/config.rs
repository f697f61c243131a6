//! Builder for machine configurations.

use crate::config::{ConfigError, MachineConfig};

/// Fluent builder for [`MachineConfig`], starting from the defaults.
///
/// # Example
///
/// ```rust
/// use picker::builder::MachineConfigBuilder;
///
/// let config = MachineConfigBuilder::new()
///     .simulate_faults(true)
///     .rfid_fault_rate(0.5)
///     .max_retries(2)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.max_retries, 2);
/// assert!(MachineConfigBuilder::new().num_slots(0).build().is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MachineConfigBuilder {
    config: MachineConfig,
}

impl MachineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable fault simulation
    pub fn simulate_faults(mut self, enabled: bool) -> Self {
        self.config.simulate_faults = enabled;
        self
    }

    /// Set the actuator fault probability
    pub fn actuator_fault_rate(mut self, rate: f64) -> Self {
        self.config.actuator_fault_rate = rate;
        self
    }

    /// Set the tag read fault probability
    pub fn rfid_fault_rate(mut self, rate: f64) -> Self {
        self.config.rfid_fault_rate = rate;
        self
    }

    /// Set the retry bound
    pub fn max_retries(mut self, n: usize) -> Self {
        self.config.max_retries = n;
        self
    }

    /// Set the slot count for stores built from this configuration
    pub fn num_slots(mut self, n: usize) -> Self {
        self.config.num_slots = n;
        self
    }

    /// Validate and return the configuration, reporting every violation.
    pub fn build(self) -> Result<MachineConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

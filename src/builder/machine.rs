//! Builder for constructing machines.

use crate::config::{ConfigError, MachineConfig};
use crate::effects::{FaultSimulator, FaultSource, Machine, RandomFaults};
use crate::observer::{SharedObserver, TracingObserver};
use std::sync::Arc;

/// Builder for constructing machines with a fluent API.
///
/// Unset parts fall back to the default configuration, a randomly seeded
/// [`RandomFaults`] source and a [`TracingObserver`].
#[derive(Default)]
pub struct MachineBuilder {
    config: MachineConfig,
    fault_source: Option<Box<dyn FaultSource>>,
    observer: Option<SharedObserver>,
}

impl MachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set where fault decisions come from.
    pub fn fault_source<F>(mut self, source: F) -> Self
    where
        F: FaultSource + 'static,
    {
        self.fault_source = Some(Box::new(source));
        self
    }

    /// Set the sink for machine events.
    pub fn observer(mut self, observer: SharedObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Build the machine.
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> Result<Machine, ConfigError> {
        self.config.validate()?;

        let source = self
            .fault_source
            .unwrap_or_else(|| Box::new(RandomFaults::new()) as Box<dyn FaultSource>);
        let faults = FaultSimulator::from_config(&self.config, source);
        let observer = self
            .observer
            .unwrap_or_else(|| Arc::new(TracingObserver) as SharedObserver);

        Ok(Machine::from_parts(self.config, faults, observer))
    }
}

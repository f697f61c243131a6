//! Simulated equipment: actuation and tag reads with injected faults.

use crate::config::MachineConfig;
use crate::core::{Action, ActuationOutcome, Item, MachineError, Operation, ReadOutcome, SlotStore};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// The equipment step a fault is injected into.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum FaultKind {
    Actuator,
    TagRead,
}

/// Source of fault decisions.
///
/// Returns `true` when a fault of `kind` should be injected. `rate` is the
/// configured probability for that kind; scripted sources may ignore it.
/// Closures `FnMut(FaultKind, f64) -> bool` are fault sources.
pub trait FaultSource: Send {
    fn inject(&mut self, kind: FaultKind, rate: f64) -> bool;
}

impl<F> FaultSource for F
where
    F: FnMut(FaultKind, f64) -> bool + Send,
{
    fn inject(&mut self, kind: FaultKind, rate: f64) -> bool {
        (self)(kind, rate)
    }
}

/// Bernoulli trials drawn from a seedable generator.
#[derive(Clone, Debug)]
pub struct RandomFaults {
    rng: fastrand::Rng,
}

impl RandomFaults {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Deterministic sequence for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for RandomFaults {
    fn default() -> Self {
        Self::new()
    }
}

impl FaultSource for RandomFaults {
    fn inject(&mut self, _kind: FaultKind, rate: f64) -> bool {
        rate > 0.0 && self.rng.f64() < rate
    }
}

/// Pre-recorded fault decisions, consumed in order per kind.
///
/// Once a queue runs dry every further trial of that kind succeeds.
///
/// # Example
///
/// ```rust
/// use picker::effects::{FaultKind, FaultSource, ScriptedFaults};
///
/// let mut faults = ScriptedFaults::new().tag_read([true, false]);
/// assert!(faults.inject(FaultKind::TagRead, 0.0));
/// assert!(!faults.inject(FaultKind::TagRead, 0.0));
/// assert!(!faults.inject(FaultKind::Actuator, 1.0));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedFaults {
    actuator: VecDeque<bool>,
    tag_read: VecDeque<bool>,
}

impl ScriptedFaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue actuator decisions (`true` = fault).
    pub fn actuator(mut self, faults: impl IntoIterator<Item = bool>) -> Self {
        self.actuator.extend(faults);
        self
    }

    /// Queue tag read decisions (`true` = fault).
    pub fn tag_read(mut self, faults: impl IntoIterator<Item = bool>) -> Self {
        self.tag_read.extend(faults);
        self
    }

    /// Decisions not yet consumed, per kind.
    pub fn remaining(&self, kind: FaultKind) -> usize {
        match kind {
            FaultKind::Actuator => self.actuator.len(),
            FaultKind::TagRead => self.tag_read.len(),
        }
    }
}

impl FaultSource for ScriptedFaults {
    fn inject(&mut self, kind: FaultKind, _rate: f64) -> bool {
        let queue = match kind {
            FaultKind::Actuator => &mut self.actuator,
            FaultKind::TagRead => &mut self.tag_read,
        };
        queue.pop_front().unwrap_or(false)
    }
}

/// Stand-in for the real actuator and tag reader.
///
/// When simulation is disabled both steps report success without
/// consulting the fault source.
pub struct FaultSimulator {
    enabled: bool,
    actuator_fault_rate: f64,
    rfid_fault_rate: f64,
    source: Box<dyn FaultSource>,
}

impl FaultSimulator {
    pub fn new(
        enabled: bool,
        actuator_fault_rate: f64,
        rfid_fault_rate: f64,
        source: Box<dyn FaultSource>,
    ) -> Self {
        Self {
            enabled,
            actuator_fault_rate,
            rfid_fault_rate,
            source,
        }
    }

    /// Simulator using the configuration's flag and rates.
    pub fn from_config(config: &MachineConfig, source: Box<dyn FaultSource>) -> Self {
        Self::new(
            config.simulate_faults,
            config.actuator_fault_rate,
            config.rfid_fault_rate,
            source,
        )
    }

    /// Simulator that never faults.
    pub fn disabled() -> Self {
        Self::new(false, 0.0, 0.0, Box::new(ScriptedFaults::new()))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn trial(&mut self, kind: FaultKind, rate: f64) -> bool {
        if !self.enabled {
            return false;
        }
        let faulted = self.source.inject(kind, rate);
        if faulted {
            tracing::debug!(?kind, rate, "injected simulated fault");
        }
        faulted
    }

    /// Drive the actuator for `operation`.
    ///
    /// On success the item moves (pick: slot to `held`; place: `held` to
    /// slot). On a fault nothing moves. A transfer whose preconditions do
    /// not hold is reported as a fault rather than dropping the item.
    pub fn actuate(
        &mut self,
        operation: &Operation,
        held: &mut Option<Item>,
        slots: &mut SlotStore,
    ) -> Result<ActuationOutcome, MachineError> {
        let slot_available = slots.slot_available(operation.slot)?;

        if self.trial(FaultKind::Actuator, self.actuator_fault_rate) {
            return Ok(ActuationOutcome::Faulted);
        }

        match operation.action {
            Action::Pick => {
                if held.is_some() || slot_available {
                    return Ok(ActuationOutcome::Faulted);
                }
                let (_, item) = slots.remove(operation.slot)?;
                *held = item;
            }
            Action::Place => {
                let blocked = match held.as_ref() {
                    Some(item) => !slot_available || slots.contains(item.id()),
                    None => true,
                };
                if blocked {
                    return Ok(ActuationOutcome::Faulted);
                }
                if let Some(item) = held.take() {
                    slots.add(operation.slot, item)?;
                }
            }
        }

        Ok(ActuationOutcome::Success)
    }

    /// Read the identifying tag. Never changes any state.
    pub fn read_tag(&mut self) -> ReadOutcome {
        if self.trial(FaultKind::TagRead, self.rfid_fault_rate) {
            ReadOutcome::ReadError
        } else {
            ReadOutcome::Success
        }
    }
}

impl fmt::Debug for FaultSimulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaultSimulator")
            .field("enabled", &self.enabled)
            .field("actuator_fault_rate", &self.actuator_fault_rate)
            .field("rfid_fault_rate", &self.rfid_fault_rate)
            .finish_non_exhaustive()
    }
}

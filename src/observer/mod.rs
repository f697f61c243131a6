//! Injected event sinks.
//!
//! The machine and slot store never log through a process-wide logger.
//! Instead they hand [`MachineEvent`]s to an [`Observer`] supplied at
//! construction. [`TracingObserver`] forwards events to `tracing`;
//! [`RecordingObserver`] keeps them in memory for tests and reports.

use crate::core::{Operation, SlotOutcome, StepOutcome, Verdict, STEPS_PER_TRANSACTION};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Structured events emitted by the core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MachineEvent {
    /// An item could not be added to a slot.
    AddRejected {
        index: usize,
        item: String,
        outcome: SlotOutcome,
    },

    /// Nothing to remove from a slot.
    RemoveRejected { index: usize, outcome: SlotOutcome },

    /// A negative or non-finite weight was refused.
    WeightRejected {
        item: String,
        weight: f64,
        kept: Option<f64>,
    },

    /// A transaction was appended to the machine's history.
    TransactionRecorded {
        id: Uuid,
        operation: Operation,
        outcomes: [StepOutcome; STEPS_PER_TRANSACTION],
        retry: bool,
        verdict: Verdict,
    },

    /// `retry()` was refused because the retry bound is reached.
    RetriesExhausted {
        operation: Operation,
        max_retries: usize,
    },
}

/// Receiver of [`MachineEvent`]s.
pub trait Observer: Send + Sync {
    fn notify(&self, event: &MachineEvent);
}

impl<F> Observer for F
where
    F: Fn(&MachineEvent) + Send + Sync,
{
    fn notify(&self, event: &MachineEvent) {
        (self)(event)
    }
}

/// Shared observer handle held by machines and slot stores.
pub type SharedObserver = Arc<dyn Observer>;

/// Forwards every event to `tracing` with structured fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn notify(&self, event: &MachineEvent) {
        match event {
            MachineEvent::AddRejected {
                index,
                item,
                outcome,
            } => {
                tracing::warn!(index, item = %item, %outcome, "could not add item to slot");
            }
            MachineEvent::RemoveRejected { index, outcome } => {
                tracing::warn!(index, %outcome, "could not remove item from slot");
            }
            MachineEvent::WeightRejected { item, weight, kept } => {
                tracing::warn!(item = %item, weight, kept = ?kept, "rejected invalid weight");
            }
            MachineEvent::TransactionRecorded {
                id,
                operation,
                outcomes,
                retry,
                verdict,
            } => match verdict {
                Verdict::Pass => {
                    tracing::info!(%id, %operation, retry, ?outcomes, "transaction passed");
                }
                Verdict::Fail => {
                    tracing::warn!(%id, %operation, retry, ?outcomes, "transaction failed");
                }
            },
            MachineEvent::RetriesExhausted {
                operation,
                max_retries,
            } => {
                tracing::error!(%operation, max_retries, "retries exhausted");
            }
        }
    }
}

/// Keeps every event in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<MachineEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all events seen so far.
    pub fn events(&self) -> Vec<MachineEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl Observer for RecordingObserver {
    fn notify(&self, event: &MachineEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn rejected(index: usize) -> MachineEvent {
        MachineEvent::RemoveRejected {
            index,
            outcome: SlotOutcome::ItemNotPresent,
        }
    }

    #[test]
    fn recording_observer_keeps_events_in_order() {
        let observer = RecordingObserver::new();
        assert!(observer.is_empty());

        observer.notify(&rejected(1));
        observer.notify(&rejected(2));

        assert_eq!(observer.events(), vec![rejected(1), rejected(2)]);
        assert_eq!(observer.len(), 2);
    }

    #[test]
    fn recording_observer_can_be_cleared() {
        let observer = RecordingObserver::new();
        observer.notify(&rejected(0));
        observer.clear();
        assert!(observer.is_empty());
    }

    #[test]
    fn closures_are_observers() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let observer: SharedObserver = Arc::new(move |_: &MachineEvent| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        observer.notify(&rejected(3));
        observer.notify(&rejected(4));

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn tracing_observer_accepts_every_event() {
        let observer = TracingObserver;
        observer.notify(&rejected(0));
        observer.notify(&MachineEvent::WeightRejected {
            item: "A1".to_string(),
            weight: -1.0,
            kept: Some(10.0),
        });
        observer.notify(&MachineEvent::RetriesExhausted {
            operation: Operation::pick(0),
            max_retries: 3,
        });
    }

    #[test]
    fn events_serialize_to_json() {
        let event = MachineEvent::AddRejected {
            index: 0,
            item: "xyz".to_string(),
            outcome: SlotOutcome::LocationOccupied,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: MachineEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}

//! Read-only snapshots of a machine and its slot store.
//!
//! A snapshot is an export for reporting and audit tooling: it copies the
//! held item, slot contents, transaction window and derived state into a
//! versioned, serializable value. Writing it anywhere is up to the caller.

use crate::config::MachineConfig;
use crate::core::{Item, MachineState, SlotStore, Transaction};
use crate::effects::Machine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable copy of machine and slot store state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// Configuration the machine runs with
    pub config: MachineConfig,

    /// Derived machine state at capture time
    pub state: MachineState,

    /// Item in the gripper
    pub held_item: Option<Item>,

    /// Slot contents, index 0 first
    pub slots: Vec<Option<Item>>,

    /// Transaction window, oldest first
    pub transactions: Vec<Transaction>,

    /// Transactions recorded over the machine's lifetime
    pub total_recorded: usize,
}

impl MachineSnapshot {
    /// Copy the current state of `machine` and `slots`.
    pub fn capture(machine: &Machine, slots: &SlotStore) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            taken_at: Utc::now(),
            config: machine.config().clone(),
            state: machine.state(),
            held_item: machine.held_item().cloned(),
            slots: slots.slots().to_vec(),
            transactions: machine.history().iter().cloned().collect(),
            total_recorded: machine.history().total_recorded(),
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    fn check_version(self) -> Result<Self, SnapshotError> {
        if self.version == SNAPSHOT_VERSION {
            Ok(self)
        } else {
            Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operation;
    use crate::effects::ScriptedFaults;

    fn busy_machine() -> (Machine, SlotStore) {
        let mut machine = Machine::builder()
            .fault_source(ScriptedFaults::new())
            .build()
            .unwrap();
        let mut slots = machine.new_slot_store();
        slots.add(0, Item::tray("A1")).unwrap();
        slots.add(1, Item::tray("B2")).unwrap();
        machine.pick(&mut slots, 0).unwrap();
        machine.pick(&mut slots, 1).unwrap();
        (machine, slots)
    }

    #[test]
    fn capture_copies_machine_and_slots() {
        let (machine, slots) = busy_machine();

        let snapshot = machine.snapshot(&slots);

        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.held_item.as_ref().map(Item::id), Some("A1"));
        assert_eq!(snapshot.slots.len(), 10);
        assert!(snapshot.slots[0].is_none());
        assert_eq!(snapshot.transactions.len(), 2);
        assert_eq!(snapshot.transactions[1].operation(), &Operation::pick(1));
        assert_eq!(snapshot.state, MachineState::FaultedPendingRetry);
        assert_eq!(snapshot.total_recorded, 2);
    }

    #[test]
    fn json_encoding_preserves_snapshot() {
        let (machine, slots) = busy_machine();
        let snapshot = machine.snapshot(&slots);

        let json = snapshot.to_json().unwrap();
        let decoded = MachineSnapshot::from_json(&json).unwrap();

        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn binary_encoding_preserves_snapshot() {
        let (machine, slots) = busy_machine();
        let snapshot = machine.snapshot(&slots);

        let bytes = snapshot.to_bytes().unwrap();
        let decoded = MachineSnapshot::from_bytes(&bytes).unwrap();

        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let (machine, slots) = busy_machine();
        let mut snapshot = machine.snapshot(&slots);
        snapshot.version = 99;

        let json = snapshot.to_json().unwrap();
        let result = MachineSnapshot::from_json(&json);

        assert!(matches!(
            result,
            Err(SnapshotError::UnsupportedVersion {
                found: 99,
                supported: SNAPSHOT_VERSION
            })
        ));
    }

    #[test]
    fn garbage_fails_to_decode() {
        assert!(matches!(
            MachineSnapshot::from_json("not json"),
            Err(SnapshotError::DeserializationFailed(_))
        ));
        assert!(matches!(
            MachineSnapshot::from_bytes(&[1, 2, 3]),
            Err(SnapshotError::DeserializationFailed(_))
        ));
    }
}

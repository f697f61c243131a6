//! Fixed-size slotted storage.

use super::error::MachineError;
use super::item::Item;
use super::operation::SlotOutcome;
use crate::config::MachineConfig;
use crate::observer::{MachineEvent, SharedObserver, TracingObserver};
use std::fmt;
use std::sync::Arc;

/// Default number of slots in a store.
pub const DEFAULT_NUM_SLOTS: usize = 10;

/// An ordered, fixed-length row of slots, each empty or holding one item.
///
/// The store is never resized after creation. Rejected mutations are
/// reported to the store's observer and returned as [`SlotOutcome`]s;
/// only out-of-range indexes are errors.
///
/// # Example
///
/// ```rust
/// use picker::core::{Item, SlotOutcome, SlotStore};
///
/// let mut store = SlotStore::new(10);
/// assert_eq!(store.add(4, Item::tray("A1")).unwrap(), SlotOutcome::Success);
/// assert!(!store.slot_available(4).unwrap());
///
/// let (outcome, item) = store.remove(4).unwrap();
/// assert_eq!(outcome, SlotOutcome::Success);
/// assert_eq!(item.unwrap().id(), "A1");
/// ```
#[derive(Clone)]
pub struct SlotStore {
    slots: Vec<Option<Item>>,
    observer: SharedObserver,
}

impl SlotStore {
    /// Create a store of `num_slots` empty slots.
    pub fn new(num_slots: usize) -> Self {
        Self {
            slots: vec![None; num_slots],
            observer: Arc::new(TracingObserver),
        }
    }

    /// Create an empty store sized by `num_slots`.
    pub fn from_config(config: &MachineConfig) -> Self {
        Self::new(config.num_slots)
    }

    /// Replace the observer that receives rejection events.
    pub fn with_observer(mut self, observer: SharedObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn ensure_in_range(&self, index: usize) -> Result<(), MachineError> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(MachineError::IndexOutOfRange {
                index,
                len: self.slots.len(),
            })
        }
    }

    /// True iff the slot at `index` is empty.
    pub fn slot_available(&self, index: usize) -> Result<bool, MachineError> {
        self.ensure_in_range(index)?;
        Ok(self.slots[index].is_none())
    }

    /// Item stored at `index`, if any.
    pub fn get(&self, index: usize) -> Result<Option<&Item>, MachineError> {
        self.ensure_in_range(index)?;
        Ok(self.slots[index].as_ref())
    }

    /// Store `item` at `index` if the slot is empty.
    ///
    /// An occupied slot yields `LocationOccupied`; an item whose id is
    /// already stored elsewhere yields `DuplicateItem`. Neither mutates the
    /// store.
    pub fn add(&mut self, index: usize, item: Item) -> Result<SlotOutcome, MachineError> {
        self.ensure_in_range(index)?;

        let outcome = if self.slots[index].is_some() {
            SlotOutcome::LocationOccupied
        } else if self.contains(item.id()) {
            SlotOutcome::DuplicateItem
        } else {
            self.slots[index] = Some(item);
            return Ok(SlotOutcome::Success);
        };

        self.observer.notify(&MachineEvent::AddRejected {
            index,
            item: item.id().to_string(),
            outcome,
        });
        Ok(outcome)
    }

    /// Take the item out of the slot at `index`.
    pub fn remove(&mut self, index: usize) -> Result<(SlotOutcome, Option<Item>), MachineError> {
        self.ensure_in_range(index)?;

        match self.slots[index].take() {
            Some(item) => Ok((SlotOutcome::Success, Some(item))),
            None => {
                let outcome = SlotOutcome::ItemNotPresent;
                self.observer
                    .notify(&MachineEvent::RemoveRejected { index, outcome });
                Ok((outcome, None))
            }
        }
    }

    /// Whether an item with this id is stored in any slot.
    pub fn contains(&self, id: &str) -> bool {
        self.slots.iter().flatten().any(|item| item.id() == id)
    }

    /// Indexes of occupied slots, ascending.
    pub fn occupied_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|_| index))
            .collect()
    }

    /// Iterate over `(index, slot)` pairs from slot 0 upwards.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, Option<&Item>)> + '_ {
        self.slots.iter().enumerate().map(|(i, s)| (i, s.as_ref()))
    }

    /// Read-only view of all slots.
    pub fn slots(&self) -> &[Option<Item>] {
        &self.slots
    }
}

impl Default for SlotStore {
    fn default() -> Self {
        Self::new(DEFAULT_NUM_SLOTS)
    }
}

impl fmt::Debug for SlotStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotStore")
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}

/// Lists slots top-down, so the highest index prints first.
impl fmt::Display for SlotStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.iter().rev() {
            match slot {
                Some(item) => writeln!(f, "{index:>4} | {item}")?,
                None => writeln!(f, "{index:>4} | -")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::RecordingObserver;

    #[test]
    fn new_store_is_empty() {
        let store = SlotStore::default();
        assert_eq!(store.len(), DEFAULT_NUM_SLOTS);
        for index in 0..store.len() {
            assert!(store.slot_available(index).unwrap());
        }
        assert!(store.occupied_indices().is_empty());
    }

    #[test]
    fn store_from_config_uses_slot_count() {
        let config = MachineConfig {
            num_slots: 4,
            ..MachineConfig::default()
        };
        let slots = SlotStore::from_config(&config);
        assert_eq!(slots.len(), 4);
        assert!(slots.occupied_indices().is_empty());
    }

    #[test]
    fn add_occupies_slot() {
        let mut store = SlotStore::new(5);
        assert_eq!(store.add(2, Item::tray("A1")).unwrap(), SlotOutcome::Success);
        assert!(!store.slot_available(2).unwrap());
        assert_eq!(store.get(2).unwrap().map(Item::id), Some("A1"));
        assert_eq!(store.occupied_indices(), vec![2]);
    }

    #[test]
    fn add_to_occupied_slot_is_rejected_without_mutation() {
        let observer = Arc::new(RecordingObserver::new());
        let mut store = SlotStore::new(5).with_observer(observer.clone());
        store.add(0, Item::tray("abc")).unwrap();

        let outcome = store.add(0, Item::tray("xyz")).unwrap();

        assert_eq!(outcome, SlotOutcome::LocationOccupied);
        assert_eq!(store.get(0).unwrap().map(Item::id), Some("abc"));
        assert_eq!(
            observer.events(),
            vec![MachineEvent::AddRejected {
                index: 0,
                item: "xyz".to_string(),
                outcome: SlotOutcome::LocationOccupied,
            }]
        );
    }

    #[test]
    fn same_item_cannot_occupy_two_slots() {
        let mut store = SlotStore::new(5);
        store.add(0, Item::tray("A1")).unwrap();

        let outcome = store.add(1, Item::tray("A1")).unwrap();

        assert_eq!(outcome, SlotOutcome::DuplicateItem);
        assert!(store.slot_available(1).unwrap());
    }

    #[test]
    fn remove_returns_item_and_clears_slot() {
        let mut store = SlotStore::new(3);
        store.add(1, Item::tray("def")).unwrap();

        let (outcome, item) = store.remove(1).unwrap();

        assert_eq!(outcome, SlotOutcome::Success);
        assert_eq!(item, Some(Item::tray("def")));
        assert!(store.slot_available(1).unwrap());
    }

    #[test]
    fn remove_from_empty_slot_reports_item_not_present() {
        let observer = Arc::new(RecordingObserver::new());
        let mut store = SlotStore::new(3).with_observer(observer.clone());

        let (outcome, item) = store.remove(2).unwrap();

        assert_eq!(outcome, SlotOutcome::ItemNotPresent);
        assert!(item.is_none());
        assert_eq!(observer.len(), 1);
    }

    #[test]
    fn out_of_range_index_fails_fast() {
        let mut store = SlotStore::new(3);
        let expected = MachineError::IndexOutOfRange { index: 3, len: 3 };

        assert_eq!(store.slot_available(3), Err(expected.clone()));
        assert_eq!(store.add(3, Item::new("a")), Err(expected.clone()));
        assert_eq!(store.remove(3), Err(expected));
    }

    #[test]
    fn display_lists_highest_slot_first() {
        let mut store = SlotStore::new(2);
        store.add(0, Item::tray("A1")).unwrap();

        let rendered = store.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines, vec!["   1 | -", "   0 | A1"]);
    }
}

//! The retry engine: a pick-and-place machine with a bounded history.

use crate::builder::MachineBuilder;
use crate::checkpoint::MachineSnapshot;
use crate::config::{ConfigError, MachineConfig};
use crate::core::{
    check_operation, Action, Item, ItemError, MachineError, MachineState, Operation, Outcome,
    RetryOutcome, SlotStore, Transaction, TransactionLog,
};
use crate::effects::faults::FaultSimulator;
use crate::enforcement::RetryPolicy;
use crate::observer::{MachineEvent, SharedObserver};
use std::fmt;

/// A machine that picks items out of slots and places them back.
///
/// Every attempt produces one immutable [`Transaction`] appended to a
/// sliding window of the last `max_retries + 1` transactions. That window
/// is the only retry counter: [`retry`](Self::retry) re-runs the newest
/// operation unless the newest `max_retries` entries are all retries.
///
/// # Example
///
/// ```rust
/// use picker::config::MachineConfig;
/// use picker::core::{Action, Item, Verdict};
/// use picker::effects::Machine;
///
/// let mut machine = Machine::new(MachineConfig::default()).unwrap();
/// let mut slots = machine.new_slot_store();
/// slots.add(0, Item::tray("A1")).unwrap();
///
/// let txn = machine.carry_out(&mut slots, Action::Pick, 0).unwrap();
/// assert_eq!(txn.verdict(), Verdict::Pass);
/// assert_eq!(machine.held_item().map(Item::id), Some("A1"));
/// ```
pub struct Machine {
    config: MachineConfig,
    policy: RetryPolicy,
    held: Option<Item>,
    log: TransactionLog,
    faults: FaultSimulator,
    observer: SharedObserver,
}

impl Machine {
    /// Machine with random fault injection and a `tracing` observer.
    pub fn new(config: MachineConfig) -> Result<Self, ConfigError> {
        MachineBuilder::new().config(config).build()
    }

    pub fn builder() -> MachineBuilder {
        MachineBuilder::new()
    }

    pub(crate) fn from_parts(
        config: MachineConfig,
        faults: FaultSimulator,
        observer: SharedObserver,
    ) -> Self {
        Self {
            policy: RetryPolicy::new(config.max_retries),
            log: TransactionLog::for_max_retries(config.max_retries),
            held: None,
            config,
            faults,
            observer,
        }
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn held_item(&self) -> Option<&Item> {
        self.held.as_ref()
    }

    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }

    /// The sliding window of recent transactions.
    pub fn history(&self) -> &TransactionLog {
        &self.log
    }

    pub fn last_transaction(&self) -> Option<&Transaction> {
        self.log.last()
    }

    /// Slot store sized by this machine's configuration, reporting to the
    /// same observer.
    pub fn new_slot_store(&self) -> SlotStore {
        SlotStore::from_config(&self.config).with_observer(self.observer.clone())
    }

    /// Put an item straight into the gripper, bypassing pick.
    ///
    /// Hands the item back if the machine already holds one.
    pub fn load(&mut self, item: Item) -> Result<(), Item> {
        if self.held.is_some() {
            return Err(item);
        }
        self.held = Some(item);
        Ok(())
    }

    /// Record the held item's weight. Invalid weights are reported to the
    /// observer and leave the previous weight in place.
    pub fn weigh_held_item(&mut self, weight: f64) -> Result<(), ItemError> {
        let item = self.held.as_mut().ok_or(ItemError::NotHeld)?;
        let kept = item.weight();
        let result = item.update_weight(weight);
        if result.is_err() {
            self.observer.notify(&MachineEvent::WeightRejected {
                item: item.id().to_string(),
                weight,
                kept,
            });
        }
        result
    }

    /// Derived state from the held item and the newest transaction.
    pub fn state(&self) -> MachineState {
        match self.log.last() {
            Some(last) if !last.passed() => {
                if last.retries_exhausted()
                    || self.policy.evaluate(&self.log) == RetryOutcome::RetriesExceeded
                {
                    MachineState::RetriesExhausted
                } else {
                    MachineState::FaultedPendingRetry
                }
            }
            _ if self.held.is_some() => MachineState::Holding,
            _ => MachineState::Idle,
        }
    }

    /// Attempt `action` on `slot` as a fresh (non-retry) operation.
    ///
    /// Fails only for an out-of-range slot. Every other outcome, including
    /// illegal requests and simulated faults, is recorded in the returned
    /// transaction.
    pub fn carry_out(
        &mut self,
        slots: &mut SlotStore,
        action: Action,
        slot: usize,
    ) -> Result<Transaction, MachineError> {
        self.attempt(slots, Operation::new(action, slot), false)
    }

    pub fn pick(&mut self, slots: &mut SlotStore, slot: usize) -> Result<Transaction, MachineError> {
        self.carry_out(slots, Action::Pick, slot)
    }

    pub fn place(&mut self, slots: &mut SlotStore, slot: usize) -> Result<Transaction, MachineError> {
        self.carry_out(slots, Action::Place, slot)
    }

    /// Re-attempt the newest operation in history.
    ///
    /// Once the newest `max_retries` transactions are all retries, no
    /// attempt is made: a `RetriesExceeded` transaction is recorded and
    /// returned instead, and keeps being returned until a fresh
    /// [`carry_out`](Self::carry_out) resets the window.
    pub fn retry(&mut self, slots: &mut SlotStore) -> Result<Transaction, MachineError> {
        let operation = *self
            .log
            .last()
            .ok_or(MachineError::NothingToRetry)?
            .operation();

        match self.policy.evaluate(&self.log) {
            RetryOutcome::RetriesExceeded => {
                self.observer.notify(&MachineEvent::RetriesExhausted {
                    operation,
                    max_retries: self.policy.max_retries(),
                });
                Ok(self.record(Transaction::retries_exceeded(operation)))
            }
            RetryOutcome::Success => self.attempt(slots, operation, true),
        }
    }

    /// Versioned export of the machine and its slot store.
    pub fn snapshot(&self, slots: &SlotStore) -> MachineSnapshot {
        MachineSnapshot::capture(self, slots)
    }

    fn attempt(
        &mut self,
        slots: &mut SlotStore,
        operation: Operation,
        retry: bool,
    ) -> Result<Transaction, MachineError> {
        let check = check_operation(&operation, self.held.is_some(), slots)?;
        if check.is_success() && operation.action == Action::Place {
            self.ensure_held_item_unique(slots)?;
        }

        let transaction = if check.is_success() {
            let actuation = self.faults.actuate(&operation, &mut self.held, slots)?;
            let read = self.faults.read_tag();
            Transaction::attempted(operation, actuation, read, retry)
        } else {
            Transaction::rejected(operation, check, retry)
        };

        Ok(self.record(transaction))
    }

    /// The held item and the stored items must not share an id.
    fn ensure_held_item_unique(&self, slots: &SlotStore) -> Result<(), MachineError> {
        match self.held.as_ref() {
            Some(item) if slots.contains(item.id()) => Err(MachineError::DuplicateItem {
                id: item.id().to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn record(&mut self, transaction: Transaction) -> Transaction {
        self.observer.notify(&MachineEvent::TransactionRecorded {
            id: transaction.id(),
            operation: *transaction.operation(),
            outcomes: *transaction.outcomes(),
            retry: transaction.is_retry(),
            verdict: transaction.verdict(),
        });
        self.log.record(transaction).clone()
    }
}

impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("config", &self.config)
            .field("held", &self.held)
            .field("log", &self.log)
            .field("faults", &self.faults)
            .finish_non_exhaustive()
    }
}

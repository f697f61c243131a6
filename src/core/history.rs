//! Transaction records and the bounded log that holds them.
//!
//! A [`Transaction`] is created once per attempted operation, retries
//! included, and never changes afterwards. The [`TransactionLog`] keeps only
//! the most recent entries; the retry engine inspects its tail to enforce
//! the retry bound.

use super::operation::{
    ActuationOutcome, CheckOutcome, Operation, ReadOutcome, RetryOutcome, StepOutcome,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Number of steps recorded per transaction: check, actuation, tag read.
pub const STEPS_PER_TRANSACTION: usize = 3;

/// Pass/fail verdict derived from a transaction's outcomes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    /// `Pass` iff every attempted step is its subsystem's success code.
    pub fn from_outcomes(outcomes: &[StepOutcome]) -> Self {
        let failed = outcomes
            .iter()
            .filter(|o| o.is_attempted())
            .any(|o| !o.is_success());
        if failed {
            Self::Fail
        } else {
            Self::Pass
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => f.write_str("Pass"),
            Self::Fail => f.write_str("Fail"),
        }
    }
}

/// Immutable record of one operation attempt.
///
/// # Example
///
/// ```rust
/// use picker::core::{ActuationOutcome, Operation, ReadOutcome, Transaction, Verdict};
///
/// let txn = Transaction::attempted(
///     Operation::pick(0),
///     ActuationOutcome::Success,
///     ReadOutcome::ReadError,
///     false,
/// );
/// assert_eq!(txn.verdict(), Verdict::Fail);
/// assert_eq!(txn.severity(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: Uuid,
    operation: Operation,
    outcomes: [StepOutcome; STEPS_PER_TRANSACTION],
    retry: bool,
    timestamp: DateTime<Utc>,
}

impl Transaction {
    fn new(operation: Operation, outcomes: [StepOutcome; STEPS_PER_TRANSACTION], retry: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            operation,
            outcomes,
            retry,
            timestamp: Utc::now(),
        }
    }

    /// An attempt stopped by the legality check; actuation and tag read
    /// are recorded as not attempted.
    pub fn rejected(operation: Operation, check: CheckOutcome, retry: bool) -> Self {
        Self::new(
            operation,
            [
                StepOutcome::Check(check),
                StepOutcome::NotAttempted,
                StepOutcome::NotAttempted,
            ],
            retry,
        )
    }

    /// An attempt that passed the legality check and ran both equipment
    /// steps.
    pub fn attempted(
        operation: Operation,
        actuation: ActuationOutcome,
        read: ReadOutcome,
        retry: bool,
    ) -> Self {
        Self::new(
            operation,
            [
                StepOutcome::Check(CheckOutcome::Success),
                StepOutcome::Actuation(actuation),
                StepOutcome::Read(read),
            ],
            retry,
        )
    }

    /// The synthetic record appended when the retry bound is reached.
    pub fn retries_exceeded(operation: Operation) -> Self {
        let exceeded = StepOutcome::Retry(RetryOutcome::RetriesExceeded);
        Self::new(operation, [exceeded; STEPS_PER_TRANSACTION], true)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn outcomes(&self) -> &[StepOutcome; STEPS_PER_TRANSACTION] {
        &self.outcomes
    }

    /// Whether this attempt re-ran the previous operation.
    pub fn is_retry(&self) -> bool {
        self.retry
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Sum of the recorded outcome severities. Zero iff the verdict is
    /// `Pass`.
    pub fn severity(&self) -> u32 {
        self.outcomes.iter().map(|o| u32::from(o.severity())).sum()
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_outcomes(&self.outcomes)
    }

    pub fn passed(&self) -> bool {
        self.verdict() == Verdict::Pass
    }

    /// Whether this is a `RetriesExceeded` record.
    pub fn retries_exhausted(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| matches!(o, StepOutcome::Retry(RetryOutcome::RetriesExceeded)))
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcomes: Vec<&str> = self.outcomes.iter().map(StepOutcome::name).collect();
        writeln!(f, "Transaction {}", self.id)?;
        writeln!(f, "  operation: {}", self.operation)?;
        writeln!(f, "  outcomes:  {}", outcomes.join(", "))?;
        writeln!(f, "  retry:     {}", self.retry)?;
        writeln!(f, "  timestamp: {}", self.timestamp.to_rfc3339())?;
        write!(f, "  result:    {}", self.verdict())
    }
}

/// Sliding window over the most recent transactions.
///
/// Once `capacity` entries are held, recording a new one evicts the oldest.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionLog {
    capacity: usize,
    entries: VecDeque<Transaction>,
    total_recorded: usize,
}

impl TransactionLog {
    /// Create a log keeping at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::new(),
            total_recorded: 0,
        }
    }

    /// Create a log sized for a retry bound: the fresh attempt plus
    /// `max_retries` retries.
    pub fn for_max_retries(max_retries: usize) -> Self {
        Self::new(max_retries.saturating_add(1))
    }

    /// Append a transaction, evicting the oldest if the window is full.
    pub fn record(&mut self, transaction: Transaction) -> &Transaction {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(transaction);
        self.total_recorded += 1;
        &self.entries[self.entries.len() - 1]
    }

    pub fn last(&self) -> Option<&Transaction> {
        self.entries.back()
    }

    /// The newest `n` entries, oldest first.
    pub fn tail(&self, n: usize) -> impl Iterator<Item = &Transaction> + '_ {
        self.entries.iter().skip(self.entries.len().saturating_sub(n))
    }

    /// Number of consecutive retry-flagged entries at the end of the log.
    pub fn trailing_retries(&self) -> usize {
        self.entries
            .iter()
            .rev()
            .take_while(|txn| txn.is_retry())
            .count()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Transaction> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Transactions recorded over the log's lifetime, evicted ones included.
    pub fn total_recorded(&self) -> usize {
        self.total_recorded
    }

    /// Time between the oldest and newest entries still held.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.entries.front()?, self.entries.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(retry: bool) -> Transaction {
        Transaction::attempted(
            Operation::pick(0),
            ActuationOutcome::Faulted,
            ReadOutcome::Success,
            retry,
        )
    }

    #[test]
    fn clean_attempt_passes() {
        let txn = Transaction::attempted(
            Operation::place(4),
            ActuationOutcome::Success,
            ReadOutcome::Success,
            false,
        );
        assert_eq!(txn.verdict(), Verdict::Pass);
        assert_eq!(txn.severity(), 0);
        assert!(txn.passed());
    }

    #[test]
    fn any_failing_step_fails_the_transaction() {
        assert_eq!(failed(false).verdict(), Verdict::Fail);

        let read_fault = Transaction::attempted(
            Operation::place(4),
            ActuationOutcome::Success,
            ReadOutcome::ReadError,
            false,
        );
        assert_eq!(read_fault.verdict(), Verdict::Fail);
    }

    #[test]
    fn rejected_transaction_skips_equipment_steps() {
        let txn = Transaction::rejected(Operation::pick(0), CheckOutcome::SlotEmpty, false);

        assert_eq!(
            txn.outcomes(),
            &[
                StepOutcome::Check(CheckOutcome::SlotEmpty),
                StepOutcome::NotAttempted,
                StepOutcome::NotAttempted,
            ]
        );
        assert_eq!(txn.verdict(), Verdict::Fail);
        assert_eq!(txn.severity(), 4);
    }

    #[test]
    fn retries_exceeded_fills_every_step() {
        let txn = Transaction::retries_exceeded(Operation::pick(2));

        assert!(txn.is_retry());
        assert!(txn.retries_exhausted());
        assert!(txn
            .outcomes()
            .iter()
            .all(|o| *o == StepOutcome::Retry(RetryOutcome::RetriesExceeded)));
        assert_eq!(txn.verdict(), Verdict::Fail);
    }

    #[test]
    fn each_transaction_gets_a_fresh_id() {
        assert_ne!(failed(false).id(), failed(false).id());
    }

    #[test]
    fn log_evicts_oldest_entry() {
        let mut log = TransactionLog::new(2);
        let first = failed(false);
        let first_id = first.id();

        log.record(first);
        log.record(failed(true));
        log.record(failed(true));

        assert_eq!(log.len(), 2);
        assert_eq!(log.total_recorded(), 3);
        assert!(log.iter().all(|t| t.id() != first_id));
    }

    #[test]
    fn log_sized_for_retries_keeps_one_extra_entry() {
        let log = TransactionLog::for_max_retries(3);
        assert_eq!(log.capacity(), 4);
    }

    #[test]
    fn unbounded_retry_limit_saturates_capacity() {
        let log = TransactionLog::for_max_retries(usize::MAX);
        assert_eq!(log.capacity(), usize::MAX);
        assert!(log.is_empty());
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut log = TransactionLog::new(0);
        log.record(failed(false));
        log.record(failed(false));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn trailing_retries_stops_at_fresh_attempt() {
        let mut log = TransactionLog::new(5);
        log.record(failed(true));
        log.record(failed(false));
        log.record(failed(true));
        log.record(failed(true));

        assert_eq!(log.trailing_retries(), 2);
    }

    #[test]
    fn tail_returns_newest_entries_oldest_first() {
        let mut log = TransactionLog::new(4);
        log.record(failed(false));
        log.record(failed(true));
        let newest = log.record(failed(true)).id();

        let tail: Vec<&Transaction> = log.tail(2).collect();
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[1].id(), newest);
        assert_eq!(log.tail(10).count(), 3);
    }

    #[test]
    fn empty_log_has_no_duration() {
        let log = TransactionLog::new(3);
        assert!(log.duration().is_none());
        assert!(log.last().is_none());
    }

    #[test]
    fn single_entry_has_zero_duration() {
        let mut log = TransactionLog::new(3);
        log.record(failed(false));
        assert_eq!(log.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn display_includes_operation_and_result() {
        let txn = Transaction::rejected(Operation::pick(0), CheckOutcome::SlotEmpty, false);
        let summary = txn.to_string();

        assert!(summary.contains("PICK slot 0"));
        assert!(summary.contains("SlotEmpty, NotAttempted, NotAttempted"));
        assert!(summary.contains("result:    Fail"));
    }

    #[test]
    fn log_serializes_correctly() {
        let mut log = TransactionLog::new(2);
        log.record(failed(false));

        let json = serde_json::to_string(&log).unwrap();
        let back: TransactionLog = serde_json::from_str(&json).unwrap();

        assert_eq!(back.len(), 1);
        assert_eq!(back.last(), log.last());
    }
}

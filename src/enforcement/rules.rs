//! The sliding-window retry bound.

use crate::core::{RetryOutcome, TransactionLog};
use serde::{Deserialize, Serialize};

/// Bound on consecutive retries.
///
/// The bound counts trailing retry-flagged transactions, not total
/// attempts: it is exhausted when the newest `max_retries` entries of the
/// log are all retries. A fresh attempt anywhere in that window resets it,
/// and a log shorter than `max_retries` is never exhausted.
///
/// # Example
///
/// ```rust
/// use picker::core::{Operation, RetryOutcome, Transaction, TransactionLog};
/// use picker::enforcement::RetryPolicy;
///
/// let policy = RetryPolicy::new(2);
/// let mut log = TransactionLog::for_max_retries(2);
///
/// log.record(Transaction::retries_exceeded(Operation::pick(0)));
/// assert_eq!(policy.evaluate(&log), RetryOutcome::Success);
///
/// log.record(Transaction::retries_exceeded(Operation::pick(0)));
/// assert_eq!(policy.evaluate(&log), RetryOutcome::RetriesExceeded);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    max_retries: usize,
}

impl RetryPolicy {
    pub fn new(max_retries: usize) -> Self {
        Self { max_retries }
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    /// Decide whether another retry may run.
    pub fn evaluate(&self, log: &TransactionLog) -> RetryOutcome {
        if log.len() < self.max_retries {
            return RetryOutcome::Success;
        }

        if log.tail(self.max_retries).all(|txn| txn.is_retry()) {
            RetryOutcome::RetriesExceeded
        } else {
            RetryOutcome::Success
        }
    }

    /// Retries still available before the bound is reached.
    pub fn remaining(&self, log: &TransactionLog) -> usize {
        self.max_retries.saturating_sub(log.trailing_retries())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActuationOutcome, Operation, ReadOutcome, Transaction};

    fn attempt(retry: bool) -> Transaction {
        Transaction::attempted(
            Operation::pick(0),
            ActuationOutcome::Faulted,
            ReadOutcome::Success,
            retry,
        )
    }

    fn log_of(flags: &[bool]) -> TransactionLog {
        let mut log = TransactionLog::for_max_retries(3);
        for &retry in flags {
            log.record(attempt(retry));
        }
        log
    }

    #[test]
    fn empty_log_allows_retry() {
        let policy = RetryPolicy::new(3);
        assert_eq!(policy.evaluate(&log_of(&[])), RetryOutcome::Success);
    }

    #[test]
    fn short_log_is_never_exhausted() {
        let policy = RetryPolicy::new(3);
        assert_eq!(policy.evaluate(&log_of(&[true, true])), RetryOutcome::Success);
    }

    #[test]
    fn fresh_attempt_in_window_allows_retry() {
        let policy = RetryPolicy::new(3);
        assert_eq!(
            policy.evaluate(&log_of(&[false, true, true])),
            RetryOutcome::Success
        );
        assert_eq!(
            policy.evaluate(&log_of(&[true, true, false, true])),
            RetryOutcome::Success
        );
    }

    #[test]
    fn window_of_retries_exhausts_bound() {
        let policy = RetryPolicy::new(3);
        assert_eq!(
            policy.evaluate(&log_of(&[false, true, true, true])),
            RetryOutcome::RetriesExceeded
        );
    }

    #[test]
    fn exhaustion_persists_while_retries_keep_coming() {
        let policy = RetryPolicy::new(3);
        let mut log = log_of(&[false, true, true, true]);
        log.record(Transaction::retries_exceeded(Operation::pick(0)));

        assert_eq!(policy.evaluate(&log), RetryOutcome::RetriesExceeded);
    }

    #[test]
    fn remaining_counts_down() {
        let policy = RetryPolicy::new(3);
        assert_eq!(policy.remaining(&log_of(&[false])), 3);
        assert_eq!(policy.remaining(&log_of(&[false, true])), 2);
        assert_eq!(policy.remaining(&log_of(&[false, true, true, true])), 0);
    }
}

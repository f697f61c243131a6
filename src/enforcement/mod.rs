//! Retry bound enforcement.
//!
//! The machine's own transaction log is the retry-count oracle: no counter
//! is kept, so nothing has to be reset or decremented on success. The
//! [`RetryPolicy`] scans the tail of the log each time `retry()` is called.

pub mod rules;

pub use rules::RetryPolicy;

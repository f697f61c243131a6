//! Configuration error types.

use thiserror::Error;

/// A single problem found in a machine configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("{field} must be within [0, 1] (got {value})")]
    RateOutOfRange { field: &'static str, value: f64 },

    #[error("max_retries must be at least 1")]
    ZeroRetries,

    #[error("num_slots must be at least 1")]
    ZeroSlots,
}

/// Errors that can occur when validating a configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// Every violation found, not just the first
    #[error("Invalid machine configuration ({} violation(s)): {}", .0.len(), join(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn join(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

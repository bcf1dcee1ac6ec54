//! Error types for partitioning runs.
//!
//! Search outcomes (feasible, infeasible, timed out) are reported through
//! [`SolutionResult`](crate::solver::SolutionResult), not through this type.
//! [`PartitionError`] covers precondition violations and I/O failures.

use thiserror::Error;

/// Errors that can occur while building or solving a partition problem.
#[derive(Error, Debug)]
pub enum PartitionError {
    /// The desired group size is below the minimum of 2.
    #[error("desired group size must be at least 2, got {0}")]
    InvalidGroupSize(usize),

    /// Fewer active participants than a single group needs.
    #[error(
        "insufficient participants: {available} active, desired group size {desired_group_size}"
    )]
    InsufficientParticipants {
        available: usize,
        desired_group_size: usize,
    },

    /// The enumerator was asked for zero solutions.
    #[error("solution limit must be at least 1")]
    InvalidSolutionLimit,

    /// Solver configuration rejected by validation.
    #[error("invalid solver configuration: {0}")]
    Config(String),

    /// Reading or writing participant or solution files failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PartitionError {
    /// Whether this error means "no partition exists" rather than a fault.
    ///
    /// Callers should report these runs as infeasible.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, PartitionError::InsufficientParticipants { .. })
    }
}

/// Result alias for partitioning operations.
pub type Result<T> = std::result::Result<T, PartitionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_is_infeasible() {
        let err = PartitionError::InsufficientParticipants {
            available: 1,
            desired_group_size: 2,
        };
        assert!(err.is_infeasible());
        assert!(!PartitionError::InvalidGroupSize(1).is_infeasible());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            PartitionError::InvalidGroupSize(1).to_string(),
            "desired group size must be at least 2, got 1"
        );
        let io = PartitionError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert!(io.to_string().starts_with("I/O error"));
    }
}

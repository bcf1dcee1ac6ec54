//! Partition solver configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Order in which participants are branched on.
///
/// Every order is deterministic for a given problem and seed; they only
/// differ in which of the feasible partitions is reached first and how
/// quickly dead ends surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParticipantOrder {
    /// Sorted participant identifiers.
    Lexical,
    /// Participants with the most forbidden partners first, ties broken
    /// lexically.
    #[default]
    MostConstrained,
    /// A random permutation drawn from the configured seed.
    Shuffled,
}

/// Configuration parameters for [`PartitionSolver`](super::PartitionSolver).
///
/// # Examples
///
/// ```
/// use u_partition::solver::{ParticipantOrder, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_time_limit_ms(500)
///     .with_order(ParticipantOrder::Shuffled)
///     .with_seed(7);
/// assert_eq!(config.time_limit_ms, Some(500));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// Optional wall-clock limit in milliseconds.
    ///
    /// The clock is read every `check_interval` branches, so a search may
    /// overrun the limit by that many branches before reporting
    /// `TimedOut`. `None` disables the limit (the default).
    pub time_limit_ms: Option<u64>,

    /// Number of branches between time-limit and cancellation checks.
    pub check_interval: u64,

    /// Branching order over participants.
    pub order: ParticipantOrder,

    /// Seed for [`ParticipantOrder::Shuffled`].
    ///
    /// `None` draws a fresh seed per solve, so separate runs vary.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: None,
            check_interval: 1024,
            order: ParticipantOrder::default(),
            seed: None,
        }
    }
}

impl SolverConfig {
    /// Sets the wall-clock limit.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Sets how many branches pass between clock checks.
    pub fn with_check_interval(mut self, branches: u64) -> Self {
        self.check_interval = branches;
        self
    }

    /// Sets the branching order.
    pub fn with_order(mut self, order: ParticipantOrder) -> Self {
        self.order = order;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.check_interval == 0 {
            return Err("check_interval must be at least 1".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.time_limit_ms, None);
        assert_eq!(config.check_interval, 1024);
        assert_eq!(config.order, ParticipantOrder::MostConstrained);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = SolverConfig::default()
            .with_time_limit_ms(250)
            .with_check_interval(16)
            .with_order(ParticipantOrder::Lexical)
            .with_seed(99);

        assert_eq!(config.time_limit_ms, Some(250));
        assert_eq!(config.check_interval, 16);
        assert_eq!(config.order, ParticipantOrder::Lexical);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn test_config_validation() {
        assert!(SolverConfig::default().with_check_interval(0).validate().is_err());
        assert!(SolverConfig::default().with_time_limit_ms(0).validate().is_err());
    }
}

//! Search statistics.
//!
//! Aggregates branch/conflict counters and elapsed time across solver
//! invocations into a [`RunSummary`], the single record a caller emits per
//! run.

mod report;

pub use report::{RunSummary, SearchStatistics, StatisticsReporter};

//! Statistics aggregation and run summaries.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::solver::{SolutionResult, SolverStatus};

/// Search counters accumulated over one or more solver invocations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchStatistics {
    /// Number of solver invocations recorded.
    pub solves: usize,
    /// Total group choices attempted.
    pub branches: u64,
    /// Total dead ends.
    pub conflicts: u64,
    /// Total wall-clock time.
    pub wall_time: Duration,
}

impl SearchStatistics {
    /// Creates empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the counters of one solver result.
    pub fn record(&mut self, result: &SolutionResult) {
        self.solves += 1;
        self.branches += result.branches;
        self.conflicts += result.conflicts;
        self.wall_time += result.wall_time;
    }

    /// Adds another set of statistics into this one.
    pub fn merge(&mut self, other: &SearchStatistics) {
        self.solves += other.solves;
        self.branches += other.branches;
        self.conflicts += other.conflicts;
        self.wall_time += other.wall_time;
    }
}

impl<'a> FromIterator<&'a SolutionResult> for SearchStatistics {
    fn from_iter<I: IntoIterator<Item = &'a SolutionResult>>(iter: I) -> Self {
        let mut stats = SearchStatistics::new();
        for result in iter {
            stats.record(result);
        }
        stats
    }
}

/// One record per overall run, ready for structured emission.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunSummary {
    /// `FEASIBLE` if any solution was found, `TIMED_OUT` if the run ended
    /// on a timeout without one, otherwise `INFEASIBLE`.
    pub status: SolverStatus,
    /// Number of distinct solutions found.
    pub solutions_found: usize,
    /// Total wall-clock time in seconds.
    pub wall_time: f64,
    /// Total branches.
    pub branches: u64,
    /// Total conflicts.
    pub conflicts: u64,
}

impl RunSummary {
    /// Emits the summary as a `finish` event: `info` when feasible,
    /// `warn` otherwise.
    pub fn log(&self) {
        if self.status == SolverStatus::Feasible {
            tracing::info!(
                status = %self.status,
                solutions_found = self.solutions_found,
                wall_time = self.wall_time,
                branches = self.branches,
                conflicts = self.conflicts,
                "finish"
            );
        } else {
            tracing::warn!(
                status = %self.status,
                solutions_found = self.solutions_found,
                wall_time = self.wall_time,
                branches = self.branches,
                conflicts = self.conflicts,
                "finish"
            );
        }
    }
}

/// Stateless aggregation of solver results into a [`RunSummary`].
pub struct StatisticsReporter;

impl StatisticsReporter {
    /// Sums the counters of `results` (in run order) into a summary.
    ///
    /// An empty slice, as for a run rejected before any search, is
    /// summarized as infeasible with zero counters.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_partition::solver::{SolutionResult, SolverStatus};
    /// use u_partition::stats::StatisticsReporter;
    ///
    /// let summary = StatisticsReporter::summarize(&[SolutionResult::infeasible()]);
    /// assert_eq!(summary.status, SolverStatus::Infeasible);
    /// assert_eq!(summary.solutions_found, 0);
    /// ```
    pub fn summarize(results: &[SolutionResult]) -> RunSummary {
        let stats: SearchStatistics = results.iter().collect();
        let solutions_found = results.iter().filter(|r| r.is_feasible()).count();

        let status = if solutions_found > 0 {
            SolverStatus::Feasible
        } else if results
            .last()
            .is_some_and(|r| r.status == SolverStatus::TimedOut)
        {
            SolverStatus::TimedOut
        } else {
            SolverStatus::Infeasible
        };

        RunSummary {
            status,
            solutions_found,
            wall_time: stats.wall_time.as_secs_f64(),
            branches: stats.branches,
            conflicts: stats.conflicts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::Solution;

    fn result(status: SolverStatus, branches: u64, conflicts: u64, ms: u64) -> SolutionResult {
        SolutionResult {
            status,
            solution: (status == SolverStatus::Feasible)
                .then(|| Solution::from_groups(vec![vec!["a", "b"]])),
            branches,
            conflicts,
            wall_time: Duration::from_millis(ms),
            cancelled: false,
        }
    }

    #[test]
    fn test_record_and_merge() {
        let mut a = SearchStatistics::new();
        a.record(&result(SolverStatus::Feasible, 10, 2, 5));
        let mut b = SearchStatistics::new();
        b.record(&result(SolverStatus::Infeasible, 7, 7, 3));
        a.merge(&b);

        assert_eq!(a.solves, 2);
        assert_eq!(a.branches, 17);
        assert_eq!(a.conflicts, 9);
        assert_eq!(a.wall_time, Duration::from_millis(8));
    }

    #[test]
    fn test_summary_feasible_then_infeasible() {
        let results = vec![
            result(SolverStatus::Feasible, 10, 0, 1),
            result(SolverStatus::Feasible, 20, 3, 1),
            result(SolverStatus::Infeasible, 30, 12, 2),
        ];
        let summary = StatisticsReporter::summarize(&results);

        assert_eq!(summary.status, SolverStatus::Feasible);
        assert_eq!(summary.solutions_found, 2);
        assert_eq!(summary.branches, 60);
        assert_eq!(summary.conflicts, 15);
        assert!((summary.wall_time - 0.004).abs() < 1e-9);
    }

    #[test]
    fn test_summary_timed_out() {
        let summary = StatisticsReporter::summarize(&[result(SolverStatus::TimedOut, 5, 1, 1)]);
        assert_eq!(summary.status, SolverStatus::TimedOut);
        assert_eq!(summary.solutions_found, 0);
    }

    #[test]
    fn test_summary_empty() {
        let summary = StatisticsReporter::summarize(&[]);
        assert_eq!(summary.status, SolverStatus::Infeasible);
        assert_eq!(summary.branches, 0);
        assert_eq!(summary.wall_time, 0.0);
    }
}

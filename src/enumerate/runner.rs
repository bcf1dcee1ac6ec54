//! Sequential enumeration of distinct partitions.

use std::iter::FusedIterator;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::constraints::PartitionProblem;
use crate::error::{PartitionError, Result};
use crate::solver::{
    seeded_rng, PartitionSolver, SearchSpace, Solution, SolutionResult, SolverConfig, SolverStatus,
};

/// Lazily yields up to `max_solutions` solver results, each feasible one
/// structurally different from all earlier ones.
///
/// Every call to [`next`](Iterator::next) runs one full search that
/// excludes the partitions found so far. The sequence ends after
/// `max_solutions` results, or right after the first `Infeasible` or
/// `TimedOut` result, whichever comes first. The problem is compiled
/// once, so a shuffled branching order stays fixed across the sequence.
///
/// # Examples
///
/// ```
/// use u_partition::constraints::{ForbiddenPairs, PartitionProblem};
/// use u_partition::enumerate::SolutionEnumerator;
/// use u_partition::solver::{SolverConfig, SolverStatus};
///
/// // Forbidding a-b leaves exactly two pairings of four people.
/// let forbidden: ForbiddenPairs = [("a", "b")].into_iter().collect();
/// let problem = PartitionProblem::new(["a", "b", "c", "d"], forbidden, 2);
///
/// let statuses: Vec<SolverStatus> = SolutionEnumerator::new(&problem, &SolverConfig::default(), 3)
///     .unwrap()
///     .map(|r| r.status)
///     .collect();
/// assert_eq!(
///     statuses,
///     vec![SolverStatus::Feasible, SolverStatus::Feasible, SolverStatus::Infeasible]
/// );
/// ```
pub struct SolutionEnumerator {
    space: SearchSpace,
    config: SolverConfig,
    cancel: Option<Arc<AtomicBool>>,
    max_solutions: usize,
    yielded: usize,
    found: Vec<Solution>,
    finished: bool,
}

impl SolutionEnumerator {
    /// Prepares an enumeration.
    ///
    /// # Errors
    ///
    /// - [`PartitionError::InvalidSolutionLimit`] if `max_solutions` is 0.
    /// - Any error [`PartitionSolver::solve`] reports for the problem or
    ///   configuration.
    pub fn new(
        problem: &PartitionProblem,
        config: &SolverConfig,
        max_solutions: usize,
    ) -> Result<Self> {
        if max_solutions == 0 {
            return Err(PartitionError::InvalidSolutionLimit);
        }
        PartitionSolver::check(problem, config)?;

        let mut rng = seeded_rng(config);
        Ok(Self {
            space: SearchSpace::compile(problem, config.order, &mut rng),
            config: config.clone(),
            cancel: None,
            max_solutions,
            yielded: 0,
            found: Vec::new(),
            finished: false,
        })
    }

    /// Attaches a cooperative cancellation flag shared by every search.
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Distinct solutions found so far, in discovery order.
    pub fn solutions(&self) -> &[Solution] {
        &self.found
    }

    /// Consumes the enumerator, returning the solutions found.
    pub fn into_solutions(self) -> Vec<Solution> {
        self.found
    }
}

impl Iterator for SolutionEnumerator {
    type Item = SolutionResult;

    fn next(&mut self) -> Option<SolutionResult> {
        if self.finished || self.yielded >= self.max_solutions {
            return None;
        }

        let result = self
            .space
            .search(&self.found, &self.config, self.cancel.as_deref());
        self.yielded += 1;

        match (&result.status, &result.solution) {
            (SolverStatus::Feasible, Some(solution)) => self.found.push(solution.clone()),
            _ => self.finished = true,
        }

        tracing::debug!(
            attempt = self.yielded,
            status = %result.status,
            solutions_found = self.found.len(),
            branches = result.branches,
            conflicts = result.conflicts,
            "enumeration step"
        );

        Some(result)
    }
}

impl FusedIterator for SolutionEnumerator {}

/// Runs a full enumeration and collects every result.
///
/// Shorthand for [`SolutionEnumerator::new`] followed by `collect`.
pub fn enumerate(
    problem: &PartitionProblem,
    config: &SolverConfig,
    max_solutions: usize,
) -> Result<Vec<SolutionResult>> {
    Ok(SolutionEnumerator::new(problem, config, max_solutions)?.collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ForbiddenPairs;
    use crate::solver::ParticipantOrder;
    use std::collections::HashSet;

    fn four_with_ab_forbidden() -> PartitionProblem {
        let forbidden: ForbiddenPairs = [("a", "b")].into_iter().collect();
        PartitionProblem::new(["a", "b", "c", "d"], forbidden, 2)
    }

    #[test]
    fn test_two_solutions_then_infeasible() {
        let problem = four_with_ab_forbidden();
        let mut enumerator =
            SolutionEnumerator::new(&problem, &SolverConfig::default(), 3).unwrap();

        let results: Vec<SolutionResult> = enumerator.by_ref().collect();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_feasible());
        assert!(results[1].is_feasible());
        assert_eq!(results[2].status, SolverStatus::Infeasible);
        assert_eq!(enumerator.solutions().len(), 2);
        assert_ne!(enumerator.solutions()[0], enumerator.solutions()[1]);
    }

    #[test]
    fn test_stops_at_limit() {
        let problem = four_with_ab_forbidden();
        let results = enumerate(&problem, &SolverConfig::default(), 1).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_feasible());
    }

    #[test]
    fn test_zero_limit_rejected() {
        let problem = four_with_ab_forbidden();
        let err = SolutionEnumerator::new(&problem, &SolverConfig::default(), 0).err().unwrap();
        assert!(matches!(err, PartitionError::InvalidSolutionLimit));
    }

    #[test]
    fn test_all_pairings_of_six() {
        // Six people into pairs: 5 * 3 * 1 = 15 perfect matchings.
        let names = ["a", "b", "c", "d", "e", "f"];
        let problem = PartitionProblem::new(names, ForbiddenPairs::new(), 2);
        let config = SolverConfig::default().with_order(ParticipantOrder::Lexical);
        let enumerator = SolutionEnumerator::new(&problem, &config, 100).unwrap();

        let results: Vec<SolutionResult> = enumerator.collect();
        let feasible: Vec<&Solution> = results.iter().filter_map(|r| r.solution.as_ref()).collect();
        assert_eq!(feasible.len(), 15);
        let distinct: HashSet<&Solution> = feasible.iter().copied().collect();
        assert_eq!(distinct.len(), 15);
        assert_eq!(results.last().map(|r| r.status), Some(SolverStatus::Infeasible));
    }

    #[test]
    fn test_cancelled_enumeration_ends() {
        let problem = four_with_ab_forbidden();
        let cancel = Arc::new(AtomicBool::new(true));
        let results: Vec<SolutionResult> =
            SolutionEnumerator::new(&problem, &SolverConfig::default(), 5)
                .unwrap()
                .with_cancel(cancel)
                .collect();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, SolverStatus::TimedOut);
        assert!(results[0].cancelled);
    }

    #[test]
    fn test_into_solutions() {
        let problem = four_with_ab_forbidden();
        let mut enumerator =
            SolutionEnumerator::new(&problem, &SolverConfig::default(), 2).unwrap();
        while enumerator.next().is_some() {}
        assert!(enumerator.next().is_none());
        let solutions = enumerator.into_solutions();
        assert_eq!(solutions.len(), 2);
        for s in &solutions {
            assert!(!s.shares_group("a", "b"));
        }
    }
}

//! Derivation of the active participant set and forbidden pairs.

use std::collections::BTreeSet;

use super::types::{
    ExclusionSet, ForbiddenPairs, HistoryWindow, PartitionProblem, RelationshipGraph,
};
use crate::error::{PartitionError, Result};
use crate::solver::Solution;

/// Combines the relationship graph, the exclusion list, and a window of
/// historical solutions into a [`PartitionProblem`].
///
/// The builder borrows its inputs and never mutates them; identical inputs
/// always yield identical problems.
///
/// # Example
/// ```
/// use u_partition::constraints::{
///     ConstraintBuilder, ExclusionSet, HistoryWindow, RelationshipGraph,
/// };
/// use u_partition::solver::Solution;
///
/// let mut graph = RelationshipGraph::new();
/// graph.add_edge("boss", "dev1");
/// graph.add_edge("boss", "dev2");
/// graph.add_participant("dev3");
/// graph.add_participant("away");
///
/// let exclusions: ExclusionSet = ["away".to_string()].into();
/// let history = vec![Solution::from_groups(vec![vec!["dev1", "dev3"], vec!["boss", "dev2"]])];
///
/// let problem = ConstraintBuilder::new(&graph)
///     .with_exclusions(&exclusions)
///     .with_history(&history, HistoryWindow::Last(1))
///     .build(2)
///     .unwrap();
///
/// assert_eq!(problem.len(), 4);
/// assert!(problem.forbidden.contains("dev2", "boss"));
/// assert!(problem.forbidden.contains("dev1", "dev3"));
/// ```
pub struct ConstraintBuilder<'a> {
    graph: &'a RelationshipGraph,
    exclusions: Option<&'a ExclusionSet>,
    history: &'a [Solution],
    window: HistoryWindow,
}

impl<'a> ConstraintBuilder<'a> {
    /// Creates a builder over the given relationship graph.
    pub fn new(graph: &'a RelationshipGraph) -> Self {
        Self {
            graph,
            exclusions: None,
            history: &[],
            window: HistoryWindow::Unbounded,
        }
    }

    /// Sets participants to leave out of this run.
    pub fn with_exclusions(mut self, exclusions: &'a ExclusionSet) -> Self {
        self.exclusions = Some(exclusions);
        self
    }

    /// Sets historical solutions (oldest first) and how many of the newest
    /// ones to honor.
    pub fn with_history(mut self, history: &'a [Solution], window: HistoryWindow) -> Self {
        self.history = history;
        self.window = window;
        self
    }

    /// Builds the problem for the given desired group size.
    ///
    /// # Errors
    ///
    /// - [`PartitionError::InvalidGroupSize`] if `desired_group_size < 2`.
    /// - [`PartitionError::InsufficientParticipants`] if fewer active
    ///   participants remain than one group needs.
    pub fn build(&self, desired_group_size: usize) -> Result<PartitionProblem> {
        if desired_group_size < 2 {
            return Err(PartitionError::InvalidGroupSize(desired_group_size));
        }

        let participants: BTreeSet<String> = self
            .graph
            .participants()
            .filter(|p| !self.is_excluded(p))
            .map(str::to_owned)
            .collect();

        if participants.len() < desired_group_size {
            return Err(PartitionError::InsufficientParticipants {
                available: participants.len(),
                desired_group_size,
            });
        }

        let mut forbidden = ForbiddenPairs::new();
        for (a, b) in self.graph.edges() {
            if participants.contains(a) && participants.contains(b) {
                forbidden.insert(a, b);
            }
        }
        let relationship_pairs = forbidden.len();

        let window = self.window.select(self.history);
        for solution in window {
            for group in solution.groups() {
                for (a, b) in group.pairs() {
                    if participants.contains(a) && participants.contains(b) {
                        forbidden.insert(a, b);
                    }
                }
            }
        }

        tracing::debug!(
            participants = participants.len(),
            excluded = self.graph.len() - participants.len(),
            relationship_pairs,
            historical_pairs = forbidden.len() - relationship_pairs,
            historical_solutions = window.len(),
            "constraints built"
        );

        Ok(PartitionProblem {
            participants,
            forbidden,
            desired_group_size,
        })
    }

    fn is_excluded(&self, participant: &str) -> bool {
        self.exclusions.is_some_and(|set| set.contains(participant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team() -> RelationshipGraph {
        let mut graph = RelationshipGraph::new();
        graph.add_edge("m", "a");
        graph.add_edge("m", "b");
        graph.add_participant("c");
        graph.add_participant("d");
        graph
    }

    fn history() -> Vec<Solution> {
        vec![
            Solution::from_groups(vec![vec!["a", "c"], vec!["b", "d", "m"]]),
            Solution::from_groups(vec![vec!["a", "d"], vec!["b", "c", "m"]]),
        ]
    }

    #[test]
    fn test_relationship_edges_only() {
        let graph = team();
        let problem = ConstraintBuilder::new(&graph).build(2).unwrap();

        assert_eq!(problem.len(), 5);
        assert_eq!(problem.forbidden.len(), 2);
        assert!(problem.forbidden.contains("a", "m"));
        assert!(problem.forbidden.contains("b", "m"));
        assert_eq!(problem.desired_group_size, 2);
    }

    #[test]
    fn test_exclusions_remove_participants_and_edges() {
        let graph = team();
        let exclusions: ExclusionSet = ["m".to_string(), "ghost".to_string()].into();
        let problem = ConstraintBuilder::new(&graph)
            .with_exclusions(&exclusions)
            .build(2)
            .unwrap();

        assert_eq!(problem.len(), 4);
        assert!(!problem.participants.contains("m"));
        assert!(problem.forbidden.is_empty());
    }

    #[test]
    fn test_window_zero_ignores_history() {
        let graph = team();
        let history = history();
        let problem = ConstraintBuilder::new(&graph)
            .with_history(&history, HistoryWindow::Last(0))
            .build(2)
            .unwrap();

        assert!(!problem.forbidden.contains("a", "c"));
        assert_eq!(problem.forbidden.len(), 2);
    }

    #[test]
    fn test_window_takes_newest_entries() {
        let graph = team();
        let history = history();
        let problem = ConstraintBuilder::new(&graph)
            .with_history(&history, HistoryWindow::Last(1))
            .build(2)
            .unwrap();

        // newest: {a, d}, {b, c, m}
        assert!(problem.forbidden.contains("a", "d"));
        assert!(problem.forbidden.contains("b", "c"));
        assert!(problem.forbidden.contains("c", "m"));
        assert!(!problem.forbidden.contains("a", "c"));
    }

    #[test]
    fn test_unbounded_and_oversized_window_use_everything() {
        let graph = team();
        let history = history();
        let unbounded = ConstraintBuilder::new(&graph)
            .with_history(&history, HistoryWindow::Unbounded)
            .build(2)
            .unwrap();
        let oversized = ConstraintBuilder::new(&graph)
            .with_history(&history, HistoryWindow::Last(50))
            .build(2)
            .unwrap();

        assert_eq!(unbounded, oversized);
        assert!(unbounded.forbidden.contains("a", "c"));
        assert!(unbounded.forbidden.contains("a", "d"));
    }

    #[test]
    fn test_history_with_excluded_participant() {
        let graph = team();
        let history = history();
        let exclusions: ExclusionSet = ["c".to_string()].into();
        let problem = ConstraintBuilder::new(&graph)
            .with_exclusions(&exclusions)
            .with_history(&history, HistoryWindow::Unbounded)
            .build(2)
            .unwrap();

        assert!(problem.forbidden.iter().all(|(a, b)| a != "c" && b != "c"));
    }

    #[test]
    fn test_insufficient_participants() {
        let graph = team();
        let exclusions: ExclusionSet = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        let err = ConstraintBuilder::new(&graph)
            .with_exclusions(&exclusions)
            .build(2)
            .unwrap_err();

        assert!(err.is_infeasible());
        assert!(matches!(
            err,
            PartitionError::InsufficientParticipants {
                available: 1,
                desired_group_size: 2
            }
        ));
    }

    #[test]
    fn test_invalid_group_size() {
        let graph = team();
        let err = ConstraintBuilder::new(&graph).build(1).unwrap_err();
        assert!(matches!(err, PartitionError::InvalidGroupSize(1)));
    }

    #[test]
    fn test_build_is_deterministic() {
        let graph = team();
        let history = history();
        let builder = ConstraintBuilder::new(&graph).with_history(&history, HistoryWindow::Last(2));
        assert_eq!(builder.build(3).unwrap(), builder.build(3).unwrap());
    }
}

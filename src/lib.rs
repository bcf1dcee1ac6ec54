//! Constraint-based group partitioning.
//!
//! Splits a set of participants into groups of a desired size such that
//! certain pairs never share a group: organizational relationships
//! (managers and their direct reports) and pairs that were already grouped
//! in recent runs.
//!
//! - **Constraints**: [`constraints::ConstraintBuilder`] merges the
//!   relationship graph, the exclusion list, and a window of historical
//!   solutions into a [`constraints::PartitionProblem`].
//! - **Solver**: [`solver::PartitionSolver`] searches for a valid partition
//!   by depth-first backtracking with symmetry breaking and pairwise
//!   propagation, reporting `Feasible`, `Infeasible`, or `TimedOut`.
//! - **Enumeration**: [`enumerate::SolutionEnumerator`] yields several
//!   structurally distinct partitions in one run.
//! - **Statistics**: [`stats::StatisticsReporter`] condenses branch and
//!   conflict counters into a [`stats::RunSummary`].
//! - **I/O**: [`io`] reads adjacency lists, exclusion lists, and numbered
//!   solution directories.
//!
//! # Example
//!
//! ```
//! use u_partition::constraints::{ConstraintBuilder, HistoryWindow, RelationshipGraph};
//! use u_partition::enumerate::SolutionEnumerator;
//! use u_partition::solver::SolverConfig;
//! use u_partition::stats::StatisticsReporter;
//!
//! let mut graph = RelationshipGraph::new();
//! for report in ["ana", "ben", "cy"] {
//!     graph.add_edge("mgr", report);
//! }
//! for peer in ["dee", "eli", "fay"] {
//!     graph.add_participant(peer);
//! }
//!
//! let problem = ConstraintBuilder::new(&graph)
//!     .with_history(&[], HistoryWindow::Unbounded)
//!     .build(2)
//!     .unwrap();
//!
//! let results: Vec<_> = SolutionEnumerator::new(&problem, &SolverConfig::default(), 2)
//!     .unwrap()
//!     .collect();
//! let summary = StatisticsReporter::summarize(&results);
//! assert_eq!(summary.solutions_found, 2);
//! for solution in results.iter().filter_map(|r| r.solution.as_ref()) {
//!     assert!(!solution.shares_group("mgr", "ana"));
//! }
//! ```

pub mod constraints;
pub mod enumerate;
pub mod error;
pub mod io;
pub mod solver;
pub mod stats;

pub use error::{PartitionError, Result};

//! Partition search.
//!
//! Finds an assignment of every active participant to exactly one group
//! such that no group holds a forbidden pair and group sizes follow
//! [`GroupSizing`]. The search is a depth-first backtracking walk over
//! group choices, one participant per level, with:
//!
//! - **Symmetry breaking**: groups are interchangeable, so a participant
//!   is never tried in more than one empty group.
//! - **Propagation**: full groups and groups holding a forbidden partner
//!   are skipped before branching.
//! - **Distinctness**: complete assignments equal to a previously found
//!   solution are rejected, which lets
//!   [`SolutionEnumerator`](crate::enumerate::SolutionEnumerator) produce
//!   structurally different partitions.
//!
//! Finding a partition is NP-hard in general (it generalizes graph
//! coloring); the solver reports feasibility only and makes no claim of
//! optimality.
//!
//! # References
//!
//! - Garey & Johnson (1979), "Computers and Intractability", GT15 (Partition into Cliques)
//! - Rossi, van Beek & Walsh (2006), "Handbook of Constraint Programming", ch. 4

mod config;
mod runner;
mod sizing;
mod types;

pub use config::{ParticipantOrder, SolverConfig};
pub use runner::PartitionSolver;
pub(crate) use runner::{seeded_rng, SearchSpace};
pub use sizing::GroupSizing;
pub use types::{Group, Solution, SolutionResult, SolverStatus};

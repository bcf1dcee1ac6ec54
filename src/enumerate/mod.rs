//! Multi-solution enumeration.
//!
//! Drives [`PartitionSolver`](crate::solver::PartitionSolver) repeatedly,
//! feeding every partition found back in as an exclusion, so a run can
//! offer several distinct groupings. Enumeration is strictly sequential:
//! each search depends on all the solutions before it.

mod runner;

pub use runner::{enumerate, SolutionEnumerator};

//! Constraint derivation.
//!
//! Turns the raw inputs of a run into a [`PartitionProblem`]:
//!
//! - **Active participants**: every node of the [`RelationshipGraph`] that is
//!   not in the [`ExclusionSet`].
//! - **Forbidden pairs**: relationship edges between active participants,
//!   plus every pair that shared a group in the historical solutions
//!   selected by the [`HistoryWindow`].
//!
//! History is an explicit, already-ordered input (oldest first). Reading it
//! from storage is the job of [`crate::io::SolutionStore`].

mod builder;
mod types;

pub use builder::ConstraintBuilder;
pub use types::{
    ExclusionSet, ForbiddenPairs, HistoryWindow, PartitionProblem, RelationshipGraph,
};

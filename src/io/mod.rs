//! File formats around a partitioning run.
//!
//! - **Relationship graph**: adjacency list, `participant partner*` per line
//! - **Exclusion list**: participant identifiers, one per line
//! - **Solution files**: one group per line in a numbered directory
//!
//! The solver itself never touches storage; these readers and the
//! [`SolutionStore`] produce its inputs and persist its outputs.

mod adjlist;
mod store;

pub use adjlist::{load_adjlist, load_exclusions, read_adjlist, read_exclusions};
pub use store::{read_solution, SolutionStore};

//! Solution and result types.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A set of participants placed together.
///
/// Members are kept sorted and free of duplicates, so two groups with the
/// same members compare equal regardless of construction order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Group {
    members: Vec<String>,
}

impl Group {
    /// Creates a group from any collection of identifiers.
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut members: Vec<String> = members.into_iter().map(Into::into).collect();
        members.sort();
        members.dedup();
        Self { members }
    }

    /// Members in sorted order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether `participant` belongs to this group.
    pub fn contains(&self, participant: &str) -> bool {
        self.members
            .binary_search_by(|m| m.as_str().cmp(participant))
            .is_ok()
    }

    /// Every unordered pair of members, each reported once.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.members.iter().enumerate().flat_map(move |(i, a)| {
            self.members[i + 1..]
                .iter()
                .map(move |b| (a.as_str(), b.as_str()))
        })
    }
}

/// A partition of the active participants into groups.
///
/// Stored in canonical form (groups sorted, members sorted within each
/// group), which is also the on-disk format: one group per line,
/// space-delimited.
///
/// ```
/// use u_partition::solver::Solution;
///
/// let a = Solution::from_groups(vec![vec!["d", "c"], vec!["b", "a"]]);
/// let b = Solution::from_groups(vec![vec!["a", "b"], vec!["c", "d"]]);
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "a b\nc d\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    groups: Vec<Group>,
}

impl Solution {
    /// Creates a solution from groups, dropping empty ones.
    pub fn new(groups: Vec<Group>) -> Self {
        let mut groups: Vec<Group> = groups.into_iter().filter(|g| !g.is_empty()).collect();
        groups.sort();
        Self { groups }
    }

    /// Creates a solution from nested collections of identifiers.
    pub fn from_groups<I, G, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(groups.into_iter().map(Group::new).collect())
    }

    /// Groups in canonical order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the solution has no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// All participants, group by group.
    pub fn participants(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|g| g.members().iter().map(String::as_str))
    }

    /// The group containing `participant`, if any.
    pub fn group_of(&self, participant: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.contains(participant))
    }

    /// Whether `a` and `b` were placed in the same group.
    pub fn shares_group(&self, a: &str, b: &str) -> bool {
        self.group_of(a).is_some_and(|g| g.contains(b))
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in &self.groups {
            writeln!(f, "{}", group.members().join(" "))?;
        }
        Ok(())
    }
}

/// Outcome of a single solver invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolverStatus {
    /// A valid partition was found.
    Feasible,
    /// The search space was exhausted without a valid partition.
    Infeasible,
    /// The search stopped on the time limit or a cancellation request.
    TimedOut,
}

impl SolverStatus {
    /// Upper-case name used in run summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverStatus::Feasible => "FEASIBLE",
            SolverStatus::Infeasible => "INFEASIBLE",
            SolverStatus::TimedOut => "TIMED_OUT",
        }
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a solver invocation, with search counters.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolutionResult {
    /// Outcome.
    pub status: SolverStatus,
    /// The partition, present only when `status` is `Feasible`.
    pub solution: Option<Solution>,
    /// Group choices attempted.
    pub branches: u64,
    /// Dead ends backtracked out of (including rejected duplicates).
    pub conflicts: u64,
    /// Elapsed wall-clock time.
    pub wall_time: Duration,
    /// Whether a `TimedOut` result was caused by cancellation.
    pub cancelled: bool,
}

impl SolutionResult {
    /// An infeasible result with no search performed.
    pub fn infeasible() -> Self {
        Self {
            status: SolverStatus::Infeasible,
            solution: None,
            branches: 0,
            conflicts: 0,
            wall_time: Duration::ZERO,
            cancelled: false,
        }
    }

    /// Whether a partition was found.
    pub fn is_feasible(&self) -> bool {
        self.status == SolverStatus::Feasible
    }
}

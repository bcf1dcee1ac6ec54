//! Constraint input and output types.

use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Participants removed from the current run entirely.
pub type ExclusionSet = BTreeSet<String>;

/// Undirected "may never share a group" relation over participants.
///
/// Edges are stored as given (typically manager → report) but every
/// consumer treats them symmetrically. A participant with no edges is
/// still a node of the graph and takes part in the run.
///
/// # Examples
///
/// ```
/// use u_partition::constraints::RelationshipGraph;
///
/// let mut graph = RelationshipGraph::new();
/// graph.add_edge("alice", "bob");
/// graph.add_participant("carol");
/// assert_eq!(graph.len(), 3);
/// assert_eq!(graph.edges().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RelationshipGraph {
    adjacency: BTreeMap<String, BTreeSet<String>>,
}

impl RelationshipGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a participant without any relationship.
    pub fn add_participant(&mut self, name: impl Into<String>) {
        self.adjacency.entry(name.into()).or_default();
    }

    /// Adds an edge, creating both endpoints if needed.
    ///
    /// Self-loops only register the participant.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let from = from.into();
        let to = to.into();
        self.adjacency.entry(to.clone()).or_default();
        let neighbors = self.adjacency.entry(from.clone()).or_default();
        if from != to {
            neighbors.insert(to);
        }
    }

    /// Whether the participant is a node of this graph.
    pub fn contains(&self, name: &str) -> bool {
        self.adjacency.contains_key(name)
    }

    /// All participants in lexical order.
    pub fn participants(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// All stored edges as `(from, to)`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.adjacency
            .iter()
            .flat_map(|(from, tos)| tos.iter().map(move |to| (from.as_str(), to.as_str())))
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Whether the graph has no participants.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

/// How many of the most recent historical solutions contribute forbidden
/// pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HistoryWindow {
    /// Every historical solution counts.
    #[default]
    Unbounded,
    /// Only the newest `n` solutions count; `Last(0)` ignores history.
    Last(usize),
}

impl HistoryWindow {
    /// Selects the tail of `history` (ordered oldest first) covered by this
    /// window.
    ///
    /// ```
    /// use u_partition::constraints::HistoryWindow;
    ///
    /// let history = [1, 2, 3, 4];
    /// assert_eq!(HistoryWindow::Last(2).select(&history), &[3, 4]);
    /// assert_eq!(HistoryWindow::Last(9).select(&history), &history);
    /// assert!(HistoryWindow::Last(0).select(&history).is_empty());
    /// assert_eq!(HistoryWindow::Unbounded.select(&history), &history);
    /// ```
    pub fn select<'a, T>(&self, history: &'a [T]) -> &'a [T] {
        match *self {
            HistoryWindow::Unbounded => history,
            HistoryWindow::Last(n) => &history[history.len().saturating_sub(n)..],
        }
    }
}

impl From<Option<usize>> for HistoryWindow {
    fn from(limit: Option<usize>) -> Self {
        limit.map_or(HistoryWindow::Unbounded, HistoryWindow::Last)
    }
}

/// Symmetric set of participant pairs that may not share a group.
///
/// Pairs are normalized so that `(a, b)` and `(b, a)` are the same entry.
/// Self-pairs are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ForbiddenPairs {
    pairs: BTreeSet<(String, String)>,
}

impl ForbiddenPairs {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    fn key(a: String, b: String) -> (String, String) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Forbids `a` and `b` from sharing a group.
    ///
    /// Returns `true` if the pair was newly added.
    pub fn insert(&mut self, a: impl Into<String>, b: impl Into<String>) -> bool {
        let (a, b) = (a.into(), b.into());
        if a == b {
            return false;
        }
        self.pairs.insert(Self::key(a, b))
    }

    /// Whether `a` and `b` are forbidden from sharing a group.
    pub fn contains(&self, a: &str, b: &str) -> bool {
        a != b && self.pairs.contains(&Self::key(a.to_owned(), b.to_owned()))
    }

    /// Iterates over normalized pairs `(min, max)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(a, b)| (a.as_str(), b.as_str()))
    }

    /// Number of distinct pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pair is forbidden.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<A: Into<String>, B: Into<String>> FromIterator<(A, B)> for ForbiddenPairs {
    fn from_iter<I: IntoIterator<Item = (A, B)>>(iter: I) -> Self {
        let mut pairs = ForbiddenPairs::new();
        pairs.extend(iter);
        pairs
    }
}

impl<A: Into<String>, B: Into<String>> Extend<(A, B)> for ForbiddenPairs {
    fn extend<I: IntoIterator<Item = (A, B)>>(&mut self, iter: I) {
        for (a, b) in iter {
            self.insert(a, b);
        }
    }
}

/// A fully derived partitioning problem: who takes part, who may not be
/// grouped together, and the desired group size.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartitionProblem {
    /// Active participants.
    pub participants: BTreeSet<String>,
    /// Pairs that may not share a group.
    pub forbidden: ForbiddenPairs,
    /// Desired group size (at least 2).
    pub desired_group_size: usize,
}

impl PartitionProblem {
    /// Creates a problem from raw parts.
    ///
    /// ```
    /// use u_partition::constraints::{ForbiddenPairs, PartitionProblem};
    ///
    /// let forbidden: ForbiddenPairs = [("a", "b")].into_iter().collect();
    /// let problem = PartitionProblem::new(["a", "b", "c", "d"], forbidden, 2);
    /// assert_eq!(problem.len(), 4);
    /// ```
    pub fn new<I, S>(participants: I, forbidden: ForbiddenPairs, desired_group_size: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            participants: participants.into_iter().map(Into::into).collect(),
            forbidden,
            desired_group_size,
        }
    }

    /// Number of active participants.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Whether there are no active participants.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

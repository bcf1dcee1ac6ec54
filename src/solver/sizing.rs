//! Group-size policy.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number and sizes of the groups in a partition.
///
/// With `N` participants and desired size `G`, there are `k = N / G`
/// groups. When the remainder `N % G` fits one-per-group (`N % G <= k`),
/// that many groups get `G + 1` members and the rest get `G`. Otherwise the
/// sizes are balanced: every group has `N / k` or `N / k + 1` members.
/// No group is ever smaller than `G`.
///
/// # Examples
///
/// ```
/// use u_partition::solver::GroupSizing;
///
/// let sizing = GroupSizing::new(5, 2).unwrap();
/// assert_eq!(sizing.sizes(), vec![3, 2]);
///
/// let sizing = GroupSizing::new(11, 4).unwrap();
/// assert_eq!(sizing.sizes(), vec![6, 5]);
///
/// assert!(GroupSizing::new(3, 4).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupSizing {
    /// Number of groups.
    pub num_groups: usize,
    /// Size of a regular group.
    pub base_size: usize,
    /// How many groups hold `base_size + 1` members.
    pub oversized_groups: usize,
}

impl GroupSizing {
    /// Computes the sizing, or `None` if not even one group can be filled.
    pub fn new(num_participants: usize, desired_group_size: usize) -> Option<Self> {
        if desired_group_size == 0 || num_participants < desired_group_size {
            return None;
        }
        let num_groups = num_participants / desired_group_size;
        Some(Self {
            num_groups,
            base_size: num_participants / num_groups,
            oversized_groups: num_participants % num_groups,
        })
    }

    /// Target sizes, larger groups first.
    pub fn sizes(&self) -> Vec<usize> {
        (0..self.num_groups)
            .map(|i| self.base_size + usize::from(i < self.oversized_groups))
            .collect()
    }

    /// Total number of seats.
    pub fn total(&self) -> usize {
        self.num_groups * self.base_size + self.oversized_groups
    }
}

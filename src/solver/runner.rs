//! Depth-first partition search.
//!
//! # Algorithm
//!
//! 1. Index participants lexically and build a dense forbidden-pair matrix
//! 2. Fix a branching order over participants ([`ParticipantOrder`])
//! 3. Walk an explicit stack, one frame per participant, each frame holding
//!    the next group index to try:
//!    a. Try groups in increasing index up to the first empty group
//!       (empty groups are interchangeable, so only one is ever tried)
//!    b. Reject a group that is full or holds a forbidden partner
//!    c. If no group is left, count a conflict and pop the frame
//! 4. A complete assignment that equals an excluded partition counts as a
//!    conflict and the search resumes by backtracking
//! 5. Stop on success, on exhausting the root frame (infeasible), or when
//!    the periodic clock/cancellation check fires (timed out)
//!
//! Because placements are undone in LIFO order, each group's member list is
//! a stack and removal is a `pop`.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::config::{ParticipantOrder, SolverConfig};
use super::sizing::GroupSizing;
use super::types::{Group, Solution, SolutionResult, SolverStatus};
use crate::constraints::PartitionProblem;
use crate::error::{PartitionError, Result};

/// Canonical index form of a partition: sorted member indices per group,
/// groups sorted.
type Canonical = Vec<Vec<usize>>;

/// Backtracking solver for group partitioning under pairwise exclusion.
pub struct PartitionSolver;

impl PartitionSolver {
    /// Searches for a partition that differs from every entry of `excluded`.
    ///
    /// Returns `Ok` for every search outcome, including infeasible and timed
    /// out runs. Fewer participants than `desired_group_size` is an
    /// immediate `Infeasible` result.
    ///
    /// # Errors
    ///
    /// - [`PartitionError::InvalidGroupSize`] if the problem's group size is
    ///   below 2.
    /// - [`PartitionError::Config`] if `config` fails validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_partition::constraints::{ForbiddenPairs, PartitionProblem};
    /// use u_partition::solver::{PartitionSolver, SolverConfig};
    ///
    /// let forbidden: ForbiddenPairs = [("a", "b")].into_iter().collect();
    /// let problem = PartitionProblem::new(["a", "b", "c", "d", "e"], forbidden, 2);
    ///
    /// let result = PartitionSolver::solve(&problem, &[], &SolverConfig::default()).unwrap();
    /// let solution = result.solution.unwrap();
    /// assert_eq!(solution.len(), 2);
    /// assert!(!solution.shares_group("a", "b"));
    /// ```
    pub fn solve(
        problem: &PartitionProblem,
        excluded: &[Solution],
        config: &SolverConfig,
    ) -> Result<SolutionResult> {
        Self::solve_with_cancel(problem, excluded, config, None)
    }

    /// Like [`solve`](Self::solve), with a cooperative cancellation flag.
    ///
    /// The flag is polled together with the time limit. A cancelled search
    /// reports `TimedOut` with `cancelled` set.
    pub fn solve_with_cancel(
        problem: &PartitionProblem,
        excluded: &[Solution],
        config: &SolverConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SolutionResult> {
        Self::check(problem, config)?;
        let mut rng = seeded_rng(config);
        let space = SearchSpace::compile(problem, config.order, &mut rng);
        Ok(space.search(excluded, config, cancel.as_deref()))
    }

    /// Like [`solve`](Self::solve), drawing the shuffled order from a
    /// caller-supplied random source instead of `config.seed`.
    pub fn solve_with_rng<R: Rng>(
        problem: &PartitionProblem,
        excluded: &[Solution],
        config: &SolverConfig,
        rng: &mut R,
    ) -> Result<SolutionResult> {
        Self::check(problem, config)?;
        let space = SearchSpace::compile(problem, config.order, rng);
        Ok(space.search(excluded, config, None))
    }

    pub(crate) fn check(problem: &PartitionProblem, config: &SolverConfig) -> Result<()> {
        if problem.desired_group_size < 2 {
            return Err(PartitionError::InvalidGroupSize(problem.desired_group_size));
        }
        config.validate().map_err(PartitionError::Config)
    }
}

pub(crate) fn seeded_rng(config: &SolverConfig) -> StdRng {
    StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random))
}

/// A problem compiled into index form, reusable across searches.
pub(crate) struct SearchSpace {
    names: Vec<String>,
    index: HashMap<String, usize>,
    forbidden: Vec<Vec<bool>>,
    order: Vec<usize>,
    sizing: Option<GroupSizing>,
}

impl SearchSpace {
    pub(crate) fn compile<R: Rng>(
        problem: &PartitionProblem,
        order: ParticipantOrder,
        rng: &mut R,
    ) -> Self {
        let names: Vec<String> = problem.participants.iter().cloned().collect();
        let n = names.len();
        let index: HashMap<String, usize> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        let mut forbidden = vec![vec![false; n]; n];
        for (a, b) in problem.forbidden.iter() {
            // Pairs naming inactive participants cannot constrain anything.
            if let (Some(&i), Some(&j)) = (index.get(a), index.get(b)) {
                forbidden[i][j] = true;
                forbidden[j][i] = true;
            }
        }

        let mut branching: Vec<usize> = (0..n).collect();
        match order {
            ParticipantOrder::Lexical => {}
            ParticipantOrder::MostConstrained => {
                let degree: Vec<usize> = forbidden
                    .iter()
                    .map(|row| row.iter().filter(|&&f| f).count())
                    .collect();
                branching.sort_by(|&a, &b| degree[b].cmp(&degree[a]));
            }
            ParticipantOrder::Shuffled => branching.shuffle(rng),
        }

        Self {
            sizing: GroupSizing::new(n, problem.desired_group_size),
            names,
            index,
            forbidden,
            order: branching,
        }
    }

    pub(crate) fn search(
        &self,
        excluded: &[Solution],
        config: &SolverConfig,
        cancel: Option<&AtomicBool>,
    ) -> SolutionResult {
        let start = Instant::now();
        let Some(sizing) = self.sizing else {
            tracing::debug!(
                participants = self.names.len(),
                "too few participants for one group"
            );
            return SolutionResult::infeasible();
        };

        let excluded: HashSet<Canonical> = excluded
            .iter()
            .filter_map(|s| self.canonical_of(s))
            .collect();
        let time_limit = config.time_limit_ms.map(Duration::from_millis);

        let n = self.names.len();
        let mut groups: Vec<Vec<usize>> =
            vec![Vec::with_capacity(sizing.base_size + 1); sizing.num_groups];
        let mut oversized = 0usize;
        // chosen[d]: group holding order[d]; next[d]: next group to try at depth d.
        let mut chosen: Vec<usize> = Vec::with_capacity(n);
        let mut next: Vec<usize> = Vec::with_capacity(n + 1);
        next.push(0);

        let mut branches = 0u64;
        let mut conflicts = 0u64;
        let mut next_check = 0u64;

        let outcome = loop {
            if branches >= next_check {
                next_check = branches + config.check_interval;
                let cancelled = cancel.is_some_and(|flag| flag.load(Ordering::Relaxed));
                if cancelled || time_limit.is_some_and(|limit| start.elapsed() >= limit) {
                    break (SolverStatus::TimedOut, None, cancelled);
                }
            }

            let depth = chosen.len();
            if depth == n {
                let candidate = canonical(&groups);
                if !excluded.contains(&candidate) {
                    break (SolverStatus::Feasible, Some(self.solution_of(&candidate)), false);
                }
                conflicts += 1;
            } else {
                let p = self.order[depth];
                let first_empty = groups
                    .iter()
                    .position(Vec::is_empty)
                    .unwrap_or(sizing.num_groups);
                let upper = (first_empty + 1).min(sizing.num_groups);

                let mut placed = None;
                while next[depth] < upper {
                    let g = next[depth];
                    next[depth] += 1;
                    branches += 1;
                    if self.accepts(&groups[g], p, &sizing, oversized) {
                        placed = Some(g);
                        break;
                    }
                }

                if let Some(g) = placed {
                    groups[g].push(p);
                    if groups[g].len() == sizing.base_size + 1 {
                        oversized += 1;
                    }
                    chosen.push(g);
                    next.push(0);
                    continue;
                }
                conflicts += 1;
            }

            // Backtrack: drop this frame and undo the parent's placement.
            next.pop();
            match chosen.pop() {
                Some(g) => {
                    if groups[g].len() == sizing.base_size + 1 {
                        oversized -= 1;
                    }
                    groups[g].pop();
                }
                None => break (SolverStatus::Infeasible, None, false),
            }
        };

        let (status, solution, cancelled) = outcome;
        let wall_time = start.elapsed();
        tracing::debug!(
            participants = n,
            groups = sizing.num_groups,
            excluded = excluded.len(),
            %status,
            branches,
            conflicts,
            wall_time = wall_time.as_secs_f64(),
            cancelled,
            "search finished"
        );

        SolutionResult {
            status,
            solution,
            branches,
            conflicts,
            wall_time,
            cancelled,
        }
    }

    /// Capacity and forbidden-pair check for placing `p` into `group`.
    fn accepts(&self, group: &[usize], p: usize, sizing: &GroupSizing, oversized: usize) -> bool {
        let has_room = group.len() < sizing.base_size
            || (group.len() == sizing.base_size && oversized < sizing.oversized_groups);
        has_room && !group.iter().any(|&m| self.forbidden[p][m])
    }

    fn canonical_of(&self, solution: &Solution) -> Option<Canonical> {
        let groups = solution
            .groups()
            .iter()
            .map(|g| {
                g.members()
                    .iter()
                    .map(|m| self.index.get(m).copied())
                    .collect::<Option<Vec<usize>>>()
            })
            .collect::<Option<Vec<Vec<usize>>>>()?;
        Some(canonical(&groups))
    }

    fn solution_of(&self, canonical: &Canonical) -> Solution {
        Solution::new(
            canonical
                .iter()
                .map(|g| Group::new(g.iter().map(|&i| self.names[i].as_str())))
                .collect(),
        )
    }
}

fn canonical(groups: &[Vec<usize>]) -> Canonical {
    let mut out: Canonical = groups
        .iter()
        .filter(|g| !g.is_empty())
        .map(|g| {
            let mut g = g.clone();
            g.sort_unstable();
            g
        })
        .collect();
    out.sort();
    out
}

//! The A* search loop. It is generic over the node type so that it does not depend on how the
//! grid stores its cells; the grid only has to provide successors with their step costs and a
//! heuristic.
use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::{debug, warn};
use num_traits::Zero;
use std::hash::Hash;
use std::ops::ControlFlow;

use crate::frontier::Frontier;
use crate::path::{reverse_path, Path};

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Parent index used for the start node, which has no predecessor.
pub(crate) const NO_PARENT: usize = usize::MAX;

/// Per-node bookkeeping: the predecessor on the best known route, the cost of that route
/// (g) and the cost plus heuristic (f).
#[derive(Clone, Copy, Debug)]
pub(crate) struct Scores<C> {
    pub parent: usize,
    pub g: C,
    pub f: C,
}

/// Where a search is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    Running,
    Succeeded,
    /// The frontier was exhausted without reaching the goal.
    Failed,
    /// The progress callback asked the search to stop.
    Cancelled,
}

/// Counters collected during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes taken from the frontier and expanded.
    pub expanded: usize,
    /// Times a cheaper route to a node was recorded.
    pub relaxed: usize,
}

/// Read-only view of the search handed to the progress callback after every expansion.
pub struct Progress<'a, N, C> {
    current: &'a N,
    scores: &'a FxIndexMap<N, Scores<C>>,
    open_set: &'a FxHashSet<usize>,
    stats: SearchStats,
}

impl<'a, N: Eq + Hash, C: Copy> Progress<'a, N, C> {
    /// The node that was just expanded.
    pub fn current(&self) -> &'a N {
        self.current
    }
    pub fn status(&self) -> SearchStatus {
        SearchStatus::Running
    }
    pub fn stats(&self) -> SearchStats {
        self.stats
    }
    /// Number of nodes waiting in the open set.
    pub fn open_len(&self) -> usize {
        self.open_set.len()
    }
    pub fn is_open(&self, node: &N) -> bool {
        self.scores
            .get_index_of(node)
            .is_some_and(|ix| self.open_set.contains(&ix))
    }
    /// Best known cost from the start, [None] if the node has not been reached yet.
    pub fn g_score(&self, node: &N) -> Option<C> {
        self.scores.get(node).map(|s| s.g)
    }
    /// Every node reached so far, in discovery order.
    pub fn discovered(&self) -> impl Iterator<Item = &'a N> {
        self.scores.keys()
    }
}

/// How a search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome<N, C> {
    Found { path: Path<N, C>, stats: SearchStats },
    NoPath { stats: SearchStats },
    Cancelled { stats: SearchStats },
}

impl<N, C> SearchOutcome<N, C> {
    pub fn status(&self) -> SearchStatus {
        match self {
            SearchOutcome::Found { .. } => SearchStatus::Succeeded,
            SearchOutcome::NoPath { .. } => SearchStatus::Failed,
            SearchOutcome::Cancelled { .. } => SearchStatus::Cancelled,
        }
    }
    pub fn stats(&self) -> SearchStats {
        match self {
            SearchOutcome::Found { stats, .. }
            | SearchOutcome::NoPath { stats }
            | SearchOutcome::Cancelled { stats } => *stats,
        }
    }
    pub fn path(&self) -> Option<&Path<N, C>> {
        match self {
            SearchOutcome::Found { path, .. } => Some(path),
            _ => None,
        }
    }
    pub fn into_path(self) -> Option<Path<N, C>> {
        match self {
            SearchOutcome::Found { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Runs A* from `start` to `goal`.
///
/// `successors` yields the neighbours of a node together with the cost of stepping onto them and
/// `heuristic` estimates the remaining cost to the goal; it must not overestimate for the
/// returned path to be optimal. `progress` is called synchronously after every expansion and can
/// return [ControlFlow::Break] to abandon the search.
pub fn astar<N, C, FN, IN, FH, FP>(
    start: &N,
    goal: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut progress: FP,
) -> SearchOutcome<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FP: FnMut(&Progress<N, C>) -> ControlFlow<()>,
{
    let mut stats = SearchStats::default();
    let mut frontier = Frontier::new();
    let mut open_set: FxHashSet<usize> = FxHashSet::default();
    let mut scores: FxIndexMap<N, Scores<C>> = FxIndexMap::default();

    let start_f = heuristic(start);
    scores.insert(
        start.clone(),
        Scores {
            parent: NO_PARENT,
            g: Zero::zero(),
            f: start_f,
        },
    );
    frontier.push(start_f, 0);
    open_set.insert(0);

    while let Some((f, index)) = frontier.pop() {
        let Some((node, &Scores { g, f: best_f, .. })) = scores.get_index(index) else {
            continue;
        };
        // A node is pushed again every time a cheaper route to it is found. Only the entry
        // carrying its current estimate is expanded; older ones are skipped.
        if f > best_f || !open_set.remove(&index) {
            continue;
        }
        if node == goal {
            let nodes = reverse_path(&scores, |s| s.parent, index);
            return SearchOutcome::Found {
                path: Path::new(nodes, g),
                stats,
            };
        }
        let current = node.clone();
        for (successor, move_cost) in successors(&current) {
            let tentative_g = g + move_cost;
            let n = match scores.entry(successor) {
                Vacant(e) => {
                    let h = heuristic(e.key());
                    let n = e.index();
                    e.insert(Scores {
                        parent: index,
                        g: tentative_g,
                        f: tentative_g + h,
                    });
                    n
                }
                Occupied(mut e) => {
                    if tentative_g < e.get().g {
                        let h = heuristic(e.key());
                        let n = e.index();
                        e.insert(Scores {
                            parent: index,
                            g: tentative_g,
                            f: tentative_g + h,
                        });
                        n
                    } else {
                        continue;
                    }
                }
            };
            stats.relaxed += 1;
            frontier.push(scores[n].f, n);
            open_set.insert(n);
        }
        stats.expanded += 1;

        let view = Progress {
            current: &current,
            scores: &scores,
            open_set: &open_set,
            stats,
        };
        if progress(&view).is_break() {
            debug!("Search cancelled after {} expansions", stats.expanded);
            return SearchOutcome::Cancelled { stats };
        }
    }
    warn!(
        "Frontier exhausted after {} expansions without reaching the goal",
        stats.expanded
    );
    SearchOutcome::NoPath { stats }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A line graph 0 - 1 - 2 - ... - 9 with unit steps.
    fn line_successors(n: &i32) -> Vec<(i32, u32)> {
        [n - 1, n + 1]
            .into_iter()
            .filter(|m| (0..10).contains(m))
            .map(|m| (m, 1))
            .collect()
    }

    #[test]
    fn equal_start_goal() {
        let mut calls = 0;
        let outcome = astar(
            &3,
            &3,
            line_successors,
            |_| 0,
            |_| {
                calls += 1;
                ControlFlow::Continue(())
            },
        );
        assert_eq!(outcome.status(), SearchStatus::Succeeded);
        assert_eq!(outcome.stats().relaxed, 0);
        assert_eq!(outcome.path().unwrap().nodes(), &[3]);
        assert_eq!(calls, 0);
    }

    #[test]
    fn walks_the_line() {
        let outcome = astar(
            &0,
            &9,
            line_successors,
            |n| (9 - n) as u32,
            |_| ControlFlow::Continue(()),
        );
        let path = outcome.into_path().unwrap();
        assert_eq!(path.nodes(), (0..10).collect::<Vec<_>>().as_slice());
        assert_eq!(path.cost(), 9);
    }

    #[test]
    fn unreachable_goal_fails() {
        let outcome = astar(
            &0,
            &42,
            line_successors,
            |_| 0,
            |_| ControlFlow::Continue(()),
        );
        assert_eq!(outcome.status(), SearchStatus::Failed);
        assert_eq!(outcome.stats().expanded, 10);
        assert!(outcome.path().is_none());
    }

    #[test]
    fn callback_can_cancel() {
        let mut calls = 0;
        let outcome = astar(
            &0,
            &9,
            line_successors,
            |_| 0,
            |p| {
                calls += 1;
                assert_eq!(p.status(), SearchStatus::Running);
                if p.stats().expanded == 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            },
        );
        assert_eq!(outcome.status(), SearchStatus::Cancelled);
        assert_eq!(calls, 3);
    }

    /// A cheap detour discovered after an expensive direct edge must win.
    #[test]
    fn relaxes_to_cheaper_route() {
        // 0 -> 2 costs 10, 0 -> 1 -> 2 costs 2
        let successors = |n: &u8| -> Vec<(u8, u32)> {
            match n {
                0 => vec![(2, 10), (1, 1)],
                1 => vec![(2, 1)],
                _ => vec![],
            }
        };
        let outcome = astar(&0u8, &2u8, successors, |_| 0, |_| ControlFlow::Continue(()));
        let path = outcome.into_path().unwrap();
        assert_eq!(path.nodes(), &[0, 1, 2]);
        assert_eq!(path.cost(), 2);
    }

    #[test]
    fn progress_exposes_open_set() {
        let mut seen_open = false;
        astar(
            &0,
            &9,
            line_successors,
            |_| 0,
            |p| {
                if *p.current() == 0 {
                    assert!(p.is_open(&1));
                    assert!(!p.is_open(&0));
                    assert_eq!(p.g_score(&1), Some(1));
                    assert_eq!(p.g_score(&5), None);
                    assert_eq!(p.open_len(), 1);
                    assert_eq!(p.discovered().count(), 2);
                    seen_open = true;
                }
                ControlFlow::Continue(())
            },
        );
        assert!(seen_open);
    }
}

//! A* search over board states.
//!
//! Key design points:
//! - Search nodes live in an arena (`Vec`) and point at their parent by
//!   index, so path reconstruction is a backward walk to the root
//! - The frontier is a binary heap of `(f, insertion order)` keys; ties on
//!   `f` go to the node queued first, which keeps paths reproducible
//! - FxHashSet for the visited set, keyed by the tile array itself
//! - A state is marked visited when it is expanded, not when it is queued,
//!   so the frontier may briefly hold several copies of one state

use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::BinaryHeap;
use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::{Puzzle, State};
use crate::config::SearchConfig;
use crate::error::SolveError;
use crate::moves::Direction;

/// A node in the search tree.
#[derive(Clone, Copy, Debug)]
struct SearchNode<const CELLS: usize> {
    state: State<CELLS>,
    /// Moves from the start.
    g: u32,
    /// Heuristic cost of `state`.
    h: u32,
    /// Move that produced this node; `None` for the root.
    direction: Option<Direction>,
    /// Arena index of the parent; `None` for the root.
    parent: Option<usize>,
}

/// Frontier key: lowest `f` first, then lowest arena index.
type FrontierEntry = (Reverse<u32>, Reverse<usize>);

/// Counters collected during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes taken off the frontier and examined (stale entries excluded).
    pub iterations: usize,
    /// Nodes pushed onto the frontier, including the root.
    pub generated: usize,
    /// Largest frontier size observed.
    pub peak_frontier: usize,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} iterations, {} nodes generated, peak frontier {}",
            self.iterations, self.generated, self.peak_frontier
        )
    }
}

/// Where the search stands after a call to [`Search::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Searching,
    GoalFound,
    Exhausted,
}

/// One board on the solution path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathStep<const CELLS: usize> {
    pub state: State<CELLS>,
    /// Heuristic cost of `state`.
    pub cost: u32,
    /// Move that led here; `None` for the start.
    pub direction: Option<Direction>,
}

/// A shortest path from start to goal.
#[derive(Clone, Debug)]
pub struct Solution<const CELLS: usize> {
    steps: Vec<PathStep<CELLS>>,
    stats: SearchStats,
}

impl<const CELLS: usize> Solution<CELLS> {
    /// Boards from start to goal, inclusive.
    pub fn steps(&self) -> &[PathStep<CELLS>] {
        &self.steps
    }

    pub fn moves(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.steps.iter().filter_map(|step| step.direction)
    }

    /// Direction labels concatenated in move order, e.g. `"LDDR"`.
    pub fn path(&self) -> String {
        self.directions().map(Direction::label).collect()
    }

    pub fn start(&self) -> &State<CELLS> {
        &self.steps[0].state
    }

    pub fn goal(&self) -> &State<CELLS> {
        &self.steps[self.steps.len() - 1].state
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

/// State of one A* run.
///
/// Owns the node arena, frontier and visited set for the lifetime of a
/// single search; all of it is dropped with the `Search`.
pub struct Search<'p, const SIDE: usize, const CELLS: usize> {
    puzzle: &'p Puzzle<SIDE, CELLS>,
    config: SearchConfig,
    nodes: Vec<SearchNode<CELLS>>,
    frontier: BinaryHeap<FrontierEntry>,
    visited: FxHashSet<State<CELLS>>,
    /// Lowest `g` queued per state; only filled when pruning duplicates.
    best_g: FxHashMap<State<CELLS>, u32>,
    goal_node: Option<usize>,
    stats: SearchStats,
}

impl<'p, const SIDE: usize, const CELLS: usize> Search<'p, SIDE, CELLS> {
    /// Starts a search with only the root node on the frontier.
    pub fn new(puzzle: &'p Puzzle<SIDE, CELLS>, start: State<CELLS>, config: SearchConfig) -> Self {
        let mut search = Self {
            puzzle,
            config,
            nodes: Vec::new(),
            frontier: BinaryHeap::new(),
            visited: FxHashSet::default(),
            best_g: FxHashMap::default(),
            goal_node: None,
            stats: SearchStats::default(),
        };

        let root = SearchNode {
            state: start,
            g: 0,
            h: puzzle.cost(&start),
            direction: None,
            parent: None,
        };
        log::debug!(
            "starting search from {} (h = {}, budget {} iterations)",
            start,
            root.h,
            config.max_iterations
        );
        if config.prune_duplicates {
            search.best_g.insert(start, 0);
        }
        search.push(root);

        search
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Runs one iteration: pop the cheapest node, test it, expand it.
    ///
    /// Once a terminal state is reached, further calls return it again
    /// without doing any work.
    pub fn step(&mut self) -> Progress {
        if self.goal_node.is_some() {
            return Progress::GoalFound;
        }
        if self.stats.iterations >= self.config.max_iterations {
            return Progress::Exhausted;
        }
        let Some(current) = self.pop_unvisited() else {
            return Progress::Exhausted;
        };
        self.stats.iterations += 1;

        let SearchNode { state, g, h, .. } = self.nodes[current];
        if h == 0 {
            log::info!(
                "goal reached in {} moves ({})",
                g,
                self.stats
            );
            self.goal_node = Some(current);
            return Progress::GoalFound;
        }

        self.visited.insert(state);
        log::trace!("expanding {} (g = {}, h = {})", state, g, h);

        let puzzle = self.puzzle;
        let child_g = g + 1;
        for successor in puzzle.expand(&state) {
            if self.visited.contains(&successor.state) {
                continue;
            }
            if self.config.prune_duplicates && !self.improves(successor.state, child_g) {
                continue;
            }
            self.push(SearchNode {
                state: successor.state,
                g: child_g,
                h: successor.cost,
                direction: Some(successor.direction),
                parent: Some(current),
            });
        }

        Progress::Searching
    }

    /// Drives the search to a terminal state.
    pub fn run(mut self) -> Result<Solution<CELLS>, SolveError> {
        loop {
            match self.step() {
                Progress::Searching => {}
                Progress::GoalFound => break,
                Progress::Exhausted => {
                    log::warn!("no solution found ({})", self.stats);
                    return Err(SolveError::Unsolved {
                        iterations: self.stats.iterations,
                    });
                }
            }
        }

        self.solution().ok_or(SolveError::Unsolved {
            iterations: self.stats.iterations,
        })
    }

    /// The path to the goal, once [`Progress::GoalFound`] has been reported.
    pub fn solution(&self) -> Option<Solution<CELLS>> {
        let goal = self.goal_node?;
        let mut steps = Vec::new();
        let mut cursor = Some(goal);

        // walk parent links back to the root, then flip into start->goal order
        while let Some(index) = cursor {
            let node = &self.nodes[index];
            steps.push(PathStep {
                state: node.state,
                cost: node.h,
                direction: node.direction,
            });
            cursor = node.parent;
        }
        steps.reverse();

        Some(Solution {
            steps,
            stats: self.stats,
        })
    }

    fn push(&mut self, node: SearchNode<CELLS>) {
        let index = self.nodes.len();
        let f = node.g + node.h;
        self.nodes.push(node);
        self.frontier.push((Reverse(f), Reverse(index)));
        self.stats.generated += 1;
        self.stats.peak_frontier = self.stats.peak_frontier.max(self.frontier.len());
    }

    /// Pops frontier entries until one whose state is not yet expanded.
    fn pop_unvisited(&mut self) -> Option<usize> {
        while let Some((_, Reverse(index))) = self.frontier.pop() {
            if !self.visited.contains(&self.nodes[index].state) {
                return Some(index);
            }
        }
        None
    }

    /// Records `g` for `state` if it beats every queued copy.
    fn improves(&mut self, state: State<CELLS>, g: u32) -> bool {
        match self.best_g.entry(state) {
            Entry::Occupied(mut best) => {
                if *best.get() <= g {
                    return false;
                }
                best.insert(g);
                true
            }
            Entry::Vacant(slot) => {
                slot.insert(g);
                true
            }
        }
    }
}

/// Finds a shortest move sequence from `start` to `goal`.
///
/// `CELLS` must equal `SIDE^2`; any other pair is rejected at compile time.
pub fn solve<const SIDE: usize, const CELLS: usize>(
    start: &State<CELLS>,
    goal: &State<CELLS>,
    config: &SearchConfig,
) -> Result<Solution<CELLS>, SolveError> {
    Puzzle::<SIDE, CELLS>::with_goal(*goal).solve(start, config)
}

impl<const SIDE: usize, const CELLS: usize> Puzzle<SIDE, CELLS> {
    /// Finds a shortest move sequence from `start` to this puzzle's goal.
    pub fn solve(
        &self,
        start: &State<CELLS>,
        config: &SearchConfig,
    ) -> Result<Solution<CELLS>, SolveError> {
        Search::new(self, *start, *config).run()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::board::{EIGHT_PUZZLE, EIGHT_PUZZLE_START, THREE_PUZZLE};
    use crate::moves::slide;
    use proptest::prelude::*;

    /// Optimal move count by plain breadth-first search.
    fn bfs_distance(start: State<9>) -> Option<usize> {
        let goal = *EIGHT_PUZZLE.goal();
        let mut depth: FxHashMap<State<9>, usize> = FxHashMap::default();
        let mut queue = VecDeque::from([start]);
        depth.insert(start, 0);

        while let Some(state) = queue.pop_front() {
            let d = depth[&state];
            if state == goal {
                return Some(d);
            }
            for successor in EIGHT_PUZZLE.expand(&state) {
                if let Entry::Vacant(slot) = depth.entry(successor.state) {
                    slot.insert(d + 1);
                    queue.push_back(successor.state);
                }
            }
        }
        None
    }

    fn start_state() -> State<9> {
        State::new(EIGHT_PUZZLE_START).unwrap()
    }

    /// Goal with tiles 1 and 2 swapped: odd permutation, unreachable.
    fn unsolvable_state() -> State<9> {
        State::new([2, 1, 3, 4, 5, 6, 7, 8, 0]).unwrap()
    }

    fn assert_valid_path(solution: &Solution<9>, start: &State<9>) {
        let steps = solution.steps();
        assert_eq!(&steps[0].state, start);
        assert_eq!(steps[0].direction, None);
        assert_eq!(solution.goal(), EIGHT_PUZZLE.goal());
        assert_eq!(steps[steps.len() - 1].cost, 0);
        assert_eq!(solution.moves(), steps.len() - 1);

        for pair in steps.windows(2) {
            let direction = pair[1].direction.expect("non-root step has a direction");
            assert_eq!(slide::<3, 9>(&pair[0].state, direction), Some(pair[1].state));
            assert_eq!(pair[1].cost, EIGHT_PUZZLE.cost(&pair[1].state));
        }
    }

    #[test]
    fn test_solves_classic_start_optimally() {
        let start = start_state();
        let solution = EIGHT_PUZZLE.solve(&start, &SearchConfig::default()).unwrap();

        assert_eq!(solution.moves(), 26);
        assert_eq!(Some(solution.moves()), bfs_distance(start));
        assert_valid_path(&solution, &start);
    }

    #[test]
    fn test_tie_break_is_reproducible() {
        let start = start_state();
        let solution = EIGHT_PUZZLE.solve(&start, &SearchConfig::default()).unwrap();
        assert_eq!(solution.path(), "LDDRULURDLULDDRUULDDRURULL");
        assert_eq!(solution.path().len(), solution.moves());
    }

    #[test]
    fn test_pruning_keeps_optimal_length() {
        let start = start_state();
        let config = SearchConfig::default().with_prune_duplicates(true);
        let solution = EIGHT_PUZZLE.solve(&start, &config).unwrap();

        assert_eq!(solution.moves(), 26);
        assert_valid_path(&solution, &start);
    }

    #[test]
    fn test_start_equal_to_goal() {
        let goal = *EIGHT_PUZZLE.goal();
        let solution = EIGHT_PUZZLE.solve(&goal, &SearchConfig::default()).unwrap();

        assert_eq!(solution.moves(), 0);
        assert_eq!(solution.path(), "");
        assert_eq!(solution.start(), solution.goal());
        assert_eq!(solution.stats().iterations, 1);
    }

    #[test]
    fn test_free_solve_with_custom_goal() {
        let goal = start_state();
        let start = *EIGHT_PUZZLE.goal();
        let solution = solve::<3, 9>(&start, &goal, &SearchConfig::default()).unwrap();

        assert_eq!(solution.moves(), 26);
        assert_eq!(solution.goal(), &goal);
    }

    #[test]
    fn test_free_solve_on_two_by_two() {
        let start = State::new([0, 3, 2, 1]).unwrap();
        let goal = *THREE_PUZZLE.goal();
        let solution = solve::<2, 4>(&start, &goal, &SearchConfig::default()).unwrap();

        assert_eq!(solution.moves(), 6);
        assert_eq!(solution.goal(), &goal);
    }

    #[test]
    fn test_unsolvable_hits_budget() {
        let config = SearchConfig::default().with_max_iterations(50);
        let result = EIGHT_PUZZLE.solve(&unsolvable_state(), &config);
        assert_eq!(result.unwrap_err(), SolveError::Unsolved { iterations: 50 });
    }

    #[test]
    fn test_unsolvable_empties_frontier() {
        // half of the 9! permutations are reachable from any state
        let config = SearchConfig::default().with_max_iterations(1_000_000);
        let result = EIGHT_PUZZLE.solve(&unsolvable_state(), &config);
        assert_eq!(
            result.unwrap_err(),
            SolveError::Unsolved { iterations: 181_440 }
        );
    }

    #[test]
    fn test_zero_budget_fails_immediately() {
        let config = SearchConfig::default().with_max_iterations(0);
        let result = EIGHT_PUZZLE.solve(EIGHT_PUZZLE.goal(), &config);
        assert_eq!(result.unwrap_err(), SolveError::Unsolved { iterations: 0 });
    }

    #[test]
    fn test_step_reports_terminal_state_repeatedly() {
        let start = start_state();
        let mut search = Search::new(&EIGHT_PUZZLE, start, SearchConfig::default());

        let mut steps = 0;
        while search.step() == Progress::Searching {
            steps += 1;
        }
        assert_eq!(search.step(), Progress::GoalFound);
        assert_eq!(search.stats().iterations, steps + 1);
        assert_eq!(search.solution().map(|s| s.moves()), Some(26));
    }

    #[test]
    fn test_solution_is_none_before_goal() {
        let search = Search::new(&EIGHT_PUZZLE, start_state(), SearchConfig::default());
        assert!(search.solution().is_none());
        assert_eq!(search.stats().generated, 1);
    }

    #[test]
    fn test_three_puzzle_unreachable_half() {
        // a 2x2 board has 12 reachable states per parity class
        let start = State::new([2, 1, 3, 0]).unwrap();
        let result = THREE_PUZZLE.solve(&start, &SearchConfig::default());
        assert_eq!(result.unwrap_err(), SolveError::Unsolved { iterations: 12 });
    }

    fn reachable_state() -> impl Strategy<Value = State<9>> {
        prop::collection::vec(0usize..4, 0..30).prop_map(|walk| {
            walk.into_iter().fold(*EIGHT_PUZZLE.goal(), |state, pick| {
                slide::<3, 9>(&state, Direction::ALL[pick]).unwrap_or(state)
            })
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn test_matches_breadth_first_length(start in reachable_state()) {
            let solution = EIGHT_PUZZLE.solve(&start, &SearchConfig::default()).unwrap();
            prop_assert_eq!(Some(solution.moves()), bfs_distance(start));
            assert_valid_path(&solution, &start);
        }
    }
}

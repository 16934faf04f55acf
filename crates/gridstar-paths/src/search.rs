//! The frame-steppable A* engine.
//!
//! A [`SearchEngine`] is bound to one [`Grid`] and one [`SearchConfig`].
//! Each call to [`set_endpoints`](SearchEngine::set_endpoints) starts a fresh
//! search; [`step_once`](SearchEngine::step_once) settles one cell and
//! returns control, so a caller can animate, single-step or batch-run the
//! search as it likes.

use gridstar_core::Point;

use crate::config::{ConfigError, SearchConfig};
use crate::frontier::Frontier;
use crate::grid::Grid;
use crate::node::{CellState, NO_PARENT, Node, UNREACHED};

/// Lifecycle of a [`SearchEngine`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SearchState {
    /// No endpoints have been accepted yet.
    Uninitialized,
    /// Endpoints set, no step taken.
    Ready,
    /// At least one step taken, no outcome yet.
    Running,
    /// The target was settled and the path is available.
    Succeeded,
    /// The frontier ran dry: the target is unreachable.
    Failed,
}

impl SearchState {
    /// Whether the search has an outcome and further steps do nothing.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Outcome of a single step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StepStatus {
    InProgress,
    Succeeded,
    Failed,
}

/// Work counters for the current search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Cells taken off the frontier.
    pub steps: usize,
    /// Settled cells whose neighbours were expanded.
    pub expanded: usize,
    /// Neighbour updates that lowered a G score.
    pub relaxations: usize,
}

/// Best-first A* search over a [`Grid`].
pub struct SearchEngine<'a> {
    grid: &'a Grid,
    config: SearchConfig,
    state: SearchState,
    start: Option<Point>,
    target: Option<Point>,
    nodes: Vec<Node>,
    generation: u32,
    frontier: Frontier,
    path: Option<Vec<Point>>,
    stats: SearchStats,
    // scratch buffer for neighbour queries
    nbuf: Vec<Point>,
}

impl<'a> SearchEngine<'a> {
    /// Bind an engine to `grid` with a validated `config`.
    pub fn new(grid: &'a Grid, config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            grid,
            config,
            state: SearchState::Uninitialized,
            start: None,
            target: None,
            nodes: vec![Node::default(); grid.len()],
            generation: 0,
            frontier: Frontier::default(),
            path: None,
            stats: SearchStats::default(),
            nbuf: Vec::with_capacity(4),
        })
    }

    #[inline]
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    #[inline]
    pub fn target(&self) -> Option<Point> {
        self.target
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Start a new search from `start` to `target`.
    ///
    /// Returns `false`, leaving the engine exactly as it was, if either point
    /// is outside the grid or on a wall. Otherwise all bookkeeping from any
    /// previous search is discarded, the frontier holds only `start`, and the
    /// engine is [`Ready`](SearchState::Ready).
    pub fn set_endpoints(&mut self, start: Point, target: Point) -> bool {
        let Some(si) = self.grid.idx(start) else {
            log::debug!("rejected start {start}: out of bounds");
            return false;
        };
        if !self.grid.contains(target) {
            log::debug!("rejected target {target}: out of bounds");
            return false;
        }
        if self.grid.is_wall(start) || self.grid.is_wall(target) {
            log::debug!("rejected endpoints {start} -> {target}: wall");
            return false;
        }

        // Bump generation to lazily invalidate all nodes.
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stamps from 2^32 searches ago would look current.
            self.nodes.fill(Node::default());
            self.generation = 1;
        }
        let cur_gen = self.generation;

        self.frontier.clear();
        self.path = None;
        self.stats = SearchStats::default();
        self.start = Some(start);
        self.target = Some(target);

        let h = self.config.heuristic.estimate(start, target);
        let node = &mut self.nodes[si];
        node.touch(cur_gen);
        node.g = 0.0;
        node.h = h;
        node.f = h * self.config.heuristic_weight;
        self.frontier.insert(si, node);

        self.state = SearchState::Ready;
        log::debug!(
            "search {start} -> {target} ready on {}x{} grid",
            self.grid.width(),
            self.grid.height()
        );
        true
    }

    /// Settle one cell.
    ///
    /// Returns [`StepStatus::Failed`] if the frontier is empty,
    /// [`StepStatus::Succeeded`] if the settled cell is the target, and
    /// [`StepStatus::InProgress`] otherwise. Once the search has finished,
    /// further calls do nothing and repeat the outcome.
    ///
    /// # Panics
    ///
    /// Panics if no endpoints have been set.
    pub fn step_once(&mut self) -> StepStatus {
        match self.state {
            SearchState::Uninitialized => {
                panic!("SearchEngine::step_once called before set_endpoints")
            }
            SearchState::Succeeded => return StepStatus::Succeeded,
            SearchState::Failed => return StepStatus::Failed,
            SearchState::Ready | SearchState::Running => {}
        }
        let (Some(start), Some(target)) = (self.start, self.target) else {
            unreachable!("endpoints are set in every state but Uninitialized");
        };

        let Some(ci) = self.frontier.pop(&mut self.nodes) else {
            self.state = SearchState::Failed;
            log::debug!(
                "search {start} -> {target} failed: frontier exhausted after {} steps",
                self.stats.steps
            );
            return StepStatus::Failed;
        };
        self.stats.steps += 1;
        self.nodes[ci].visited = true;

        let current = self.grid.point(ci);
        log::trace!("settled {current} g={}", self.nodes[ci].g);

        if current == target {
            let path = self.trace_back(ci);
            log::debug!(
                "search {start} -> {target} succeeded: {} cells, cost {}, {} steps",
                path.len(),
                self.nodes[ci].g,
                self.stats.steps
            );
            self.path = Some(path);
            self.state = SearchState::Succeeded;
            return StepStatus::Succeeded;
        }

        self.expand(ci, false);
        if self.config.allow_diagonal {
            self.expand(ci, true);
        }
        self.stats.expanded += 1;
        self.state = SearchState::Running;
        StepStatus::InProgress
    }

    /// Step until the search succeeds or fails.
    ///
    /// # Panics
    ///
    /// Panics if no endpoints have been set.
    pub fn run_to_completion(&mut self) -> StepStatus {
        loop {
            let status = self.step_once();
            if self.state.is_terminal() {
                return status;
            }
        }
    }

    /// Relax the non-wall neighbours of the settled cell `ci`.
    fn expand(&mut self, ci: usize, diagonal: bool) {
        let grid = self.grid;
        let current = grid.point(ci);
        let Some(target) = self.target else {
            return;
        };
        let SearchConfig {
            heuristic,
            heuristic_weight: weight,
            ..
        } = self.config;
        let step_cost = if diagonal {
            self.config.diagonal_cost
        } else {
            self.config.orthogonal_cost
        };
        let cur_gen = self.generation;
        let tentative_g = self.nodes[ci].g + step_cost;

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        if diagonal {
            grid.diagonal_neighbors(current, &mut nbuf);
        } else {
            grid.orthogonal_neighbors(current, &mut nbuf);
        }

        for &np in nbuf.iter() {
            if grid.is_wall(np) {
                continue;
            }
            let Some(ni) = grid.idx(np) else {
                continue;
            };

            let n = &mut self.nodes[ni];
            n.touch(cur_gen);
            if tentative_g >= n.g {
                continue;
            }

            n.g = tentative_g;
            n.h = heuristic.estimate(np, target);
            n.f = n.h * weight + n.g;
            n.parent = ci;
            self.stats.relaxations += 1;

            // A frontier member keeps its place in the list.
            if !n.in_frontier && !n.visited {
                self.frontier.insert(ni, n);
            }
        }

        self.nbuf = nbuf;
    }

    /// Follow parent links from `ci` back to the start, start first.
    fn trace_back(&self, ci: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut i = ci;
        while i != NO_PARENT {
            path.push(self.grid.point(i));
            debug_assert!(path.len() <= self.nodes.len(), "parent links form a cycle");
            i = self.nodes[i].parent;
        }
        path.reverse();
        debug_assert_eq!(path.first().copied(), self.start);
        path
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The path from start to target, both included, once the search has
    /// succeeded.
    #[inline]
    pub fn path(&self) -> Option<&[Point]> {
        self.path.as_deref()
    }

    /// Whether `p` lies on the found path.
    pub fn is_on_path(&self, p: Point) -> bool {
        self.path.as_ref().is_some_and(|path| path.contains(&p))
    }

    /// Number of cells currently in the frontier.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Search bookkeeping of the cell at `p` for the current search, or
    /// `None` if `p` is outside the grid.
    pub fn cell_state(&self, p: Point) -> Option<CellState> {
        let i = self.grid.idx(p)?;
        let n = &self.nodes[i];
        if n.generation != self.generation || self.state == SearchState::Uninitialized {
            return Some(CellState::FRESH);
        }
        Some(CellState {
            g: n.g,
            h: n.h,
            f: n.f,
            predecessor: (n.parent != NO_PARENT).then(|| self.grid.point(n.parent)),
            visited: n.visited,
            in_frontier: n.in_frontier,
        })
    }

    /// Whether `p` has been settled in the current search.
    pub fn is_visited(&self, p: Point) -> bool {
        self.cell_state(p).is_some_and(|c| c.visited)
    }

    /// G score of `p`: [`UNREACHED`] if unreached or outside the grid.
    pub fn cost_from_start(&self, p: Point) -> f64 {
        self.cell_state(p).map_or(UNREACHED, |c| c.g)
    }
}

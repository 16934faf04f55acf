//! A* shortest-path search on static 2D grids of walkable and wall cells.
//!
//! - [`Grid`] parses a packed `0`/`1` obstacle string and answers bounds,
//!   wall and neighbour queries.
//! - [`SearchConfig`] fixes the step costs, diagonal movement, the
//!   [`Heuristic`] and its weight.
//! - [`SearchEngine`] runs the search one settled cell at a time
//!   ([`step_once`](SearchEngine::step_once)) or to the end
//!   ([`run_to_completion`](SearchEngine::run_to_completion)), and exposes
//!   per-cell [`CellState`] so a renderer can draw the frontier, the settled
//!   set and the final path.
//!
//! ```
//! use gridstar_core::Point;
//! use gridstar_paths::{Grid, SearchConfig, SearchEngine, StepStatus};
//!
//! let grid = Grid::new(3, 3, "[[0,0,0],[1,1,0],[0,0,0]]").unwrap();
//! let mut engine = SearchEngine::new(&grid, SearchConfig::default()).unwrap();
//! assert!(engine.set_endpoints(Point::new(0, 0), Point::new(0, 2)));
//! assert_eq!(engine.run_to_completion(), StepStatus::Succeeded);
//! assert_eq!(engine.path().unwrap().len(), 7);
//! ```
//!
//! Frontier selection is deterministic: each step stable-sorts the frontier
//! by F and settles the head, so among equal F the cell already ahead in the
//! frontier wins. Repeating a search therefore always yields the same path.

mod config;
mod frontier;
mod grid;
mod heuristic;
pub mod maps;
mod node;
mod search;

pub use config::{ConfigError, SearchConfig};
pub use grid::{Cell, Grid, MapError, WALKABLE, WALL};
pub use heuristic::{Heuristic, chebyshev, euclidean, manhattan};
pub use node::{CellState, UNREACHED};
pub use search::{SearchEngine, SearchState, SearchStats, StepStatus};

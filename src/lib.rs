//! # terrain_astar
//!
//! Finds minimum-cost paths on grids of weighted terrain using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic. Movement is
//! 4-directional and the cost of a step is the cost of the terrain being entered.
//!
//! The search reports its progress through a callback after every expansion so that a front-end
//! can draw the explored area, and the resulting [Path] can be replayed step by step. Drawing
//! itself is left to the caller; see `demos/replay.rs` for a terminal front-end.
//!
//! ```
//! use std::ops::ControlFlow;
//! use grid_util::point::Point;
//! use terrain_astar::{Grid, Terrain};
//!
//! let mut terrain = vec![vec![Terrain::Grass; 3]; 3];
//! terrain[1][1] = Terrain::Mountain;
//! let mut grid = Grid::build(&terrain, 18).unwrap();
//! grid.compute_neighbours();
//! let outcome = grid
//!     .find_path(Point::new(0, 0), Point::new(2, 2), |_| ControlFlow::Continue(()))
//!     .unwrap();
//! assert_eq!(outcome.path().unwrap().cost(), 40);
//! ```
mod astar;
pub mod error;
mod frontier;
mod grid;
pub mod heuristic;
pub mod map;
mod path;
pub mod screen;
mod terrain;

pub use crate::astar::{astar, Progress, SearchOutcome, SearchStats, SearchStatus};
pub use crate::error::{Error, Result};
pub use crate::frontier::Frontier;
pub use crate::grid::{Cell, Grid};
pub use crate::map::{Map, MapKind};
pub use crate::path::Path;
pub use crate::terrain::Terrain;

/// Side length of a cell in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 18;
/// Window size for overworld maps, 42 cells across.
pub const OVERWORLD_WINDOW_SIZE: u32 = 756;
/// Window size for dungeon maps, 28 cells across.
pub const DUNGEON_WINDOW_SIZE: u32 = 504;

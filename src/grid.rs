use core::fmt;
use grid_util::point::Point;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;
use std::ops::ControlFlow;

use crate::astar::{astar, Progress, SearchOutcome};
use crate::error::{Error, Result};
use crate::heuristic::manhattan;
use crate::terrain::Terrain;

/// One position on the [Grid]. The position uses `x` for the column and `y` for the row.
/// Cells compare and order by position only.
#[derive(Clone, Debug)]
pub struct Cell {
    position: Point,
    terrain: Terrain,
    origin: (u32, u32),
    neighbours: SmallVec<[usize; 4]>,
}

impl Cell {
    pub fn position(&self) -> Point {
        self.position
    }
    pub fn row(&self) -> usize {
        self.position.y as usize
    }
    pub fn col(&self) -> usize {
        self.position.x as usize
    }
    pub fn terrain(&self) -> Terrain {
        self.terrain
    }
    /// Top-left pixel of the cell when the grid is drawn with its cell size.
    pub fn screen_origin(&self) -> (u32, u32) {
        self.origin
    }
    fn key(&self) -> (i32, i32) {
        (self.position.y, self.position.x)
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for Cell {}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

/// Row-major grid of [Cell]s with fixed dimensions. Neighbour lists are filled in once by
/// [compute_neighbours](Grid::compute_neighbours) and stay frozen afterwards; the grid is
/// read-only while searching and can be reused for any number of searches.
///
/// Besides the neighbour lists it maintains connected components using a [UnionFind] structure
/// so that reachability can be checked without searching.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
    cell_size: u32,
    components: UnionFind<usize>,
    neighbours_computed: bool,
}

impl Grid {
    /// Builds a grid from rows of terrain. The matrix has to be non-empty and rectangular and
    /// `cell_size` has to be positive.
    pub fn build(terrain: &[Vec<Terrain>], cell_size: u32) -> Result<Grid> {
        if cell_size == 0 {
            return Err(Error::invalid_grid("cell size must be positive"));
        }
        let height = terrain.len();
        let width = terrain.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(Error::invalid_grid("terrain matrix is empty"));
        }
        if let Some(row) = terrain.iter().position(|r| r.len() != width) {
            return Err(Error::invalid_grid(format!(
                "row {row} has {} cells, expected {width}",
                terrain[row].len()
            )));
        }
        // The far edge of the last cell has to be addressable in pixels.
        let fits = |cells: usize| {
            u32::try_from(cells)
                .ok()
                .and_then(|n| n.checked_mul(cell_size))
                .is_some()
        };
        if !fits(width) || !fits(height) {
            return Err(Error::invalid_grid(format!(
                "cell size {cell_size} too large for a {width}x{height} grid"
            )));
        }
        let cells = terrain
            .iter()
            .enumerate()
            .flat_map(|(row, values)| {
                values.iter().enumerate().map(move |(col, &terrain)| Cell {
                    position: Point::new(col as i32, row as i32),
                    terrain,
                    origin: (col as u32 * cell_size, row as u32 * cell_size),
                    neighbours: SmallVec::new(),
                })
            })
            .collect::<Vec<_>>();
        debug!("Built {width}x{height} grid with cell size {cell_size}");
        Ok(Grid {
            cells,
            width,
            height,
            cell_size,
            components: UnionFind::new(width * height),
            neighbours_computed: false,
        })
    }

    /// Fills in the up/down/left/right neighbours of every cell, leaving out impassable cells,
    /// and links passable neighbours into components. Does nothing when already computed.
    pub fn compute_neighbours(&mut self) {
        if self.neighbours_computed {
            return;
        }
        for ix in 0..self.cells.len() {
            let position = self.cells[ix].position;
            let neighbours = self
                .neumann_neighbourhood(position)
                .into_iter()
                .filter(|&n| self.cells[n].terrain.is_passable())
                .collect::<SmallVec<[usize; 4]>>();
            if self.cells[ix].terrain.is_passable() {
                for &n in &neighbours {
                    self.components.union(ix, n);
                }
            }
            self.cells[ix].neighbours = neighbours;
        }
        self.neighbours_computed = true;
        debug!("Computed neighbours for {} cells", self.cells.len());
    }

    pub fn neighbours_computed(&self) -> bool {
        self.neighbours_computed
    }

    /// In-bounds cells above, below, left and right of `position`, passable or not.
    fn neumann_neighbourhood(&self, position: Point) -> SmallVec<[usize; 4]> {
        [(0, -1), (0, 1), (-1, 0), (1, 0)]
            .into_iter()
            .filter_map(|(dx, dy)| self.index(Point::new(position.x + dx, position.y + dy)))
            .collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }
    pub fn in_bounds(&self, position: Point) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as usize) < self.width
            && (position.y as usize) < self.height
    }
    fn index(&self, position: Point) -> Option<usize> {
        self.in_bounds(position)
            .then(|| position.y as usize * self.width + position.x as usize)
    }
    pub fn cell(&self, position: Point) -> Option<&Cell> {
        self.index(position).map(|ix| &self.cells[ix])
    }
    pub fn cell_at(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cell(Point::new(col as i32, row as i32))
    }
    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }
    /// The frozen neighbour list of a cell. Empty until neighbours are computed.
    pub fn neighbours<'a>(&'a self, cell: &'a Cell) -> impl Iterator<Item = &'a Cell> + 'a {
        cell.neighbours.iter().map(move |&n| &self.cells[n])
    }

    /// Neighbours of `position` with the cost of stepping onto each of them.
    fn successors(&self, position: &Point) -> SmallVec<[(Point, u32); 4]> {
        self.cell(*position)
            .map(|cell| {
                self.neighbours(cell)
                    .filter_map(|n| n.terrain.cost().map(|c| (n.position, c)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Checks if `start` and `goal` are on the same connected component. Only meaningful after
    /// neighbours have been computed.
    pub fn reachable(&self, start: Point, goal: Point) -> bool {
        match (self.index(start), self.index(goal)) {
            (Some(s), Some(g)) => {
                self.cells[s].terrain.is_passable()
                    && self.cells[g].terrain.is_passable()
                    && self.components.equiv(s, g)
            }
            _ => false,
        }
    }

    fn check_endpoint(&self, position: Point) -> Result<()> {
        match self.cell(position) {
            None => Err(Error::invalid_endpoint(position, "out of bounds")),
            Some(cell) if !cell.terrain.is_passable() => Err(Error::invalid_endpoint(
                position,
                format!("{:?} is impassable", cell.terrain),
            )),
            Some(_) => Ok(()),
        }
    }

    /// Computes a minimum-cost path from `start` to `end` using A* with the
    /// [Manhattan distance](crate::heuristic::manhattan) as heuristic. The cost of a step is the
    /// cost of the terrain being entered.
    ///
    /// `progress` is called after every expansion and may return [ControlFlow::Break] to cancel.
    /// Not finding a path is a regular [SearchOutcome::NoPath]; an error is only returned for
    /// endpoints that are out of bounds or impassable, or if neighbours were never computed.
    pub fn find_path<F>(
        &self,
        start: Point,
        end: Point,
        progress: F,
    ) -> Result<SearchOutcome<Point, u32>>
    where
        F: FnMut(&Progress<Point, u32>) -> ControlFlow<()>,
    {
        if !self.neighbours_computed {
            return Err(Error::invalid_grid("neighbours have not been computed"));
        }
        self.check_endpoint(start)?;
        self.check_endpoint(end)?;
        info!("Searching for a path from {:?} to {:?}", start, end);
        let outcome = astar(
            &start,
            &end,
            |p| self.successors(p),
            |p| manhattan(p, &end),
            progress,
        );
        match outcome.path() {
            Some(path) => info!(
                "Found path of {} cells with cost {} after {} expansions",
                path.len(),
                path.cost(),
                outcome.stats().expanded
            ),
            None => info!(
                "No path found from {:?} to {:?}: {:?}",
                start,
                end,
                outcome.status()
            ),
        }
        Ok(outcome)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.rows() {
            let line = row.iter().map(|c| c.terrain.glyph()).collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

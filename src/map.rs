//! Text maps. Every non-blank line is a row and every character a cell, using the
//! [Terrain::glyph] characters plus `@` for the start, `X` for the end and the digits `1` to `9`
//! for named points of interest (the dungeon entrances on the overworld). The marker cells stand
//! on the ground of the map's [MapKind].
use grid_util::point::Point;
use log::debug;

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::terrain::Terrain;
use crate::{DEFAULT_CELL_SIZE, DUNGEON_WINDOW_SIZE, OVERWORLD_WINDOW_SIZE};

pub const START_GLYPH: char = '@';
pub const END_GLYPH: char = 'X';

const HYRULE: &str = include_str!("../maps/hyrule.txt");
const DUNGEONS: [&str; 3] = [
    include_str!("../maps/dungeon1.txt"),
    include_str!("../maps/dungeon2.txt"),
    include_str!("../maps/dungeon3.txt"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapKind {
    Overworld,
    Dungeon,
}

impl MapKind {
    /// Terrain under the start and end markers.
    pub fn ground(self) -> Terrain {
        match self {
            MapKind::Overworld => Terrain::Grass,
            MapKind::Dungeon => Terrain::Floor,
        }
    }
    /// Side length in pixels of the square window the map is shown in.
    pub fn window_size(self) -> u32 {
        match self {
            MapKind::Overworld => OVERWORLD_WINDOW_SIZE,
            MapKind::Dungeon => DUNGEON_WINDOW_SIZE,
        }
    }
}

/// A terrain matrix with a designated start and end, ready to be turned into a [Grid].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Map {
    pub name: String,
    pub kind: MapKind,
    pub terrain: Vec<Vec<Terrain>>,
    pub start: Point,
    pub end: Point,
    /// Points of interest in the order they appear, named after their digit.
    pub points: Vec<(String, Point)>,
}

impl Map {
    pub fn parse(name: &str, kind: MapKind, text: &str) -> Result<Map> {
        let mut terrain = Vec::new();
        let mut start = None;
        let mut end = None;
        let mut points: Vec<(String, Point)> = Vec::new();
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let row = terrain.len();
            let mut cells = Vec::with_capacity(line.len());
            for (col, glyph) in line.chars().enumerate() {
                let position = Point::new(col as i32, row as i32);
                let marker = match glyph {
                    START_GLYPH => Some(&mut start),
                    END_GLYPH => Some(&mut end),
                    _ => None,
                };
                if glyph.is_ascii_digit() && glyph != '0' {
                    let point_name = glyph.to_string();
                    if points.iter().any(|(n, _)| *n == point_name) {
                        return Err(Error::invalid_grid(format!(
                            "{name}: more than one '{glyph}' point"
                        )));
                    }
                    points.push((point_name, position));
                    cells.push(kind.ground());
                    continue;
                }
                let cell = match marker {
                    Some(slot) => {
                        if slot.replace(position).is_some() {
                            return Err(Error::invalid_grid(format!(
                                "{name}: more than one '{glyph}' marker"
                            )));
                        }
                        kind.ground()
                    }
                    None => Terrain::from_glyph(glyph).ok_or_else(|| {
                        Error::invalid_grid(format!(
                            "{name}: unknown glyph '{glyph}' at row {row}, column {col}"
                        ))
                    })?,
                };
                cells.push(cell);
            }
            terrain.push(cells);
        }
        let start = start
            .ok_or_else(|| Error::invalid_grid(format!("{name}: no '{START_GLYPH}' marker")))?;
        let end =
            end.ok_or_else(|| Error::invalid_grid(format!("{name}: no '{END_GLYPH}' marker")))?;
        debug!("Parsed map {name} with {} rows", terrain.len());
        Ok(Map {
            name: name.to_owned(),
            kind,
            terrain,
            start,
            end,
            points,
        })
    }

    /// Position of the point of interest called `name`.
    pub fn point(&self, name: &str) -> Option<Point> {
        self.points
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, p)| p)
    }

    /// The overworld map.
    pub fn hyrule() -> Result<Map> {
        Map::parse("hyrule", MapKind::Overworld, HYRULE)
    }

    /// One of the three dungeons, numbered from 1.
    pub fn dungeon(number: usize) -> Result<Map> {
        let text = number
            .checked_sub(1)
            .and_then(|ix| DUNGEONS.get(ix))
            .ok_or_else(|| Error::invalid_grid(format!("there is no dungeon {number}")))?;
        Map::parse(&format!("dungeon{number}"), MapKind::Dungeon, text)
    }

    pub fn rows(&self) -> usize {
        self.terrain.len()
    }

    /// Cell size that makes the map fill its window.
    pub fn cell_size(&self) -> u32 {
        match self.rows() {
            0 => DEFAULT_CELL_SIZE,
            rows => (self.kind.window_size() / rows as u32).max(1),
        }
    }

    /// Builds the grid and computes its neighbours.
    pub fn grid(&self) -> Result<Grid> {
        let mut grid = Grid::build(&self.terrain, self.cell_size())?;
        grid.compute_neighbours();
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::ControlFlow;

    #[test]
    fn parses_markers_and_terrain() {
        let map = Map::parse("test", MapKind::Dungeon, "\n  #@.\n  .#X  \n\n").unwrap();
        assert_eq!(map.rows(), 2);
        assert_eq!(map.start, Point::new(1, 0));
        assert_eq!(map.end, Point::new(2, 1));
        assert!(map.points.is_empty());
        assert_eq!(
            map.terrain,
            vec![
                vec![Terrain::Wall, Terrain::Floor, Terrain::Floor],
                vec![Terrain::Floor, Terrain::Wall, Terrain::Floor],
            ]
        );
    }

    #[test]
    fn rejects_bad_text() {
        let bad = [
            "",
            "G@G\nGGG",
            "@X\nG?",
            "@@X",
            "@XX",
            "@X11",
            "@X0",
        ];
        for text in bad {
            assert!(matches!(
                Map::parse("bad", MapKind::Overworld, text),
                Err(Error::InvalidGrid(_))
            ));
        }
        // Parsing succeeds, building the grid catches ragged rows.
        let ragged = Map::parse("ragged", MapKind::Overworld, "@X\nGGG").unwrap();
        assert!(matches!(ragged.grid(), Err(Error::InvalidGrid(_))));
    }

    #[test]
    fn bundled_maps_have_paths() {
        let maps = [
            Map::hyrule().unwrap(),
            Map::dungeon(1).unwrap(),
            Map::dungeon(2).unwrap(),
            Map::dungeon(3).unwrap(),
        ];
        for map in maps {
            let grid = map.grid().unwrap();
            assert_eq!(grid.width(), grid.height());
            assert_eq!(grid.cell_size(), DEFAULT_CELL_SIZE);
            assert!(grid.reachable(map.start, map.end), "{}", map.name);
            let outcome = grid
                .find_path(map.start, map.end, |_| ControlFlow::Continue(()))
                .unwrap();
            let path = outcome.path().unwrap();
            assert_eq!(path.start(), Some(&map.start));
            assert_eq!(path.end(), Some(&map.end));
        }
        assert!(Map::dungeon(0).is_err());
    }

    #[test]
    fn parses_points_of_interest() {
        let map = Map::parse("test", MapKind::Overworld, "@2S\nW1X").unwrap();
        assert_eq!(
            map.points,
            vec![
                ("2".to_owned(), Point::new(1, 0)),
                ("1".to_owned(), Point::new(1, 1)),
            ]
        );
        assert_eq!(map.point("1"), Some(Point::new(1, 1)));
        assert_eq!(map.point("3"), None);
        assert_eq!(map.terrain[0][1], Terrain::Grass);
        assert_eq!(map.terrain[1][1], Terrain::Grass);
    }

    #[test]
    fn overworld_entrances_are_reachable() {
        let map = Map::hyrule().unwrap();
        let grid = map.grid().unwrap();
        assert_eq!(map.points.len(), 3);
        for (name, point) in &map.points {
            assert!(grid.reachable(map.start, *point), "entrance {name}");
            let outcome = grid
                .find_path(map.start, *point, |_| ControlFlow::Continue(()))
                .unwrap();
            assert_eq!(outcome.path().unwrap().end(), Some(point));
        }
        assert!(Map::dungeon(4).is_err());
    }
}

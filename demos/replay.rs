use grid_util::point::Point;
use std::collections::HashSet;
use std::ops::ControlFlow;
use std::thread::sleep;
use std::time::Duration;
use terrain_astar::screen::clicked_cell;
use terrain_astar::{Grid, Map, SearchOutcome};

// Terminal stand-in for a window: the explored area is redrawn every few expansions and the
// found path is then walked one cell at a time.
//
// Usage: replay [hyrule|dungeon1|dungeon2|dungeon3] [click_x click_y]
//
// A click given in window pixels moves the start to the cell under it.
// - @ marks the walker
// - X marks the end
// - o marks open cells, lowercase glyphs explored ones

const REDRAW_EVERY: usize = 100;
const MAX_EXPANSIONS: usize = 100_000;

fn draw(grid: &Grid, walker: Point, end: Point, open: &HashSet<Point>, seen: &HashSet<Point>) {
    let mut out = String::new();
    for row in grid.rows() {
        for cell in row {
            let p = cell.position();
            out.push(if p == walker {
                '@'
            } else if p == end {
                'X'
            } else if open.contains(&p) {
                'o'
            } else if seen.contains(&p) {
                cell.terrain().glyph().to_ascii_lowercase()
            } else {
                cell.terrain().glyph()
            });
        }
        out.push('\n');
    }
    println!("{out}");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let map = match args.first().map(String::as_str) {
        None | Some("hyrule") => Map::hyrule()?,
        Some(name) => {
            let number = name.trim_start_matches("dungeon").parse()?;
            Map::dungeon(number)?
        }
    };
    let grid = map.grid()?;
    let mut start = map.start;
    if let [_, x, y] = args.as_slice() {
        let pixel = (x.parse()?, y.parse()?);
        match clicked_cell(pixel, grid.height(), map.kind.window_size()) {
            Some((row, col)) => start = Point::new(col as i32, row as i32),
            None => println!("Click {pixel:?} is outside the map, keeping the start"),
        }
    }

    let outcome = grid.find_path(start, map.end, |progress| {
        let stats = progress.stats();
        if stats.expanded >= MAX_EXPANSIONS {
            return ControlFlow::Break(());
        }
        if stats.expanded % REDRAW_EVERY == 0 {
            let seen = progress.discovered().copied().collect::<HashSet<_>>();
            let open = seen
                .iter()
                .filter(|p| progress.is_open(p))
                .copied()
                .collect::<HashSet<_>>();
            draw(&grid, start, map.end, &open, &seen);
            println!("{} expansions, {} open", stats.expanded, progress.open_len());
        }
        ControlFlow::Continue(())
    })?;

    match outcome {
        SearchOutcome::Found { path, stats } => {
            let none = HashSet::new();
            path.replay(|step, &cell| {
                draw(&grid, cell, map.end, &none, &none);
                println!("Step {step} of {}", path.len() - 1);
                sleep(Duration::from_millis(50));
                ControlFlow::Continue(())
            });
            println!(
                "{}: reached the end at cost {} after {} expansions",
                map.name,
                path.cost(),
                stats.expanded
            );
        }
        SearchOutcome::NoPath { stats } => {
            println!("{}: no path after {} expansions", map.name, stats.expanded)
        }
        SearchOutcome::Cancelled { stats } => {
            println!("{}: gave up after {} expansions", map.name, stats.expanded)
        }
    }
    Ok(())
}

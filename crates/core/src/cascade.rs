//! Cascade module - match removal, gravity and refill
//!
//! These are the resolver's building blocks. The engine runs them one at a
//! time and waits for animations in between. [`resolve_cascade`] chains them
//! synchronously for headless use (tests, benches, simulations).
//!
//! One cascade iteration:
//! 1. find every matched cell and remove it, scoring `base * combo` per tile
//! 2. compact each column downward
//! 3. spawn random tiles into the cells left empty at the top

use tracing::trace;

use crate::config::BoardConfig;
use crate::grid::{Grid, Tile};
use crate::matcher::find_matches;
use crate::rng::SimpleRng;
use crate::scoring::{cascade_points, next_combo};
use crate::types::{Position, TileId, TileKind};

/// A tile moved down by gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileFall {
    pub id: TileId,
    pub from: Position,
    pub to: Position,
}

/// A tile created by refill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpawn {
    pub id: TileId,
    pub kind: TileKind,
    pub pos: Position,
}

/// Tiles removed by one cascade iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearResult {
    pub removed: Vec<Tile>,
    /// Multiplier the removal was scored at
    pub combo: u32,
    pub points: u32,
}

/// Remove every matched tile.
///
/// Returns `None` (and leaves the grid untouched) when the board is stable.
pub fn clear_matches(
    grid: &mut Grid,
    min_match: usize,
    base_score: u32,
    combo: u32,
) -> Option<ClearResult> {
    let matched = find_matches(grid, min_match);
    if matched.is_empty() {
        return None;
    }

    let removed: Vec<Tile> = matched.into_iter().filter_map(|pos| grid.take(pos)).collect();
    let points = cascade_points(removed.len(), base_score, combo);
    trace!(tiles = removed.len(), combo, points, "cleared matches");

    Some(ClearResult {
        removed,
        combo,
        points,
    })
}

/// Drop tiles into the gaps below them.
///
/// Each column is scanned bottom-to-top; an empty cell takes the nearest tile
/// above it. Passes repeat until nothing moves, so afterwards every column is
/// a solid stack with its empty cells at the top. Each moving tile is reported
/// once, with its original and final position.
pub fn apply_gravity(grid: &mut Grid) -> Vec<TileFall> {
    let mut falls: Vec<TileFall> = Vec::new();
    let rows = grid.rows();

    loop {
        let mut moved = false;
        for col in 0..grid.columns() {
            for row in (0..rows).rev() {
                let to = Position::new(row, col);
                if !grid.is_empty(to) {
                    continue;
                }
                let Some(from) = (0..row)
                    .rev()
                    .map(|above| Position::new(above, col))
                    .find(|&p| grid.get(p).is_some())
                else {
                    continue;
                };
                let Some(id) = grid.get(from).map(|tile| tile.id) else {
                    continue;
                };
                if !grid.move_tile(from, to) {
                    continue;
                }
                moved = true;
                match falls.iter_mut().find(|fall| fall.id == id) {
                    Some(fall) => fall.to = to,
                    None => falls.push(TileFall { id, from, to }),
                }
            }
        }
        if !moved {
            break;
        }
    }

    falls
}

/// Fill every empty cell with a uniformly random kind.
pub fn refill(grid: &mut Grid, tile_types: u8, rng: &mut SimpleRng) -> Vec<TileSpawn> {
    let mut spawns = Vec::with_capacity(grid.empty_count());
    for col in 0..grid.columns() {
        for row in 0..grid.rows() {
            let pos = Position::new(row, col);
            if !grid.is_empty(pos) {
                continue;
            }
            let kind = rng.next_kind(tile_types);
            if let Some(id) = grid.spawn(pos, kind) {
                spawns.push(TileSpawn { id, kind, pos });
            }
        }
    }
    spawns
}

/// Summary of a synchronously resolved cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeReport {
    /// Iterations that found matches
    pub iterations: u32,
    pub tiles_cleared: u32,
    pub points: u32,
    /// False if `max_iterations` ran out before the board settled
    pub stable: bool,
}

/// Run match → gravity → refill until the board is stable.
///
/// The combo multiplier starts at 1 and rises once per iteration.
pub fn resolve_cascade(
    grid: &mut Grid,
    config: &BoardConfig,
    rng: &mut SimpleRng,
    max_iterations: u32,
) -> CascadeReport {
    let mut report = CascadeReport::default();
    let mut combo = 1;

    while report.iterations < max_iterations {
        let Some(cleared) = clear_matches(grid, config.min_match, config.base_score, combo) else {
            report.stable = true;
            return report;
        };
        report.iterations += 1;
        report.tiles_cleared = report
            .tiles_cleared
            .saturating_add(cleared.removed.len() as u32);
        report.points = report.points.saturating_add(cleared.points);
        combo = next_combo(combo);

        apply_gravity(grid);
        refill(grid, config.tile_types, rng);
    }

    report.stable = find_matches(grid, config.min_match).is_empty();
    report
}

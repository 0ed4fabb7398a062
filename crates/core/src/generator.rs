//! Generator module - initial boards without pre-existing matches
//!
//! Cells are filled in row-major order. Each cell picks uniformly among the
//! kinds that would not complete a run with the cells already placed to its
//! left or above it. With at least 3 kinds that candidate set can never be
//! empty: at most two kinds are excluded.
//!
//! After the fill the whole grid is re-scanned. Any matched cell is re-rolled
//! using every neighbour on both sides, not just left and above, so a re-roll
//! can never recreate the run it is breaking. The re-roll loop is bounded; if
//! it gives up, the board is generated again from scratch.

use arrayvec::ArrayVec;
use tracing::{debug, warn};

use crate::config::BoardConfig;
use crate::grid::Grid;
use crate::matcher::{find_matches, has_matches, is_part_of_match, run_lengths_with};
use crate::rng::SimpleRng;
use crate::types::{Direction, Position, TileKind, MAX_TILE_TYPES, MIN_TILE_TYPES};

/// Re-roll passes over the matched cells before regenerating
pub const MAX_REROLL_PASSES: usize = 64;

pub type Candidates = ArrayVec<TileKind, MAX_TILE_TYPES>;

fn clamp_types(tile_types: u8) -> u8 {
    tile_types.min(MAX_TILE_TYPES as u8)
}

/// Generate a full `config.rows x config.columns` grid with no matches.
///
/// Precondition: `config.tile_types >= 3` (enforced by [`BoardConfig::validate`]).
/// Fewer kinds cannot always avoid a run, so debug builds panic instead of
/// regenerating forever.
pub fn generate(config: &BoardConfig, rng: &mut SimpleRng) -> Grid {
    debug_assert!(
        config.tile_types >= MIN_TILE_TYPES,
        "generate needs at least {} tile types, got {}",
        MIN_TILE_TYPES,
        config.tile_types
    );
    let mut attempt = 0u32;
    loop {
        let mut grid = fill(config, rng);
        if eliminate_matches(&mut grid, config.tile_types, config.min_match, rng) {
            debug!(
                rows = config.rows,
                columns = config.columns,
                attempt,
                "generated board"
            );
            return grid;
        }
        attempt += 1;
        warn!(attempt, "re-roll limit reached; regenerating board");
    }
}

fn fill(config: &BoardConfig, rng: &mut SimpleRng) -> Grid {
    let mut grid = Grid::new(config.rows, config.columns);
    for row in 0..config.rows {
        for col in 0..config.columns {
            let pos = Position::new(row, col);
            let candidates = fill_candidates(&grid, pos, config.tile_types, config.min_match);
            let kind = rng
                .pick(&candidates)
                .unwrap_or_else(|| rng.next_kind(config.tile_types));
            grid.spawn(pos, kind);
        }
    }
    grid
}

/// Kind shared by the `len` cells walking from `pos` toward `dir`, if they all agree.
fn uniform_run(grid: &Grid, pos: Position, dir: Direction, len: usize) -> Option<TileKind> {
    let mut cur = pos;
    let mut kind = None;
    for _ in 0..len {
        cur = cur.step(dir)?;
        let here = grid.kind_at(cur)?;
        match kind {
            None => kind = Some(here),
            Some(k) if k == here => {}
            Some(_) => return None,
        }
    }
    kind
}

/// Kinds allowed at `pos` during the row-major fill.
///
/// Removes the kind of the `min_match - 1` cells immediately to the left and
/// immediately above when those cells agree.
pub fn fill_candidates(grid: &Grid, pos: Position, tile_types: u8, min_match: usize) -> Candidates {
    let preceding = min_match.saturating_sub(1);
    let left = uniform_run(grid, pos, Direction::Left, preceding);
    let above = uniform_run(grid, pos, Direction::Up, preceding);

    (0..clamp_types(tile_types))
        .map(TileKind)
        .filter(|&k| Some(k) != left && Some(k) != above)
        .collect()
}

/// Kinds that would leave `pos` outside any run, given all four neighbours.
pub fn safe_kinds(grid: &Grid, pos: Position, tile_types: u8, min_match: usize) -> Candidates {
    (0..clamp_types(tile_types))
        .map(TileKind)
        .filter(|&k| {
            let lookup = |p: Position| if p == pos { Some(k) } else { grid.kind_at(p) };
            let (horizontal, vertical) = run_lengths_with(&lookup, pos);
            horizontal < min_match && vertical < min_match
        })
        .collect()
}

/// Re-roll matched cells in place until the grid is stable.
///
/// Returns false if matches remain after [`MAX_REROLL_PASSES`] passes.
pub fn eliminate_matches(
    grid: &mut Grid,
    tile_types: u8,
    min_match: usize,
    rng: &mut SimpleRng,
) -> bool {
    for _ in 0..MAX_REROLL_PASSES {
        let matched = find_matches(grid, min_match);
        if matched.is_empty() {
            return true;
        }
        for pos in matched {
            // An earlier re-roll in this pass may already have broken the run.
            if !is_part_of_match(grid, pos, min_match) {
                continue;
            }
            let candidates = safe_kinds(grid, pos, tile_types, min_match);
            let kind = rng
                .pick(&candidates)
                .unwrap_or_else(|| rng.next_kind(tile_types));
            grid.set_kind(pos, kind);
        }
    }
    !has_matches(grid, min_match)
}

//! Match detection
//!
//! A cell is matched when the contiguous run of its kind through it is at least
//! `min_match` long horizontally or vertically. The two axes are checked
//! independently, so a cell can satisfy both.
//!
//! The checks take a kind lookup closure rather than a grid so the move oracle
//! can evaluate a hypothetical swap without touching the board.

use crate::grid::Grid;
use crate::types::{Direction, Position, TileKind};

/// Count same-kind cells walking from `pos` (exclusive) toward `dir`.
#[inline]
fn run_length<F>(lookup: &F, pos: Position, kind: TileKind, dir: Direction) -> usize
where
    F: Fn(Position) -> Option<TileKind>,
{
    let mut count = 0;
    let mut cur = pos;
    while let Some(next) = cur.step(dir) {
        if lookup(next) != Some(kind) {
            break;
        }
        count += 1;
        cur = next;
    }
    count
}

/// Horizontal and vertical run lengths through `pos`, including `pos` itself.
///
/// `(0, 0)` for an empty cell.
pub fn run_lengths_with<F>(lookup: &F, pos: Position) -> (usize, usize)
where
    F: Fn(Position) -> Option<TileKind>,
{
    let Some(kind) = lookup(pos) else {
        return (0, 0);
    };
    let horizontal = 1
        + run_length(lookup, pos, kind, Direction::Left)
        + run_length(lookup, pos, kind, Direction::Right);
    let vertical = 1
        + run_length(lookup, pos, kind, Direction::Up)
        + run_length(lookup, pos, kind, Direction::Down);
    (horizontal, vertical)
}

pub fn is_match_with<F>(lookup: &F, pos: Position, min_match: usize) -> bool
where
    F: Fn(Position) -> Option<TileKind>,
{
    let (horizontal, vertical) = run_lengths_with(lookup, pos);
    horizontal >= min_match || vertical >= min_match
}

/// Whether the tile at `pos` is part of a horizontal or vertical run.
pub fn is_part_of_match(grid: &Grid, pos: Position, min_match: usize) -> bool {
    is_match_with(&|p| grid.kind_at(p), pos, min_match)
}

pub fn has_matches(grid: &Grid, min_match: usize) -> bool {
    grid.positions()
        .any(|pos| is_part_of_match(grid, pos, min_match))
}

/// Every matched cell, row-major, each listed once.
pub fn find_matches(grid: &Grid, min_match: usize) -> Vec<Position> {
    grid.positions()
        .filter(|&pos| is_part_of_match(grid, pos, min_match))
        .collect()
}

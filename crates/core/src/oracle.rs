//! Move oracle - does any adjacent swap produce a match?
//!
//! Each candidate swap is evaluated through a remapped kind lookup that reads
//! the two positions exchanged. The board itself is never mutated, so the
//! oracle is safe to call at any time, including mid-animation.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::matcher::is_match_with;
use crate::types::{Direction, Position, TileKind};

/// In-bounds orthogonal neighbours of `pos`
pub fn neighbours(grid: &Grid, pos: Position) -> ArrayVec<Position, 4> {
    Direction::ALL
        .iter()
        .filter_map(|&dir| pos.step(dir))
        .filter(|&p| grid.in_bounds(p))
        .collect()
}

/// Whether swapping `a` and `b` would put either of them in a run.
pub fn swap_creates_match(grid: &Grid, a: Position, b: Position, min_match: usize) -> bool {
    let lookup = |p: Position| -> Option<TileKind> {
        if p == a {
            grid.kind_at(b)
        } else if p == b {
            grid.kind_at(a)
        } else {
            grid.kind_at(p)
        }
    };
    is_match_with(&lookup, a, min_match) || is_match_with(&lookup, b, min_match)
}

/// First swap (row-major, neighbours up/down/left/right) that creates a match.
pub fn find_move(grid: &Grid, min_match: usize) -> Option<(Position, Position)> {
    grid.positions().find_map(|pos| {
        neighbours(grid, pos)
            .into_iter()
            .find(|&other| swap_creates_match(grid, pos, other, min_match))
            .map(|other| (pos, other))
    })
}

pub fn has_possible_moves(grid: &Grid, min_match: usize) -> bool {
    find_move(grid, min_match).is_some()
}

/// Number of distinct matching swaps (each unordered pair counted once).
pub fn count_moves(grid: &Grid, min_match: usize) -> usize {
    grid.positions()
        .flat_map(|pos| {
            // Right and down only, so every pair is visited once.
            [Direction::Right, Direction::Down]
                .into_iter()
                .filter_map(move |dir| pos.step(dir).map(|other| (pos, other)))
        })
        .filter(|&(a, b)| grid.in_bounds(b) && swap_creates_match(grid, a, b, min_match))
        .count()
}

//! Snapshot module - plain-data board view for observers
//!
//! Cells are row-major bytes: 0 for an empty slot, otherwise tile kind + 1.
//! `board_hash` is FNV-1a over those bytes, so it depends on the layout only,
//! never on tile ids.

use serde::Serialize;

use crate::grid::Grid;

/// Plain-data view of a board for presentation layers and observers.
///
/// `cells` is row-major, 0 = empty, otherwise kind + 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Default)]
pub struct BoardSnapshot {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<u8>,
    pub board_hash: u64,
    pub score: u32,
    pub combo_multiplier: u32,
    pub processing: bool,
    pub selected: Option<(usize, usize)>,
}

impl BoardSnapshot {
    /// Refresh the board part from `grid`, reusing the cell buffer.
    pub fn write_board(&mut self, grid: &Grid) {
        self.rows = grid.rows();
        self.columns = grid.columns();
        grid.write_u8_cells(&mut self.cells);
        self.board_hash = fnv1a64(&self.cells);
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        self.cells.get(row * self.columns + col).copied()
    }
}

/// FNV-1a 64-bit hash.
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for &b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

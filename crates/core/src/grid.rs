//! Grid module - the board's tile store
//!
//! The grid is a `rows x columns` matrix of slots, each either empty or holding
//! exactly one [`Tile`]. Storage is a flat row-major `Vec` (`row * columns + col`).
//!
//! Every tile carries its own `pos`. All operations that move tiles
//! ([`Grid::swap`], [`Grid::move_tile`], [`Grid::spawn`]) update the slot and the
//! tile's stored position together, so `tile.pos` always names the slot the
//! tile sits in. [`Grid::is_consistent`] checks that invariant.

use crate::types::{Position, TileId, TileKind};

/// A live tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub kind: TileKind,
    pub pos: Position,
}

/// Board storage with fixed dimensions
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    slots: Vec<Option<Tile>>,
    next_id: u32,
}

impl Grid {
    /// Create an empty grid
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            slots: vec![None; rows * columns],
            next_id: 0,
        }
    }

    /// Build a full grid from rows of kind indices (row 0 first).
    ///
    /// Returns `None` when the rows are ragged or empty.
    pub fn from_kinds<R: AsRef<[u8]>>(rows: &[R]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.as_ref().len();
        if width == 0 || rows.iter().any(|r| r.as_ref().len() != width) {
            return None;
        }

        let mut grid = Self::new(height, width);
        for (row, kinds) in rows.iter().enumerate() {
            for (col, &kind) in kinds.as_ref().iter().enumerate() {
                grid.spawn(Position::new(row, col), TileKind(kind));
            }
        }
        Some(grid)
    }

    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if pos.row >= self.rows || pos.col >= self.columns {
            return None;
        }
        Some(pos.row * self.columns + pos.col)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// Tile at `pos`, `None` if empty or out of bounds
    pub fn get(&self, pos: Position) -> Option<&Tile> {
        self.index(pos).and_then(|idx| self.slots[idx].as_ref())
    }

    pub fn kind_at(&self, pos: Position) -> Option<TileKind> {
        self.get(pos).map(|tile| tile.kind)
    }

    /// In bounds and empty
    pub fn is_empty(&self, pos: Position) -> bool {
        matches!(self.index(pos).map(|idx| self.slots[idx].is_none()), Some(true))
    }

    /// Place a fresh tile into an empty slot and return its id.
    ///
    /// Returns `None` if `pos` is out of bounds or already occupied.
    pub fn spawn(&mut self, pos: Position, kind: TileKind) -> Option<TileId> {
        let idx = self.index(pos)?;
        if self.slots[idx].is_some() {
            return None;
        }
        let id = TileId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.slots[idx] = Some(Tile { id, kind, pos });
        Some(id)
    }

    /// Remove and return the tile at `pos`
    pub fn take(&mut self, pos: Position) -> Option<Tile> {
        let idx = self.index(pos)?;
        self.slots[idx].take()
    }

    /// Change a tile's kind in place (keeps its id)
    pub fn set_kind(&mut self, pos: Position, kind: TileKind) -> bool {
        match self.index(pos).and_then(|idx| self.slots[idx].as_mut()) {
            Some(tile) => {
                tile.kind = kind;
                true
            }
            None => false,
        }
    }

    /// Exchange the contents of two slots, updating stored positions.
    ///
    /// Either slot may be empty. Returns false if either is out of bounds.
    pub fn swap(&mut self, a: Position, b: Position) -> bool {
        let (Some(ia), Some(ib)) = (self.index(a), self.index(b)) else {
            return false;
        };
        self.slots.swap(ia, ib);
        if let Some(tile) = self.slots[ia].as_mut() {
            tile.pos = a;
        }
        if let Some(tile) = self.slots[ib].as_mut() {
            tile.pos = b;
        }
        true
    }

    /// Move the tile at `from` into the empty slot `to`
    pub fn move_tile(&mut self, from: Position, to: Position) -> bool {
        let (Some(ifrom), Some(ito)) = (self.index(from), self.index(to)) else {
            return false;
        };
        if self.slots[ito].is_some() {
            return false;
        }
        let Some(mut tile) = self.slots[ifrom].take() else {
            return false;
        };
        tile.pos = to;
        self.slots[ito] = Some(tile);
        true
    }

    /// Iterate live tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.slots.iter().flatten()
    }

    /// Iterate every in-bounds position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let columns = self.columns;
        (0..self.rows * columns).map(move |i| Position::new(i / columns, i % columns))
    }

    pub fn empty_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Remove every tile
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    /// Every tile's stored position names its own slot and ids are unique.
    pub fn is_consistent(&self) -> bool {
        let mut ids: Vec<TileId> = Vec::with_capacity(self.slots.len());
        for (idx, slot) in self.slots.iter().enumerate() {
            if let Some(tile) = slot {
                if self.index(tile.pos) != Some(idx) {
                    return false;
                }
                ids.push(tile.id);
            }
        }
        ids.sort_unstable();
        ids.windows(2).all(|w| w[0] != w[1])
    }

    /// Row-major kind grid for display and comparisons
    pub fn to_kinds(&self) -> Vec<Vec<Option<TileKind>>> {
        (0..self.rows)
            .map(|row| {
                (0..self.columns)
                    .map(|col| self.kind_at(Position::new(row, col)))
                    .collect()
            })
            .collect()
    }

    /// Write the board as bytes: 0 = empty, otherwise kind + 1.
    pub fn write_u8_cells(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(
            self.slots
                .iter()
                .map(|slot| slot.map_or(0, |tile| tile.kind.0.saturating_add(1))),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(4, 5);
        assert_eq!(grid.index(Position::new(0, 0)), Some(0));
        assert_eq!(grid.index(Position::new(0, 4)), Some(4));
        assert_eq!(grid.index(Position::new(1, 0)), Some(5));
        assert_eq!(grid.index(Position::new(3, 4)), Some(19));
        assert_eq!(grid.index(Position::new(4, 0)), None);
        assert_eq!(grid.index(Position::new(0, 5)), None);
    }

    #[test]
    fn test_spawn_assigns_unique_ids() {
        let mut grid = Grid::new(2, 2);
        let a = grid.spawn(Position::new(0, 0), TileKind(1)).unwrap();
        let b = grid.spawn(Position::new(0, 1), TileKind(1)).unwrap();
        assert_ne!(a, b);

        // Occupied and out of bounds slots refuse spawns
        assert_eq!(grid.spawn(Position::new(0, 0), TileKind(2)), None);
        assert_eq!(grid.spawn(Position::new(2, 0), TileKind(2)), None);
        assert!(grid.is_consistent());
    }

    #[test]
    fn test_swap_updates_positions() {
        let mut grid = Grid::from_kinds(&[[0u8, 1], [2, 3]]).unwrap();
        let a = Position::new(0, 0);
        let b = Position::new(1, 1);
        let id_a = grid.get(a).unwrap().id;

        assert!(grid.swap(a, b));
        assert_eq!(grid.kind_at(a), Some(TileKind(3)));
        assert_eq!(grid.kind_at(b), Some(TileKind(0)));
        assert_eq!(grid.get(b).unwrap().id, id_a);
        assert_eq!(grid.get(b).unwrap().pos, b);
        assert!(grid.is_consistent());

        assert!(!grid.swap(a, Position::new(5, 5)));
    }

    #[test]
    fn test_move_tile_requires_empty_target() {
        let mut grid = Grid::from_kinds(&[[0u8, 1], [2, 3]]).unwrap();
        assert!(!grid.move_tile(Position::new(0, 0), Position::new(1, 0)));

        let removed = grid.take(Position::new(1, 0)).unwrap();
        assert_eq!(removed.kind, TileKind(2));
        assert!(grid.move_tile(Position::new(0, 0), Position::new(1, 0)));
        assert!(grid.is_empty(Position::new(0, 0)));
        assert_eq!(grid.get(Position::new(1, 0)).unwrap().pos, Position::new(1, 0));
        assert!(grid.is_consistent());
    }

    #[test]
    fn test_from_kinds_rejects_ragged() {
        assert!(Grid::from_kinds(&[vec![0u8, 1], vec![2]]).is_none());
        assert!(Grid::from_kinds::<Vec<u8>>(&[]).is_none());
    }

    #[test]
    fn test_write_u8_cells() {
        let mut grid = Grid::from_kinds(&[[0u8, 4]]).unwrap();
        grid.take(Position::new(0, 0));
        let mut out = Vec::new();
        grid.write_u8_cells(&mut out);
        assert_eq!(out, vec![0, 5]);
    }

    #[test]
    fn test_positions_row_major() {
        let grid = Grid::new(2, 3);
        let all: Vec<_> = grid.positions().collect();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0], Position::new(0, 0));
        assert_eq!(all[2], Position::new(0, 2));
        assert_eq!(all[3], Position::new(1, 0));
    }
}

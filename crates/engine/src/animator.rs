//! Animation collaborator
//!
//! The engine never owns visuals. It tells an [`Animator`] where tiles should
//! go and polls [`Animator::is_moving`] to know when to continue. Hosts plug in
//! their own sprite system; two implementations ship here:
//!
//! - [`InstantAnimator`]: every move completes immediately (headless play, tests)
//! - [`TimedAnimator`]: tiles travel at a fixed speed, advanced by `update`

use std::collections::HashMap;

use crate::types::{Point, TileId, TileKind};

/// Presentation sink driven by the board engine.
pub trait Animator {
    /// A new tile appears at `from` and should travel to `to`.
    fn spawn_tile(&mut self, id: TileId, kind: TileKind, from: Point, to: Point);

    /// Start moving an existing tile toward `to`.
    fn move_tile(&mut self, id: TileId, to: Point);

    /// The tile was matched and is gone from the board.
    fn remove_tile(&mut self, id: TileId);

    /// Selection feedback.
    fn set_highlight(&mut self, _id: TileId, _on: bool) {}

    /// Whether the tile has not reached its target yet.
    fn is_moving(&self, id: TileId) -> bool;

    /// Advance animations by one frame.
    fn update(&mut self, _elapsed_ms: u32) {}

    /// Jump the tile to its target; used when a wait times out.
    fn snap(&mut self, _id: TileId) {}
}

/// Visual state the bundled animators keep per tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualTile {
    pub kind: TileKind,
    pub pos: Point,
    pub target: Point,
    pub highlighted: bool,
}

/// Animator whose moves finish the moment they are issued.
#[derive(Debug, Clone, Default)]
pub struct InstantAnimator {
    tiles: HashMap<TileId, VisualTile>,
    removed: u32,
}

impl InstantAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tile(&self, id: TileId) -> Option<&VisualTile> {
        self.tiles.get(&id)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles removed since creation
    pub fn removed_count(&self) -> u32 {
        self.removed
    }

    pub fn highlighted(&self) -> impl Iterator<Item = TileId> + '_ {
        self.tiles
            .iter()
            .filter(|(_, tile)| tile.highlighted)
            .map(|(&id, _)| id)
    }
}

impl Animator for InstantAnimator {
    fn spawn_tile(&mut self, id: TileId, kind: TileKind, _from: Point, to: Point) {
        self.tiles.insert(
            id,
            VisualTile {
                kind,
                pos: to,
                target: to,
                highlighted: false,
            },
        );
    }

    fn move_tile(&mut self, id: TileId, to: Point) {
        if let Some(tile) = self.tiles.get_mut(&id) {
            tile.pos = to;
            tile.target = to;
        }
    }

    fn remove_tile(&mut self, id: TileId) {
        if self.tiles.remove(&id).is_some() {
            self.removed += 1;
        }
    }

    fn set_highlight(&mut self, id: TileId, on: bool) {
        if let Some(tile) = self.tiles.get_mut(&id) {
            tile.highlighted = on;
        }
    }

    fn is_moving(&self, _id: TileId) -> bool {
        false
    }
}

/// Animator that moves tiles at a constant speed.
#[derive(Debug, Clone)]
pub struct TimedAnimator {
    tiles: HashMap<TileId, VisualTile>,
    /// Units per second
    speed: f32,
}

// Closer than this counts as arrived.
const ARRIVE_EPSILON: f32 = 0.01;

impl TimedAnimator {
    pub fn new(speed: f32) -> Self {
        Self {
            tiles: HashMap::new(),
            speed,
        }
    }

    pub fn position(&self, id: TileId) -> Option<Point> {
        self.tiles.get(&id).map(|tile| tile.pos)
    }

    pub fn tile(&self, id: TileId) -> Option<&VisualTile> {
        self.tiles.get(&id)
    }

    pub fn moving_count(&self) -> usize {
        self.tiles.values().filter(|t| t.pos != t.target).count()
    }
}

impl Animator for TimedAnimator {
    fn spawn_tile(&mut self, id: TileId, kind: TileKind, from: Point, to: Point) {
        self.tiles.insert(
            id,
            VisualTile {
                kind,
                pos: from,
                target: to,
                highlighted: false,
            },
        );
    }

    fn move_tile(&mut self, id: TileId, to: Point) {
        if let Some(tile) = self.tiles.get_mut(&id) {
            tile.target = to;
        }
    }

    fn remove_tile(&mut self, id: TileId) {
        self.tiles.remove(&id);
    }

    fn set_highlight(&mut self, id: TileId, on: bool) {
        if let Some(tile) = self.tiles.get_mut(&id) {
            tile.highlighted = on;
        }
    }

    fn is_moving(&self, id: TileId) -> bool {
        self.tiles.get(&id).is_some_and(|t| t.pos != t.target)
    }

    fn update(&mut self, elapsed_ms: u32) {
        let step = self.speed * elapsed_ms as f32 / 1000.0;
        for tile in self.tiles.values_mut() {
            if tile.pos == tile.target {
                continue;
            }
            let remaining = tile.pos.distance(tile.target);
            if remaining <= step || remaining < ARRIVE_EPSILON {
                tile.pos = tile.target;
            } else {
                let t = step / remaining;
                tile.pos.x += (tile.target.x - tile.pos.x) * t;
                tile.pos.y += (tile.target.y - tile.pos.y) * t;
            }
        }
    }

    fn snap(&mut self, id: TileId) {
        if let Some(tile) = self.tiles.get_mut(&id) {
            tile.pos = tile.target;
        }
    }
}

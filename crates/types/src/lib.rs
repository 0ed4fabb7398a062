//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! from the pure board logic, the engine state machine and input mapping alike.
//!
//! # Coordinates
//!
//! Cells are addressed by `(row, col)`:
//!
//! - **row** grows downward; row 0 is the top of the board and gravity pulls
//!   tiles toward higher rows
//! - **col** grows to the right
//!
//! # Default Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_ROWS` | 8 | Board height |
//! | `DEFAULT_COLUMNS` | 8 | Board width |
//! | `DEFAULT_TILE_TYPES` | 5 | Distinct tile kinds |
//! | `MIN_TILE_TYPES` | 3 | Smallest kind count the generator supports |
//! | `BASE_SCORE` | 10 | Points per cleared tile at combo 1 |
//! | `MIN_MATCH` | 3 | Shortest run that counts as a match |
//! | `TICK_MS` | 16 | Fixed frame interval (~60 FPS) |
//! | `ANIMATION_TIMEOUT_MS` | 5000 | Longest wait for an animation to settle |
//!
//! # Examples
//!
//! ```
//! use match3_types::{Direction, Position};
//!
//! let a = Position::new(2, 3);
//! let b = a.step(Direction::Right).unwrap();
//! assert_eq!(b, Position::new(2, 4));
//! assert!(a.is_adjacent(b));
//!
//! // No diagonals
//! assert!(!a.is_adjacent(Position::new(3, 4)));
//!
//! // Stepping off the top/left edge has no position
//! assert_eq!(Position::new(0, 0).step(Direction::Up), None);
//!
//! assert_eq!(Direction::from_str("left"), Some(Direction::Left));
//! ```

/// Default board height in cells
pub const DEFAULT_ROWS: usize = 8;

/// Default board width in cells
pub const DEFAULT_COLUMNS: usize = 8;

/// Default number of distinct tile kinds
pub const DEFAULT_TILE_TYPES: u8 = 5;

/// Fewest kinds for which match-free generation always has a legal choice
pub const MIN_TILE_TYPES: u8 = 3;

/// Upper bound on tile kinds (sizes fixed-capacity candidate buffers)
pub const MAX_TILE_TYPES: usize = 16;

/// Points awarded per cleared tile before the combo multiplier
pub const BASE_SCORE: u32 = 10;

/// Shortest contiguous run that counts as a match
pub const MIN_MATCH: usize = 3;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Default tile travel speed in grid units per second
pub const DEFAULT_MOVE_SPEED: f32 = 10.0;

/// Default distance between adjacent cell centers in grid units
pub const DEFAULT_TILE_SPACING: f32 = 1.0;

/// Upper bound on waiting for the animator before tiles are snapped into place
pub const ANIMATION_TIMEOUT_MS: u32 = 5000;

/// Score needed to complete the first level
pub const DEFAULT_TARGET_SCORE: u32 = 1000;

/// Committed swaps allowed on the first level
pub const DEFAULT_MOVES_LIMIT: u32 = 30;

/// Time allowed per level (5 minutes)
pub const DEFAULT_TIME_LIMIT_MS: u64 = 300_000;

/// Target score increase per level
pub const LEVEL_TARGET_STEP: u32 = 500;

/// Move limit increase per level
pub const LEVEL_MOVES_STEP: u32 = 5;

/// Pointer travel (screen units) that turns a touch into a swipe
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;

/// A tile's kind, an index in `[0, tile_types)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKind(pub u8);

impl TileKind {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle for one tile instance.
///
/// Stands in for the externally owned visual; every spawn gets a fresh id so
/// presentation layers can key their sprites on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

/// A cell address on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Two cells are adjacent iff they differ by one step along exactly one axis.
    pub fn is_adjacent(self, other: Position) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        (dr == 1 && dc == 0) || (dr == 0 && dc == 1)
    }

    /// Neighbouring position in `dir`.
    ///
    /// Returns `None` when the step would go above row 0 or left of column 0.
    /// The upper bounds depend on the board and are checked by the grid.
    pub fn step(self, dir: Direction) -> Option<Position> {
        let (dr, dc) = dir.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(Position { row, col })
    }
}

/// The four swap directions (no diagonals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(row, col)` offset of one step.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Parse direction from string (case-insensitive)
    ///
    /// Accepts full names or single letters: "up" | "u", "down" | "d",
    /// "left" | "l", "right" | "r"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// A point in grid space, used as an animation target.
///
/// Column maps to +x and row maps to -y, so row 0 sits at y = 0 and lower rows
/// have more negative y.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Discrete input delivered by an input source into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A tile was tapped or clicked
    Tap(Position),
    /// A swipe started on `from` and moved toward `dir`
    Swipe { from: Position, dir: Direction },
}

/// Notifications the engine queues for presentation (sound, score display).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    TileSelected(Position),
    TileDeselected(Position),
    /// A swap was committed because it produced a match
    Swapped { a: Position, b: Position },
    /// A swap produced no match and is being undone
    InvalidMove { a: Position, b: Position },
    /// The undo animation of an invalid move finished
    SwapReverted { a: Position, b: Position },
    /// One cascade iteration removed `tiles` cells at multiplier `combo`
    Matched { tiles: u32, combo: u32 },
    ScoreChanged { score: u32, delta: u32 },
    /// The cascade reached a stable board
    CascadeFinished { iterations: u32 },
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOverReason {
    OutOfMoves,
    OutOfTime,
    NoPossibleMoves,
}

impl GameOverReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverReason::OutOfMoves => "no moves remaining",
            GameOverReason::OutOfTime => "time's up",
            GameOverReason::NoPossibleMoves => "no possible moves",
        }
    }
}

/// Lifecycle of a play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver(GameOverReason),
    LevelComplete,
}

impl GameStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, GameStatus::GameOver(_) | GameStatus::LevelComplete)
    }
}

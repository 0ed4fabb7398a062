//! Board configuration supplied once at session start.
//!
//! Values come from `Default`, an optional JSON settings file (loaded by the
//! host) and `MATCH3_*` environment overrides. [`BoardConfig::validate`] is the
//! single gate every engine constructor goes through; an invalid config is a
//! fatal startup condition, never something gameplay has to recover from.

use serde::{Deserialize, Serialize};

use crate::types::{
    Point, Position, ANIMATION_TIMEOUT_MS, BASE_SCORE, DEFAULT_COLUMNS, DEFAULT_MOVE_SPEED,
    DEFAULT_ROWS, DEFAULT_TILE_SPACING, DEFAULT_TILE_TYPES, MAX_TILE_TYPES, MIN_MATCH,
    MIN_TILE_TYPES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    EmptyGrid,
    TooFewTileTypes,
    TooManyTileTypes,
    MissingSprites,
    InvalidSpacing,
    InvalidMatchLength,
    InvalidSpeed,
    GridMismatch,
}

impl ConfigError {
    pub fn code(self) -> &'static str {
        match self {
            ConfigError::EmptyGrid => "empty_grid",
            ConfigError::TooFewTileTypes | ConfigError::TooManyTileTypes => "tile_types",
            ConfigError::MissingSprites => "missing_sprites",
            ConfigError::InvalidSpacing
            | ConfigError::InvalidMatchLength
            | ConfigError::InvalidSpeed => "invalid_value",
            ConfigError::GridMismatch => "grid_mismatch",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ConfigError::EmptyGrid => "rows and columns must both be at least 1",
            ConfigError::TooFewTileTypes => "at least 3 tile types are required",
            ConfigError::TooManyTileTypes => "tile type count exceeds the supported maximum",
            ConfigError::MissingSprites => "sprite table has fewer entries than tile types",
            ConfigError::InvalidSpacing => "tile spacing must be a positive finite number",
            ConfigError::InvalidMatchLength => "minimum match length must be at least 3",
            ConfigError::InvalidSpeed => "move speed must be a positive finite number",
            ConfigError::GridMismatch => "grid does not fit the configured dimensions or kinds",
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for ConfigError {}

/// Session settings for one board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub columns: usize,
    pub tile_types: u8,
    /// Distance between neighbouring cell centers (presentation units)
    pub tile_spacing: f32,
    /// Sprite asset name per kind; index = kind
    pub tile_sprites: Vec<String>,
    pub base_score: u32,
    pub min_match: usize,
    /// Travel speed for animated tiles, units per second
    pub move_speed: f32,
    pub animation_timeout_ms: u32,
    pub seed: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            tile_types: DEFAULT_TILE_TYPES,
            tile_spacing: DEFAULT_TILE_SPACING,
            tile_sprites: default_sprites(DEFAULT_TILE_TYPES),
            base_score: BASE_SCORE,
            min_match: MIN_MATCH,
            move_speed: DEFAULT_MOVE_SPEED,
            animation_timeout_ms: ANIMATION_TIMEOUT_MS,
            seed: 1,
        }
    }
}

/// Placeholder sprite names `tile_0`, `tile_1`, ...
pub fn default_sprites(tile_types: u8) -> Vec<String> {
    (0..tile_types).map(|i| format!("tile_{}", i)).collect()
}

impl BoardConfig {
    /// Default config for a `rows x columns` board with `tile_types` kinds.
    pub fn with_size(rows: usize, columns: usize, tile_types: u8) -> Self {
        Self {
            rows,
            columns,
            tile_types,
            tile_sprites: default_sprites(tile_types),
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Apply `MATCH3_*` environment overrides on top of `self`.
    ///
    /// Unparseable values are ignored. Changing the kind count without a sprite
    /// table regenerates placeholder sprite names.
    pub fn from_env(mut self) -> Self {
        use std::env;

        fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
            env::var(key).ok().and_then(|s| s.trim().parse().ok())
        }

        if let Some(rows) = parsed("MATCH3_ROWS") {
            self.rows = rows;
        }
        if let Some(columns) = parsed("MATCH3_COLUMNS") {
            self.columns = columns;
        }
        if let Some(tile_types) = parsed::<u8>("MATCH3_TILE_TYPES") {
            if self.tile_sprites.len() < tile_types as usize {
                self.tile_sprites = default_sprites(tile_types);
            }
            self.tile_types = tile_types;
        }
        if let Some(seed) = parsed("MATCH3_SEED") {
            self.seed = seed;
        }
        if let Some(speed) = parsed("MATCH3_MOVE_SPEED") {
            self.move_speed = speed;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.tile_types < MIN_TILE_TYPES {
            return Err(ConfigError::TooFewTileTypes);
        }
        if self.tile_types as usize > MAX_TILE_TYPES {
            return Err(ConfigError::TooManyTileTypes);
        }
        if self.tile_sprites.len() < self.tile_types as usize {
            return Err(ConfigError::MissingSprites);
        }
        if !(self.tile_spacing.is_finite() && self.tile_spacing > 0.0) {
            return Err(ConfigError::InvalidSpacing);
        }
        if self.min_match < MIN_MATCH {
            return Err(ConfigError::InvalidMatchLength);
        }
        if !(self.move_speed.is_finite() && self.move_speed > 0.0) {
            return Err(ConfigError::InvalidSpeed);
        }
        Ok(())
    }

    /// Change the spacing at runtime; rejected values leave it untouched.
    pub fn set_tile_spacing(&mut self, spacing: f32) -> Result<(), ConfigError> {
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(ConfigError::InvalidSpacing);
        }
        self.tile_spacing = spacing;
        Ok(())
    }

    /// Center of a cell in grid space.
    pub fn cell_center(&self, pos: Position) -> Point {
        Point::new(
            pos.col as f32 * self.tile_spacing,
            -(pos.row as f32) * self.tile_spacing,
        )
    }

    /// Where refill tiles appear: one row above the visible grid.
    pub fn spawn_point(&self, col: usize) -> Point {
        Point::new(col as f32 * self.tile_spacing, self.tile_spacing)
    }

    pub fn sprite_for(&self, kind: crate::types::TileKind) -> Option<&str> {
        self.tile_sprites.get(kind.index()).map(String::as_str)
    }
}

//! Core board logic - pure, deterministic, and testable
//!
//! This crate contains the match-3 rules: the grid store, match-free board
//! generation, match detection, gravity/refill, scoring and the move oracle.
//! It has **no** knowledge of animation, input or rendering, which makes it:
//!
//! - **Deterministic**: the same seed produces the same board and refills
//! - **Testable**: every rule is a plain function over a [`Grid`]
//! - **Portable**: usable from the animated engine, headless simulations or AI tooling
//!
//! # Module Structure
//!
//! - [`grid`]: rows x columns tile store; tiles always know their own position
//! - [`generator`]: initial boards with no 3-in-a-row anywhere
//! - [`matcher`]: horizontal/vertical run detection
//! - [`cascade`]: match removal, gravity, refill and the synchronous cascade loop
//! - [`oracle`]: does any adjacent swap produce a match?
//! - [`scoring`]: per-tile points with an escalating combo multiplier
//! - [`config`]: session settings and their validation
//! - [`rng`]: seeded LCG shared by generation and refill
//! - [`snapshot`]: plain-data board view for observers
//!
//! # Example
//!
//! ```
//! use match3_core::{generate, has_matches, has_possible_moves, BoardConfig, SimpleRng};
//!
//! let config = BoardConfig::default();
//! let mut rng = SimpleRng::new(config.seed);
//! let grid = generate(&config, &mut rng);
//!
//! assert!(grid.is_full());
//! assert!(!has_matches(&grid, config.min_match));
//! let _stuck = !has_possible_moves(&grid, config.min_match);
//! ```

pub mod cascade;
pub mod config;
pub mod generator;
pub mod grid;
pub mod matcher;
pub mod oracle;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use match3_types as types;

// Re-export commonly used types for convenience
pub use cascade::{
    apply_gravity, clear_matches, refill, resolve_cascade, CascadeReport, ClearResult, TileFall,
    TileSpawn,
};
pub use config::{BoardConfig, ConfigError};
pub use generator::{eliminate_matches, generate};
pub use grid::{Grid, Tile};
pub use matcher::{find_matches, has_matches, is_part_of_match};
pub use oracle::{count_moves, find_move, has_possible_moves, swap_creates_match};
pub use rng::SimpleRng;
pub use scoring::{cascade_points, tile_points};
pub use snapshot::BoardSnapshot;

//! Animated board engine
//!
//! Wraps the pure rules in `match3-core` with the interactive pieces: tile
//! selection, the swap/validate/revert cycle, a frame-driven cascade and the
//! exclusive processing lock that drops input while tiles are in motion.
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`BoardEngine`] state machine, polled with `tick` |
//! | [`animator`] | [`Animator`] trait plus instant and timed implementations |
//! | [`session`] | score target, move and time limits, levels |
//!
//! # Example
//!
//! ```
//! use match3_engine::{BoardEngine, InstantAnimator};
//! use match3_engine::core::BoardConfig;
//!
//! let mut engine = BoardEngine::new(BoardConfig::default(), InstantAnimator::new()).unwrap();
//! if let Some((a, b)) = engine.find_move() {
//!     assert!(engine.try_swap(a, b));
//!     assert!(engine.run_until_idle(1_000));
//!     assert!(engine.score() >= 30);
//! }
//! ```

pub mod animator;
pub mod engine;
pub mod session;

pub use match3_core as core;
pub use match3_types as types;

pub use animator::{Animator, InstantAnimator, TimedAnimator, VisualTile};
pub use engine::{BoardEngine, Phase};
pub use session::{Session, SessionRules};

//! Match-3 board engine (workspace facade crate).
//!
//! Re-exports the implementation crates under `crates/` as
//! `match3::{core,engine,input,types}`.

pub use match3_core as core;
pub use match3_engine as engine;
pub use match3_input as input;
pub use match3_types as types;

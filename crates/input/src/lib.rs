//! Terminal input module (engine-facing).
//!
//! Independent of any UI framework. [`GestureRecognizer`] turns raw pointer
//! samples into taps and swipes; [`map`] feeds it `crossterm` mouse events and
//! maps key events onto a keyboard cursor. The resulting
//! [`InputEvent`](crate::types::InputEvent)s go to the board engine's
//! `handle_input`.

pub mod gesture;
pub mod map;

pub use match3_types as types;

pub use gesture::GestureRecognizer;
pub use map::{
    handle_key_event, map_mouse_event, should_quit, CellLayout, Cursor, KeyAction,
    CELL_SWIPE_THRESHOLD,
};

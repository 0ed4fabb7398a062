//! Terminal event mapping: mouse gestures and a keyboard cursor.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::gesture::GestureRecognizer;
use crate::types::{Direction, InputEvent, Point, Position};

/// Swipe threshold for terminal input, in cells.
pub const CELL_SWIPE_THRESHOLD: f32 = 0.5;

/// Where the board is drawn in the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellLayout {
    pub origin_col: u16,
    pub origin_row: u16,
    /// Terminal columns per board cell
    pub cell_width: u16,
    /// Terminal rows per board cell
    pub cell_height: u16,
    pub rows: usize,
    pub columns: usize,
}

impl CellLayout {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            origin_col: 0,
            origin_row: 0,
            cell_width: 2,
            cell_height: 1,
            rows,
            columns,
        }
    }

    pub fn with_origin(mut self, col: u16, row: u16) -> Self {
        self.origin_col = col;
        self.origin_row = row;
        self
    }

    pub fn with_cell_size(mut self, width: u16, height: u16) -> Self {
        self.cell_width = width.max(1);
        self.cell_height = height.max(1);
        self
    }

    /// Board cell under terminal position (`col`, `row`).
    pub fn cell_at(&self, col: u16, row: u16) -> Option<Position> {
        let x = col.checked_sub(self.origin_col)? / self.cell_width;
        let y = row.checked_sub(self.origin_row)? / self.cell_height;
        let pos = Position::new(y as usize, x as usize);
        (pos.row < self.rows && pos.col < self.columns).then_some(pos)
    }

    /// Terminal position in cell units, y up.
    pub fn to_point(&self, col: u16, row: u16) -> Point {
        let x = (col as f32 - self.origin_col as f32) / self.cell_width as f32;
        let y = (row as f32 - self.origin_row as f32) / self.cell_height as f32;
        Point::new(x, -y)
    }
}

/// Feed a mouse event through the recognizer. Only the left button counts.
pub fn map_mouse_event(
    gestures: &mut GestureRecognizer,
    event: MouseEvent,
    layout: &CellLayout,
) -> Option<InputEvent> {
    let point = layout.to_point(event.column, event.row);
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            gestures.pointer_down(layout.cell_at(event.column, event.row), point);
            None
        }
        MouseEventKind::Drag(MouseButton::Left) => gestures.pointer_move(point),
        MouseEventKind::Up(MouseButton::Left) => gestures.pointer_up(point),
        _ => None,
    }
}

/// Keyboard-selected cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pos: Position,
    rows: usize,
    columns: usize,
}

impl Cursor {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            pos: Position::new(0, 0),
            rows,
            columns,
        }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    /// Move one cell; stays put at the edge.
    pub fn step(&mut self, dir: Direction) {
        if let Some(next) = self.pos.step(dir) {
            if next.row < self.rows && next.col < self.columns {
                self.pos = next;
            }
        }
    }
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Board(InputEvent),
    Pause,
    Restart,
    Hint,
}

fn key_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Direction::Up)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Direction::Down)
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Direction::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Direction::Right)
        }
        _ => None,
    }
}

/// Map keyboard input to board input or session actions.
///
/// Arrows/hjkl/wasd move the cursor. With Shift (or the upper-case letter)
/// they swipe the tile under the cursor instead. Enter or Space taps.
pub fn handle_key_event(key: KeyEvent, cursor: &mut Cursor) -> Option<KeyAction> {
    if let Some(dir) = key_direction(key.code) {
        let swipe = key.modifiers.contains(KeyModifiers::SHIFT)
            || matches!(key.code, KeyCode::Char(c) if c.is_ascii_uppercase());
        if swipe {
            return Some(KeyAction::Board(InputEvent::Swipe {
                from: cursor.position(),
                dir,
            }));
        }
        cursor.step(dir);
        return None;
    }

    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => {
            Some(KeyAction::Board(InputEvent::Tap(cursor.position())))
        }
        KeyCode::Char('p') | KeyCode::Char('P') => Some(KeyAction::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(KeyAction::Restart),
        KeyCode::Char('?') => Some(KeyAction::Hint),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_cell_at_respects_origin_and_size() {
        let layout = CellLayout::new(8, 8).with_origin(4, 2).with_cell_size(2, 1);
        assert_eq!(layout.cell_at(4, 2), Some(Position::new(0, 0)));
        assert_eq!(layout.cell_at(5, 2), Some(Position::new(0, 0)));
        assert_eq!(layout.cell_at(6, 3), Some(Position::new(1, 1)));
        assert_eq!(layout.cell_at(3, 2), None);
        assert_eq!(layout.cell_at(4 + 16, 2), None);
        assert_eq!(layout.cell_at(4, 10), None);
    }

    #[test]
    fn test_mouse_click_is_tap() {
        let layout = CellLayout::new(8, 8);
        let mut g = GestureRecognizer::new(CELL_SWIPE_THRESHOLD);
        assert_eq!(
            map_mouse_event(&mut g, mouse(MouseEventKind::Down(MouseButton::Left), 6, 3), &layout),
            None
        );
        assert_eq!(
            map_mouse_event(&mut g, mouse(MouseEventKind::Up(MouseButton::Left), 6, 3), &layout),
            Some(InputEvent::Tap(Position::new(3, 3)))
        );
    }

    #[test]
    fn test_mouse_drag_is_swipe() {
        let layout = CellLayout::new(8, 8);
        let mut g = GestureRecognizer::new(CELL_SWIPE_THRESHOLD);
        map_mouse_event(&mut g, mouse(MouseEventKind::Down(MouseButton::Left), 2, 2), &layout);
        // One terminal row down is one cell down
        assert_eq!(
            map_mouse_event(&mut g, mouse(MouseEventKind::Drag(MouseButton::Left), 2, 3), &layout),
            Some(InputEvent::Swipe {
                from: Position::new(2, 1),
                dir: Direction::Down,
            })
        );
        assert_eq!(
            map_mouse_event(&mut g, mouse(MouseEventKind::Up(MouseButton::Left), 2, 3), &layout),
            None
        );
    }

    #[test]
    fn test_right_button_ignored() {
        let layout = CellLayout::new(8, 8);
        let mut g = GestureRecognizer::new(CELL_SWIPE_THRESHOLD);
        assert_eq!(
            map_mouse_event(&mut g, mouse(MouseEventKind::Down(MouseButton::Right), 0, 0), &layout),
            None
        );
        assert!(!g.is_pressed());
    }

    #[test]
    fn test_cursor_keys_move_and_clamp() {
        let mut cursor = Cursor::new(2, 2);
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Up), &mut cursor), None);
        assert_eq!(cursor.position(), Position::new(0, 0));

        handle_key_event(KeyEvent::from(KeyCode::Right), &mut cursor);
        handle_key_event(KeyEvent::from(KeyCode::Char('j')), &mut cursor);
        assert_eq!(cursor.position(), Position::new(1, 1));
        handle_key_event(KeyEvent::from(KeyCode::Char('d')), &mut cursor);
        assert_eq!(cursor.position(), Position::new(1, 1));
    }

    #[test]
    fn test_tap_and_swipe_keys() {
        let mut cursor = Cursor::new(8, 8);
        cursor.step(Direction::Down);
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter), &mut cursor),
            Some(KeyAction::Board(InputEvent::Tap(Position::new(1, 0))))
        );
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT), &mut cursor),
            Some(KeyAction::Board(InputEvent::Swipe {
                from: Position::new(1, 0),
                dir: Direction::Right,
            }))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('K')), &mut cursor),
            Some(KeyAction::Board(InputEvent::Swipe {
                from: Position::new(1, 0),
                dir: Direction::Up,
            }))
        );
        assert_eq!(cursor.position(), Position::new(1, 0));
    }

    #[test]
    fn test_session_keys() {
        let mut cursor = Cursor::new(8, 8);
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('p')), &mut cursor),
            Some(KeyAction::Pause)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('R')), &mut cursor),
            Some(KeyAction::Restart)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('?')), &mut cursor),
            Some(KeyAction::Hint)
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}

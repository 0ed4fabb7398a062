//! Terminal input feeding the board engine

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use match3::core::{swap_creates_match, BoardConfig, Grid};
use match3::engine::{Animator, BoardEngine, InstantAnimator, Phase, Session, SessionRules};
use match3::input::{
    handle_key_event, map_mouse_event, CellLayout, Cursor, GestureRecognizer, KeyAction,
    CELL_SWIPE_THRESHOLD,
};
use match3::types::{GameStatus, InputEvent, Point, Position, TICK_MS};

fn engine() -> BoardEngine<InstantAnimator> {
    let mut rows: Vec<Vec<u8>> = (0..8)
        .map(|r| (0..8).map(|c| ((r + 2 * c) % 5) as u8).collect())
        .collect();
    rows[0] = vec![0, 2, 0, 0, 3, 0, 2, 4];
    let grid = Grid::from_kinds(&rows).unwrap();
    BoardEngine::with_grid(BoardConfig::with_size(8, 8, 5), grid, InstantAnimator::new()).unwrap()
}

/// Route a key action the way a terminal front end does. Returns the hinted
/// swap for `Hint`.
fn apply_key<A: Animator>(
    session: &mut Session<A>,
    action: KeyAction,
) -> Option<(Position, Position)> {
    match action {
        KeyAction::Board(event) => {
            session.handle_input(event);
            None
        }
        KeyAction::Pause => {
            if session.status() == GameStatus::Paused {
                session.resume();
            } else {
                session.pause();
            }
            None
        }
        KeyAction::Restart => {
            session.restart();
            None
        }
        KeyAction::Hint if session.status() == GameStatus::Playing => {
            session.engine().find_move()
        }
        KeyAction::Hint => None,
    }
}

fn press(
    session: &mut Session<InstantAnimator>,
    cursor: &mut Cursor,
    code: KeyCode,
) -> Option<(Position, Position)> {
    let action = handle_key_event(KeyEvent::from(code), cursor)?;
    apply_key(session, action)
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

#[test]
fn test_mouse_drag_swaps_tiles() {
    let mut engine = engine();
    let layout = CellLayout::new(8, 8).with_origin(1, 1);
    let mut gestures = GestureRecognizer::new(CELL_SWIPE_THRESHOLD);

    // Press on (0, 1) and drag one cell left
    let mut events = Vec::new();
    for ev in [
        mouse(MouseEventKind::Down(MouseButton::Left), 3, 1),
        mouse(MouseEventKind::Drag(MouseButton::Left), 2, 1),
        mouse(MouseEventKind::Drag(MouseButton::Left), 1, 1),
        mouse(MouseEventKind::Up(MouseButton::Left), 1, 1),
    ] {
        events.extend(map_mouse_event(&mut gestures, ev, &layout));
    }
    assert_eq!(events.len(), 1);

    assert!(engine.handle_input(events[0]));
    assert!(engine.run_until_idle(1_000));
    assert!(engine.score() >= 30);
}

#[test]
fn test_mouse_clicks_select_then_swap() {
    let mut engine = engine();
    let layout = CellLayout::new(8, 8);
    let mut gestures = GestureRecognizer::new(CELL_SWIPE_THRESHOLD);

    for column in [0u16, 2] {
        map_mouse_event(
            &mut gestures,
            mouse(MouseEventKind::Down(MouseButton::Left), column, 0),
            &layout,
        );
        let tap = map_mouse_event(
            &mut gestures,
            mouse(MouseEventKind::Up(MouseButton::Left), column, 0),
            &layout,
        )
        .unwrap();
        engine.handle_input(tap);
    }
    assert_eq!(
        engine.phase(),
        Phase::Swapping {
            a: Position::new(0, 0),
            b: Position::new(0, 1)
        }
    );
}

#[test]
fn test_keyboard_swipe_and_tap() {
    let mut engine = engine();
    let mut cursor = Cursor::new(8, 8);

    assert_eq!(
        handle_key_event(KeyEvent::from(KeyCode::Char(' ')), &mut cursor),
        Some(KeyAction::Board(InputEvent::Tap(Position::new(0, 0))))
    );

    let Some(KeyAction::Board(event)) =
        handle_key_event(KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT), &mut cursor)
    else {
        panic!("shift+right should swipe");
    };
    assert!(engine.handle_input(event));
    assert!(engine.run_until_idle(1_000));
    assert_eq!(engine.committed_swaps(), 1);
}

#[test]
fn test_pixel_space_swipe_up_is_row_minus_one() {
    let mut gestures = GestureRecognizer::default();
    gestures.pointer_down(Some(Position::new(4, 4)), Point::new(0.0, 0.0));
    let event = gestures.pointer_move(Point::new(5.0, 75.0)).unwrap();
    let InputEvent::Swipe { from, dir } = event else {
        panic!("expected swipe");
    };
    assert_eq!(from.step(dir), Some(Position::new(3, 4)));
}

#[test]
fn test_session_keys_pause_hint_and_restart() {
    let rules = SessionRules {
        target_score: u32::MAX,
        ..SessionRules::default()
    };
    let mut session = Session::new(BoardConfig::default(), rules, InstantAnimator::new()).unwrap();
    let mut cursor = Cursor::new(8, 8);
    let initial = session.engine().grid().to_kinds();

    // Hint names a real move; playing it by taps counts as one move
    let (a, b) = press(&mut session, &mut cursor, KeyCode::Char('?')).unwrap();
    assert!(a.is_adjacent(b));
    assert!(swap_creates_match(session.engine().grid(), a, b, 3));
    assert!(session.handle_input(InputEvent::Tap(a)));
    assert!(session.handle_input(InputEvent::Tap(b)));
    while session.engine().is_processing() {
        session.tick(TICK_MS);
    }
    assert_eq!(session.moves_made(), 1);
    assert!(session.score() > 0);
    assert_eq!(session.status(), GameStatus::Playing);

    // p pauses: clock and taps freeze, hints go quiet
    assert_eq!(press(&mut session, &mut cursor, KeyCode::Char('p')), None);
    assert_eq!(session.status(), GameStatus::Paused);
    let elapsed = session.elapsed_ms();
    session.tick(1_000);
    assert_eq!(session.elapsed_ms(), elapsed);
    assert_eq!(press(&mut session, &mut cursor, KeyCode::Char('?')), None);
    press(&mut session, &mut cursor, KeyCode::Enter);
    assert_eq!(session.engine().phase(), Phase::Idle);

    // P resumes
    press(&mut session, &mut cursor, KeyCode::Char('P'));
    assert_eq!(session.status(), GameStatus::Playing);
    session.tick(TICK_MS);
    assert_eq!(session.elapsed_ms(), elapsed + TICK_MS as u64);

    // r restarts on the seeded board
    press(&mut session, &mut cursor, KeyCode::Char('r'));
    assert_eq!(session.status(), GameStatus::Playing);
    assert_eq!(session.level(), 1);
    assert_eq!(session.score(), 0);
    assert_eq!(session.moves_made(), 0);
    assert_eq!(session.elapsed_ms(), 0);
    assert_eq!(session.engine().grid().to_kinds(), initial);
}

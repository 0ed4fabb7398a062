//! Tap/swipe recognition from raw pointer samples.
//!
//! Points are in a y-up space: positive y is screen "up", which maps to
//! [`Direction::Up`] (row - 1).

use crate::types::{Direction, InputEvent, Point, Position, DEFAULT_SWIPE_THRESHOLD};

/// Turns pointer down/move/up into [`InputEvent`]s.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    threshold: f32,
    /// Cell under the pointer at press time
    origin: Option<Position>,
    start: Point,
    pressed: bool,
    /// A swipe already fired during this press
    swiped: bool,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

impl GestureRecognizer {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            origin: None,
            start: Point::default(),
            pressed: false,
            swiped: false,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Press at `point`; `cell` is the tile under it, if any.
    pub fn pointer_down(&mut self, cell: Option<Position>, point: Point) {
        self.origin = cell;
        self.start = point;
        self.pressed = true;
        self.swiped = false;
    }

    /// Drag sample. Emits a swipe once the pointer travels past the threshold,
    /// then re-bases so a continued drag needs another full threshold.
    pub fn pointer_move(&mut self, point: Point) -> Option<InputEvent> {
        if !self.pressed {
            return None;
        }
        let from = self.origin?;
        let dir = self.swipe_direction(point)?;
        self.start = point;
        self.swiped = true;
        Some(InputEvent::Swipe { from, dir })
    }

    /// Release. A press that never swiped and stayed within the threshold is
    /// a tap on the pressed cell.
    pub fn pointer_up(&mut self, point: Point) -> Option<InputEvent> {
        if !self.pressed {
            return None;
        }
        self.pressed = false;
        let origin = self.origin.take()?;
        if self.swiped || self.start.distance(point) > self.threshold {
            return None;
        }
        Some(InputEvent::Tap(origin))
    }

    /// Drop the current press without emitting anything.
    pub fn cancel(&mut self) {
        self.pressed = false;
        self.origin = None;
    }

    fn swipe_direction(&self, point: Point) -> Option<Direction> {
        let dx = point.x - self.start.x;
        let dy = point.y - self.start.y;
        if self.start.distance(point) <= self.threshold {
            return None;
        }
        let dir = if dx.abs() > dy.abs() {
            if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if dy > 0.0 {
            Direction::Up
        } else {
            Direction::Down
        };
        Some(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELL: Position = Position::new(3, 4);

    #[test]
    fn test_short_press_is_tap() {
        let mut g = GestureRecognizer::default();
        g.pointer_down(Some(CELL), Point::new(100.0, 100.0));
        assert_eq!(g.pointer_move(Point::new(120.0, 110.0)), None);
        assert_eq!(
            g.pointer_up(Point::new(130.0, 100.0)),
            Some(InputEvent::Tap(CELL))
        );
        assert!(!g.is_pressed());
    }

    #[test]
    fn test_dominant_axis_decides_direction() {
        let cases = [
            (Point::new(80.0, 10.0), Direction::Right),
            (Point::new(-80.0, 30.0), Direction::Left),
            (Point::new(10.0, 60.0), Direction::Up),
            (Point::new(-20.0, -60.0), Direction::Down),
        ];
        for (to, dir) in cases {
            let mut g = GestureRecognizer::default();
            g.pointer_down(Some(CELL), Point::new(0.0, 0.0));
            assert_eq!(
                g.pointer_move(to),
                Some(InputEvent::Swipe { from: CELL, dir }),
                "drag to {:?}",
                to
            );
        }
    }

    #[test]
    fn test_exact_threshold_is_not_a_swipe() {
        let mut g = GestureRecognizer::new(50.0);
        g.pointer_down(Some(CELL), Point::new(0.0, 0.0));
        assert_eq!(g.pointer_move(Point::new(50.0, 0.0)), None);
        assert_eq!(g.pointer_up(Point::new(50.0, 0.0)), Some(InputEvent::Tap(CELL)));
    }

    #[test]
    fn test_swipe_rebases_and_suppresses_tap() {
        let mut g = GestureRecognizer::new(50.0);
        g.pointer_down(Some(CELL), Point::new(0.0, 0.0));
        assert!(g.pointer_move(Point::new(60.0, 0.0)).is_some());
        // Only 30 past the new base
        assert_eq!(g.pointer_move(Point::new(90.0, 0.0)), None);
        assert_eq!(g.pointer_up(Point::new(90.0, 0.0)), None);
    }

    #[test]
    fn test_press_outside_board_emits_nothing() {
        let mut g = GestureRecognizer::default();
        g.pointer_down(None, Point::new(0.0, 0.0));
        assert_eq!(g.pointer_move(Point::new(200.0, 0.0)), None);
        assert_eq!(g.pointer_up(Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_move_without_press_ignored() {
        let mut g = GestureRecognizer::default();
        assert_eq!(g.pointer_move(Point::new(500.0, 0.0)), None);
        assert_eq!(g.pointer_up(Point::new(0.0, 0.0)), None);

        g.pointer_down(Some(CELL), Point::new(0.0, 0.0));
        g.cancel();
        assert_eq!(g.pointer_up(Point::new(0.0, 0.0)), None);
    }
}

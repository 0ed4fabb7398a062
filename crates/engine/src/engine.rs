//! Board engine - selection, swap validation and cascade resolution
//!
//! The engine is a poll-based state machine. The host calls
//! [`BoardEngine::tick`] once per frame; each tick forwards time to the
//! animator, checks whether the tiles the engine is waiting on have settled,
//! and advances at most one phase:
//!
//! ```text
//! Idle ──tap──▶ Selected ──tap adjacent──▶ Swapping ──match──▶ Falling ⇄ Refilling ──stable──▶ Idle
//!   ▲              │                           │
//!   └──same tile───┘                           └──no match──▶ Reverting ──▶ Idle
//! ```
//!
//! `Falling` and `Refilling` together form the resolving cascade. While any of
//! `Swapping`, `Reverting`, `Falling` or `Refilling` is active the engine is
//! processing: all input is dropped (not queued) and the sequence always runs
//! to completion.
//!
//! Grid slots and tile coordinates change together the moment a swap, fall or
//! spawn is issued; the animation only catches the visuals up.

use tracing::{debug, info, instrument, warn};

use crate::core::{
    apply_gravity, clear_matches, find_move, generate, has_matches, has_possible_moves, refill,
    scoring::next_combo, BoardConfig, BoardSnapshot, ConfigError, Grid, SimpleRng,
};
use crate::types::{BoardEvent, Direction, InputEvent, Position, TileId, TICK_MS};
use crate::Animator;

/// Where the engine is in its swap/resolve cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing selected, accepting input
    Idle,
    /// One tile selected, awaiting the second
    Selected(Position),
    /// Trial swap animating
    Swapping { a: Position, b: Position },
    /// Swap produced no match; animating back
    Reverting { a: Position, b: Position },
    /// Matched tiles removed; survivors falling
    Falling,
    /// Refill tiles dropping in
    Refilling,
}

impl Phase {
    pub fn is_processing(&self) -> bool {
        !matches!(self, Phase::Idle | Phase::Selected(_))
    }
}

/// The match-3 board with its animation collaborator.
#[derive(Debug)]
pub struct BoardEngine<A: Animator> {
    config: BoardConfig,
    grid: Grid,
    rng: SimpleRng,
    animator: A,
    phase: Phase,
    score: u32,
    combo_multiplier: u32,
    /// Matching iterations in the current cascade
    cascade_iterations: u32,
    /// Swaps that produced a match (reverted swaps excluded)
    committed_swaps: u32,
    /// Tiles whose animation the current phase waits on
    pending: Vec<TileId>,
    wait_ms: u32,
    events: Vec<BoardEvent>,
}

impl<A: Animator> BoardEngine<A> {
    /// Validate `config`, generate a match-free board and show it.
    pub fn new(config: BoardConfig, animator: A) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = SimpleRng::new(config.seed);
        let grid = generate(&config, &mut rng);
        Ok(Self::assemble(config, grid, rng, animator))
    }

    /// Start from a caller-supplied board.
    ///
    /// The grid must be full, match the configured dimensions and only use
    /// kinds below `config.tile_types`.
    pub fn with_grid(config: BoardConfig, grid: Grid, animator: A) -> Result<Self, ConfigError> {
        config.validate()?;
        let fits = grid.rows() == config.rows
            && grid.columns() == config.columns
            && grid.is_full()
            && grid.tiles().all(|t| t.kind.0 < config.tile_types);
        if !fits {
            return Err(ConfigError::GridMismatch);
        }
        let rng = SimpleRng::new(config.seed);
        Ok(Self::assemble(config, grid, rng, animator))
    }

    fn assemble(config: BoardConfig, grid: Grid, rng: SimpleRng, animator: A) -> Self {
        let mut engine = Self {
            config,
            grid,
            rng,
            animator,
            phase: Phase::Idle,
            score: 0,
            combo_multiplier: 1,
            cascade_iterations: 0,
            committed_swaps: 0,
            pending: Vec::new(),
            wait_ms: 0,
            events: Vec::new(),
        };
        engine.show_board();
        info!(
            rows = engine.config.rows,
            columns = engine.config.columns,
            tile_types = engine.config.tile_types,
            "board ready"
        );
        engine
    }

    fn show_board(&mut self) {
        for tile in self.grid.tiles() {
            let at = self.config.cell_center(tile.pos);
            self.animator.spawn_tile(tile.id, tile.kind, at, at);
        }
    }

    /// Discard the board and regenerate it from the configured seed.
    pub fn reset(&mut self) {
        for tile in self.grid.tiles() {
            self.animator.remove_tile(tile.id);
        }
        self.rng = SimpleRng::new(self.config.seed);
        self.grid = generate(&self.config, &mut self.rng);
        self.phase = Phase::Idle;
        self.score = 0;
        self.combo_multiplier = 1;
        self.cascade_iterations = 0;
        self.committed_swaps = 0;
        self.pending.clear();
        self.wait_ms = 0;
        self.events.clear();
        self.show_board();
        info!("board reset");
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected(&self) -> Option<Position> {
        match self.phase {
            Phase::Selected(pos) => Some(pos),
            _ => None,
        }
    }

    /// True while a swap or cascade is in flight; input is dropped meanwhile.
    pub fn is_processing(&self) -> bool {
        self.phase.is_processing()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo_multiplier(&self) -> u32 {
        self.combo_multiplier
    }

    pub fn committed_swaps(&self) -> u32 {
        self.committed_swaps
    }

    /// Drain queued presentation events.
    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn has_possible_moves(&self) -> bool {
        has_possible_moves(&self.grid, self.config.min_match)
    }

    /// A swap that would match, for hints and autoplay.
    pub fn find_move(&self) -> Option<(Position, Position)> {
        find_move(&self.grid, self.config.min_match)
    }

    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.write_board(&self.grid);
        out.score = self.score;
        out.combo_multiplier = self.combo_multiplier;
        out.processing = self.is_processing();
        out.selected = self.selected().map(|p| (p.row, p.col));
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut s = BoardSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Route a tap or swipe from an input source.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Tap(pos) => self.on_tile_clicked(pos),
            InputEvent::Swipe { from, dir } => self.on_swipe(from, dir),
        }
    }

    /// Tap/click handler.
    ///
    /// First tap selects; tapping the same tile deselects; tapping a
    /// non-adjacent tile moves the selection; tapping an adjacent tile swaps.
    /// Returns false when the input was dropped or ignored.
    #[instrument(level = "debug", skip(self))]
    pub fn on_tile_clicked(&mut self, pos: Position) -> bool {
        if self.is_processing() {
            debug!("input dropped while processing");
            return false;
        }
        if self.grid.get(pos).is_none() {
            return false;
        }

        match self.phase {
            Phase::Selected(current) if current == pos => {
                self.deselect();
            }
            Phase::Selected(current) if current.is_adjacent(pos) => {
                self.begin_swap(current, pos);
            }
            Phase::Selected(_) => {
                self.deselect();
                self.select(pos);
            }
            _ => self.select(pos),
        }
        true
    }

    /// Direct swap entry point (swipe input).
    ///
    /// Rejected without any state change while processing, for out-of-bounds
    /// cells, the same cell, or non-adjacent cells.
    #[instrument(level = "debug", skip(self))]
    pub fn try_swap(&mut self, a: Position, b: Position) -> bool {
        if self.is_processing() {
            debug!("swap dropped while processing");
            return false;
        }
        if self.grid.get(a).is_none() || self.grid.get(b).is_none() || !a.is_adjacent(b) {
            return false;
        }
        self.begin_swap(a, b);
        true
    }

    /// Swipe from `from` toward `dir`.
    pub fn on_swipe(&mut self, from: Position, dir: Direction) -> bool {
        match from.step(dir) {
            Some(to) => self.try_swap(from, to),
            None => false,
        }
    }

    fn select(&mut self, pos: Position) {
        if let Some(tile) = self.grid.get(pos) {
            self.animator.set_highlight(tile.id, true);
        }
        self.phase = Phase::Selected(pos);
        self.events.push(BoardEvent::TileSelected(pos));
    }

    fn deselect(&mut self) {
        if let Some(pos) = self.clear_selection() {
            self.events.push(BoardEvent::TileDeselected(pos));
        }
    }

    fn clear_selection(&mut self) -> Option<Position> {
        let Phase::Selected(pos) = self.phase else {
            return None;
        };
        if let Some(tile) = self.grid.get(pos) {
            self.animator.set_highlight(tile.id, false);
        }
        self.phase = Phase::Idle;
        Some(pos)
    }

    fn begin_swap(&mut self, a: Position, b: Position) {
        self.deselect();
        self.grid.swap(a, b);
        self.animate_to_cells(&[a, b]);
        self.phase = Phase::Swapping { a, b };
        debug!(?a, ?b, "swapping");
    }

    fn animate_to_cells(&mut self, cells: &[Position]) {
        for &pos in cells {
            if let Some(tile) = self.grid.get(pos) {
                self.animator.move_tile(tile.id, self.config.cell_center(pos));
                self.pending.push(tile.id);
            }
        }
        self.wait_ms = 0;
    }

    /// Advance one frame.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.animator.update(elapsed_ms);

        if !self.phase.is_processing() || !self.animations_settled(elapsed_ms) {
            return;
        }

        match self.phase {
            Phase::Swapping { a, b } => self.finish_swap(a, b),
            Phase::Reverting { a, b } => {
                self.events.push(BoardEvent::SwapReverted { a, b });
                self.phase = Phase::Idle;
            }
            Phase::Falling => self.spawn_refill(),
            Phase::Refilling => self.resolve_step(),
            Phase::Idle | Phase::Selected(_) => {}
        }
    }

    /// Tick at [`TICK_MS`] until idle; false if `max_ticks` ran out first.
    pub fn run_until_idle(&mut self, max_ticks: u32) -> bool {
        let mut ticks = 0;
        while self.is_processing() {
            if ticks >= max_ticks {
                return false;
            }
            self.tick(TICK_MS);
            ticks += 1;
        }
        true
    }

    /// Whether every awaited tile has stopped, snapping them on timeout.
    fn animations_settled(&mut self, elapsed_ms: u32) -> bool {
        let animator = &self.animator;
        self.pending.retain(|&id| animator.is_moving(id));
        if self.pending.is_empty() {
            self.wait_ms = 0;
            return true;
        }

        self.wait_ms = self.wait_ms.saturating_add(elapsed_ms);
        if self.wait_ms < self.config.animation_timeout_ms {
            return false;
        }

        warn!(
            pending = self.pending.len(),
            waited_ms = self.wait_ms,
            "animation wait timed out; snapping tiles into place"
        );
        for id in self.pending.drain(..) {
            self.animator.snap(id);
        }
        self.wait_ms = 0;
        true
    }

    fn finish_swap(&mut self, a: Position, b: Position) {
        if has_matches(&self.grid, self.config.min_match) {
            info!(?a, ?b, "valid move");
            self.committed_swaps = self.committed_swaps.saturating_add(1);
            self.events.push(BoardEvent::Swapped { a, b });
            self.combo_multiplier = 1;
            self.cascade_iterations = 0;
            self.resolve_step();
        } else {
            debug!(?a, ?b, "invalid move; swapping back");
            self.events.push(BoardEvent::InvalidMove { a, b });
            self.grid.swap(a, b);
            self.animate_to_cells(&[a, b]);
            self.phase = Phase::Reverting { a, b };
        }
    }

    /// One cascade iteration: clear, score, then let the survivors fall.
    fn resolve_step(&mut self) {
        let Some(cleared) = clear_matches(
            &mut self.grid,
            self.config.min_match,
            self.config.base_score,
            self.combo_multiplier,
        ) else {
            let iterations = self.cascade_iterations;
            self.combo_multiplier = 1;
            self.cascade_iterations = 0;
            self.phase = Phase::Idle;
            self.events.push(BoardEvent::CascadeFinished { iterations });
            debug!(iterations, score = self.score, "cascade settled");
            return;
        };

        self.cascade_iterations += 1;
        for tile in &cleared.removed {
            self.animator.remove_tile(tile.id);
        }

        let tiles = cleared.removed.len() as u32;
        self.score = self.score.saturating_add(cleared.points);
        self.events.push(BoardEvent::Matched {
            tiles,
            combo: cleared.combo,
        });
        self.events.push(BoardEvent::ScoreChanged {
            score: self.score,
            delta: cleared.points,
        });
        info!(tiles, combo = cleared.combo, score = self.score, "matched");

        self.combo_multiplier = next_combo(self.combo_multiplier);

        for fall in apply_gravity(&mut self.grid) {
            self.animator
                .move_tile(fall.id, self.config.cell_center(fall.to));
            self.pending.push(fall.id);
        }
        self.wait_ms = 0;
        self.phase = Phase::Falling;
    }

    fn spawn_refill(&mut self) {
        for spawn in refill(&mut self.grid, self.config.tile_types, &mut self.rng) {
            self.animator.spawn_tile(
                spawn.id,
                spawn.kind,
                self.config.spawn_point(spawn.pos.col),
                self.config.cell_center(spawn.pos),
            );
            self.pending.push(spawn.id);
        }
        self.wait_ms = 0;
        self.phase = Phase::Refilling;
    }
}

//! Level session - score target, move and time limits on top of a board
//!
//! The session owns a [`BoardEngine`] and decides when play stops. Status is
//! only re-evaluated once the engine is idle, so a cascade in flight always
//! finishes and its points count before the level can end.

use tracing::info;

use crate::core::{BoardConfig, ConfigError};
use crate::types::{
    GameOverReason, GameStatus, InputEvent, DEFAULT_MOVES_LIMIT, DEFAULT_TARGET_SCORE,
    DEFAULT_TIME_LIMIT_MS, LEVEL_MOVES_STEP, LEVEL_TARGET_STEP,
};
use crate::{Animator, BoardEngine};

/// Win/lose thresholds for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRules {
    pub target_score: u32,
    pub moves_limit: u32,
    pub time_limit_ms: u64,
}

impl Default for SessionRules {
    fn default() -> Self {
        Self {
            target_score: DEFAULT_TARGET_SCORE,
            moves_limit: DEFAULT_MOVES_LIMIT,
            time_limit_ms: DEFAULT_TIME_LIMIT_MS,
        }
    }
}

impl SessionRules {
    /// Apply `MATCH3_TARGET_SCORE`, `MATCH3_MOVES_LIMIT` and
    /// `MATCH3_TIME_LIMIT_MS` overrides. Unparseable values are ignored.
    pub fn from_env(mut self) -> Self {
        fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
            std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
        }

        if let Some(v) = parsed("MATCH3_TARGET_SCORE") {
            self.target_score = v;
        }
        if let Some(v) = parsed("MATCH3_MOVES_LIMIT") {
            self.moves_limit = v;
        }
        if let Some(v) = parsed("MATCH3_TIME_LIMIT_MS") {
            self.time_limit_ms = v;
        }
        self
    }
}

#[derive(Debug)]
pub struct Session<A: Animator> {
    engine: BoardEngine<A>,
    base_rules: SessionRules,
    rules: SessionRules,
    status: GameStatus,
    level: u32,
    elapsed_ms: u64,
    /// `committed_swaps` at the start of the level
    moves_base: u32,
}

impl<A: Animator> Session<A> {
    pub fn new(config: BoardConfig, rules: SessionRules, animator: A) -> Result<Self, ConfigError> {
        Ok(Self::from_engine(BoardEngine::new(config, animator)?, rules))
    }

    pub fn from_engine(engine: BoardEngine<A>, rules: SessionRules) -> Self {
        let moves_base = engine.committed_swaps();
        Self {
            engine,
            base_rules: rules,
            rules,
            status: GameStatus::Playing,
            level: 1,
            elapsed_ms: 0,
            moves_base,
        }
    }

    pub fn engine(&self) -> &BoardEngine<A> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut BoardEngine<A> {
        &mut self.engine
    }

    pub fn rules(&self) -> SessionRules {
        self.rules
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.engine.score()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn moves_made(&self) -> u32 {
        self.engine.committed_swaps().saturating_sub(self.moves_base)
    }

    pub fn moves_remaining(&self) -> u32 {
        self.rules.moves_limit.saturating_sub(self.moves_made())
    }

    /// Forward input while playing; dropped in any other status.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        self.engine.handle_input(event)
    }

    /// Advance the board and the level clock.
    ///
    /// Paused sessions do not advance. Once the level is over the board still
    /// ticks so animations can settle, but the clock stops.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.status == GameStatus::Paused {
            return;
        }
        self.engine.tick(elapsed_ms);
        if self.status != GameStatus::Playing {
            return;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms as u64);
        if !self.engine.is_processing() {
            self.evaluate();
        }
    }

    fn evaluate(&mut self) {
        let next = if self.engine.score() >= self.rules.target_score {
            GameStatus::LevelComplete
        } else if self.moves_made() >= self.rules.moves_limit {
            GameStatus::GameOver(GameOverReason::OutOfMoves)
        } else if self.elapsed_ms >= self.rules.time_limit_ms {
            GameStatus::GameOver(GameOverReason::OutOfTime)
        } else if !self.engine.has_possible_moves() {
            GameStatus::GameOver(GameOverReason::NoPossibleMoves)
        } else {
            return;
        };

        info!(
            level = self.level,
            score = self.engine.score(),
            moves = self.moves_made(),
            elapsed_ms = self.elapsed_ms,
            status = ?next,
            "level ended"
        );
        self.status = next;
    }

    pub fn pause(&mut self) {
        if self.status == GameStatus::Playing {
            self.status = GameStatus::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.status == GameStatus::Paused {
            self.status = GameStatus::Playing;
        }
    }

    /// Continue after `LevelComplete` with a higher target and more moves.
    ///
    /// The board and score carry over; the move count and clock restart.
    /// Returns false unless the level was complete.
    pub fn next_level(&mut self) -> bool {
        if self.status != GameStatus::LevelComplete {
            return false;
        }
        self.level += 1;
        self.rules.target_score = self.rules.target_score.saturating_add(LEVEL_TARGET_STEP);
        self.rules.moves_limit = self.rules.moves_limit.saturating_add(LEVEL_MOVES_STEP);
        self.moves_base = self.engine.committed_swaps();
        self.elapsed_ms = 0;
        self.status = GameStatus::Playing;
        info!(
            level = self.level,
            target = self.rules.target_score,
            moves_limit = self.rules.moves_limit,
            "next level"
        );
        true
    }

    /// Back to level 1 with the seeded board and the starting rules.
    pub fn restart(&mut self) {
        self.engine.reset();
        self.rules = self.base_rules;
        self.status = GameStatus::Playing;
        self.level = 1;
        self.elapsed_ms = 0;
        self.moves_base = 0;
        info!("session restarted");
    }
}

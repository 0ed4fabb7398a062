//! Headless match-3 runner (default binary).
//!
//! Plays a seeded session by itself: whenever the board is idle it asks the
//! move oracle for a matching swap and feeds it in as a swipe, then ticks a
//! timed animator at the fixed frame rate until the level ends. Prints a JSON
//! summary on stdout; logs go to stderr (`RUST_LOG` controls verbosity).
//!
//! Configuration: `MATCH3_CONFIG` may point at a JSON `BoardConfig`; the
//! `MATCH3_*` variables override individual fields on top of it.

use std::fs;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use match3::core::{BoardConfig, BoardSnapshot};
use match3::engine::{Session, SessionRules, TimedAnimator};
use match3::types::{Direction, GameStatus, InputEvent, Position, TICK_MS};

/// Hard stop so a misconfigured run cannot spin forever.
const DEFAULT_MAX_FRAMES: u64 = 1_000_000;

#[derive(Debug, Serialize)]
struct Summary {
    levels_completed: u32,
    level: u32,
    score: u32,
    moves: u32,
    elapsed_ms: u64,
    frames: u64,
    status: String,
    board: BoardSnapshot,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config()?;
    let rules = SessionRules::default().from_env();
    let max_levels = env_or("MATCH3_LEVELS", 1u32);
    let max_frames = env_or("MATCH3_MAX_FRAMES", DEFAULT_MAX_FRAMES);

    let summary = run(config, rules, max_levels, max_frames)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("failed to serialize summary")?
    );
    Ok(())
}

fn load_config() -> Result<BoardConfig> {
    let base = match std::env::var("MATCH3_CONFIG") {
        Ok(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file {}", path))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse config file {}", path))?
        }
        Err(_) => BoardConfig::default(),
    };
    Ok(base.from_env())
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn direction_between(from: Position, to: Position) -> Option<Direction> {
    Direction::ALL.into_iter().find(|&dir| from.step(dir) == Some(to))
}

fn run(config: BoardConfig, rules: SessionRules, max_levels: u32, max_frames: u64) -> Result<Summary> {
    let animator = TimedAnimator::new(config.move_speed);
    let mut session =
        Session::new(config, rules, animator).context("invalid board configuration")?;
    info!(seed = session.engine().config().seed, "autoplay started");

    let mut levels_completed = 0;
    let mut frames = 0u64;

    while frames < max_frames {
        match session.status() {
            GameStatus::Playing => {}
            GameStatus::LevelComplete => {
                levels_completed += 1;
                if levels_completed >= max_levels {
                    break;
                }
                session.next_level();
            }
            _ => break,
        }

        if !session.engine().is_processing() {
            if let Some((a, b)) = session.engine().find_move() {
                if let Some(dir) = direction_between(a, b) {
                    session.handle_input(InputEvent::Swipe { from: a, dir });
                }
            }
        }

        session.tick(TICK_MS);
        frames += 1;

        for event in session.engine_mut().take_events() {
            tracing::debug!(?event, "board event");
        }
    }

    if frames >= max_frames {
        warn!(frames, "frame limit reached before the session ended");
    }

    let status = match session.status() {
        GameStatus::GameOver(reason) => format!("game_over:{}", reason.as_str()),
        GameStatus::LevelComplete => "level_complete".to_string(),
        GameStatus::Paused => "paused".to_string(),
        GameStatus::Playing => "playing".to_string(),
    };
    info!(score = session.score(), status = %status, "autoplay finished");

    Ok(Summary {
        levels_completed,
        level: session.level(),
        score: session.score(),
        moves: session.moves_made(),
        elapsed_ms: session.elapsed_ms(),
        frames,
        status,
        board: session.engine().snapshot(),
    })
}

//! Simulation tick
//!
//! One tick runs, in order: cooldown-gated pickup collection, the win check,
//! enemy advancement (skipped while paused), and the enemy collision check.
//! Input commands are applied between ticks, never during one.

use std::time::Duration;

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, GameState};

/// Movement direction (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn unit(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        }
    }
}

/// Discrete player command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    TogglePause,
}

/// Apply one input command. Ignored once the session has ended.
pub fn apply_command(state: &mut GameState, command: Command) {
    if !state.is_running() {
        return;
    }
    match command {
        // Unclamped: the player may leave the field
        Command::Move(dir) => state.player.pos += dir.unit() * state.move_step,
        Command::TogglePause => {
            state.phase = match state.phase {
                GamePhase::Active => GamePhase::Paused,
                GamePhase::Paused => GamePhase::Active,
                other => other,
            };
            log::debug!("Phase -> {:?}", state.phase);
        }
    }
}

/// Advance the game by one tick at session time `now`
pub fn tick(state: &mut GameState, now: Duration, rng: &mut impl Rng) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_running() {
        return events;
    }
    state.time_ticks += 1;

    let player = state.player.pos;
    let size = state.player.size;

    if state.cooldown_elapsed(now) {
        let collection = state.registry.collect_eligible(player, size);
        if !collection.is_empty() {
            state.score += collection.points;
            state.last_collection = Some(now);
            log::debug!(
                "Collected {} pickup(s), score {}, {} left",
                collection.count,
                state.score,
                state.registry.pickups_remaining()
            );
            events.push(GameEvent::PickupsCollected {
                count: collection.count,
                points: collection.points,
            });

            if state.registry.is_cleared() {
                state.phase = GamePhase::Won;
                log::info!("All pickups collected, final score {}", state.score);
                events.push(GameEvent::Won { score: state.score });
                return events;
            }
        }
    }

    if state.phase == GamePhase::Active {
        state
            .registry
            .advance_enemies(player, now, state.bounds, rng);
    }

    // Checked while paused too
    if let Some(enemy) = state.registry.first_hit(player, size) {
        log::info!(
            "Caught by enemy {} ({:?}) at {:?}, final score {}",
            enemy.id,
            enemy.movement,
            enemy.pos,
            state.score
        );
        state.phase = GamePhase::Lost;
        events.push(GameEvent::Lost { score: state.score });
    }

    events
}

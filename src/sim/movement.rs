//! Enemy movement strategies
//!
//! Each variant is a pure step from (enemy, player, time) to a new position.
//! `Random` draws from the injected RNG; the oscillating variants read the
//! session clock as their phase source, so replaying them needs the same
//! timestamps.

use std::time::Duration;

use glam::IVec2;
use rand::Rng;

use super::state::{Enemy, Movement, Pattern};
use crate::consts::*;
use crate::wrap_position;

/// Compute an enemy's next position, wrapped into `[0, bounds]`
pub fn advance(
    enemy: &Enemy,
    player: IVec2,
    now: Duration,
    bounds: IVec2,
    rng: &mut impl Rng,
) -> IVec2 {
    let step = match enemy.movement {
        Movement::Random => IVec2::new(rng.random_range(-1..=1), rng.random_range(-1..=1)),
        Movement::Chase => chase_step(enemy.pos, player, enemy.speed),
        Movement::Patterned(Pattern::Sinusoidal) => IVec2::new(
            enemy.vel.x,
            oscillation(now, SINE_PHASE_SCALE, SINE_AMPLITUDE),
        ),
        Movement::Patterned(Pattern::Zigzag) => IVec2::new(
            enemy.speed,
            oscillation(now, PATTERN_ZIGZAG_PHASE_SCALE, PATTERN_ZIGZAG_AMPLITUDE),
        ),
        // No movement rule exists for straight patterns
        Movement::Patterned(Pattern::Straight) => IVec2::ZERO,
        Movement::Zigzag => IVec2::new(
            enemy.speed,
            oscillation(now, ZIGZAG_PHASE_SCALE, ZIGZAG_AMPLITUDE),
        ),
    };

    wrap_position(enemy.pos + step, bounds)
}

/// Per-axis step of `speed` toward the target; no diagonal normalization
fn chase_step(pos: IVec2, target: IVec2, speed: i32) -> IVec2 {
    (target - pos).signum() * speed
}

/// `round(sin(t_ns * scale) * amplitude)`
fn oscillation(now: Duration, scale: f64, amplitude: f64) -> i32 {
    let phase = now.as_nanos() as f64 * scale;
    (phase.sin() * amplitude).round() as i32
}

//! Coin Dash - A tiny arcade game on a wrap-around field
//!
//! Core modules:
//! - `sim`: Simulation (entities, enemy movement, tick state machine, frame clock)
//! - `session`: Clock-driven runner and the collaborator seams (renderer, end sink)
//! - `renderer`: Terminal renderer
//! - `platform`: Terminal input thread
//! - `settings`: Data-driven game configuration

pub mod error;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SessionError};
pub use session::{Renderer, Session, TerminationSink};
pub use settings::Config;

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// Render canvas size
    pub const FIELD_WIDTH: i32 = 800;
    pub const FIELD_HEIGHT: i32 = 600;

    /// Side of the player's (and enemies') bounding square
    pub const ENTITY_SIZE: i32 = 30;

    /// Initial population
    pub const PICKUP_COUNT: usize = 9;
    pub const ENEMY_COUNT: usize = 5;

    /// Spawn positions are drawn from [0, field - SPAWN_MARGIN)
    pub const SPAWN_MARGIN: i32 = 50;
    pub const PLAYER_START: (i32, i32) = (50, 50);

    /// Player displacement per key press
    pub const MOVE_STEP: i32 = 10;
    /// Score per collected pickup
    pub const PICKUP_POINTS: u32 = 10;

    /// Target update rate
    pub const TICK_RATE_HZ: u32 = 60;
    /// Minimum time between two collection passes
    pub const COLLECTION_COOLDOWN_MS: u64 = 200;

    /// Oscillation constants (phase is in nanoseconds)
    pub const SINE_PHASE_SCALE: f64 = 0.0001;
    pub const SINE_AMPLITUDE: f64 = 5.0;
    pub const PATTERN_ZIGZAG_PHASE_SCALE: f64 = 0.00005;
    pub const PATTERN_ZIGZAG_AMPLITUDE: f64 = 10.0;
    pub const ZIGZAG_PHASE_SCALE: f64 = 0.00005;
    pub const ZIGZAG_AMPLITUDE: f64 = 15.0;
}

/// Wrap a coordinate into `[min, max]`: below `min` jumps to `max`, above
/// `max` jumps to `min`.
#[inline]
pub fn wrap_axis(value: i32, min: i32, max: i32) -> i32 {
    if value < min {
        max
    } else if value > max {
        min
    } else {
        value
    }
}

/// Wrap a position into `[0, bounds.x] x [0, bounds.y]`
#[inline]
pub fn wrap_position(pos: IVec2, bounds: IVec2) -> IVec2 {
    IVec2::new(wrap_axis(pos.x, 0, bounds.x), wrap_axis(pos.y, 0, bounds.y))
}

/// Axis-aligned proximity test: strictly closer than `size` on both axes
#[inline]
pub fn within_reach(a: IVec2, b: IVec2, size: i32) -> bool {
    let d = (a - b).abs();
    d.x < size && d.y < size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_axis() {
        assert_eq!(wrap_axis(-1, 0, 770), 770);
        assert_eq!(wrap_axis(771, 0, 770), 0);
        assert_eq!(wrap_axis(0, 0, 770), 0);
        assert_eq!(wrap_axis(770, 0, 770), 770);
        assert_eq!(wrap_axis(300, 0, 770), 300);
    }

    #[test]
    fn test_wrap_is_toroidal_not_clamped() {
        // Far outside still lands on the opposite edge, not the nearest one
        assert_eq!(wrap_axis(-500, 0, 570), 570);
        assert_eq!(wrap_axis(5000, 0, 570), 0);
    }

    #[test]
    fn test_within_reach() {
        let player = IVec2::new(50, 50);
        assert!(within_reach(player, IVec2::new(55, 55), 30));
        assert!(within_reach(player, IVec2::new(79, 21), 30));
        // Exactly `size` away on one axis is a miss
        assert!(!within_reach(player, IVec2::new(80, 50), 30));
        assert!(!within_reach(player, IVec2::new(50, 20), 30));
        // Chebyshev-like: a diagonal distance of 29 on both axes still hits
        assert!(within_reach(player, IVec2::new(79, 79), 30));
    }
}

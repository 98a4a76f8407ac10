//! Simulation module
//!
//! All gameplay logic lives here:
//! - Randomness comes only from an injected RNG
//! - Time comes only from the caller (session-relative timestamps)
//! - Stable iteration order (by entity ID)
//! - No rendering or terminal dependencies

pub mod clock;
pub mod movement;
pub mod registry;
pub mod state;
pub mod tick;

pub use clock::FrameClock;
pub use movement::advance;
pub use registry::{Collection, Registry};
pub use state::{
    Enemy, GameEvent, GamePhase, GameState, Movement, Outcome, Pattern, Pickup, Player,
};
pub use tick::{Command, Direction, apply_command, tick};

//! Game state and core simulation types

use std::time::Duration;

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::registry::Registry;
use crate::settings::Config;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Running, enemies advancing
    Active,
    /// Running, enemies frozen
    Paused,
    /// All pickups collected (terminal)
    Won,
    /// Caught by an enemy (terminal)
    Lost,
}

impl GamePhase {
    pub fn is_running(self) -> bool {
        matches!(self, GamePhase::Active | GamePhase::Paused)
    }
}

/// How a session ended, as reported to the termination sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Victory,
    Defeat,
    /// Ended early by the host, a failed or panicking cycle, or the tick limit
    Aborted,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PickupsCollected { count: u32, points: u32 },
    Won { score: u32 },
    Lost { score: u32 },
}

/// Sub-pattern of a patterned enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pattern {
    Sinusoidal,
    Zigzag,
    /// Carries no movement rule; the enemy holds position
    Straight,
}

impl Pattern {
    pub const ALL: [Pattern; 3] = [Pattern::Sinusoidal, Pattern::Zigzag, Pattern::Straight];
}

/// Enemy movement behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Movement {
    /// Random walk, one unit per axis per tick
    Random,
    /// Step toward the player on each axis
    Chase,
    /// Drift along a fixed pattern
    Patterned(Pattern),
    /// March right while oscillating vertically
    Zigzag,
}

impl Movement {
    /// Draw a variant uniformly; the pattern only sticks for `Patterned`
    pub fn random(rng: &mut impl Rng) -> Self {
        let variant = rng.random_range(0..4);
        let pattern = Pattern::ALL[rng.random_range(0..Pattern::ALL.len())];
        match variant {
            0 => Movement::Random,
            1 => Movement::Chase,
            2 => Movement::Patterned(pattern),
            _ => Movement::Zigzag,
        }
    }
}

/// The player-controlled square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: IVec2,
    pub size: i32,
}

/// A collectible coin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub pos: IVec2,
}

/// A mobile adversary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: IVec2,
    /// Per-axis drift in {-1, 0, 1}; only sinusoidal patterns read it
    pub vel: IVec2,
    /// Step size (1 or 2)
    pub speed: i32,
    pub movement: Movement,
}

impl Enemy {
    pub fn spawn(id: u32, extent: IVec2, rng: &mut impl Rng) -> Self {
        let pos = random_position(extent, rng);
        let movement = Movement::random(rng);
        let speed = rng.random_range(1..=2);
        let vel = IVec2::new(rng.random_range(-1..=1), rng.random_range(-1..=1));
        Self {
            id,
            pos,
            vel,
            speed,
            movement,
        }
    }
}

fn random_position(extent: IVec2, rng: &mut impl Rng) -> IVec2 {
    IVec2::new(rng.random_range(0..extent.x), rng.random_range(0..extent.y))
}

/// Complete game state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u32,
    pub player: Player,
    /// Live pickups and enemies
    pub registry: Registry,
    /// Session time of the last successful collection pass
    pub last_collection: Option<Duration>,
    pub collection_cooldown: Duration,
    /// Wrap window upper corner for enemies
    pub bounds: IVec2,
    /// Player displacement per move command
    pub move_step: i32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new session, placing pickups and enemies at random
    pub fn new(config: &Config, rng: &mut impl Rng) -> Self {
        let extent = config.spawn_extent();
        let mut registry = Registry::default();

        for _ in 0..config.pickup_count {
            registry.add_pickup(random_position(extent, rng));
        }
        for _ in 0..config.enemy_count {
            let id = registry.next_entity_id();
            registry.enemies.push(Enemy::spawn(id, extent, rng));
        }

        let (x, y) = config.player_start;
        Self::with_registry(config, IVec2::new(x, y), registry)
    }

    /// Create a session with a hand-placed registry
    pub fn with_registry(config: &Config, player_pos: IVec2, registry: Registry) -> Self {
        Self {
            phase: GamePhase::Active,
            score: 0,
            player: Player {
                pos: player_pos,
                size: config.entity_size,
            },
            registry,
            last_collection: None,
            collection_cooldown: config.collection_cooldown(),
            bounds: config.wrap_bounds(),
            move_step: config.move_step,
            time_ticks: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Whether a collection pass may run at `now`
    pub fn cooldown_elapsed(&self, now: Duration) -> bool {
        match self.last_collection {
            None => true,
            Some(last) => now.saturating_sub(last) > self.collection_cooldown,
        }
    }

    /// Terminal outcome, if the session has ended
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Won => Some(Outcome::Victory),
            GamePhase::Lost => Some(Outcome::Defeat),
            GamePhase::Active | GamePhase::Paused => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_new_session_population() {
        let config = Config::default();
        let mut rng = Pcg32::seed_from_u64(12345);
        let state = GameState::new(&config, &mut rng);

        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.pos, IVec2::new(50, 50));
        assert_eq!(state.player.size, 30);
        assert_eq!(state.registry.pickups.len(), 9);
        assert_eq!(state.registry.enemies.len(), 5);
        assert_eq!(state.bounds, IVec2::new(770, 570));
    }

    #[test]
    fn test_spawn_ranges() {
        let config = Config {
            pickup_count: 200,
            enemy_count: 200,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(7);
        let state = GameState::new(&config, &mut rng);

        for pickup in &state.registry.pickups {
            assert!((0..750).contains(&pickup.pos.x));
            assert!((0..550).contains(&pickup.pos.y));
        }
        for enemy in &state.registry.enemies {
            assert!((0..750).contains(&enemy.pos.x));
            assert!((0..550).contains(&enemy.pos.y));
            assert!(enemy.speed == 1 || enemy.speed == 2);
            assert!((-1..=1).contains(&enemy.vel.x));
            assert!((-1..=1).contains(&enemy.vel.y));
        }
    }

    #[test]
    fn test_all_variants_reachable() {
        let mut rng = Pcg32::seed_from_u64(99);
        let mut seen = [false; 4];
        let mut patterns = [false; 3];
        for _ in 0..500 {
            match Movement::random(&mut rng) {
                Movement::Random => seen[0] = true,
                Movement::Chase => seen[1] = true,
                Movement::Patterned(p) => {
                    seen[2] = true;
                    patterns[Pattern::ALL.iter().position(|q| *q == p).unwrap()] = true;
                }
                Movement::Zigzag => seen[3] = true,
            }
        }
        assert!(seen.iter().all(|s| *s));
        assert!(patterns.iter().all(|s| *s));
    }

    #[test]
    fn test_ids_in_spawn_order() {
        let mut rng = Pcg32::seed_from_u64(1);
        let state = GameState::new(&Config::default(), &mut rng);
        let ids: Vec<u32> = state
            .registry
            .pickups
            .iter()
            .map(|p| p.id)
            .chain(state.registry.enemies.iter().map(|e| e.id))
            .collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let config = Config::default();
        let a = GameState::new(&config, &mut Pcg32::seed_from_u64(42));
        let b = GameState::new(&config, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a.registry.pickups, b.registry.pickups);
        assert_eq!(a.registry.enemies, b.registry.enemies);
    }

    #[test]
    fn test_cooldown_gate() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = GameState::new(&Config::default(), &mut rng);
        assert!(state.cooldown_elapsed(Duration::ZERO));

        state.last_collection = Some(Duration::from_millis(1000));
        assert!(!state.cooldown_elapsed(Duration::from_millis(1100)));
        // Strictly greater than the cooldown
        assert!(!state.cooldown_elapsed(Duration::from_millis(1200)));
        assert!(state.cooldown_elapsed(Duration::from_millis(1201)));
    }

    #[test]
    fn test_outcome_mapping() {
        assert!(GamePhase::Active.is_running());
        assert!(GamePhase::Paused.is_running());
        assert!(!GamePhase::Won.is_running());
        assert!(!GamePhase::Lost.is_running());

        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = GameState::new(&Config::default(), &mut rng);
        assert_eq!(state.outcome(), None);
        state.phase = GamePhase::Won;
        assert_eq!(state.outcome(), Some(Outcome::Victory));
        state.phase = GamePhase::Lost;
        assert_eq!(state.outcome(), Some(Outcome::Defeat));
    }
}

//! Live entity collections
//!
//! Pickups only ever leave the registry; enemies are fixed for the whole
//! session. Both are kept in id order.

use std::time::Duration;

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::movement;
use super::state::{Enemy, Pickup};
use crate::consts::PICKUP_POINTS;
use crate::within_reach;

/// Result of one collection pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Collection {
    pub count: u32,
    pub points: u32,
}

impl Collection {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Owner of the pickups and enemies
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    pub pickups: Vec<Pickup>,
    pub enemies: Vec<Enemy>,
    /// Next entity ID
    next_id: u32,
}

impl Registry {
    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    pub fn add_pickup(&mut self, pos: IVec2) -> u32 {
        let id = self.next_entity_id();
        self.pickups.push(Pickup { id, pos });
        id
    }

    /// Remove every pickup within reach of the player
    pub fn collect_eligible(&mut self, player: IVec2, size: i32) -> Collection {
        let mut collection = Collection::default();
        self.pickups.retain(|pickup| {
            if within_reach(player, pickup.pos, size) {
                collection.count += 1;
                collection.points += PICKUP_POINTS;
                false
            } else {
                true
            }
        });
        collection
    }

    /// Step every enemy once, in id order
    pub fn advance_enemies(
        &mut self,
        player: IVec2,
        now: Duration,
        bounds: IVec2,
        rng: &mut impl Rng,
    ) {
        for enemy in &mut self.enemies {
            enemy.pos = movement::advance(enemy, player, now, bounds, rng);
        }
    }

    /// First enemy touching the player, if any
    pub fn first_hit(&self, player: IVec2, size: i32) -> Option<&Enemy> {
        self.enemies
            .iter()
            .find(|enemy| within_reach(player, enemy.pos, size))
    }

    pub fn pickups_remaining(&self) -> usize {
        self.pickups.len()
    }

    pub fn is_cleared(&self) -> bool {
        self.pickups.is_empty()
    }
}

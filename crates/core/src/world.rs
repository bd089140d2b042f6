//! Authoritative local snapshot of one session.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::config::GameConfig;
use crate::entities::{Agent, AiAgent, AiId, FoodId, FoodItem, PeerId, RemotePeerMirror};
use crate::random::SeededRandom;
use crate::respawn::RespawnQueue;

/// Everything one session simulates, plus the mirrors of remote peers.
#[derive(Debug, Clone)]
pub struct WorldState {
    pub player: Agent,
    pub ais: Vec<AiAgent>,
    pub food: Vec<FoodItem>,
    pub mirrors: BTreeMap<PeerId, RemotePeerMirror>,
    pub respawns: RespawnQueue,
    pub rng: SeededRandom,
}

impl WorldState {
    /// Spawn the player at the center, `food_count` food items and
    /// `ai_count` AI agents at uniformly random positions.
    pub fn new(config: &GameConfig, rng: SeededRandom) -> Self {
        let bounds = config.bounds();
        let mut state = Self {
            player: Agent::new(bounds.center(), config.base_size),
            ais: Vec::with_capacity(config.ai_count),
            food: Vec::with_capacity(config.food_count),
            mirrors: BTreeMap::new(),
            respawns: RespawnQueue::new(),
            rng,
        };

        for i in 0..config.food_count {
            let position = state.rng.point_in(&bounds, 0.0);
            state.food.push(FoodItem::new(FoodId(i as u32), position));
        }

        for i in 0..config.ai_count {
            let position = state.rng.point_in(&bounds, 0.0);
            let size = config.base_size + state.rng.next() * config.ai_size_jitter;
            state.ais.push(AiAgent::new(AiId(i as u32), position, size));
        }

        state
    }

    pub fn active_food(&self) -> impl Iterator<Item = &FoodItem> {
        self.food.iter().filter(|f| f.active)
    }

    pub fn active_food_count(&self) -> usize {
        self.active_food().count()
    }

    /// Bring back every food item whose delay has elapsed. Returns how many
    /// came back.
    pub fn respawn_due_food(&mut self, config: &GameConfig, now_ms: u64) -> usize {
        let bounds = config.bounds();
        let due = self.respawns.take_due(now_ms);
        for id in &due {
            let position = self.rng.point_in(&bounds, 0.0);
            if let Some(food) = self.food.get_mut(id.index()) {
                food.position = position;
                food.active = true;
            }
        }
        due.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawns_configured_counts() {
        let config = GameConfig::default();
        let world = WorldState::new(&config, SeededRandom::new(9));

        assert_eq!(world.food.len(), 200);
        assert_eq!(world.ais.len(), 5);
        assert_eq!(world.active_food_count(), 200);
        assert_eq!(world.player.position, Vec2::new(1000.0, 1000.0));
        assert_eq!(world.player.size, 20.0);
        for ai in &world.ais {
            assert!(ai.body.size >= 20.0 && ai.body.size < 40.0);
        }
        for (i, food) in world.food.iter().enumerate() {
            assert_eq!(food.id, FoodId(i as u32));
            assert!(config.bounds().contains(food.position));
        }
    }

    #[test]
    fn due_food_reactivates_inside_world() {
        let config = GameConfig::default();
        let mut world = WorldState::new(&config, SeededRandom::new(4));
        world.food[7].active = false;
        world.food[7].position = config.off_world_position();
        world.respawns.schedule(FoodId(7), 2_000);

        assert_eq!(world.respawn_due_food(&config, 1_000), 0);
        assert!(!world.food[7].active);

        assert_eq!(world.respawn_due_food(&config, 2_000), 1);
        assert!(world.food[7].active);
        assert!(config.bounds().contains(world.food[7].position));
    }
}

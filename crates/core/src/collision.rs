//! Overlap detection and eat rules.
//!
//! Checks are exhaustive (every pair, every tick) and resolved in a fixed
//! order: player vs food, then per AI agent (AI vs food, player vs AI), then
//! player vs each mirror in peer-id order. Each pair is resolved against the
//! state left by the previous one.

use glam::Vec2;
use tracing::debug;

use crate::config::GameConfig;
use crate::entities::{Agent, AiId, FoodId, FoodItem, PeerId};
use crate::physics::{within, WorldBounds};
use crate::random::SeededRandom;
use crate::respawn::RespawnQueue;
use crate::world::WorldState;

/// Who ate a food item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eater {
    Player,
    Ai(AiId),
}

/// Outcome of one resolved overlap.
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionEvent {
    FoodEaten {
        eater: Eater,
        food: FoodId,
        respawn_at_ms: u64,
    },
    PlayerAteAi {
        ai: AiId,
        gained: f32,
    },
    AiAtePlayer {
        ai: AiId,
    },
    PlayerAtePeer {
        peer: PeerId,
        gained: f32,
    },
    PeerAtePlayer {
        peer: PeerId,
    },
}

/// Result of comparing two overlapping agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Contest {
    PlayerWins,
    OtherWins,
    Standoff,
}

#[derive(Debug, Clone)]
pub struct CollisionResolver {
    bounds: WorldBounds,
    base_size: f32,
    growth_rate: f32,
    ai_growth_factor: f32,
    eat_ratio: f32,
    eat_growth_fraction: f32,
    ai_respawn_jitter: f32,
    food_respawn_delay_ms: u64,
    off_world: Vec2,
}

impl CollisionResolver {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            bounds: config.bounds(),
            base_size: config.base_size,
            growth_rate: config.growth_rate,
            ai_growth_factor: config.ai_growth_factor,
            eat_ratio: config.eat_ratio,
            eat_growth_fraction: config.eat_growth_fraction,
            ai_respawn_jitter: config.ai_respawn_jitter,
            food_respawn_delay_ms: config.food_respawn_delay_ms,
            off_world: config.off_world_position(),
        }
    }

    /// Resolve every overlap in the world for this tick.
    pub fn resolve(&self, world: &mut WorldState, now_ms: u64) -> Vec<CollisionEvent> {
        let WorldState {
            player,
            ais,
            food,
            mirrors,
            respawns,
            rng,
        } = world;
        let mut events = Vec::new();

        self.eat_food(player, Eater::Player, self.growth_rate, food, respawns, now_ms, &mut events);

        for ai in ais.iter_mut() {
            let gain = self.growth_rate * self.ai_growth_factor;
            self.eat_food(&mut ai.body, Eater::Ai(ai.id), gain, food, respawns, now_ms, &mut events);

            let reach = player.size.max(ai.body.size);
            if !within(player.position, ai.body.position, reach) {
                continue;
            }
            match self.contest(player, ai.body.size) {
                Contest::PlayerWins => {
                    let gained = ai.body.size * self.eat_growth_fraction;
                    player.size += gained;
                    ai.body.size = self.base_size + rng.next() * self.ai_respawn_jitter;
                    ai.body.position = rng.point_in(&self.bounds, ai.body.size);
                    ai.body.velocity = Vec2::ZERO;
                    debug!(ai = ai.id.0, gained, player_size = player.size, "player ate ai");
                    events.push(CollisionEvent::PlayerAteAi { ai: ai.id, gained });
                }
                Contest::OtherWins => {
                    self.reset_player(player, rng);
                    debug!(ai = ai.id.0, ai_size = ai.body.size, "ai ate player");
                    events.push(CollisionEvent::AiAtePlayer { ai: ai.id });
                }
                Contest::Standoff => {}
            }
        }

        for (peer, mirror) in mirrors.iter_mut() {
            let reach = player.size.max(mirror.size);
            if !within(player.position, mirror.position, reach) {
                continue;
            }
            match self.contest(player, mirror.size) {
                Contest::PlayerWins if !mirror.is_consumed() => {
                    let gained = mirror.size * self.eat_growth_fraction;
                    player.size += gained;
                    mirror.consumed_at_size = Some(mirror.size);
                    debug!(%peer, gained, player_size = player.size, "player ate peer");
                    events.push(CollisionEvent::PlayerAtePeer {
                        peer: peer.clone(),
                        gained,
                    });
                }
                Contest::OtherWins => {
                    self.reset_player(player, rng);
                    debug!(%peer, peer_size = mirror.size, "peer ate player");
                    events.push(CollisionEvent::PeerAtePlayer { peer: peer.clone() });
                }
                _ => {}
            }
        }

        events
    }

    fn contest(&self, player: &Agent, other_size: f32) -> Contest {
        if player.dominates(other_size, self.eat_ratio) {
            Contest::PlayerWins
        } else if other_size > player.size * self.eat_ratio {
            Contest::OtherWins
        } else {
            Contest::Standoff
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn eat_food(
        &self,
        eater: &mut Agent,
        who: Eater,
        gain: f32,
        food: &mut [FoodItem],
        respawns: &mut RespawnQueue,
        now_ms: u64,
        events: &mut Vec<CollisionEvent>,
    ) {
        for item in food.iter_mut().filter(|f| f.active) {
            if !within(item.position, eater.position, eater.size) {
                continue;
            }
            eater.size += gain;
            item.active = false;
            item.position = self.off_world;

            let respawn_at_ms = now_ms + self.food_respawn_delay_ms;
            respawns.schedule(item.id, respawn_at_ms);
            events.push(CollisionEvent::FoodEaten {
                eater: who,
                food: item.id,
                respawn_at_ms,
            });
        }
    }

    /// Death: back to base size somewhere random.
    fn reset_player(&self, player: &mut Agent, rng: &mut SeededRandom) {
        player.size = self.base_size;
        player.position = rng.point_in(&self.bounds, self.base_size);
        player.velocity = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{AiAgent, RemotePeerMirror};

    fn empty_world(config: &GameConfig) -> WorldState {
        let config = GameConfig {
            food_count: 0,
            ai_count: 0,
            ..config.clone()
        };
        WorldState::new(&config, SeededRandom::new(17))
    }

    #[test]
    fn player_eats_food_within_size() {
        let config = GameConfig::default();
        let mut world = empty_world(&config);
        world.player.position = Vec2::new(500.0, 500.0);
        world.food.push(FoodItem::new(FoodId(0), Vec2::new(503.0, 500.0)));

        let events = CollisionResolver::new(&config).resolve(&mut world, 10_000);

        assert!((world.player.size - 20.5).abs() < 1e-6);
        assert!(!world.food[0].active);
        assert_eq!(world.food[0].position, Vec2::new(-1000.0, -1000.0));
        assert_eq!(
            events,
            vec![CollisionEvent::FoodEaten {
                eater: Eater::Player,
                food: FoodId(0),
                respawn_at_ms: 12_000,
            }]
        );
        assert_eq!(world.respawns.len(), 1);
    }

    #[test]
    fn ai_grows_at_half_rate() {
        let config = GameConfig::default();
        let mut world = empty_world(&config);
        world.ais.push(AiAgent::new(AiId(0), Vec2::new(300.0, 300.0), 25.0));
        world.food.push(FoodItem::new(FoodId(0), Vec2::new(310.0, 300.0)));

        CollisionResolver::new(&config).resolve(&mut world, 0);

        assert!((world.ais[0].body.size - 25.25).abs() < 1e-6);
        assert!(!world.food[0].active);
    }

    #[test]
    fn inactive_food_is_ignored() {
        let config = GameConfig::default();
        let mut world = empty_world(&config);
        world.player.position = Vec2::new(500.0, 500.0);
        let mut item = FoodItem::new(FoodId(0), Vec2::new(500.0, 500.0));
        item.active = false;
        world.food.push(item);

        let events = CollisionResolver::new(&config).resolve(&mut world, 0);
        assert!(events.is_empty());
        assert_eq!(world.player.size, 20.0);
    }

    #[test]
    fn player_eats_smaller_ai() {
        let config = GameConfig::default();
        let mut world = empty_world(&config);
        world.player.position = Vec2::new(1000.0, 1000.0);
        world.player.size = 34.0;
        world.ais.push(AiAgent::new(AiId(0), Vec2::new(1010.0, 1000.0), 30.0));

        let events = CollisionResolver::new(&config).resolve(&mut world, 0);

        assert!((world.player.size - 43.0).abs() < 1e-4);
        let ai = &world.ais[0].body;
        assert!(ai.size >= 20.0 && ai.size < 30.0);
        assert_ne!(ai.position, Vec2::new(1010.0, 1000.0));
        assert!(config.bounds().contains_circle(ai.position, ai.size));
        assert!(matches!(events[0], CollisionEvent::PlayerAteAi { ai: AiId(0), .. }));
    }

    #[test]
    fn larger_ai_resets_player() {
        let config = GameConfig::default();
        let mut world = empty_world(&config);
        world.player.position = Vec2::new(1000.0, 1000.0);
        world.player.size = 25.0;
        world.ais.push(AiAgent::new(AiId(0), Vec2::new(1020.0, 1000.0), 40.0));

        let events = CollisionResolver::new(&config).resolve(&mut world, 0);

        assert_eq!(world.player.size, 20.0);
        assert_eq!(world.ais[0].body.size, 40.0);
        assert_eq!(events, vec![CollisionEvent::AiAtePlayer { ai: AiId(0) }]);
    }

    #[test]
    fn sizes_within_band_do_nothing() {
        let config = GameConfig::default();
        for (player_size, ai_size) in [(30.0, 30.0), (32.9, 30.0), (30.0, 32.9)] {
            let mut world = empty_world(&config);
            world.player.position = Vec2::new(1000.0, 1000.0);
            world.player.size = player_size;
            world.ais.push(AiAgent::new(AiId(0), Vec2::new(1001.0, 1000.0), ai_size));

            let events = CollisionResolver::new(&config).resolve(&mut world, 0);

            assert!(events.is_empty());
            assert_eq!(world.player.size, player_size);
            assert_eq!(world.ais[0].body.size, ai_size);
        }
    }

    #[test]
    fn peer_sizes_within_band_do_nothing() {
        let config = GameConfig::default();
        for (player_size, peer_size) in [(30.0, 30.0), (32.9, 30.0), (30.0, 32.9)] {
            let mut world = empty_world(&config);
            world.player.position = Vec2::new(1000.0, 1000.0);
            world.player.size = player_size;
            world
                .mirrors
                .insert("peer0001".into(), RemotePeerMirror::new(Vec2::new(1001.0, 1000.0), peer_size, 0));

            let events = CollisionResolver::new(&config).resolve(&mut world, 0);

            assert!(events.is_empty());
            assert_eq!(world.player.size, player_size);
            let mirror = &world.mirrors["peer0001"];
            assert_eq!(mirror.size, peer_size);
            assert!(!mirror.is_consumed());
        }
    }

    #[test]
    fn peer_mirror_is_never_modified() {
        let config = GameConfig::default();
        let mut world = empty_world(&config);
        world.player.position = Vec2::new(1000.0, 1000.0);
        world.player.size = 20.0;
        world
            .mirrors
            .insert("bigpeer1".into(), RemotePeerMirror::new(Vec2::new(1005.0, 1000.0), 50.0, 0));

        let events = CollisionResolver::new(&config).resolve(&mut world, 0);

        assert_eq!(events, vec![CollisionEvent::PeerAtePlayer { peer: "bigpeer1".into() }]);
        assert_eq!(world.player.size, 20.0);
        let mirror = &world.mirrors["bigpeer1"];
        assert_eq!(mirror.size, 50.0);
        assert_eq!(mirror.position, Vec2::new(1005.0, 1000.0));
    }

    #[test]
    fn eaten_peer_feeds_player_once() {
        let config = GameConfig::default();
        let mut world = empty_world(&config);
        world.player.position = Vec2::new(1000.0, 1000.0);
        world.player.size = 40.0;
        world
            .mirrors
            .insert("small001".into(), RemotePeerMirror::new(Vec2::new(1010.0, 1000.0), 20.0, 0));

        let resolver = CollisionResolver::new(&config);
        let first = resolver.resolve(&mut world, 0);
        let second = resolver.resolve(&mut world, 16);

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert!((world.player.size - 46.0).abs() < 1e-4);
        assert_eq!(world.mirrors["small001"].size, 20.0);
    }
}

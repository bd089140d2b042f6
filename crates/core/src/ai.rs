//! AI target selection.
//!
//! Each agent decides independently from the same snapshot of the world, so
//! the order agents are evaluated in never changes what they pick.

use glam::Vec2;

use crate::config::GameConfig;
use crate::entities::{Agent, AiAgent, FoodId, FoodItem};

/// Why an agent picked its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AiGoal {
    Food(FoodId),
    ChasePlayer,
    FleePlayer,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiTarget {
    pub goal: AiGoal,
    pub position: Vec2,
}

/// Priority rules: nearest food, then chase a smaller player, then flee a
/// larger one. Fleeing always wins.
#[derive(Debug, Clone)]
pub struct AiController {
    chase_distance: f32,
    flee_distance: f32,
    chase_size_ratio: f32,
    flee_size_ratio: f32,
}

impl AiController {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            chase_distance: config.chase_distance,
            flee_distance: config.flee_distance,
            chase_size_ratio: config.chase_size_ratio,
            flee_size_ratio: config.flee_size_ratio,
        }
    }

    /// Pick a target for one agent.
    pub fn decide(&self, agent: &Agent, player: &Agent, food: &[FoodItem]) -> Option<AiTarget> {
        let mut best: Option<AiTarget> = None;
        let mut best_dist = f32::INFINITY;

        for item in food.iter().filter(|f| f.active) {
            let d = agent.position.distance(item.position);
            if d < best_dist {
                best_dist = d;
                best = Some(AiTarget {
                    goal: AiGoal::Food(item.id),
                    position: item.position,
                });
            }
        }

        let player_dist = agent.position.distance(player.position);

        if player.size < agent.size * self.chase_size_ratio
            && player_dist < self.chase_distance
            && player_dist < best_dist
        {
            best = Some(AiTarget {
                goal: AiGoal::ChasePlayer,
                position: player.position,
            });
        }

        if player.size > agent.size * self.flee_size_ratio && player_dist < self.flee_distance {
            // Mirror the player through the agent: straight away along the axis.
            best = Some(AiTarget {
                goal: AiGoal::FleePlayer,
                position: agent.position - (player.position - agent.position),
            });
        }

        best
    }

    /// Decide for every agent before any of them moves.
    pub fn plan(&self, ais: &[AiAgent], player: &Agent, food: &[FoodItem]) -> Vec<Option<AiTarget>> {
        ais.iter()
            .map(|ai| self.decide(&ai.body, player, food))
            .collect()
    }
}

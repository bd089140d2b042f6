//! Scripted pointer input.
//!
//! Stands in for a human on the mouse: wanders between random waypoints,
//! heads for the nearest food now and then, and gives up on a waypoint after
//! a while.

use glam::Vec2;

use agarium_core::{PointerInput, SeededRandom, Simulation};

/// Ticks before an unreached waypoint is abandoned.
const WAYPOINT_PATIENCE: u32 = 240;

/// Chance per new waypoint to pick the nearest food instead of a random spot.
const FORAGE_CHANCE: f32 = 0.6;

#[derive(Debug, Clone)]
pub struct Pilot {
    rng: SeededRandom,
    waypoint: Option<Vec2>,
    ticks_on_waypoint: u32,
}

impl Pilot {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SeededRandom::new(seed),
            waypoint: None,
            ticks_on_waypoint: 0,
        }
    }

    /// Pointer sample for the next tick of `sim`.
    pub fn next_input(&mut self, sim: &Simulation) -> PointerInput {
        let player = sim.player();
        let reached = self
            .waypoint
            .is_some_and(|w| w.distance(player.position) < player.size);

        if self.waypoint.is_none() || reached || self.ticks_on_waypoint >= WAYPOINT_PATIENCE {
            self.waypoint = Some(self.pick_waypoint(sim));
            self.ticks_on_waypoint = 0;
        }
        self.ticks_on_waypoint += 1;

        PointerInput::World(self.waypoint.unwrap_or(player.position))
    }

    fn pick_waypoint(&mut self, sim: &Simulation) -> Vec2 {
        let player = sim.player().position;
        if self.rng.next() < FORAGE_CHANCE {
            let nearest = sim
                .world
                .active_food()
                .map(|f| f.position)
                .min_by(|a, b| a.distance_squared(player).total_cmp(&b.distance_squared(player)));
            if let Some(food) = nearest {
                return food;
            }
        }
        self.rng.point_in(&sim.config.bounds(), 0.0)
    }
}

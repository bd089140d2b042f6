//! Steering and integration.
//!
//! One resolver serves both the player and the AI agents; they differ only
//! in speed scale and in how a degenerate target is handled.
//!
//! Motion is per tick, not per second: `position += velocity` once per call,
//! so effective speed follows the tick rate.

use glam::Vec2;

use crate::config::GameConfig;
use crate::entities::Agent;
use crate::physics::WorldBounds;

/// Who is being moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mover {
    /// Steers toward the pointer, stops inside the stop distance.
    Player,
    /// Steers toward its AI target, slower than an equal-sized player.
    Ai,
}

/// Size-dependent speed law plus bounds clamping.
#[derive(Debug, Clone)]
pub struct MovementResolver {
    bounds: WorldBounds,
    max_speed: f32,
    base_size: f32,
    speed_scale: f32,
    ai_speed_factor: f32,
    stop_distance: f32,
}

impl MovementResolver {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            bounds: config.bounds(),
            max_speed: config.max_speed,
            base_size: config.base_size,
            speed_scale: config.player_speed_scale,
            ai_speed_factor: config.ai_speed_factor,
            stop_distance: config.stop_distance,
        }
    }

    /// Per-tick speed for an agent of `size`. Larger is slower.
    pub fn speed(&self, size: f32, mover: Mover) -> f32 {
        let speed = self.max_speed * (self.base_size / size) * self.speed_scale;
        match mover {
            Mover::Player => speed,
            Mover::Ai => speed * self.ai_speed_factor,
        }
    }

    /// Set the agent's velocity from its target.
    pub fn steer(&self, agent: &mut Agent, target: Option<Vec2>, mover: Mover) {
        let Some(target) = target else {
            agent.velocity = Vec2::ZERO;
            return;
        };

        let delta = target - agent.position;
        let dist = delta.length();
        match mover {
            Mover::Player => {
                agent.velocity = if dist > self.stop_distance {
                    delta / dist * self.speed(agent.size, mover)
                } else {
                    Vec2::ZERO
                };
            }
            Mover::Ai => {
                // Standing on the target: keep last tick's velocity.
                if dist > 0.0 {
                    agent.velocity = delta / dist * self.speed(agent.size, mover);
                }
            }
        }
    }

    /// Apply velocity once, then clamp so the whole circle stays in bounds.
    pub fn integrate(&self, agent: &mut Agent) {
        agent.position += agent.velocity;
        agent.position = self.bounds.clamp_with_radius(agent.position, agent.size);
    }

    /// Steer then integrate.
    pub fn step(&self, agent: &mut Agent, target: Option<Vec2>, mover: Mover) {
        self.steer(agent, target, mover);
        self.integrate(agent);
    }

    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> MovementResolver {
        MovementResolver::new(&GameConfig::default())
    }

    #[test]
    fn player_moves_toward_target_at_size_speed() {
        let movement = resolver();
        let mut player = Agent::new(Vec2::new(500.0, 500.0), 20.0);
        movement.step(&mut player, Some(Vec2::new(600.0, 500.0)), Mover::Player);

        assert!((player.velocity.x - 7.5).abs() < 1e-5);
        assert_eq!(player.velocity.y, 0.0);
        assert!((player.position.x - 507.5).abs() < 1e-4);
    }

    #[test]
    fn player_stops_inside_stop_distance() {
        let movement = resolver();
        let mut player = Agent::new(Vec2::new(500.0, 500.0), 20.0);
        player.velocity = Vec2::new(3.0, 3.0);
        movement.step(&mut player, Some(Vec2::new(504.0, 500.0)), Mover::Player);

        assert_eq!(player.velocity, Vec2::ZERO);
        assert_eq!(player.position, Vec2::new(500.0, 500.0));
    }

    #[test]
    fn ai_is_slower_than_equal_player() {
        let movement = resolver();
        assert!((movement.speed(20.0, Mover::Ai) - 6.0).abs() < 1e-5);
        assert!(movement.speed(20.0, Mover::Ai) < movement.speed(20.0, Mover::Player));
        assert!(movement.speed(40.0, Mover::Player) < movement.speed(20.0, Mover::Player));
    }

    #[test]
    fn doubling_size_halves_speed() {
        let movement = resolver();
        assert!((movement.speed(20.0, Mover::Player) - 7.5).abs() < 1e-5);
        assert!((movement.speed(40.0, Mover::Player) - 3.75).abs() < 1e-5);
        assert!((movement.speed(40.0, Mover::Ai) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn ai_keeps_velocity_on_zero_length_direction() {
        let movement = resolver();
        let mut ai = Agent::new(Vec2::new(300.0, 300.0), 20.0);
        ai.velocity = Vec2::new(1.0, -1.0);
        movement.steer(&mut ai, Some(Vec2::new(300.0, 300.0)), Mover::Ai);
        assert_eq!(ai.velocity, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn ai_without_target_stops() {
        let movement = resolver();
        let mut ai = Agent::new(Vec2::new(300.0, 300.0), 20.0);
        ai.velocity = Vec2::new(1.0, -1.0);
        movement.steer(&mut ai, None, Mover::Ai);
        assert_eq!(ai.velocity, Vec2::ZERO);
    }

    #[test]
    fn clamping_keeps_velocity() {
        let movement = resolver();
        let mut player = Agent::new(Vec2::new(22.0, 1000.0), 20.0);
        movement.step(&mut player, Some(Vec2::new(-500.0, 1000.0)), Mover::Player);

        assert_eq!(player.position.x, 20.0);
        assert!(player.velocity.x < 0.0);
    }

    #[test]
    fn stays_in_bounds_for_any_target() {
        let movement = resolver();
        let bounds = *movement.bounds();
        let targets = [
            Vec2::new(-1e6, -1e6),
            Vec2::new(1e6, 0.0),
            Vec2::new(0.0, 1e6),
            Vec2::new(2000.0, 2000.0),
        ];
        for size in [5.0, 20.0, 75.0, 300.0] {
            let mut agent = Agent::new(Vec2::new(1000.0, 1000.0), size);
            for _ in 0..500 {
                for target in targets {
                    movement.step(&mut agent, Some(target), Mover::Player);
                    assert!(bounds.contains_circle(agent.position, agent.size));
                }
            }
        }
    }
}

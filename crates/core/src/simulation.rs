//! Per-frame orchestration.
//!
//! One call to [`Simulation::tick`] runs to completion before the next.
//! Work that arrives between ticks (peer snapshots, due food respawns) is
//! applied at the start of the following tick, never in the middle of one.
//!
//! Tick order: snapshots and respawns, camera and pointer, player movement,
//! AI planning, AI movement, collisions, publish and staleness sweep.

use glam::Vec2;
use tracing::{info, trace};

use crate::ai::AiController;
use crate::collision::{CollisionEvent, CollisionResolver};
use crate::config::GameConfig;
use crate::entities::{Agent, PeerId};
use crate::input::{PointerInput, PointerState};
use crate::movement::{MovementResolver, Mover};
use crate::random::SeededRandom;
use crate::render::{DrawKind, RenderView};
use crate::sync::{SharedStateChannel, StateSync, SyncReport};
use crate::world::WorldState;

/// Session-scoped mutable state that is not part of the world itself.
#[derive(Debug, Clone)]
pub struct SimulationContext {
    /// Identifier this session publishes under. Stable for the session.
    pub peer_id: PeerId,
    /// Top-left of the viewport in world coordinates.
    pub camera_offset: Vec2,
    pub pointer: PointerState,
    pub frame: u64,
}

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub frame: u64,
    pub collisions: Vec<CollisionEvent>,
    pub sync: SyncReport,
    pub food_respawned: usize,
}

/// The simulation engine for one local session.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub config: GameConfig,
    pub context: SimulationContext,
    pub world: WorldState,
    movement: MovementResolver,
    ai: AiController,
    collisions: CollisionResolver,
    sync: StateSync,
}

impl Simulation {
    pub fn new(config: GameConfig, seed: u32) -> Self {
        let mut rng = SeededRandom::new(seed);
        let peer_id = rng.alphanumeric(config.peer_id_length);
        let world = WorldState::new(&config, rng);
        let camera_offset = world.player.position - config.viewport() * 0.5;

        info!(
            %peer_id,
            food = config.food_count,
            ai = config.ai_count,
            "session started"
        );

        Self {
            context: SimulationContext {
                peer_id: peer_id.clone(),
                camera_offset,
                pointer: PointerState::new(Vec2::from(config.initial_pointer)),
                frame: 0,
            },
            movement: MovementResolver::new(&config),
            ai: AiController::new(&config),
            collisions: CollisionResolver::new(&config),
            sync: StateSync::new(peer_id, &config),
            world,
            config,
        }
    }

    /// Advance one frame.
    ///
    /// `now_ms` is the caller's clock; it only drives respawn delays and
    /// mirror staleness. Movement advances one step per call regardless.
    pub fn tick(
        &mut self,
        now_ms: u64,
        pointer: Option<PointerInput>,
        channel: &mut impl SharedStateChannel,
    ) -> TickReport {
        self.context.frame += 1;
        let mut report = TickReport {
            frame: self.context.frame,
            ..TickReport::default()
        };

        // Between-tick work
        for snapshot in channel.drain_snapshots() {
            let applied = self.sync.reconcile(&mut self.world.mirrors, &snapshot, now_ms);
            report.sync.merge(applied);
        }
        report.food_respawned = self.world.respawn_due_food(&self.config, now_ms);

        // Camera follows the player; the pointer is re-projected through it
        self.context.camera_offset = self.world.player.position - self.config.viewport() * 0.5;
        if let Some(input) = pointer {
            self.context.pointer.apply(input, self.context.camera_offset);
        }
        let target = self.context.pointer.world(self.context.camera_offset);

        self.movement.step(&mut self.world.player, Some(target), Mover::Player);

        // Every agent plans against the same state before any of them moves
        let plan = self.ai.plan(&self.world.ais, &self.world.player, &self.world.food);
        for (ai, decision) in self.world.ais.iter_mut().zip(plan) {
            ai.target = decision.map(|d| d.position);
            self.movement.step(&mut ai.body, ai.target, Mover::Ai);
        }

        report.collisions = self.collisions.resolve(&mut self.world, now_ms);

        self.sync.publish(&self.world.player, channel);
        let evicted = self.sync.evict_stale(&mut self.world.mirrors, now_ms);
        report.sync.merge(evicted);

        trace!(
            frame = self.context.frame,
            size = self.world.player.size,
            events = report.collisions.len(),
            mirrors = self.world.mirrors.len(),
            "tick"
        );

        report
    }

    /// Positions and sizes for the renderer, offset by the current camera.
    pub fn render_view(&self) -> RenderView {
        let mut view = RenderView::new(
            self.context.camera_offset,
            Vec2::new(self.config.world_width, self.config.world_height),
        );

        for food in self.world.active_food() {
            view.push(DrawKind::Food(food.id), food.position, self.config.food_size);
        }
        for (peer, mirror) in &self.world.mirrors {
            view.push(DrawKind::Peer(peer.clone()), mirror.position, mirror.size);
        }
        for ai in &self.world.ais {
            view.push(DrawKind::Ai(ai.id), ai.body.position, ai.body.size);
        }
        view.push(DrawKind::Player, self.world.player.position, self.world.player.size);

        view
    }

    pub fn player(&self) -> &Agent {
        &self.world.player
    }

    pub fn peer_id(&self) -> &str {
        &self.context.peer_id
    }

    pub fn frame(&self) -> u64 {
        self.context.frame
    }
}

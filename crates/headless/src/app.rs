//! Application state and fixed-timestep loop.

use std::time::{Duration, Instant};

use agarium_core::collision::{CollisionEvent, Eater};
use agarium_core::{GameConfig, Simulation, TickReport, PLAYERS_KEY};
use agarium_protocol::{HubClient, SharedStateHub};

use crate::input::Pilot;

/// One local session: simulation, its hub connection and its pilot.
pub struct Session {
    pub simulation: Simulation,
    channel: HubClient,
    pilot: Pilot,
    pub stats: SessionStats,
}

/// Running totals for the summary log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStats {
    pub food_eaten: u64,
    pub kills: u64,
    pub deaths: u64,
    pub peak_size: f32,
}

impl SessionStats {
    fn record(&mut self, report: &TickReport, size: f32) {
        for event in &report.collisions {
            match event {
                CollisionEvent::FoodEaten {
                    eater: Eater::Player,
                    ..
                } => self.food_eaten += 1,
                CollisionEvent::PlayerAteAi { .. } | CollisionEvent::PlayerAtePeer { .. } => {
                    self.kills += 1
                }
                CollisionEvent::AiAtePlayer { .. } | CollisionEvent::PeerAtePlayer { .. } => {
                    self.deaths += 1
                }
                _ => {}
            }
        }
        self.peak_size = self.peak_size.max(size);
    }
}

/// Main application state.
pub struct App {
    hub: SharedStateHub,
    sessions: Vec<Session>,
    tick_rate: u32,
    clock_ms: u64,
    frame: u64,
}

impl App {
    pub fn new(config: GameConfig, session_count: usize, seed: u32, tick_rate: u32) -> Self {
        let hub = SharedStateHub::new();
        let sessions = (0..session_count)
            .map(|i| {
                let session_seed = seed.wrapping_add(i as u32);
                Session {
                    simulation: Simulation::new(config.clone(), session_seed),
                    channel: hub.connect(),
                    pilot: Pilot::new(session_seed.wrapping_mul(31).wrapping_add(7)),
                    stats: SessionStats::default(),
                }
            })
            .collect();

        Self {
            hub,
            sessions,
            tick_rate,
            clock_ms: 0,
            frame: 0,
        }
    }

    /// Milliseconds per simulation tick.
    pub fn tick_ms(&self) -> u64 {
        (1_000 / self.tick_rate.max(1)) as u64
    }

    /// Advance every session by one tick at the current clock.
    pub fn step(&mut self) {
        self.frame += 1;
        for session in &mut self.sessions {
            let input = session.pilot.next_input(&session.simulation);
            let report = session
                .simulation
                .tick(self.clock_ms, Some(input), &mut session.channel);
            session.stats.record(&report, session.simulation.player().size);
        }

        if self.frame % self.tick_rate.max(1) as u64 == 0 {
            self.log_progress();
        }
    }

    /// Run `ticks` ticks on a virtual clock, as fast as possible.
    pub fn run_virtual(&mut self, ticks: u64) {
        let tick_ms = self.tick_ms();
        for _ in 0..ticks {
            self.step();
            self.clock_ms += tick_ms;
        }
    }

    /// Run `ticks` ticks paced against the wall clock.
    pub fn run_realtime(&mut self, ticks: u64) {
        let tick_duration = Duration::from_millis(self.tick_ms());
        let start = Instant::now();
        let mut last_frame = start;
        let mut accumulated = Duration::ZERO;
        let mut done = 0;

        while done < ticks {
            let now = Instant::now();
            accumulated += now.duration_since(last_frame);
            last_frame = now;

            // Fixed timestep: catch up on every whole tick that elapsed
            while accumulated >= tick_duration && done < ticks {
                self.clock_ms = start.elapsed().as_millis() as u64;
                self.step();
                accumulated -= tick_duration;
                done += 1;
            }

            std::thread::sleep(tick_duration.saturating_sub(accumulated));
        }
    }

    fn log_progress(&self) {
        for session in &self.sessions {
            let sim = &session.simulation;
            tracing::debug!(
                frame = self.frame,
                peer = sim.peer_id(),
                size = sim.player().size,
                food = sim.world.active_food_count(),
                mirrors = sim.world.mirrors.len(),
                "progress"
            );
        }
    }

    /// Log final per-session totals.
    pub fn log_summary(&self) {
        tracing::info!(
            frames = self.frame,
            clock_ms = self.clock_ms,
            peers = self.hub.snapshot(PLAYERS_KEY).len(),
            "run finished"
        );
        for session in &self.sessions {
            let sim = &session.simulation;
            tracing::info!(
                peer = sim.peer_id(),
                size = sim.player().size,
                peak = session.stats.peak_size,
                food = session.stats.food_eaten,
                kills = session.stats.kills,
                deaths = session.stats.deaths,
                mirrors = sim.world.mirrors.len(),
                "session summary"
            );
        }
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

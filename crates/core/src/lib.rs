//! Agarium Core - Cell-Growth Simulation
//!
//! This crate contains the per-tick simulation of one player's session:
//! movement, AI opponents, eating, and mirroring of remote peers.
//!
//! # Rules of the road
//!
//! 1. No ambient state - everything a tick touches hangs off `Simulation`
//! 2. No wall clock - callers pass `now_ms` into every tick
//! 3. No threads, no async - snapshots and respawns are queued and applied
//!    at tick boundaries
//! 4. Ordered iteration - `Vec` for agents and food, `BTreeMap` for mirrors
//! 5. Seeded randomness only - `SeededRandom`, so sessions replay exactly

pub mod ai;
pub mod collision;
pub mod config;
pub mod entities;
pub mod input;
pub mod movement;
pub mod physics;
pub mod random;
pub mod render;
pub mod respawn;
pub mod simulation;
pub mod sync;
pub mod world;

pub use config::{ConfigError, GameConfig};
pub use entities::PeerId;
pub use input::PointerInput;
pub use physics::WorldBounds;
pub use random::SeededRandom;
pub use simulation::{Simulation, SimulationContext, TickReport};
pub use sync::{OfflineChannel, PlayerState, PlayersSnapshot, SharedStateChannel, PLAYERS_KEY};
pub use world::WorldState;

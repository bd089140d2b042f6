//! Entity types for the simulation.
//!
//! Agents and food sit in plain `Vec`s addressed by index handles; mirrors are
//! keyed by peer identifier. Nothing here has behaviour beyond small helpers.

use glam::Vec2;

/// Identifier of a peer in the shared key space.
pub type PeerId = String;

/// Index handle of an AI agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AiId(pub u32);

impl AiId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index handle of a food item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FoodId(pub u32);

impl FoodId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A sized, movable cell. Used for the local player and inside [`AiAgent`].
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
}

impl Agent {
    pub fn new(position: Vec2, size: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
        }
    }

    /// True when `self` is large enough to eat a cell of `other_size`.
    #[inline]
    pub fn dominates(&self, other_size: f32, ratio: f32) -> bool {
        self.size > other_size * ratio
    }
}

/// Computer-controlled agent.
#[derive(Debug, Clone, PartialEq)]
pub struct AiAgent {
    pub id: AiId,
    pub body: Agent,
    /// Target chosen this tick, if any.
    pub target: Option<Vec2>,
}

impl AiAgent {
    pub fn new(id: AiId, position: Vec2, size: f32) -> Self {
        Self {
            id,
            body: Agent::new(position, size),
            target: None,
        }
    }
}

/// A pellet that grows whoever eats it.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodItem {
    pub id: FoodId,
    pub position: Vec2,
    pub active: bool,
}

impl FoodItem {
    pub fn new(id: FoodId, position: Vec2) -> Self {
        Self {
            id,
            position,
            active: true,
        }
    }
}

/// Local stand-in for another session's player.
///
/// Never simulated locally: position and size only change when a snapshot
/// arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct RemotePeerMirror {
    pub position: Vec2,
    pub size: f32,
    /// Clock time (ms) of the last snapshot that contained this peer.
    pub last_update_ms: u64,
    /// Size at which the local player ate this peer, until the peer reports a
    /// smaller size.
    pub consumed_at_size: Option<f32>,
}

impl RemotePeerMirror {
    pub fn new(position: Vec2, size: f32, now_ms: u64) -> Self {
        Self {
            position,
            size,
            last_update_ms: now_ms,
            consumed_at_size: None,
        }
    }

    /// Milliseconds since the last refresh; zero if the clock went backwards.
    #[inline]
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_update_ms)
    }

    #[inline]
    pub fn is_consumed(&self) -> bool {
        self.consumed_at_size.is_some()
    }
}

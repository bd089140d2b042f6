//! Peer state synchronisation.
//!
//! The local player is published under the local peer id into a shared map;
//! every other entry of that map is mirrored locally. Delivery is treated as
//! unreliable: a missing or late snapshot just leaves mirrors stale until the
//! staleness timeout evicts them. Nothing here ever returns an error.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GameConfig;
use crate::entities::{Agent, PeerId, RemotePeerMirror};

/// Key of the shared map every session writes its player into.
pub const PLAYERS_KEY: &str = "players";

/// Value stored per peer in the shared map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl PlayerState {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<&Agent> for PlayerState {
    fn from(agent: &Agent) -> Self {
        Self {
            x: agent.position.x,
            y: agent.position.y,
            size: agent.size,
        }
    }
}

/// Full content of the shared map as delivered to a subscriber.
pub type PlayersSnapshot = BTreeMap<PeerId, PlayerState>;

/// Publish/subscribe access to the shared map.
///
/// Implementations queue incoming snapshots; the simulation drains them at a
/// tick boundary so they are never applied mid-tick.
pub trait SharedStateChannel {
    /// Overwrite this peer's entry.
    fn publish(&mut self, peer_id: &str, state: PlayerState);

    /// Every snapshot delivered since the last call, oldest first.
    fn drain_snapshots(&mut self) -> Vec<PlayersSnapshot>;
}

/// Channel for a session with no peers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineChannel;

impl SharedStateChannel for OfflineChannel {
    fn publish(&mut self, _peer_id: &str, _state: PlayerState) {}

    fn drain_snapshots(&mut self) -> Vec<PlayersSnapshot> {
        Vec::new()
    }
}

/// What a reconcile or sweep changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: Vec<PeerId>,
    pub updated: usize,
    pub evicted: Vec<PeerId>,
}

impl SyncReport {
    pub fn merge(&mut self, other: SyncReport) {
        self.created.extend(other.created);
        self.updated += other.updated;
        self.evicted.extend(other.evicted);
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated == 0 && self.evicted.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct StateSync {
    local_id: PeerId,
    stale_timeout_ms: u64,
}

impl StateSync {
    pub fn new(local_id: PeerId, config: &GameConfig) -> Self {
        Self {
            local_id,
            stale_timeout_ms: config.peer_stale_timeout_ms,
        }
    }

    /// Write the local player into the shared map.
    pub fn publish(&self, player: &Agent, channel: &mut impl SharedStateChannel) {
        channel.publish(&self.local_id, PlayerState::from(player));
    }

    /// Apply one delivered snapshot to the mirror set.
    pub fn reconcile(
        &self,
        mirrors: &mut BTreeMap<PeerId, RemotePeerMirror>,
        snapshot: &PlayersSnapshot,
        now_ms: u64,
    ) -> SyncReport {
        let mut report = SyncReport::default();

        for (peer, state) in snapshot {
            if *peer == self.local_id {
                continue;
            }
            match mirrors.get_mut(peer) {
                Some(mirror) => {
                    if mirror.consumed_at_size.is_some_and(|at| state.size < at) {
                        mirror.consumed_at_size = None;
                    }
                    mirror.position = state.position();
                    mirror.size = state.size;
                    mirror.last_update_ms = now_ms;
                    report.updated += 1;
                }
                None => {
                    debug!(%peer, size = state.size, "peer mirror created");
                    mirrors.insert(
                        peer.clone(),
                        RemotePeerMirror::new(state.position(), state.size, now_ms),
                    );
                    report.created.push(peer.clone());
                }
            }
        }

        mirrors.retain(|peer, mirror| {
            let keep = snapshot.contains_key(peer) && mirror.age_ms(now_ms) <= self.stale_timeout_ms;
            if !keep {
                debug!(%peer, "peer mirror removed");
                report.evicted.push(peer.clone());
            }
            keep
        });

        report
    }

    /// Drop mirrors that have not been refreshed within the timeout, for
    /// when snapshots stop arriving altogether.
    pub fn evict_stale(
        &self,
        mirrors: &mut BTreeMap<PeerId, RemotePeerMirror>,
        now_ms: u64,
    ) -> SyncReport {
        let mut report = SyncReport::default();
        mirrors.retain(|peer, mirror| {
            let fresh = mirror.age_ms(now_ms) <= self.stale_timeout_ms;
            if !fresh {
                debug!(%peer, age_ms = mirror.age_ms(now_ms), "stale peer mirror evicted");
                report.evicted.push(peer.clone());
            }
            fresh
        });
        report
    }
}

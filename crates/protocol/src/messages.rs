//! Network message types.
//!
//! The shared key space is a set of named maps. Peers write only their own
//! entry; subscribers receive the whole map whenever it changes.

use agarium_core::{PeerId, PlayerState, PlayersSnapshot};
use serde::{Deserialize, Serialize};

/// All messages exchanged with the shared key space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SharedStateMessage {
    /// Overwrite one peer's entry in a map (last write wins).
    Put(PutMessage),

    /// Delete one peer's entry, e.g. when the peer leaves.
    Remove(RemoveMessage),

    /// Full content of a map, pushed to every subscriber after a change.
    Snapshot(SnapshotMessage),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PutMessage {
    pub key: String,
    pub peer_id: PeerId,
    pub state: PlayerState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveMessage {
    pub key: String,
    pub peer_id: PeerId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMessage {
    pub key: String,
    pub entries: PlayersSnapshot,
}

impl SharedStateMessage {
    pub fn put(key: &str, peer_id: &str, state: PlayerState) -> Self {
        Self::Put(PutMessage {
            key: key.to_string(),
            peer_id: peer_id.to_string(),
            state,
        })
    }

    pub fn remove(key: &str, peer_id: &str) -> Self {
        Self::Remove(RemoveMessage {
            key: key.to_string(),
            peer_id: peer_id.to_string(),
        })
    }

    pub fn snapshot(key: &str, entries: PlayersSnapshot) -> Self {
        Self::Snapshot(SnapshotMessage {
            key: key.to_string(),
            entries,
        })
    }

    /// Name of the map this message refers to.
    pub fn key(&self) -> &str {
        match self {
            Self::Put(m) => &m.key,
            Self::Remove(m) => &m.key,
            Self::Snapshot(m) => &m.key,
        }
    }
}

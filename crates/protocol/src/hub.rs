//! In-process shared key space.
//!
//! `SharedStateHub` keeps the authoritative maps and relays changes to every
//! connected `HubClient`. All traffic goes through the codec as bytes, so a
//! client behaves the same as one talking to a remote relay would.
//!
//! Clients queue snapshots in an `mpsc` inbox and only read it when the
//! simulation drains it at a tick boundary.

use std::collections::BTreeMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

use agarium_core::{PeerId, PlayerState, PlayersSnapshot, SharedStateChannel, PLAYERS_KEY};
use tracing::{debug, warn};

use crate::codec::{decode, encode, CodecError};
use crate::messages::SharedStateMessage;

type SubscriberId = u64;

#[derive(Debug, Default)]
struct HubState {
    maps: BTreeMap<String, PlayersSnapshot>,
    subscribers: Vec<(SubscriberId, Sender<Vec<u8>>)>,
    next_subscriber: SubscriberId,
}

impl HubState {
    /// Push the current content of `key` to every subscriber, forgetting
    /// those whose inbox is gone.
    fn broadcast(&mut self, key: &str) {
        let entries = self.maps.get(key).cloned().unwrap_or_default();
        let frame = match encode(&SharedStateMessage::snapshot(key, entries)) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("failed to encode snapshot for {key}: {e}");
                return;
            }
        };
        self.subscribers.retain(|(id, tx)| {
            let alive = tx.send(frame.clone()).is_ok();
            if !alive {
                debug!(subscriber = id, "dropping disconnected subscriber");
            }
            alive
        });
    }
}

/// Shared maps plus subscriber registry. Cheap to clone; clones share state.
#[derive(Debug, Clone, Default)]
pub struct SharedStateHub {
    inner: Arc<Mutex<HubState>>,
}

impl SharedStateHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HubState> {
        // A panicked writer leaves at worst a stale entry behind.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Subscribe a new client. It immediately receives the current players map.
    pub fn connect(&self) -> HubClient {
        let (tx, rx) = mpsc::channel();
        let id = {
            let mut state = self.lock();
            let id = state.next_subscriber;
            state.next_subscriber += 1;

            let entries = state.maps.get(PLAYERS_KEY).cloned().unwrap_or_default();
            match encode(&SharedStateMessage::snapshot(PLAYERS_KEY, entries)) {
                Ok(frame) => {
                    let _ = tx.send(frame);
                }
                Err(e) => warn!("failed to encode initial snapshot: {e}"),
            }
            state.subscribers.push((id, tx));
            id
        };
        debug!(subscriber = id, "client connected");

        HubClient {
            hub: self.clone(),
            subscriber: id,
            inbox: rx,
            published_as: None,
        }
    }

    /// Apply an encoded `Put` or `Remove` and notify subscribers.
    pub fn apply(&self, frame: &[u8]) -> Result<(), CodecError> {
        let message = decode(frame)?;
        let mut state = self.lock();
        match message {
            SharedStateMessage::Put(put) => {
                state
                    .maps
                    .entry(put.key.clone())
                    .or_default()
                    .insert(put.peer_id, put.state);
                state.broadcast(&put.key);
            }
            SharedStateMessage::Remove(remove) => {
                let removed = state
                    .maps
                    .get_mut(&remove.key)
                    .and_then(|map| map.remove(&remove.peer_id))
                    .is_some();
                if removed {
                    debug!(peer = %remove.peer_id, key = %remove.key, "entry removed");
                    state.broadcast(&remove.key);
                }
            }
            SharedStateMessage::Snapshot(snapshot) => {
                warn!(key = %snapshot.key, "ignoring snapshot sent to hub");
            }
        }
        Ok(())
    }

    /// Current content of a map.
    pub fn snapshot(&self, key: &str) -> PlayersSnapshot {
        self.lock().maps.get(key).cloned().unwrap_or_default()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    fn unsubscribe(&self, id: SubscriberId) {
        self.lock().subscribers.retain(|(sub, _)| *sub != id);
    }
}

/// One session's connection to a [`SharedStateHub`].
///
/// Dropping the client removes the entry it published, so peers see it
/// leave on their next snapshot.
#[derive(Debug)]
pub struct HubClient {
    hub: SharedStateHub,
    subscriber: SubscriberId,
    inbox: Receiver<Vec<u8>>,
    published_as: Option<PeerId>,
}

impl HubClient {
    fn send(&self, message: &SharedStateMessage) {
        let result = encode(message).and_then(|frame| self.hub.apply(&frame));
        if let Err(e) = result {
            warn!("shared state write dropped: {e}");
        }
    }
}

impl SharedStateChannel for HubClient {
    fn publish(&mut self, peer_id: &str, state: PlayerState) {
        self.send(&SharedStateMessage::put(PLAYERS_KEY, peer_id, state));
        if self.published_as.as_deref() != Some(peer_id) {
            self.published_as = Some(peer_id.to_string());
        }
    }

    fn drain_snapshots(&mut self) -> Vec<PlayersSnapshot> {
        let mut snapshots = Vec::new();
        while let Ok(frame) = self.inbox.try_recv() {
            match decode(&frame) {
                Ok(SharedStateMessage::Snapshot(snapshot)) if snapshot.key == PLAYERS_KEY => {
                    snapshots.push(snapshot.entries);
                }
                Ok(other) => debug!(key = other.key(), "ignoring unrelated message"),
                Err(e) => warn!("dropping undecodable frame: {e}"),
            }
        }
        snapshots
    }
}

impl Drop for HubClient {
    fn drop(&mut self) {
        self.hub.unsubscribe(self.subscriber);
        if let Some(peer_id) = self.published_as.take() {
            self.send(&SharedStateMessage::remove(PLAYERS_KEY, &peer_id));
        }
    }
}

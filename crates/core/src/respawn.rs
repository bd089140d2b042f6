//! Deferred food respawns.
//!
//! Eating a food item schedules it here instead of starting a timer. The
//! queue is checked at every tick boundary against the caller's clock.

use crate::entities::FoodId;

/// A food item waiting to come back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRespawn {
    pub food: FoodId,
    pub due_ms: u64,
}

/// Pending respawns in scheduling order. Entries are never cancelled.
#[derive(Debug, Clone, Default)]
pub struct RespawnQueue {
    pending: Vec<PendingRespawn>,
}

impl RespawnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, food: FoodId, due_ms: u64) {
        self.pending.push(PendingRespawn { food, due_ms });
    }

    /// Remove and return every entry due at or before `now_ms`, oldest first.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<FoodId> {
        let mut due = Vec::new();
        self.pending.retain(|entry| {
            if entry.due_ms <= now_ms {
                due.push(entry.food);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn releases_only_due_entries() {
        let mut queue = RespawnQueue::new();
        queue.schedule(FoodId(3), 2_000);
        queue.schedule(FoodId(1), 2_500);

        assert!(queue.take_due(1_999).is_empty());
        assert_eq!(queue.take_due(2_000), vec![FoodId(3)]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.take_due(10_000), vec![FoodId(1)]);
        assert!(queue.is_empty());
    }
}

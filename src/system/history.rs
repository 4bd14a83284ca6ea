use std::sync::{PoisonError, RwLock};

use super::snapshot::Snapshot;

/// Samples kept per hour of history (one per minute).
pub const SAMPLES_PER_HOUR: usize = 60;

/// Hours of history retained in production; also the fallback horizon for
/// out-of-range direct queries.
pub const DEFAULT_HOURS: i64 = 24;

/// Fixed-capacity ring of snapshots guarded by a reader/writer lock.
///
/// Slots are allocated once, pre-filled with sentinels, and overwritten in
/// place as the cursor wraps. Appends take the write lock; queries take the
/// read lock, so concurrent readers never block each other.
#[derive(Debug)]
pub struct HistoryStore {
    ring: RwLock<Ring>,
}

#[derive(Debug)]
struct Ring {
    slots: Vec<Snapshot>,
    pos: usize,
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        // A zero-slot ring would make the cursor arithmetic divide by zero.
        let capacity = capacity.max(1);
        HistoryStore {
            ring: RwLock::new(Ring {
                slots: vec![Snapshot::default(); capacity],
                pos: 0,
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.ring
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .slots
            .len()
    }

    /// Overwrites the slot under the cursor and advances it. Once the ring
    /// has wrapped, the oldest sample is silently dropped.
    pub fn append(&self, snapshot: Snapshot) {
        let mut ring = self.ring.write().unwrap_or_else(PoisonError::into_inner);
        let size = ring.slots.len();
        let pos = ring.pos;
        ring.slots[pos] = snapshot;
        ring.pos = (pos + 1) % size;
    }

    /// Walks backward from the cursor for up to `count` slots (capped at the
    /// capacity) and returns the non-sentinel samples, most recent first.
    pub fn query(&self, count: usize) -> Vec<Snapshot> {
        let ring = self.ring.read().unwrap_or_else(PoisonError::into_inner);
        let size = ring.slots.len();
        let steps = count.min(size);
        let mut out = Vec::with_capacity(steps);
        let mut pos = ring.pos;
        for _ in 0..steps {
            pos = (pos + size - 1) % size;
            if !ring.slots[pos].is_sentinel() {
                out.push(ring.slots[pos].clone());
            }
        }
        out
    }
}

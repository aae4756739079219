//! Timestamp-ordered callback queue.
//!
//! Turret behaviour that unfolds over time (shot cadence, wrong-letter
//! reveals, memorize-first previews) is expressed as scheduled callbacks.
//! Entries are ordered by due time with a monotonically increasing sequence
//! number as the tie-break, so two callbacks due on the same tick always
//! fire in the order they were scheduled. Every turret-owned callback
//! carries the turret's identifier; when a turret is destroyed its pending
//! callbacks are cancelled, and a callback whose identifier no longer
//! matches the slot's turret is discarded on delivery.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

use word_siege_core::{SlotId, TurretId};

/// Deferred work item owned by a specific turret instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Callback {
    /// Fire the next shot of an active fire sequence.
    FireShot { slot: SlotId, turret: TurretId },
    /// Reveal a wrong letter inside a blank after the lock delay.
    RevealWrong {
        slot: SlotId,
        turret: TurretId,
        index: usize,
        letter: char,
    },
    /// Clear a revealed wrong letter and unlock the turret.
    ClearWrong {
        slot: SlotId,
        turret: TurretId,
        index: usize,
    },
    /// End a memorize-first preview, restoring the blanks.
    RestoreBlanks { slot: SlotId, turret: TurretId },
}

impl Callback {
    fn owner(&self) -> TurretId {
        match self {
            Callback::FireShot { turret, .. }
            | Callback::RevealWrong { turret, .. }
            | Callback::ClearWrong { turret, .. }
            | Callback::RestoreBlanks { turret, .. } => *turret,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Entry {
    due: Duration,
    seq: u64,
    callback: Callback,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.due.cmp(&other.due).then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
pub(crate) struct Schedule {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl Schedule {
    pub(crate) fn push(&mut self, due: Duration, callback: Callback) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { due, seq, callback }));
    }

    /// Pops the next callback due at or before `now`, if any.
    pub(crate) fn pop_due(&mut self, now: Duration) -> Option<Callback> {
        let due = self.heap.peek().map(|Reverse(entry)| entry.due)?;
        if due > now {
            return None;
        }
        self.heap.pop().map(|Reverse(entry)| entry.callback)
    }

    /// Drops every pending callback owned by the given turret.
    pub(crate) fn cancel_turret(&mut self, turret: TurretId) {
        let entries: Vec<Reverse<Entry>> = std::mem::take(&mut self.heap).into_vec();
        self.heap = entries
            .into_iter()
            .filter(|Reverse(entry)| entry.callback.owner() != turret)
            .collect();
    }

    pub(crate) fn clear(&mut self) {
        self.heap.clear();
    }
}

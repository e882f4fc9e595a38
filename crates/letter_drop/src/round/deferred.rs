//! Delayed round work, scoped to the round generation that scheduled it.

use core::time::Duration;

use super::TileId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Drop a snapped tile once its fade has played
    RemoveTile(TileId),
    /// Start fireworks and confetti after the round is solved
    Celebrate,
    /// Take the firework markers down after their display window
    ClearFireworks,
}

#[derive(Debug)]
struct Pending {
    /// Scheduling order, breaks ties between tasks due at the same time
    sequence: u64,
    generation: u64,
    due: Duration,
    task: DeferredTask,
}

#[derive(Debug, Default)]
pub struct DeferredQueue {
    elapsed: Duration,
    generation: u64,
    next_sequence: u64,
    pending: Vec<Pending>,
}

impl DeferredQueue {
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn schedule(&mut self, delay: Duration, task: DeferredTask) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.pending.push(Pending {
            sequence,
            generation: self.generation,
            due: self.elapsed + delay,
            task,
        });
    }

    /// Starts a new generation, dropping everything scheduled by the previous one.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.pending.clear();
    }

    /// Advances the clock and returns the tasks that came due, in due order.
    pub fn advance(&mut self, delta: Duration) -> Vec<DeferredTask> {
        self.elapsed += delta;

        let generation = self.generation;
        let elapsed = self.elapsed;
        let (mut due, waiting): (Vec<Pending>, Vec<Pending>) = core::mem::take(&mut self.pending)
            .into_iter()
            .filter(|pending| pending.generation == generation)
            .partition(|pending| pending.due <= elapsed);
        self.pending = waiting;

        due.sort_by_key(|pending| (pending.due, pending.sequence));
        due.into_iter().map(|pending| pending.task).collect()
    }
}

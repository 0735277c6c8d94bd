use std::thread;

use tracing::info;

use crate::config::PausePolicy;

/// Sleeps between batches of `every` items. Nothing waits after the last
/// item, so a run ending on a full batch returns straight away.
#[derive(Debug, Clone)]
pub struct Pacer {
    policy: PausePolicy,
    started: usize,
}

impl Pacer {
    pub fn new(policy: PausePolicy) -> Self {
        Self { policy, started: 0 }
    }

    pub fn started(&self) -> usize {
        self.started
    }

    /// Call before each item. Pauses first when the items before it filled
    /// a batch, and returns whether it did.
    pub fn next_item(&mut self) -> bool {
        let every = self.policy.every;
        let due = every > 0 && self.started > 0 && self.started % every == 0;
        self.started += 1;
        if !due {
            return false;
        }
        info!(done = self.started - 1, seconds = self.policy.seconds, "pausing");
        thread::sleep(self.policy.duration());
        true
    }
}

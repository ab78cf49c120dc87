//! Scheduled deferred actions
//!
//! The sim never blocks; anything that "happens later" is an entry here,
//! ticked forward by the session. Every entry is tagged with the round
//! generation it was scheduled in. Starting a new round bumps the generation,
//! so a pending action from a previous round can never fire into a fresh one.

/// What fires when a deferred entry elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Thaw the opponent after a hammer freeze
    ResumeOpponent,
}

#[derive(Debug, Clone)]
struct Entry {
    remaining: f32,
    generation: u64,
    action: DeferredAction,
}

/// Generation-tagged timer queue.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    generation: u64,
    entries: Vec<Entry>,
}

impl Scheduler {
    /// Fresh scheduler at generation 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current round generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Invalidate everything scheduled so far and open a new round.
    pub fn begin_round(&mut self) {
        self.generation += 1;
    }

    /// Schedule `action` to fire after `secs` of simulated time, tagged with
    /// the current generation.
    pub fn schedule(&mut self, secs: f32, action: DeferredAction) {
        self.entries.push(Entry {
            remaining: secs,
            generation: self.generation,
            action,
        });
    }

    /// Drop every pending entry matching `action` in the current generation.
    pub fn cancel(&mut self, action: DeferredAction) {
        let generation = self.generation;
        self.entries
            .retain(|e| !(e.generation == generation && e.action == action));
    }

    /// True if an `action` is pending in the current generation.
    pub fn is_pending(&self, action: DeferredAction) -> bool {
        self.entries
            .iter()
            .any(|e| e.generation == self.generation && e.action == action)
    }

    /// Advance simulated time. Entries from stale generations are discarded
    /// without firing; live entries whose time has elapsed are returned in
    /// the order they were scheduled.
    pub fn advance(&mut self, dt: f32) -> Vec<DeferredAction> {
        let generation = self.generation;
        self.entries.retain(|e| e.generation == generation);

        let mut fired = Vec::new();
        for entry in &mut self.entries {
            entry.remaining -= dt;
            if entry.remaining <= 0.0 {
                fired.push(entry.action);
            }
        }
        self.entries.retain(|e| e.remaining > 0.0);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_elapse() {
        let mut scheduler = Scheduler::new();
        scheduler.begin_round();
        scheduler.schedule(6.0, DeferredAction::ResumeOpponent);

        assert!(scheduler.advance(3.0).is_empty());
        assert!(scheduler.is_pending(DeferredAction::ResumeOpponent));

        assert_eq!(
            scheduler.advance(3.0),
            vec![DeferredAction::ResumeOpponent]
        );
        // Consumed: nothing left to fire
        assert!(scheduler.advance(10.0).is_empty());
        assert!(!scheduler.is_pending(DeferredAction::ResumeOpponent));
    }

    #[test]
    fn test_stale_generation_never_fires() {
        let mut scheduler = Scheduler::new();
        scheduler.begin_round();
        scheduler.schedule(2.0, DeferredAction::ResumeOpponent);

        // New round invalidates the pending resume
        scheduler.begin_round();
        assert!(!scheduler.is_pending(DeferredAction::ResumeOpponent));
        assert!(scheduler.advance(5.0).is_empty());
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut scheduler = Scheduler::new();
        scheduler.begin_round();
        scheduler.schedule(2.0, DeferredAction::ResumeOpponent);
        scheduler.cancel(DeferredAction::ResumeOpponent);

        assert!(scheduler.advance(5.0).is_empty());
    }

    #[test]
    fn test_fires_inside_the_elapsing_advance() {
        let mut scheduler = Scheduler::new();
        scheduler.begin_round();
        scheduler.schedule(1.0, DeferredAction::ResumeOpponent);

        // Exactly reaching zero fires in the same advance, never a tick late
        assert_eq!(
            scheduler.advance(1.0),
            vec![DeferredAction::ResumeOpponent]
        );
    }
}

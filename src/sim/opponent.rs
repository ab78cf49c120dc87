//! The simulated rival
//!
//! Works through its own lane one ingredient per step, serving each order the
//! moment its stack is complete. The step cadence belongs to the shell (it
//! drives `grab_next` at a rate derived from `speed()`); this module owns the
//! state machine: Idle → Working ⇄ Paused, terminal Stopped.

use super::order::Ingredient;
use super::queue::{Lane, OrderQueues, TicketId};

/// Where the rival is in its working life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpponentPhase {
    /// Never started this round
    #[default]
    Idle,
    /// Consuming its lane
    Working,
    /// Frozen by the hammer; resumes via a scheduled action
    Paused,
    /// Round over
    Stopped,
}

/// Result of one grab step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Grab {
    /// Ticket auto-served because its stack was already complete
    pub served: Option<TicketId>,
    /// Ingredient taken this step, for the presentation layer's hand
    pub ingredient: Option<Ingredient>,
}

/// The rival's working state.
#[derive(Debug, Clone, Default)]
pub struct Opponent {
    phase: OpponentPhase,
    speed: f32,
    resume_speed: f32,
    /// Ingredients consumed from the current head order
    consumed: usize,
}

impl Opponent {
    /// Fresh rival, not yet working.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin working at the given speed multiplier. Resets progress on the
    /// current head order.
    pub fn start(&mut self, speed: f32) {
        self.phase = OpponentPhase::Working;
        self.speed = speed;
        self.resume_speed = speed;
        self.consumed = 0;
    }

    /// Stop for good (round over). Any pending auto-resume is cancelled by
    /// the session's scheduler, not here.
    pub fn stop(&mut self) {
        self.phase = OpponentPhase::Stopped;
        self.speed = 0.0;
    }

    /// Freeze consumption, remembering the working speed. Returns false (and
    /// does nothing) unless currently Working — a second hammer while frozen
    /// neither stacks nor extends the freeze.
    pub fn pause(&mut self) -> bool {
        if self.phase != OpponentPhase::Working {
            return false;
        }
        self.resume_speed = self.speed;
        self.speed = 0.0;
        self.phase = OpponentPhase::Paused;
        true
    }

    /// Thaw back to the pre-pause speed. Returns false unless Paused.
    pub fn resume(&mut self) -> bool {
        if self.phase != OpponentPhase::Paused {
            return false;
        }
        self.speed = self.resume_speed;
        self.phase = OpponentPhase::Working;
        true
    }

    /// Current phase.
    pub fn phase(&self) -> OpponentPhase {
        self.phase
    }

    /// Effective speed multiplier (0 while paused or stopped).
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// True while actively consuming.
    pub fn is_working(&self) -> bool {
        self.phase == OpponentPhase::Working
    }

    /// True while frozen by the hammer.
    pub fn is_paused(&self) -> bool {
        self.phase == OpponentPhase::Paused
    }

    /// Ingredients already taken from the current head order.
    pub fn progress(&self) -> usize {
        self.consumed
    }

    /// One cadence step: finish a completed order first (dequeue it and
    /// report it served), then take the next ingredient from the head order.
    ///
    /// An empty opponent lane means the round batch was sized too small;
    /// that is a defect upstream, loud in dev builds.
    pub fn grab_next(&mut self, queues: &mut OrderQueues) -> Grab {
        let mut grab = Grab::default();
        if !self.is_working() {
            return grab;
        }

        if let Some(head) = queues.peek_head(Lane::Opponent) {
            if self.consumed >= head.order.len() {
                if let Some(ticket) = queues.dequeue_head(Lane::Opponent) {
                    grab.served = Some(ticket.id);
                }
                self.consumed = 0;
            }
        }

        match queues.peek_head(Lane::Opponent) {
            Some(head) => {
                grab.ingredient = Some(head.order.ingredients()[self.consumed]);
                self.consumed += 1;
            }
            None => {
                debug_assert!(false, "opponent lane exhausted mid-round");
                log::error!("Opponent lane exhausted mid-round; stopping opponent");
                self.stop();
            }
        }

        grab
    }
}

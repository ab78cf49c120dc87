//! Game session orchestration
//!
//! One `GameSession` per play session. It owns the round state, both order
//! lanes, the tray, the rival, and the seeded RNG; every mutation happens
//! synchronously inside one of its methods (a tick, a player command, or an
//! opponent cadence step). Shells drain the event buffer after each call and
//! render/voice what they find — events carry ids, never references.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::{Tuning, TuningError};

use super::opponent::Opponent;
use super::order::Ingredient;
use super::queue::{Lane, OrderQueues, TicketId};
use super::sabotage::Sabotage;
use super::timer::{DeferredAction, Scheduler};
use super::tray::Tray;

/// What the core wants the presentation layer to show or voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player served a correct stack; the ticket left the lane
    ServeSuccess {
        ticket: TicketId,
    },
    /// Player served a wrong or incomplete stack
    ServeFailed,
    /// Rival completed an order
    OpponentServed {
        ticket: TicketId,
    },
    /// Countdown reached zero
    RoundEnded {
        stage: u32,
        player_score: u32,
        opponent_score: u32,
    },
    /// Periodic rival chatter while it works
    Taunt,
    /// Rival crows after every third completed order
    TauntMilestone,
    /// Rival hid the player's next order slip
    Sabotaged {
        ticket: TicketId,
    },
    /// Player spent a hammer charge
    HammerUsed,
    /// Rival frozen by the hammer
    OpponentPaused,
    /// Rival thawed and back to work
    OpponentResumed,
    /// A never-before-reached stage was entered; persist progress now
    StageUnlocked {
        stage: u32,
    },
}

/// Mutable state of the running round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    /// Difficulty level of this round
    pub stage: u32,
    /// Countdown length this round started from
    pub total_secs: f32,
    /// Countdown remaining
    pub remaining_secs: f32,
    /// Orders the player has served
    pub player_score: u32,
    /// Orders the rival has served
    pub opponent_score: u32,
    /// Hammer uses left this round
    pub hammer_charges: u32,
    /// Seconds until the next taunt window
    pub taunt_timer: f32,
    /// True from round start until the countdown ends
    pub active: bool,
}

impl Default for RoundState {
    fn default() -> Self {
        Self {
            stage: 1,
            total_secs: 0.0,
            remaining_secs: 0.0,
            player_score: 0,
            opponent_score: 0,
            hammer_charges: 0,
            taunt_timer: 0.0,
            active: false,
        }
    }
}

/// The whole contest: round lifecycle, lanes, tray, rival, events.
#[derive(Debug)]
pub struct GameSession {
    tuning: Tuning,
    seed: u64,
    rng: Pcg32,
    round: RoundState,
    queues: OrderQueues,
    tray: Tray,
    opponent: Opponent,
    sabotage: Sabotage,
    scheduler: Scheduler,
    best_stage: u32,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a session in the lobby (no round running).
    ///
    /// `best_stage` is the persisted progression the shell loaded; the
    /// session keeps it monotonic and flags new unlocks via
    /// [`GameEvent::StageUnlocked`].
    pub fn new(seed: u64, tuning: Tuning, best_stage: u32) -> Self {
        Self {
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            round: RoundState::default(),
            queues: OrderQueues::new(),
            tray: Tray::new(),
            opponent: Opponent::new(),
            sabotage: Sabotage::default(),
            scheduler: Scheduler::new(),
            best_stage: best_stage.max(1),
            events: Vec::new(),
        }
    }

    fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain everything emitted since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start a round at `stage` with a fresh countdown of `duration_secs`.
    ///
    /// Validates the tuning first and fails fast before any state mutation.
    /// Any pending deferred actions from a previous round are invalidated.
    pub fn start(&mut self, stage: u32, duration_secs: f32) -> Result<(), TuningError> {
        self.tuning.validate()?;
        if duration_secs <= 0.0 {
            return Err(TuningError::NonPositiveDuration(duration_secs));
        }

        self.scheduler.begin_round();
        self.round = RoundState {
            stage,
            total_secs: duration_secs,
            remaining_secs: duration_secs,
            player_score: 0,
            opponent_score: 0,
            hammer_charges: self.tuning.hammer_budget,
            taunt_timer: self.tuning.taunt_period_secs,
            active: true,
        };
        self.sabotage.reset(self.tuning.sabotage_budget);
        self.tray.clear();
        self.queues
            .refill(stage, self.tuning.batch_size, &mut self.rng);

        let speed = self.tuning.opponent_speed(stage);
        self.opponent.start(speed);

        log::info!("Round started: stage {stage}, {duration_secs:.0}s, opponent speed {speed:.2}");
        Ok(())
    }

    /// Start a fresh game at `stage` using the tuned round duration.
    pub fn start_game(&mut self, stage: u32) -> Result<(), TuningError> {
        let duration = self.tuning.round_secs;
        self.start(stage, duration)
    }

    /// Move to the next stage, unlocking it if never reached before, and
    /// restart with the same duration policy.
    pub fn advance_stage(&mut self) -> Result<(), TuningError> {
        let next = self.round.stage + 1;
        let duration = if self.round.total_secs > 0.0 {
            self.round.total_secs
        } else {
            self.tuning.round_secs
        };
        self.start(next, duration)?;

        if next > self.best_stage {
            self.best_stage = next;
            self.push(GameEvent::StageUnlocked { stage: next });
        }
        Ok(())
    }

    /// Replay the current stage from scratch.
    pub fn restart_stage(&mut self) -> Result<(), TuningError> {
        let stage = self.round.stage;
        let duration = if self.round.total_secs > 0.0 {
            self.round.total_secs
        } else {
            self.tuning.round_secs
        };
        self.start(stage, duration)
    }

    /// Abandon the round and return to the lobby.
    pub fn stop_to_lobby(&mut self) {
        self.round.active = false;
        self.opponent.stop();
        self.scheduler.cancel(DeferredAction::ResumeOpponent);
        self.tray.clear();
        log::info!("Round abandoned, back to lobby");
    }

    /// Advance simulated time by `dt` seconds.
    ///
    /// Fires due deferred actions, then decrements the countdown and the
    /// taunt timer (decrement strictly before the taunt check), and finalizes
    /// the round inside the same tick that reaches zero.
    pub fn tick(&mut self, dt: f32) {
        if !self.round.active {
            return;
        }

        for action in self.scheduler.advance(dt) {
            match action {
                DeferredAction::ResumeOpponent => {
                    if self.opponent.resume() {
                        self.push(GameEvent::OpponentResumed);
                    }
                }
            }
        }

        self.round.remaining_secs -= dt;
        self.round.taunt_timer -= dt;

        if self.round.taunt_timer <= 0.0 {
            if self.opponent.is_working() {
                self.push(GameEvent::Taunt);
            }
            self.round.taunt_timer = self.tuning.taunt_period_secs;
        }

        if self.round.remaining_secs <= 0.0 {
            self.end_round();
        }
    }

    fn end_round(&mut self) {
        self.round.active = false;
        self.opponent.stop();
        self.scheduler.cancel(DeferredAction::ResumeOpponent);
        self.push(GameEvent::RoundEnded {
            stage: self.round.stage,
            player_score: self.round.player_score,
            opponent_score: self.round.opponent_score,
        });
        log::info!(
            "Round over: stage {}, player {} - opponent {}",
            self.round.stage,
            self.round.player_score,
            self.round.opponent_score
        );
    }

    /// Player taps an ingredient. Unconstrained: nothing is validated until
    /// the serve.
    pub fn append_ingredient(&mut self, ingredient: Ingredient) {
        if !self.round.active {
            return;
        }
        self.tray.push(ingredient);
    }

    /// Player serves the tray against the head order.
    ///
    /// Success requires an exact stack match. Either way the tray ends empty.
    /// The head order is never mutated by the comparison.
    pub fn serve(&mut self) {
        if !self.round.active {
            return;
        }

        let matched = match self.queues.peek_head(Lane::Player) {
            Some(head) => self.tray.matches(&head.order),
            // No pending order to serve against; quietly drop the tray
            None => {
                self.tray.clear();
                return;
            }
        };

        if matched {
            if let Some(ticket) = self.queues.dequeue_head(Lane::Player) {
                self.round.player_score += 1;
                self.push(GameEvent::ServeSuccess { ticket: ticket.id });
                self.roll_sabotage();
            }
        } else {
            self.push(GameEvent::ServeFailed);
        }

        self.tray.clear();
    }

    /// Player dumps the tray without serving.
    pub fn dump(&mut self) {
        if !self.round.active {
            return;
        }
        self.tray.clear();
    }

    /// Player swings the hammer: spends a charge and freezes the rival for
    /// the tuned duration. No-op at zero charges.
    pub fn use_hammer(&mut self) {
        if !self.round.active || self.round.hammer_charges == 0 {
            return;
        }
        self.round.hammer_charges -= 1;
        self.push(GameEvent::HammerUsed);

        if self.opponent.pause() {
            self.scheduler
                .schedule(self.tuning.hammer_pause_secs, DeferredAction::ResumeOpponent);
            self.push(GameEvent::OpponentPaused);
        }
    }

    /// One rival cadence step, fired by the shell at a rate derived from
    /// [`Opponent::speed`]. Returns the grabbed ingredient for display.
    pub fn opponent_step(&mut self) -> Option<Ingredient> {
        if !self.round.active {
            return None;
        }

        let grab = self.opponent.grab_next(&mut self.queues);
        if let Some(ticket) = grab.served {
            self.round.opponent_score += 1;
            self.push(GameEvent::OpponentServed { ticket });

            if self.round.opponent_score.is_multiple_of(3) {
                self.push(GameEvent::TauntMilestone);
                // The cackle replaces the next periodic taunt
                self.round.taunt_timer = self.tuning.taunt_period_secs;
            }
        }
        grab.ingredient
    }

    /// Roll the rubber-band after a player score. Fires only while the rival
    /// is strictly behind and a charge remains.
    fn roll_sabotage(&mut self) {
        let fired = self.sabotage.try_fire(
            self.round.player_score,
            self.round.opponent_score,
            self.tuning.sabotage_odds,
            &mut self.rng,
        );
        if fired {
            if let Some(ticket) = self.queues.hide_head(Lane::Player) {
                self.push(GameEvent::Sabotaged { ticket });
            }
        }
    }

    /// Current round state.
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// True while a round is running.
    pub fn is_active(&self) -> bool {
        self.round.active
    }

    /// The player's tray.
    pub fn tray(&self) -> &Tray {
        &self.tray
    }

    /// Both order lanes.
    pub fn queues(&self) -> &OrderQueues {
        &self.queues
    }

    /// The rival's state.
    pub fn opponent(&self) -> &Opponent {
        &self.opponent
    }

    /// Highest stage reached so far this session (monotonic).
    pub fn best_stage(&self) -> u32 {
        self.best_stage
    }

    /// The run seed, for reproducing a session.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The active tuning.
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}

//! Deterministic contest core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Mutation only inside tick/command/cadence calls, never spontaneously
//! - Seeded RNG only
//! - Stable ticket identities for display mapping
//! - No rendering, audio, or platform dependencies

pub mod opponent;
pub mod order;
pub mod queue;
pub mod sabotage;
pub mod session;
pub mod timer;
pub mod tray;

pub use opponent::{Grab, Opponent, OpponentPhase};
pub use order::{FILLINGS, Ingredient, MAX_FILLINGS, Order, generate_order};
pub use queue::{Lane, OrderQueues, OrderTicket, TicketId};
pub use sabotage::Sabotage;
pub use session::{GameEvent, GameSession, RoundState};
pub use timer::{DeferredAction, Scheduler};
pub use tray::Tray;

//! Twin order lanes
//!
//! Both contestants work through the same sequence of orders, but each lane
//! owns its tickets outright: dequeuing or marking one side never touches the
//! other. Tickets carry stable ids so a presentation layer can map them to
//! visuals without back-references into the sim.

use std::collections::VecDeque;

use rand::Rng;

use super::order::{Order, generate_order};

/// Stable identity of one ticket, unique across both lanes in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TicketId(pub u32);

/// Which contestant's queue to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    Player,
    Opponent,
}

/// One pending order in a lane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTicket {
    /// Stable identity for event payloads and display mapping
    pub id: TicketId,
    /// The required stack
    pub order: Order,
    /// Display hint set by sabotage; matching ignores it
    pub hidden: bool,
}

/// The two FIFO lanes of pending orders.
#[derive(Debug, Default, Clone)]
pub struct OrderQueues {
    player: VecDeque<OrderTicket>,
    opponent: VecDeque<OrderTicket>,
    next_id: u32,
}

impl OrderQueues {
    /// Create empty lanes.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_ticket_id(&mut self) -> TicketId {
        let id = self.next_id;
        self.next_id += 1;
        TicketId(id)
    }

    /// Discard both lanes and load a fresh batch for a stage.
    ///
    /// Each generated order lands once in each lane, same relative position,
    /// as independently owned twin tickets.
    pub fn refill(&mut self, stage: u32, batch_size: usize, rng: &mut impl Rng) {
        self.player.clear();
        self.opponent.clear();

        for _ in 0..batch_size {
            let order = generate_order(stage, rng);

            let player_id = self.next_ticket_id();
            self.player.push_back(OrderTicket {
                id: player_id,
                order: order.clone(),
                hidden: false,
            });

            let opponent_id = self.next_ticket_id();
            self.opponent.push_back(OrderTicket {
                id: opponent_id,
                order,
                hidden: false,
            });
        }
    }

    fn lane(&self, lane: Lane) -> &VecDeque<OrderTicket> {
        match lane {
            Lane::Player => &self.player,
            Lane::Opponent => &self.opponent,
        }
    }

    fn lane_mut(&mut self, lane: Lane) -> &mut VecDeque<OrderTicket> {
        match lane {
            Lane::Player => &mut self.player,
            Lane::Opponent => &mut self.opponent,
        }
    }

    /// Current head ticket of a lane, if any.
    pub fn peek_head(&self, lane: Lane) -> Option<&OrderTicket> {
        self.lane(lane).front()
    }

    /// Remove and return the head ticket of a lane.
    pub fn dequeue_head(&mut self, lane: Lane) -> Option<OrderTicket> {
        self.lane_mut(lane).pop_front()
    }

    /// Mark a lane's head ticket hidden. Returns its id when one exists.
    pub fn hide_head(&mut self, lane: Lane) -> Option<TicketId> {
        let head = self.lane_mut(lane).front_mut()?;
        head.hidden = true;
        Some(head.id)
    }

    /// Pending tickets in a lane.
    pub fn len(&self, lane: Lane) -> usize {
        self.lane(lane).len()
    }

    /// True when a lane has no pending tickets.
    pub fn is_empty(&self, lane: Lane) -> bool {
        self.lane(lane).is_empty()
    }

    /// Iterate a lane front to back (for display).
    pub fn iter(&self, lane: Lane) -> impl Iterator<Item = &OrderTicket> {
        self.lane(lane).iter()
    }
}

//! Orders and their generation
//!
//! An order is the target stack a lane head represents: bread on the outside,
//! stage-scaled fillings inside. Orders are immutable once generated.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One slot in a burger stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ingredient {
    BottomBread,
    Tomato,
    Cabbage,
    Cheese,
    Patty,
    TopBread,
}

impl Ingredient {
    /// True for the four interior ingredients (everything but the breads).
    pub fn is_filling(self) -> bool {
        !matches!(self, Ingredient::BottomBread | Ingredient::TopBread)
    }
}

/// The interior palette orders draw from.
pub const FILLINGS: [Ingredient; 4] = [
    Ingredient::Tomato,
    Ingredient::Cabbage,
    Ingredient::Cheese,
    Ingredient::Patty,
];

/// Most fillings a single order can hold (total stack tops out at 7).
pub const MAX_FILLINGS: usize = 5;

/// A required bottom-to-top ingredient stack. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    stack: Vec<Ingredient>,
}

impl Order {
    /// Wrap a finished stack.
    ///
    /// The stack must already satisfy the order shape: bottom bread first,
    /// top bread last, 1..=5 fillings between. A malformed stack is an
    /// upstream defect, not recoverable input.
    pub fn new(stack: Vec<Ingredient>) -> Self {
        debug_assert!(
            stack.first() == Some(&Ingredient::BottomBread)
                && stack.last() == Some(&Ingredient::TopBread)
                && (1..=MAX_FILLINGS).contains(&(stack.len() - 2))
                && stack[1..stack.len() - 1].iter().all(|i| i.is_filling()),
            "malformed order stack: {stack:?}"
        );
        Self { stack }
    }

    /// The required stack, bottom to top.
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.stack
    }

    /// Total stack height including both breads.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Orders are never empty by construction.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

/// Generate one random order for a stage.
///
/// Filling count is drawn uniformly from `[stage + 1, stage + 3)` and capped
/// at [`MAX_FILLINGS`], so later stages ask for taller burgers until the cap.
pub fn generate_order(stage: u32, rng: &mut impl Rng) -> Order {
    let lo = stage as usize + 1;
    let filling_count = rng.random_range(lo..lo + 2).min(MAX_FILLINGS);

    let mut stack = Vec::with_capacity(filling_count + 2);
    stack.push(Ingredient::BottomBread);
    for _ in 0..filling_count {
        stack.push(FILLINGS[rng.random_range(0..FILLINGS.len())]);
    }
    stack.push(Ingredient::TopBread);

    Order::new(stack)
}

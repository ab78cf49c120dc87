//! The build tray
//!
//! What a contestant has stacked so far. Append-only until cleared; every
//! serve attempt ends with the tray emptied, win or lose.

use super::order::{Ingredient, Order};

/// In-progress ingredient stack.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tray {
    stack: Vec<Ingredient>,
}

impl Tray {
    /// Empty tray.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack one more ingredient on top. Always succeeds; nothing is
    /// validated against any order until a serve.
    pub fn push(&mut self, ingredient: Ingredient) {
        self.stack.push(ingredient);
    }

    /// Dump everything off the tray.
    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// Current stack, bottom to top.
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.stack
    }

    /// Stack height.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// True when nothing has been stacked.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Exact match against an order: same ingredients, same positions, same
    /// height. A pure comparison; neither side is mutated.
    pub fn matches(&self, order: &Order) -> bool {
        self.stack == order.ingredients()
    }
}

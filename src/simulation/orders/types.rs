//! Order data model
//!
//! A customer order is a set of product lines with a deadline. Progress,
//! quality, and remaining time are derived from the stored fields on each
//! query rather than stored as counters that could drift.

use serde::{Deserialize, Serialize};

use crate::simulation::types::{CustomerKind, OrderId, OrderState, ProductId};

/// One (product, quantity) requirement within an order
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderLine {
    pub product: ProductId,
    /// Units the customer wants
    pub quantity: u32,
    /// Units built so far; never exceeds `quantity`
    pub produced: u32,
}

impl OrderLine {
    pub fn new(product: ProductId, quantity: u32) -> Self {
        OrderLine {
            product,
            quantity,
            produced: 0,
        }
    }

    pub fn is_filled(&self) -> bool {
        self.produced >= self.quantity
    }
}

/// A customer's request for crafted products within a deadline
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: CustomerKind,
    /// Line order is display order only
    pub lines: Vec<OrderLine>,
    /// Fixed at creation, already scaled by the customer archetype
    pub deadline_seconds: f32,
    /// Position in the board's fixed slot roster
    pub slot_index: usize,
    /// Simulation time at acceptance; unset while the order is offered
    pub accepted_at: Option<f32>,
    pub is_completed: bool,
    pub is_failed: bool,
    pub is_ready_for_delivery: bool,
    /// Defective units accumulated across all lines
    pub defect_count: u32,
    /// Filled at settlement for display; zero until then
    pub gold_reward: i32,
    /// Filled at settlement for display; zero until then
    pub xp_reward: i32,
}

impl Order {
    pub fn new(id: OrderId, customer: CustomerKind, slot_index: usize) -> Self {
        Order {
            id,
            customer,
            lines: Vec::new(),
            deadline_seconds: 0.0,
            slot_index,
            accepted_at: None,
            is_completed: false,
            is_failed: false,
            is_ready_for_delivery: false,
            defect_count: 0,
            gold_reward: 0,
            xp_reward: 0,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted_at.is_some()
    }

    /// Sum of required quantities across all lines
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of produced counters across all lines
    pub fn total_produced(&self) -> u32 {
        self.lines.iter().map(|line| line.produced).sum()
    }

    /// Quality score on a 0-3 star scale; each defect costs half a star
    pub fn stars(&self) -> f32 {
        (3.0 - 0.5 * self.defect_count as f32).clamp(0.0, 3.0)
    }

    /// Seconds left before the deadline, recomputed from the acceptance
    /// timestamp; zero for orders that are not accepted or already resolved
    pub fn remaining_seconds(&self, now: f32) -> f32 {
        let accepted_at = match self.accepted_at {
            Some(t) if !self.is_completed && !self.is_failed => t,
            _ => return 0.0,
        };
        let elapsed = now - accepted_at;
        (self.deadline_seconds - elapsed).max(0.0)
    }

    /// Effective lifecycle state; the flags never contradict because all
    /// transitions go through the order board
    pub fn state(&self) -> OrderState {
        if self.is_completed {
            OrderState::Completed
        } else if self.is_failed {
            OrderState::Failed
        } else if !self.is_accepted() {
            OrderState::Offered
        } else if self.is_ready_for_delivery {
            OrderState::ReadyForDelivery
        } else {
            OrderState::InProgress
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_line_order() -> Order {
        let mut order = Order::new(OrderId(1), CustomerKind::Casual, 0);
        order.lines.push(OrderLine::new(ProductId(0), 2));
        order.lines.push(OrderLine::new(ProductId(1), 3));
        order
    }

    #[test]
    fn test_totals() {
        let mut order = two_line_order();
        assert_eq!(order.total_quantity(), 5);
        assert_eq!(order.total_produced(), 0);

        order.lines[0].produced = 2;
        order.lines[1].produced = 1;
        assert_eq!(order.total_produced(), 3);
    }

    #[test]
    fn test_stars_clamped() {
        let mut order = two_line_order();
        assert_eq!(order.stars(), 3.0);

        order.defect_count = 2;
        assert_eq!(order.stars(), 2.0);

        order.defect_count = 10;
        assert_eq!(order.stars(), 0.0);
    }

    #[test]
    fn test_remaining_seconds() {
        let mut order = two_line_order();
        order.deadline_seconds = 100.0;

        // Not accepted yet
        assert_eq!(order.remaining_seconds(50.0), 0.0);

        order.accepted_at = Some(10.0);
        assert_eq!(order.remaining_seconds(60.0), 50.0);
        assert_eq!(order.remaining_seconds(200.0), 0.0);

        order.is_failed = true;
        assert_eq!(order.remaining_seconds(60.0), 0.0);
    }

    #[test]
    fn test_state_progression() {
        let mut order = two_line_order();
        assert_eq!(order.state(), OrderState::Offered);

        order.accepted_at = Some(0.0);
        assert_eq!(order.state(), OrderState::InProgress);

        order.is_ready_for_delivery = true;
        assert_eq!(order.state(), OrderState::ReadyForDelivery);

        order.is_completed = true;
        assert_eq!(order.state(), OrderState::Completed);
    }
}

//! Core types for the workshop economy simulation

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a customer order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Order#{}", self.0)
    }
}

/// Unique identifier for a product the workshop can craft
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Product#{}", self.0)
    }
}

/// Unique identifier for a production machine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MachineId(pub u32);

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Machine#{}", self.0)
    }
}

/// Customer archetypes
///
/// Each archetype carries its own tuning: how patient the customer is,
/// how many lines an order has, and how much of each product they want.
/// Settlement bonuses keyed on the archetype live in the rewards module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerKind {
    /// Wants it fast, pays extra for it
    Rush,
    /// Average order, rewards flawless work
    Perfectionist,
    /// Small orders, relaxed deadlines, no bonus
    Casual,
    /// Large orders with generous deadlines
    Bulk,
}

impl CustomerKind {
    /// Get all customer archetypes
    pub fn all() -> &'static [CustomerKind] {
        &[
            CustomerKind::Rush,
            CustomerKind::Perfectionist,
            CustomerKind::Casual,
            CustomerKind::Bulk,
        ]
    }

    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            CustomerKind::Rush => "Rush",
            CustomerKind::Perfectionist => "Perfectionist",
            CustomerKind::Casual => "Casual",
            CustomerKind::Bulk => "Bulk",
        }
    }

    /// Deadline multiplier applied after the complexity mapping
    pub fn time_multiplier(&self) -> f32 {
        match self {
            CustomerKind::Rush => 0.7,
            CustomerKind::Casual => 0.9,
            CustomerKind::Bulk => 1.2,
            CustomerKind::Perfectionist => 1.0,
        }
    }

    /// Inclusive range of lines per order for this archetype
    pub fn line_count_range(&self) -> (u32, u32) {
        match self {
            CustomerKind::Casual => (1, 2),
            CustomerKind::Bulk => (2, 3),
            _ => (1, 3),
        }
    }

    /// Inclusive range of quantity per line for this archetype
    pub fn quantity_range(&self) -> (u32, u32) {
        match self {
            CustomerKind::Casual => (1, 2),
            CustomerKind::Bulk => (2, 5),
            CustomerKind::Rush | CustomerKind::Perfectionist => (1, 4),
        }
    }

    /// Pick a random archetype
    pub fn random<R: Rng>(rng: &mut R) -> CustomerKind {
        let all = CustomerKind::all();
        all[rng.gen_range(0..all.len())]
    }
}

/// Effective lifecycle state of an order
///
/// Derived from the order's flags; an order is in exactly one of these
/// states at any time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderState {
    /// On the board, awaiting accept or decline
    Offered,
    /// Accepted, production still outstanding
    InProgress,
    /// All lines filled, awaiting delivery
    ReadyForDelivery,
    /// Delivered and settled
    Completed,
    /// Deadline elapsed before delivery
    Failed,
}

impl OrderState {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            OrderState::Offered => "Offered",
            OrderState::InProgress => "InProgress",
            OrderState::ReadyForDelivery => "ReadyForDelivery",
            OrderState::Completed => "Completed",
            OrderState::Failed => "Failed",
        }
    }

    /// Completed and failed orders are removed from the board immediately
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderState::Completed | OrderState::Failed)
    }
}

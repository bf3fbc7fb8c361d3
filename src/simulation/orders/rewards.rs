//! Reward settlement for delivered orders
//!
//! Pure functions mapping a finished order to gold, experience, and a star
//! rating. Archetype bonuses are keyed lookups applied after the base
//! computation, not folded into the base formula.

use serde::{Deserialize, Serialize};

use crate::simulation::orders::types::Order;
use crate::simulation::params::SimulationParams;
use crate::simulation::types::CustomerKind;

/// Result of settling one delivered order
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RewardOutcome {
    pub gold: i32,
    pub xp: i32,
    pub stars: f32,
}

/// Settle a delivered order into gold, experience, and a star rating
pub fn settle(order: &Order, params: &SimulationParams) -> RewardOutcome {
    let total_quantity = order.total_quantity();
    let stars = order.stars();
    let star_factor = stars / 3.0;

    let base_pay = params.pay_per_item * total_quantity as f32;
    let mut pay = base_pay * star_factor;

    let xp_factor = (1.0 - 0.1 * order.defect_count as f32).max(0.0);
    let mut xp = params.base_xp_per_order as f32 * xp_factor;

    match order.customer {
        CustomerKind::Rush => {
            pay *= 1.2;
        }
        CustomerKind::Perfectionist => {
            if stars >= 3.0 {
                pay *= 1.4;
            }
        }
        CustomerKind::Casual => {}
        CustomerKind::Bulk => {
            if total_quantity >= 5 && stars >= 3.0 {
                pay *= 1.5;
                xp += 25.0;
            }
        }
    }

    RewardOutcome {
        gold: pay.round() as i32,
        xp: xp.round() as i32,
        stars,
    }
}

/// Pre-acceptance payout estimate: base pay only, no quality or bonus
pub fn estimate_gold(order: &Order, params: &SimulationParams) -> i32 {
    (params.pay_per_item * order.total_quantity() as f32).round() as i32
}

//! Order generation from customer archetypes
//!
//! Produces a fresh order for a board slot. Generation never fails: a
//! degenerate draw falls back to a single unit of the default product so
//! every order stays deliverable in principle.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::simulation::orders::types::{Order, OrderLine};
use crate::simulation::params::SimulationParams;
use crate::simulation::types::{CustomerKind, OrderId, ProductId};

/// Random picks attempted before giving up on line-product variety
const PRODUCT_PICK_ATTEMPTS: usize = 8;

/// Generates candidate orders for board slots
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderCatalog {
    products: Vec<ProductId>,
    /// When set, every line uses this product (tutorial-style boards)
    fixed_product: Option<ProductId>,
    next_id: u64,
}

impl OrderCatalog {
    pub fn new(products: Vec<ProductId>) -> Self {
        OrderCatalog {
            products,
            fixed_product: None,
            next_id: 0,
        }
    }

    pub fn with_fixed_product(products: Vec<ProductId>, fixed: ProductId) -> Self {
        let mut catalog = OrderCatalog::new(products);
        catalog.fixed_product = Some(fixed);
        catalog
    }

    /// Generate a new order for the given slot
    pub fn generate<R: Rng>(
        &mut self,
        kind: CustomerKind,
        slot_index: usize,
        params: &SimulationParams,
        rng: &mut R,
    ) -> Order {
        let id = OrderId(self.next_id);
        self.next_id += 1;

        let mut order = Order::new(id, kind, slot_index);

        let (min_lines, max_lines) = kind.line_count_range();
        let line_count = rng
            .gen_range(min_lines..=max_lines)
            .clamp(params.min_lines_per_order, params.max_lines_per_order);

        let mut used = HashSet::new();

        for _ in 0..line_count {
            let product = match self.fixed_product {
                Some(p) => Some(p),
                None => self.pick_product(&used, rng),
            };
            let product = match product {
                Some(p) => p,
                None => break,
            };
            used.insert(product);

            let (min_qty, max_qty) = kind.quantity_range();
            let quantity = rng
                .gen_range(min_qty..=max_qty)
                .clamp(params.min_quantity_per_line, params.max_quantity_per_line)
                .max(1);

            order.lines.push(OrderLine::new(product, quantity));
        }

        // Empty product draws must not produce an undeliverable order
        if order.total_quantity() == 0 {
            if let Some(fallback) = self.products.first().copied() {
                order.lines.push(OrderLine::new(fallback, 1));
            }
        }

        order.deadline_seconds = deadline_seconds(order.total_quantity(), kind, params);
        order
    }

    /// Pick a product, preferring ones not yet used in this order
    fn pick_product<R: Rng>(&self, used: &HashSet<ProductId>, rng: &mut R) -> Option<ProductId> {
        if self.products.is_empty() {
            return None;
        }

        if used.len() < self.products.len() {
            for _ in 0..PRODUCT_PICK_ATTEMPTS {
                let candidate = self.products[rng.gen_range(0..self.products.len())];
                if !used.contains(&candidate) {
                    return Some(candidate);
                }
            }
        }

        Some(self.products[rng.gen_range(0..self.products.len())])
    }
}

/// Map order size onto a deadline, scaled by the customer archetype
///
/// Total quantity is clamped to the configured complexity range, mapped
/// linearly onto [min_order_seconds, max_order_seconds], multiplied by the
/// archetype, then re-clamped so rush multipliers stay within sane bounds.
fn deadline_seconds(total_quantity: u32, kind: CustomerKind, params: &SimulationParams) -> f32 {
    let total = total_quantity.max(1);
    let complexity = total.clamp(params.min_complexity, params.max_complexity);

    let t = if params.max_complexity > params.min_complexity {
        (complexity - params.min_complexity) as f32
            / (params.max_complexity - params.min_complexity) as f32
    } else {
        0.0
    };

    let seconds = params.min_order_seconds + (params.max_order_seconds - params.min_order_seconds) * t;
    let seconds = seconds * kind.time_multiplier();
    seconds.clamp(params.min_order_seconds, params.max_order_seconds)
}

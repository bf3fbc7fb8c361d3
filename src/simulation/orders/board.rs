//! Order board state and lifecycle transitions
//!
//! Owns two disjoint pools: `offered` (one order per customer slot,
//! awaiting accept or decline) and `active` (accepted orders in progress or
//! ready for delivery). Every transition runs through here so the order
//! flags can never contradict, and every vacated slot is refilled with a
//! freshly generated order before the call returns.
//!
//! All mutating operations are defensive no-ops when called on an order
//! that is not in the required pool or state; double-taps and stale
//! references from a UI layer must never corrupt slot bookkeeping.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::simulation::ledger::Ledger;
use crate::simulation::orders::catalog::OrderCatalog;
use crate::simulation::orders::rewards::{self, RewardOutcome};
use crate::simulation::orders::types::Order;
use crate::simulation::params::SimulationParams;
use crate::simulation::types::{CustomerKind, OrderId, ProductId};

/// A change emitted by the board
///
/// The host drains these each tick with [`OrderBoard::take_events`] and
/// re-queries the pools; events identify what changed, they do not carry
/// the pools themselves.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum BoardEvent {
    Offered {
        id: OrderId,
        slot: usize,
        customer: CustomerKind,
    },
    Accepted {
        id: OrderId,
    },
    Declined {
        id: OrderId,
    },
    Progress {
        id: OrderId,
        product: ProductId,
    },
    ReadyForDelivery {
        id: OrderId,
    },
    Delivered {
        id: OrderId,
        gold: i32,
        xp: i32,
        stars: f32,
    },
    Failed {
        id: OrderId,
    },
}

/// Counters tracked across the board's lifetime
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BoardStats {
    pub orders_generated: u32,
    pub orders_accepted: u32,
    pub orders_declined: u32,
    pub orders_delivered: u32,
    pub orders_failed: u32,
    pub gold_earned: i64,
    pub xp_earned: i64,
    pub gold_lost: i64,
    pub xp_lost: i64,
}

/// The job board: offered and active order pools
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderBoard {
    catalog: OrderCatalog,
    offered: Vec<Order>,
    active: Vec<Order>,
    events: Vec<BoardEvent>,
    pub stats: BoardStats,
}

impl OrderBoard {
    /// Create a board with every slot filled
    pub fn new<R: Rng>(catalog: OrderCatalog, params: &SimulationParams, rng: &mut R) -> Self {
        let mut board = OrderBoard {
            catalog,
            offered: Vec::with_capacity(params.customer_slots),
            active: Vec::new(),
            events: Vec::new(),
            stats: BoardStats::default(),
        };

        for slot in 0..params.customer_slots {
            board.fill_slot(slot, params, rng);
        }

        board
    }

    /// Orders awaiting accept or decline, one per free slot
    pub fn offered(&self) -> &[Order] {
        &self.offered
    }

    /// Accepted orders, in progress or ready for delivery
    pub fn active(&self) -> &[Order] {
        &self.active
    }

    /// Look up an order in either pool
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.offered
            .iter()
            .chain(self.active.iter())
            .find(|o| o.id == id)
    }

    /// Drain the change events accumulated since the last call
    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    /// Move an offered order into the active pool
    ///
    /// No-op unless the order is currently offered. The vacated offered
    /// slot is not refilled; the accepted order keeps holding it until it
    /// resolves.
    pub fn accept(&mut self, id: OrderId, now: f32) -> bool {
        let pos = match self.offered.iter().position(|o| o.id == id) {
            Some(pos) => pos,
            None => return false,
        };
        if self.offered[pos].is_accepted() {
            return false;
        }

        let mut order = self.offered.remove(pos);
        order.accepted_at = Some(now);
        self.active.push(order);

        self.stats.orders_accepted += 1;
        self.events.push(BoardEvent::Accepted { id });
        true
    }

    /// Remove an offered order and refill its slot
    ///
    /// Declining costs nothing; only letting an accepted order expire is
    /// penalized.
    pub fn decline<R: Rng>(
        &mut self,
        id: OrderId,
        params: &SimulationParams,
        rng: &mut R,
    ) -> bool {
        let pos = match self.offered.iter().position(|o| o.id == id) {
            Some(pos) => pos,
            None => return false,
        };

        let slot = self.offered[pos].slot_index;
        self.offered.remove(pos);

        self.stats.orders_declined += 1;
        self.events.push(BoardEvent::Declined { id });
        self.fill_slot(slot, params, rng);
        true
    }

    /// Record one finished unit against the active pool
    ///
    /// First-match-wins: the scan walks active orders in pool order and
    /// credits the first unfilled line for this product, so an order never
    /// steals a unit meant for an earlier one. Unmatched reports are
    /// silently discarded; overproduction is not an error.
    pub fn report_product_built(&mut self, product: ProductId, defective: bool) -> bool {
        for order in self.active.iter_mut() {
            if order.state().is_terminal() {
                continue;
            }

            let line = order
                .lines
                .iter_mut()
                .find(|line| line.product == product && !line.is_filled());
            let line = match line {
                Some(line) => line,
                None => continue,
            };

            line.produced += 1;
            if defective {
                order.defect_count += 1;
            }

            let id = order.id;
            self.events.push(BoardEvent::Progress { id, product });
            if order.total_produced() >= order.total_quantity() {
                order.is_ready_for_delivery = true;
                self.events.push(BoardEvent::ReadyForDelivery { id });
            }
            return true;
        }

        false
    }

    /// Deliver a ready order: settle the reward, credit the ledger,
    /// remove the order, refill its slot
    ///
    /// No-op unless the order is active and ready for delivery.
    pub fn deliver<R: Rng>(
        &mut self,
        id: OrderId,
        params: &SimulationParams,
        ledger: &mut Ledger,
        rng: &mut R,
    ) -> Option<RewardOutcome> {
        let pos = self.active.iter().position(|o| o.id == id)?;
        {
            let order = &self.active[pos];
            if order.is_completed || order.is_failed || !order.is_ready_for_delivery {
                return None;
            }
        }

        let outcome = rewards::settle(&self.active[pos], params);

        let order = &mut self.active[pos];
        order.is_completed = true;
        order.gold_reward = outcome.gold;
        order.xp_reward = outcome.xp;

        if outcome.gold > 0 {
            ledger.add_gold(outcome.gold as f32);
        }
        if outcome.xp > 0 {
            ledger.add_xp(outcome.xp);
        }

        let slot = order.slot_index;
        self.active.remove(pos);

        self.stats.orders_delivered += 1;
        self.stats.gold_earned += outcome.gold as i64;
        self.stats.xp_earned += outcome.xp as i64;
        self.events.push(BoardEvent::Delivered {
            id,
            gold: outcome.gold,
            xp: outcome.xp,
            stars: outcome.stars,
        });

        self.fill_slot(slot, params, rng);
        Some(outcome)
    }

    /// Fail every overdue order: apply the fixed penalty, remove it,
    /// refill its slot
    ///
    /// Must run every tick; deadlines are clock-driven, not UI-driven.
    /// Returns the number of orders failed this sweep.
    pub fn sweep_deadlines<R: Rng>(
        &mut self,
        now: f32,
        params: &SimulationParams,
        ledger: &mut Ledger,
        rng: &mut R,
    ) -> u32 {
        let overdue: Vec<OrderId> = self
            .active
            .iter()
            .filter(|o| {
                !o.is_completed && !o.is_failed && o.is_accepted() && o.remaining_seconds(now) <= 0.0
            })
            .map(|o| o.id)
            .collect();

        let mut failed = 0;
        for id in overdue {
            let pos = match self.active.iter().position(|o| o.id == id) {
                Some(pos) => pos,
                None => continue,
            };

            let order = &mut self.active[pos];
            order.is_failed = true;
            let slot = order.slot_index;
            self.active.remove(pos);

            ledger.add_gold(-params.fail_gold_penalty);
            ledger.add_xp(-params.fail_xp_penalty);

            self.stats.orders_failed += 1;
            self.stats.gold_lost += params.fail_gold_penalty.round() as i64;
            self.stats.xp_lost += params.fail_xp_penalty as i64;
            self.events.push(BoardEvent::Failed { id });

            self.fill_slot(slot, params, rng);
            failed += 1;
        }

        failed
    }

    /// Generate a fresh order of a random archetype into a slot
    fn fill_slot<R: Rng>(&mut self, slot: usize, params: &SimulationParams, rng: &mut R) {
        let kind = CustomerKind::random(rng);
        let order = self.catalog.generate(kind, slot, params, rng);

        self.stats.orders_generated += 1;
        self.events.push(BoardEvent::Offered {
            id: order.id,
            slot,
            customer: kind,
        });
        self.offered.push(order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::types::OrderState;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn test_board(rng: &mut ChaCha8Rng) -> (OrderBoard, SimulationParams) {
        let params = SimulationParams::default();
        let products: Vec<ProductId> = (0..8).map(ProductId).collect();
        let board = OrderBoard::new(OrderCatalog::new(products), &params, rng);
        (board, params)
    }

    /// Every unit every line of an order needs, reported as built
    fn fulfill(board: &mut OrderBoard, id: OrderId) {
        let lines: Vec<(ProductId, u32)> = board
            .get(id)
            .unwrap()
            .lines
            .iter()
            .map(|l| (l.product, l.quantity - l.produced))
            .collect();
        for (product, missing) in lines {
            for _ in 0..missing {
                board.report_product_built(product, false);
            }
        }
    }

    fn assert_slot_partition(board: &OrderBoard, slots: usize) {
        let mut seen = HashSet::new();
        for order in board.offered().iter().chain(board.active().iter()) {
            assert!(order.slot_index < slots);
            assert!(seen.insert(order.slot_index), "slot used twice");
        }
        assert_eq!(seen.len(), slots);
    }

    #[test]
    fn test_board_starts_full() {
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let (board, params) = test_board(&mut rng);

        assert_eq!(board.offered().len(), params.customer_slots);
        assert!(board.active().is_empty());
        assert_slot_partition(&board, params.customer_slots);
    }

    #[test]
    fn test_accept_moves_without_refill() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let (mut board, params) = test_board(&mut rng);

        let id = board.offered()[0].id;
        assert!(board.accept(id, 5.0));

        assert_eq!(board.offered().len(), params.customer_slots - 1);
        assert_eq!(board.active().len(), 1);
        assert_eq!(board.get(id).unwrap().state(), OrderState::InProgress);
        assert_eq!(board.get(id).unwrap().accepted_at, Some(5.0));
        assert_slot_partition(&board, params.customer_slots);
    }

    #[test]
    fn test_accept_is_idempotent() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let (mut board, _params) = test_board(&mut rng);

        let id = board.offered()[0].id;
        assert!(board.accept(id, 0.0));
        assert!(!board.accept(id, 1.0));

        assert_eq!(board.active().len(), 1);
        assert_eq!(board.get(id).unwrap().accepted_at, Some(0.0));
    }

    #[test]
    fn test_decline_refills_same_slot() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let (mut board, params) = test_board(&mut rng);

        let id = board.offered()[1].id;
        let slot = board.offered()[1].slot_index;
        assert!(board.decline(id, &params, &mut rng));

        assert!(board.get(id).is_none());
        assert_eq!(board.offered().len(), params.customer_slots);
        assert!(board.offered().iter().any(|o| o.slot_index == slot));
        assert_slot_partition(&board, params.customer_slots);

        // Declining again is a no-op
        assert!(!board.decline(id, &params, &mut rng));
    }

    #[test]
    fn test_round_trip_delivery() {
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let (mut board, params) = test_board(&mut rng);
        let mut ledger = Ledger::new(0.0, 0);

        let id = board.offered()[0].id;
        board.accept(id, 0.0);

        // Not ready yet: deliver must refuse
        assert!(board.deliver(id, &params, &mut ledger, &mut rng).is_none());

        fulfill(&mut board, id);
        assert_eq!(
            board.get(id).unwrap().state(),
            OrderState::ReadyForDelivery
        );

        let outcome = board.deliver(id, &params, &mut ledger, &mut rng).unwrap();
        assert!(outcome.gold > 0);
        assert_eq!(ledger.gold(), outcome.gold as f32);
        assert_eq!(ledger.xp(), outcome.xp);

        // Removed, slot refilled, second delivery is a no-op
        assert!(board.get(id).is_none());
        assert!(board.deliver(id, &params, &mut ledger, &mut rng).is_none());
        assert_eq!(board.offered().len(), params.customer_slots);
        assert_slot_partition(&board, params.customer_slots);
    }

    #[test]
    fn test_production_never_overfills() {
        let mut rng = ChaCha8Rng::seed_from_u64(15);
        let (mut board, _params) = test_board(&mut rng);

        let id = board.offered()[0].id;
        board.accept(id, 0.0);

        let product = board.get(id).unwrap().lines[0].product;
        let total = board.get(id).unwrap().total_quantity();

        // Hammer the board with far more reports than required
        for _ in 0..(total * 3 + 10) {
            board.report_product_built(product, false);
        }

        let order = board.get(id).unwrap();
        assert!(order.total_produced() <= order.total_quantity());
        for line in &order.lines {
            assert!(line.produced <= line.quantity);
        }
    }

    #[test]
    fn test_unmatched_report_is_discarded() {
        let mut rng = ChaCha8Rng::seed_from_u64(16);
        let (mut board, _params) = test_board(&mut rng);

        // Nothing accepted: every report misses
        assert!(!board.report_product_built(ProductId(0), false));
        assert!(!board.report_product_built(ProductId(999), true));
        for order in board.offered() {
            assert_eq!(order.total_produced(), 0);
        }
    }

    #[test]
    fn test_first_match_wins_in_pool_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let params = SimulationParams::default();
        // Single product so both accepted orders want the same thing
        let catalog = OrderCatalog::new(vec![ProductId(0)]);
        let mut board = OrderBoard::new(catalog, &params, &mut rng);

        let first = board.offered()[0].id;
        let second = board.offered()[1].id;
        board.accept(first, 0.0);
        board.accept(second, 0.0);

        board.report_product_built(ProductId(0), false);
        assert_eq!(board.get(first).unwrap().total_produced(), 1);
        assert_eq!(board.get(second).unwrap().total_produced(), 0);
    }

    #[test]
    fn test_defects_accumulate_on_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(18);
        let (mut board, _params) = test_board(&mut rng);

        let id = board.offered()[0].id;
        board.accept(id, 0.0);
        let product = board.get(id).unwrap().lines[0].product;

        board.report_product_built(product, true);
        assert_eq!(board.get(id).unwrap().defect_count, 1);
        assert!(board.get(id).unwrap().stars() < 3.0);
    }

    #[test]
    fn test_deadline_sweep_fails_and_penalizes() {
        let mut rng = ChaCha8Rng::seed_from_u64(19);
        let (mut board, params) = test_board(&mut rng);
        let mut ledger = Ledger::new(1000.0, 100);

        let id = board.offered()[0].id;
        board.accept(id, 0.0);
        let deadline = board.get(id).unwrap().deadline_seconds;

        // Before the deadline nothing happens
        assert_eq!(
            board.sweep_deadlines(deadline - 1.0, &params, &mut ledger, &mut rng),
            0
        );
        assert_eq!(ledger.gold(), 1000.0);

        // Past the deadline: failed, penalized, slot refilled
        assert_eq!(
            board.sweep_deadlines(deadline + 0.1, &params, &mut ledger, &mut rng),
            1
        );
        assert!(board.get(id).is_none());
        assert_eq!(ledger.gold(), 1000.0 - params.fail_gold_penalty);
        assert_eq!(ledger.xp(), 100 - params.fail_xp_penalty);
        assert_eq!(board.offered().len(), params.customer_slots);
        assert_slot_partition(&board, params.customer_slots);
        assert_eq!(board.stats.orders_failed, 1);
    }

    #[test]
    fn test_ready_order_still_expires() {
        let mut rng = ChaCha8Rng::seed_from_u64(20);
        let (mut board, params) = test_board(&mut rng);
        let mut ledger = Ledger::new(0.0, 0);

        let id = board.offered()[0].id;
        board.accept(id, 0.0);
        fulfill(&mut board, id);
        let deadline = board.get(id).unwrap().deadline_seconds;

        // The sweep only spares terminal orders; a ready order left
        // undelivered past its deadline still fails.
        let failed = board.sweep_deadlines(deadline + 1.0, &params, &mut ledger, &mut rng);
        assert_eq!(failed, 1);
    }

    #[test]
    fn test_events_cover_lifecycle() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let (mut board, params) = test_board(&mut rng);
        let mut ledger = Ledger::new(0.0, 0);

        // Initial fill emitted one Offered per slot
        let initial = board.take_events();
        assert_eq!(
            initial
                .iter()
                .filter(|e| matches!(e, BoardEvent::Offered { .. }))
                .count(),
            params.customer_slots
        );

        let id = board.offered()[0].id;
        board.accept(id, 0.0);
        fulfill(&mut board, id);
        board.deliver(id, &params, &mut ledger, &mut rng);

        let events = board.take_events();
        assert!(events.iter().any(|e| matches!(e, BoardEvent::Accepted { id: i } if *i == id)));
        assert!(events
            .iter()
            .any(|e| matches!(e, BoardEvent::ReadyForDelivery { id: i } if *i == id)));
        assert!(events
            .iter()
            .any(|e| matches!(e, BoardEvent::Delivered { id: i, .. } if *i == id)));
        // Slot refill after delivery re-offers
        assert!(events.iter().any(|e| matches!(e, BoardEvent::Offered { .. })));

        // Drained: a second take returns nothing
        assert!(board.take_events().is_empty());
    }

    #[test]
    fn test_pool_sizes_stay_partitioned() {
        let mut rng = ChaCha8Rng::seed_from_u64(22);
        let (mut board, params) = test_board(&mut rng);
        let mut ledger = Ledger::new(0.0, 0);

        // Churn through a mix of operations; the slots must always
        // partition exactly across the two pools.
        for round in 0..20 {
            let now = round as f32 * 10.0;
            if let Some(order) = board.offered().first() {
                let id = order.id;
                if round % 3 == 0 {
                    board.decline(id, &params, &mut rng);
                } else {
                    board.accept(id, now);
                }
            }
            if let Some(order) = board.active().first() {
                let id = order.id;
                fulfill(&mut board, id);
                board.deliver(id, &params, &mut ledger, &mut rng);
            }
            board.sweep_deadlines(now, &params, &mut ledger, &mut rng);
            assert_slot_partition(&board, params.customer_slots);
        }
    }
}

//! Main simulation state and tick loop
//!
//! Wires the order board, ledger, machine shop, and activity log together
//! and drives them in a fixed order each tick. The auto-crafting driver in
//! here is the headless stand-in for the player: it accepts orders up to a
//! configured concurrency, keeps the machines fed with whatever units are
//! still missing, and delivers finished orders.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::simulation::activity_log::{ActivityCategory, ActivityLog};
use crate::simulation::ledger::Ledger;
use crate::simulation::orders::{estimate_gold, BoardEvent, OrderBoard, OrderCatalog};
use crate::simulation::params::SimulationParams;
use crate::simulation::products::ProductCatalog;
use crate::simulation::types::OrderId;
use crate::simulation::workshop::MachineShop;

/// Statistics tracked during simulation
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SimulationStats {
    pub items_crafted: u32,
    pub defects_crafted: u32,
    pub peak_gold: f32,
}

/// Main simulation state
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationState {
    /// Current simulation tick
    pub current_tick: u64,
    /// Simulated clock in seconds; deadlines are measured against this
    pub time_seconds: f32,
    /// The goods the workshop sells
    pub products: ProductCatalog,
    /// Offered and active customer orders
    pub board: OrderBoard,
    /// Player gold and experience
    pub ledger: Ledger,
    /// Production machines
    pub shop: MachineShop,
    /// Recent event log
    pub activity: ActivityLog,
    /// Simulation statistics
    pub stats: SimulationStats,
    /// Random seed used
    pub seed: u64,
}

impl SimulationState {
    /// Create a new simulation state with every board slot filled
    pub fn new<R: Rng>(seed: u64, params: &SimulationParams, rng: &mut R) -> Self {
        let products = ProductCatalog::standard();
        let catalog = OrderCatalog::new(products.ids());
        let board = OrderBoard::new(catalog, params, rng);

        let mut state = SimulationState {
            current_tick: 0,
            time_seconds: 0.0,
            products,
            board,
            ledger: Ledger::new(params.starting_gold, params.starting_xp),
            shop: MachineShop::new(params.machine_count, params.seconds_per_item),
            activity: ActivityLog::new(),
            stats: SimulationStats {
                peak_gold: params.starting_gold,
                ..SimulationStats::default()
            },
            seed,
        };

        state.drain_board_events(params);
        state
    }

    /// Run a single simulation tick
    pub fn tick<R: Rng>(&mut self, params: &SimulationParams, rng: &mut R) {
        self.time_seconds += params.seconds_per_tick;
        let now = self.time_seconds;

        // 1. Machines finish units and report them against the board
        for done in self.shop.tick(now) {
            self.stats.items_crafted += 1;
            if done.defective {
                self.stats.defects_crafted += 1;
            }
            self.board.report_product_built(done.product, done.defective);
        }

        // 2. Deliver whatever is ready
        self.deliver_ready(params, rng);

        // 3. Take on new orders
        self.accept_offers(params);

        // 4. Queue the units still missing from accepted orders
        self.plan_production(params, rng);

        // 5. Deadline sweep; runs every tick no matter what
        self.board
            .sweep_deadlines(now, params, &mut self.ledger, rng);

        // 6. Record what changed
        self.drain_board_events(params);

        self.stats.peak_gold = self.stats.peak_gold.max(self.ledger.gold());
        self.current_tick += 1;
    }

    /// Deliver every active order that is ready
    fn deliver_ready<R: Rng>(&mut self, params: &SimulationParams, rng: &mut R) {
        let ready: Vec<OrderId> = self
            .board
            .active()
            .iter()
            .filter(|o| o.is_ready_for_delivery)
            .map(|o| o.id)
            .collect();

        for id in ready {
            self.board.deliver(id, params, &mut self.ledger, rng);
        }
    }

    /// Accept offered orders until the concurrency cap is reached
    fn accept_offers(&mut self, params: &SimulationParams) {
        while self.board.active().len() < params.max_active_orders {
            let id = match self.board.offered().first() {
                Some(order) => order.id,
                None => break,
            };
            if !self.board.accept(id, self.time_seconds) {
                break;
            }
        }
    }

    /// Queue one craft per unit still missing across accepted orders
    ///
    /// Units already queued or on a machine bed count against the need, so
    /// repeated planning never over-produces.
    fn plan_production<R: Rng>(&mut self, params: &SimulationParams, rng: &mut R) {
        for product in self.products.ids() {
            let needed: u32 = self
                .board
                .active()
                .iter()
                .filter(|o| !o.is_completed && !o.is_failed)
                .flat_map(|o| o.lines.iter())
                .filter(|line| line.product == product)
                .map(|line| line.quantity - line.produced)
                .sum();

            let in_flight = self.shop.pending_for(product);
            for _ in in_flight..needed {
                let defective = rng.gen::<f32>() < params.defect_chance;
                if self.shop.enqueue(product, defective).is_none() {
                    return;
                }
            }
        }
    }

    /// Turn board events into activity log entries
    fn drain_board_events(&mut self, params: &SimulationParams) {
        let tick = self.current_tick;
        for event in self.board.take_events() {
            match event {
                BoardEvent::Offered { id, slot, customer } => {
                    let estimate = self
                        .board
                        .get(id)
                        .map(|o| estimate_gold(o, params))
                        .unwrap_or(0);
                    self.activity.log(
                        tick,
                        ActivityCategory::Offer,
                        format!(
                            "{} customer posted {} at slot {} (about {} gold)",
                            customer.name(),
                            id,
                            slot,
                            estimate
                        ),
                        2,
                    );
                }
                BoardEvent::Accepted { id } => {
                    self.activity.log(
                        tick,
                        ActivityCategory::Accept,
                        format!("{} accepted", id),
                        3,
                    );
                }
                BoardEvent::Declined { id } => {
                    self.activity.log(
                        tick,
                        ActivityCategory::Decline,
                        format!("{} declined", id),
                        2,
                    );
                }
                BoardEvent::Progress { id, product } => {
                    self.activity.log(
                        tick,
                        ActivityCategory::Production,
                        format!("Built one {} for {}", self.products.name_of(product), id),
                        1,
                    );
                }
                BoardEvent::ReadyForDelivery { id } => {
                    self.activity.log(
                        tick,
                        ActivityCategory::Production,
                        format!("{} is ready for delivery", id),
                        4,
                    );
                }
                BoardEvent::Delivered { id, gold, xp, stars } => {
                    self.activity.log(
                        tick,
                        ActivityCategory::Delivery,
                        format!("{} delivered for {} gold, {} xp ({:.1} stars)", id, gold, xp, stars),
                        5,
                    );
                }
                BoardEvent::Failed { id } => {
                    self.activity.log(
                        tick,
                        ActivityCategory::Failure,
                        format!("{} missed its deadline", id),
                        8,
                    );
                }
            }
        }
    }
}

/// Run the full simulation
pub fn run_simulation<R: Rng>(
    params: &SimulationParams,
    num_ticks: u64,
    seed: u64,
    rng: &mut R,
) -> SimulationState {
    let mut state = SimulationState::new(seed, params, rng);

    println!(
        "Simulation initialized with {} customer slots and {} machines",
        params.customer_slots, params.machine_count
    );

    for tick in 0..num_ticks {
        state.tick(params, rng);

        // Progress reporting every 100 ticks
        if tick > 0 && tick % 100 == 0 {
            println!(
                "Tick {}: {:.0} gold, {} xp, {} delivered, {} failed",
                tick,
                state.ledger.gold(),
                state.ledger.xp(),
                state.board.stats.orders_delivered,
                state.board.stats.orders_failed
            );
        }
    }

    state
}

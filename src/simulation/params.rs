//! Configuration parameters for the workshop simulation

use serde::{Deserialize, Serialize};

/// Main configuration for the simulation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationParams {
    // Order board
    /// Number of customer slots on the board
    pub customer_slots: usize,
    /// Global minimum lines per order
    pub min_lines_per_order: u32,
    /// Global maximum lines per order
    pub max_lines_per_order: u32,
    /// Global minimum quantity per line
    pub min_quantity_per_line: u32,
    /// Global maximum quantity per line
    pub max_quantity_per_line: u32,

    // Deadlines
    /// Shortest possible deadline in seconds
    pub min_order_seconds: f32,
    /// Longest possible deadline in seconds
    pub max_order_seconds: f32,
    /// Total quantity mapped to the shortest deadline
    pub min_complexity: u32,
    /// Total quantity mapped to the longest deadline
    pub max_complexity: u32,

    // Rewards
    /// Base pay per required item before quality scaling
    pub pay_per_item: f32,
    /// Base experience per delivered order
    pub base_xp_per_order: i32,
    /// Flat gold deduction when a deadline elapses
    pub fail_gold_penalty: f32,
    /// Flat experience deduction when a deadline elapses
    pub fail_xp_penalty: i32,

    // Starting balances
    /// Gold the player starts with
    pub starting_gold: f32,
    /// Experience the player starts with
    pub starting_xp: i32,

    // Workshop
    /// Number of production machines
    pub machine_count: u32,
    /// Crafting time for one item
    pub seconds_per_item: f32,
    /// Chance that a crafted item comes out defective
    pub defect_chance: f32,
    /// How many accepted orders the auto-crafting driver keeps in flight
    pub max_active_orders: usize,

    // Clock
    /// Simulated seconds advanced per tick
    pub seconds_per_tick: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        SimulationParams {
            // Order board
            customer_slots: 3,
            min_lines_per_order: 1,
            max_lines_per_order: 3,
            min_quantity_per_line: 1,
            max_quantity_per_line: 4,

            // Deadlines
            min_order_seconds: 60.0,
            max_order_seconds: 600.0,
            min_complexity: 1,
            max_complexity: 20,

            // Rewards
            pay_per_item: 20.0,
            base_xp_per_order: 50,
            fail_gold_penalty: 50.0,
            fail_xp_penalty: 10,

            // Starting balances
            starting_gold: 5000.0,
            starting_xp: 50,

            // Workshop
            machine_count: 2,
            seconds_per_item: 4.0,
            defect_chance: 0.15,
            max_active_orders: 3,

            // Clock
            seconds_per_tick: 1.0,
        }
    }
}

impl SimulationParams {
    /// Create params for a fast test run
    pub fn fast_test() -> Self {
        let mut params = Self::default();
        params.min_order_seconds = 10.0;
        params.max_order_seconds = 60.0;
        params.seconds_per_item = 1.0;
        params.defect_chance = 0.0;
        params
    }
}

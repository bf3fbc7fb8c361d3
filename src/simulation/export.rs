//! Export simulation state to JSON

use std::fs::File;
use std::io::Write;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::simulation::orders::types::Order;
use crate::simulation::simulation::SimulationState;

/// Exported simulation data
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationExport {
    pub seed: u64,
    pub final_tick: u64,
    pub sim_seconds: f32,
    pub exported_at: String,
    pub economy: EconomyExport,
    pub board: BoardStatsExport,
    pub production: ProductionExport,
    pub offered_orders: Vec<OrderExport>,
    pub active_orders: Vec<OrderExport>,
    pub recent_activity: Vec<ActivityExport>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EconomyExport {
    pub gold: f32,
    pub peak_gold: f32,
    pub xp: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardStatsExport {
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

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProductionExport {
    pub machine_count: usize,
    pub items_crafted: u32,
    pub defects_crafted: u32,
    pub units_pending: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderExport {
    pub id: u64,
    pub customer: String,
    pub slot: usize,
    pub state: String,
    pub stars: f32,
    pub defects: u32,
    pub deadline_seconds: f32,
    pub remaining_seconds: f32,
    pub lines: Vec<LineExport>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LineExport {
    pub product: String,
    pub quantity: u32,
    pub produced: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActivityExport {
    pub tick: u64,
    pub label: String,
    pub message: String,
}

/// Export simulation results to a JSON file
pub fn export_simulation(state: &SimulationState, path: &str) -> std::io::Result<()> {
    let export = create_export(state);
    let json = serde_json::to_string_pretty(&export)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;

    Ok(())
}

/// Create export structure from simulation state
fn create_export(state: &SimulationState) -> SimulationExport {
    let board_stats = &state.board.stats;

    let recent_activity = state
        .activity
        .recent_entries(50)
        .into_iter()
        .map(|entry| ActivityExport {
            tick: entry.tick,
            label: entry.category.label().to_string(),
            message: entry.message.clone(),
        })
        .collect();

    SimulationExport {
        seed: state.seed,
        final_tick: state.current_tick,
        sim_seconds: state.time_seconds,
        exported_at: Utc::now().to_rfc3339(),
        economy: EconomyExport {
            gold: state.ledger.gold(),
            peak_gold: state.stats.peak_gold,
            xp: state.ledger.xp(),
        },
        board: BoardStatsExport {
            orders_generated: board_stats.orders_generated,
            orders_accepted: board_stats.orders_accepted,
            orders_declined: board_stats.orders_declined,
            orders_delivered: board_stats.orders_delivered,
            orders_failed: board_stats.orders_failed,
            gold_earned: board_stats.gold_earned,
            xp_earned: board_stats.xp_earned,
            gold_lost: board_stats.gold_lost,
            xp_lost: board_stats.xp_lost,
        },
        production: ProductionExport {
            machine_count: state.shop.machines().len(),
            items_crafted: state.stats.items_crafted,
            defects_crafted: state.stats.defects_crafted,
            units_pending: state.shop.total_pending(),
        },
        offered_orders: state
            .board
            .offered()
            .iter()
            .map(|o| export_order(state, o))
            .collect(),
        active_orders: state
            .board
            .active()
            .iter()
            .map(|o| export_order(state, o))
            .collect(),
        recent_activity,
    }
}

fn export_order(state: &SimulationState, order: &Order) -> OrderExport {
    OrderExport {
        id: order.id.0,
        customer: order.customer.name().to_string(),
        slot: order.slot_index,
        state: order.state().name().to_string(),
        stars: order.stars(),
        defects: order.defect_count,
        deadline_seconds: order.deadline_seconds,
        remaining_seconds: order.remaining_seconds(state.time_seconds),
        lines: order
            .lines
            .iter()
            .map(|line| LineExport {
                product: state.products.name_of(line.product).to_string(),
                quantity: line.quantity,
                produced: line.produced,
            })
            .collect(),
    }
}

/// Generate a human-readable summary of the final state
pub fn generate_summary(state: &SimulationState) -> String {
    let mut summary = String::new();

    summary.push_str(&format!(
        "=== Workshop Summary (Seed: {}) ===\n",
        state.seed
    ));
    summary.push_str(&format!(
        "Duration: {} ticks ({:.0} simulated seconds)\n\n",
        state.current_tick, state.time_seconds
    ));

    summary.push_str("--- Economy ---\n");
    summary.push_str(&format!(
        "Gold: {:.0} current, {:.0} peak\n",
        state.ledger.gold(),
        state.stats.peak_gold
    ));
    summary.push_str(&format!("Experience: {}\n", state.ledger.xp()));

    summary.push_str("\n--- Orders ---\n");
    let stats = &state.board.stats;
    summary.push_str(&format!(
        "Generated: {}, accepted: {}, declined: {}\n",
        stats.orders_generated, stats.orders_accepted, stats.orders_declined
    ));
    summary.push_str(&format!(
        "Delivered: {} (+{} gold, +{} xp)\n",
        stats.orders_delivered, stats.gold_earned, stats.xp_earned
    ));
    summary.push_str(&format!(
        "Failed: {} (-{} gold, -{} xp)\n",
        stats.orders_failed, stats.gold_lost, stats.xp_lost
    ));

    summary.push_str("\n--- Production ---\n");
    summary.push_str(&format!(
        "Items crafted: {} ({} defective), {} still queued\n",
        state.stats.items_crafted,
        state.stats.defects_crafted,
        state.shop.total_pending()
    ));

    let important = state.activity.important_entries(5);
    if !important.is_empty() {
        summary.push_str("\n--- Notable Events ---\n");
        for entry in important {
            summary.push_str(&format!(
                "[{}] tick {}: {}\n",
                entry.category.label(),
                entry.tick,
                entry.message
            ));
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::params::SimulationParams;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn small_state() -> SimulationState {
        let params = SimulationParams::fast_test();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut state = SimulationState::new(9, &params, &mut rng);
        for _ in 0..100 {
            state.tick(&params, &mut rng);
        }
        state
    }

    #[test]
    fn test_export_round_trips_through_json() {
        let state = small_state();
        let export = create_export(&state);

        let json = serde_json::to_string(&export).unwrap();
        let back: SimulationExport = serde_json::from_str(&json).unwrap();

        assert_eq!(back.seed, state.seed);
        assert_eq!(back.final_tick, state.current_tick);
        assert_eq!(
            back.offered_orders.len() + back.active_orders.len(),
            state.board.offered().len() + state.board.active().len()
        );
    }

    #[test]
    fn test_summary_mentions_key_numbers() {
        let state = small_state();
        let summary = generate_summary(&state);

        assert!(summary.contains("Workshop Summary"));
        assert!(summary.contains("Gold:"));
        assert!(summary.contains("Delivered:"));
    }
}

//! Workshop Economy Simulation System
//!
//! A crafting-workshop economy: customers post orders for products, the
//! order board tracks their lifecycle against deadlines, machines craft the
//! units, and settlement pays out gold and experience scaled by quality.
//!
//! # Module Structure
//!
//! - `types`: Core type definitions (OrderId, ProductId, CustomerKind, etc.)
//! - `params`: Simulation configuration parameters
//! - `products`: The goods the workshop sells
//! - `orders`: Order data model, generation, board lifecycle, settlement
//! - `workshop`: Production machines and the machine shop
//! - `ledger`: Player gold and experience account
//! - `activity_log`: Bounded log of recent events
//! - `simulation`: Main simulation state and tick loop
//! - `export`: JSON export and reporting
//!
//! # Usage
//!
//! ```ignore
//! use workshop_sim::simulation::{SimulationParams, run_simulation};
//!
//! let params = SimulationParams::default();
//! let state = run_simulation(&params, 600, seed, &mut rng);
//! ```

pub mod activity_log;
pub mod export;
pub mod ledger;
pub mod orders;
pub mod params;
pub mod products;
pub mod simulation;
pub mod types;
pub mod workshop;

// Re-export main types for convenience
pub use activity_log::{ActivityCategory, ActivityEntry, ActivityLog, ActivityStats};
pub use export::{export_simulation, generate_summary};
pub use ledger::Ledger;
pub use orders::{
    estimate_gold, settle, BoardEvent, BoardStats, Order, OrderBoard, OrderCatalog, OrderLine,
    RewardOutcome,
};
pub use params::SimulationParams;
pub use products::{Product, ProductCatalog};
pub use simulation::{run_simulation, SimulationState, SimulationStats};
pub use types::{CustomerKind, MachineId, OrderId, OrderState, ProductId};
pub use workshop::{CraftRequest, Machine, MachineShop};

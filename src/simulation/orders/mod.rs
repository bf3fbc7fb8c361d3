//! Customer orders: data model, generation, lifecycle, and settlement

pub mod board;
pub mod catalog;
pub mod rewards;
pub mod types;

pub use board::{BoardEvent, BoardStats, OrderBoard};
pub use catalog::OrderCatalog;
pub use rewards::{estimate_gold, settle, RewardOutcome};
pub use types::{Order, OrderLine};

//! Production machines: the workshop floor that builds ordered products

pub mod production;
pub mod types;

pub use production::MachineShop;
pub use types::{ActiveCraft, CraftRequest, Machine};

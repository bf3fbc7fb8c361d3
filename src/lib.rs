//! Workshop economy simulation library
//!
//! A headless crafting-workshop simulation: customers post orders for
//! crafted products, machines build the items one at a time, finished
//! orders are delivered for gold and experience, and missed deadlines
//! cost a penalty.
//!
//! Re-exports modules for use by binaries and tools.

pub mod simulation;

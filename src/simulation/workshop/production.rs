//! Machine shop management
//!
//! Owns the production machines, balances queued work across them, and
//! drains finished units each tick so the host can report them against the
//! order board.

use serde::{Deserialize, Serialize};

use crate::simulation::types::{MachineId, ProductId};
use crate::simulation::workshop::types::{CraftRequest, Machine};

/// Manager for the workshop's production machines
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MachineShop {
    machines: Vec<Machine>,
    next_id: u32,
}

impl MachineShop {
    pub fn new(machine_count: u32, seconds_per_item: f32) -> Self {
        let mut shop = MachineShop {
            machines: Vec::new(),
            next_id: 0,
        };
        for _ in 0..machine_count {
            shop.add_machine(seconds_per_item);
        }
        shop
    }

    /// Add one machine to the floor
    pub fn add_machine(&mut self, seconds_per_item: f32) -> MachineId {
        let id = MachineId(self.next_id);
        self.next_id += 1;
        self.machines.push(Machine::new(id, seconds_per_item));
        id
    }

    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    /// Queue one unit on the least-loaded machine
    pub fn enqueue(&mut self, product: ProductId, defective: bool) -> Option<MachineId> {
        let machine = self
            .machines
            .iter_mut()
            .min_by_key(|m| m.pending_count())?;
        machine.enqueue(CraftRequest { product, defective });
        Some(machine.id)
    }

    /// Units queued or in progress for a product, across all machines
    pub fn pending_for(&self, product: ProductId) -> u32 {
        self.machines.iter().map(|m| m.pending_for(product)).sum()
    }

    /// All units queued or in progress
    pub fn total_pending(&self) -> u32 {
        self.machines.iter().map(|m| m.pending_count()).sum()
    }

    /// Advance every machine; returns the units finished this tick
    pub fn tick(&mut self, now: f32) -> Vec<CraftRequest> {
        self.machines
            .iter_mut()
            .filter_map(|m| m.tick(now))
            .collect()
    }
}

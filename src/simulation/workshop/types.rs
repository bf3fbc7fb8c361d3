//! Production machine types

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::simulation::types::{MachineId, ProductId};

/// One queued unit of work for a machine
///
/// Whether the unit comes out defective is decided when the work is queued
/// (assembly mistakes happen before the machine runs), and carried through
/// to the completion report.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CraftRequest {
    pub product: ProductId,
    pub defective: bool,
}

/// Work currently on the machine bed
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ActiveCraft {
    pub request: CraftRequest,
    /// Simulation time at which the unit is finished
    pub finish_at: f32,
}

/// A production machine: crafts one queued unit at a time
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Machine {
    pub id: MachineId,
    /// Crafting time for one unit
    pub seconds_per_item: f32,
    queue: VecDeque<CraftRequest>,
    current: Option<ActiveCraft>,
}

impl Machine {
    pub fn new(id: MachineId, seconds_per_item: f32) -> Self {
        Machine {
            id,
            seconds_per_item,
            queue: VecDeque::new(),
            current: None,
        }
    }

    /// Queue one unit of work
    pub fn enqueue(&mut self, request: CraftRequest) {
        self.queue.push_back(request);
    }

    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    /// Units queued or on the bed
    pub fn pending_count(&self) -> u32 {
        self.queue.len() as u32 + if self.current.is_some() { 1 } else { 0 }
    }

    /// Pending units of a specific product
    pub fn pending_for(&self, product: ProductId) -> u32 {
        let queued = self
            .queue
            .iter()
            .filter(|r| r.product == product)
            .count() as u32;
        let current = match &self.current {
            Some(craft) if craft.request.product == product => 1,
            _ => 0,
        };
        queued + current
    }

    /// Advance the machine; returns the finished unit, if any
    ///
    /// Starts the next queued unit when the bed is free, and hands back at
    /// most one completion per call.
    pub fn tick(&mut self, now: f32) -> Option<CraftRequest> {
        let mut finished = None;

        if let Some(craft) = self.current {
            if now >= craft.finish_at {
                finished = Some(craft.request);
                self.current = None;
            }
        }

        if self.current.is_none() {
            if let Some(request) = self.queue.pop_front() {
                self.current = Some(ActiveCraft {
                    request,
                    finish_at: now + self.seconds_per_item,
                });
            }
        }

        finished
    }
}

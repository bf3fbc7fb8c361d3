//! Activity Log System
//!
//! Tracks recent order and production events for summaries and export.
//! This provides visibility into what the workshop has been doing without
//! keeping the full history in memory.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of entries to keep in the activity log
const MAX_ACTIVITY_ENTRIES: usize = 200;

/// Category of activity event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityCategory {
    /// A new order appeared on the board
    Offer,
    /// An order was accepted
    Accept,
    /// An order was declined
    Decline,
    /// A unit came off a machine
    Production,
    /// An order was delivered and settled
    Delivery,
    /// An order missed its deadline
    Failure,
}

impl ActivityCategory {
    /// Get short label for display
    pub fn label(&self) -> &'static str {
        match self {
            ActivityCategory::Offer => "OFR",
            ActivityCategory::Accept => "ACC",
            ActivityCategory::Decline => "DEC",
            ActivityCategory::Production => "PRD",
            ActivityCategory::Delivery => "DLV",
            ActivityCategory::Failure => "!!",
        }
    }
}

/// An activity log entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Tick when this happened
    pub tick: u64,
    /// Category of event
    pub category: ActivityCategory,
    /// Short description
    pub message: String,
    /// Importance (higher = more important, shown first)
    pub importance: u8,
}

/// Statistics about activities
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ActivityStats {
    pub total_events: u64,
    pub orders_offered: u64,
    pub orders_delivered: u64,
    pub orders_failed: u64,
    pub items_produced: u64,
}

/// The activity log store
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    /// Counters for stats
    pub stats: ActivityStats,
}

impl ActivityLog {
    pub fn new() -> Self {
        ActivityLog {
            entries: VecDeque::with_capacity(MAX_ACTIVITY_ENTRIES),
            stats: ActivityStats::default(),
        }
    }

    /// Add a new activity entry
    pub fn log(&mut self, tick: u64, category: ActivityCategory, message: String, importance: u8) {
        self.stats.total_events += 1;
        match category {
            ActivityCategory::Offer => self.stats.orders_offered += 1,
            ActivityCategory::Delivery => self.stats.orders_delivered += 1,
            ActivityCategory::Failure => self.stats.orders_failed += 1,
            ActivityCategory::Production => self.stats.items_produced += 1,
            _ => {}
        }

        self.entries.push_back(ActivityEntry {
            tick,
            category,
            message,
            importance,
        });

        while self.entries.len() > MAX_ACTIVITY_ENTRIES {
            self.entries.pop_front();
        }
    }

    /// Get recent entries (newest first)
    pub fn recent_entries(&self, count: usize) -> Vec<&ActivityEntry> {
        self.entries.iter().rev().take(count).collect()
    }

    /// Get high-importance entries (failures, deliveries)
    pub fn important_entries(&self, count: usize) -> Vec<&ActivityEntry> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by(|a, b| b.importance.cmp(&a.importance));
        entries.into_iter().take(count).collect()
    }

    /// Get total entry count
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is empty?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

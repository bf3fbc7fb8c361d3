//! Player gold and experience account
//!
//! Order settlement credits this ledger; deadline failures debit it. The
//! purchasing side (machines, recipe unlocks) spends through `try_spend`.

use serde::{Deserialize, Serialize};

/// Currency and experience balances
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ledger {
    gold: f32,
    xp: i32,
}

impl Ledger {
    pub fn new(starting_gold: f32, starting_xp: i32) -> Self {
        Ledger {
            gold: starting_gold,
            xp: starting_xp.max(0),
        }
    }

    /// Current gold balance
    pub fn gold(&self) -> f32 {
        self.gold
    }

    /// Current experience
    pub fn xp(&self) -> i32 {
        self.xp
    }

    /// Apply a signed gold delta; penalties may push the balance negative
    pub fn add_gold(&mut self, delta: f32) {
        if delta == 0.0 {
            return;
        }
        self.gold += delta;
    }

    /// Spend gold if the balance covers it
    pub fn try_spend(&mut self, amount: f32) -> bool {
        if amount <= 0.0 {
            return true;
        }
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }

    /// Apply a signed experience delta; experience never drops below zero
    pub fn add_xp(&mut self, delta: i32) {
        if delta == 0 {
            return;
        }
        self.xp = (self.xp + delta).max(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_and_debit() {
        let mut ledger = Ledger::new(100.0, 0);
        ledger.add_gold(50.0);
        assert_eq!(ledger.gold(), 150.0);

        assert!(ledger.try_spend(150.0));
        assert_eq!(ledger.gold(), 0.0);
        assert!(!ledger.try_spend(1.0));
    }

    #[test]
    fn test_penalty_can_go_negative() {
        let mut ledger = Ledger::new(20.0, 0);
        ledger.add_gold(-50.0);
        assert_eq!(ledger.gold(), -30.0);
    }

    #[test]
    fn test_xp_floor() {
        let mut ledger = Ledger::new(0.0, 5);
        ledger.add_xp(-10);
        assert_eq!(ledger.xp(), 0);
        ledger.add_xp(25);
        assert_eq!(ledger.xp(), 25);
    }
}

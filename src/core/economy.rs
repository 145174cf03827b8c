//! Economy mutations: gold, essences, and infernal cores. Every change
//! publishes an event carrying old/new/delta so ledgers downstream can
//! reconcile without reading state.

use super::derived::DerivedStats;
use super::errors::{Resource, StateError, StateResult};
use super::game_state::{EssenceKind, GameState};
use crate::events::{EventBus, GameEvent, GoldReason};

impl GameState {
    /// Credits gold. Combat income is boosted by equipped gold-gain
    /// stat lines. Returns the credited amount.
    pub fn add_gold(&mut self, amount: u64, reason: GoldReason, bus: &EventBus) -> u64 {
        let credited = if reason == GoldReason::Combat {
            let bonus = DerivedStats::of(self).gold_bonus_percent;
            (amount as f64 * (1.0 + bonus / 100.0)).floor() as u64
        } else {
            amount
        };

        let old = self.economy.gold;
        self.economy.gold += credited;
        bus.publish(GameEvent::GoldChanged {
            old,
            new: self.economy.gold,
            delta: credited as i64,
            reason,
        });
        credited
    }

    /// Debits gold, failing without mutation when the balance is short.
    pub fn spend_gold(&mut self, amount: u64, reason: GoldReason, bus: &EventBus) -> StateResult<()> {
        if self.economy.gold < amount {
            return Err(StateError::InsufficientResource(Resource::Gold));
        }

        let old = self.economy.gold;
        self.economy.gold -= amount;
        bus.publish(GameEvent::GoldChanged {
            old,
            new: self.economy.gold,
            delta: -(amount as i64),
            reason,
        });
        Ok(())
    }

    pub fn add_essence(&mut self, kind: EssenceKind, amount: u64, bus: &EventBus) {
        let old = self.economy.essence(kind);
        self.economy.set_essence(kind, old + amount);
        bus.publish(GameEvent::EssenceChanged {
            kind,
            old,
            new: old + amount,
        });
    }

    pub fn spend_essence(
        &mut self,
        kind: EssenceKind,
        amount: u64,
        bus: &EventBus,
    ) -> StateResult<()> {
        let old = self.economy.essence(kind);
        if old < amount {
            return Err(StateError::InsufficientResource(Resource::Essence));
        }

        self.economy.set_essence(kind, old - amount);
        bus.publish(GameEvent::EssenceChanged {
            kind,
            old,
            new: old - amount,
        });
        Ok(())
    }

    pub fn add_infernal_cores(&mut self, amount: u64, bus: &EventBus) {
        let old = self.economy.infernal_cores;
        self.economy.infernal_cores += amount;
        bus.publish(GameEvent::CoresChanged {
            old,
            new: self.economy.infernal_cores,
        });
    }

    pub fn spend_infernal_cores(&mut self, amount: u64, bus: &EventBus) -> StateResult<()> {
        if self.economy.infernal_cores < amount {
            return Err(StateError::InsufficientResource(Resource::InfernalCores));
        }

        let old = self.economy.infernal_cores;
        self.economy.infernal_cores -= amount;
        bus.publish(GameEvent::CoresChanged {
            old,
            new: self.economy.infernal_cores,
        });
        Ok(())
    }
}

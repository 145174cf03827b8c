//! Module slot and inventory mutations. Items obey exclusive
//! ownership: once created an item is either in the inventory or
//! equipped in one slot, and displacement moves items, never destroys
//! them.

use uuid::Uuid;

use super::balance::slot_stat_cost;
use super::constants::{SLOT_BOSS_PREREQS, SLOT_UNLOCK_COSTS};
use super::errors::{Resource, StateError, StateResult};
use super::game_state::{GameState, SellPolicy, SlotStat};
use crate::events::{EventBus, GameEvent};
use crate::items::InventoryItem;

/// What `add_to_inventory` did with the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryOutcome {
    Stored,
    AutoSold { gold: u64 },
}

impl GameState {
    /// Stores a new item, or liquidates it immediately when the
    /// auto-sell policy covers its rarity. The caller reacts to the
    /// returned outcome (e.g. loot only announces drops that stored).
    pub fn add_to_inventory(
        &mut self,
        item: InventoryItem,
        bus: &EventBus,
    ) -> StateResult<InventoryOutcome> {
        let duplicate = self.find_in_inventory(item.id).is_some()
            || self
                .slots
                .iter()
                .any(|s| s.equipped.as_ref().is_some_and(|e| e.id == item.id));
        if duplicate {
            return Err(StateError::Validation(format!(
                "item {} is already owned",
                item.id
            )));
        }

        if self.sell_policy.liquidates(item.rarity) {
            let gold = item.rarity.sell_value();
            self.economy.gold += gold;
            bus.publish(GameEvent::ItemAutoSold {
                item_id: item.id,
                rarity: item.rarity,
                gold,
            });
            return Ok(InventoryOutcome::AutoSold { gold });
        }

        bus.publish(GameEvent::ItemStored {
            item_id: item.id,
            rarity: item.rarity,
        });
        self.inventory.push(item);
        Ok(InventoryOutcome::Stored)
    }

    /// Equips an inventory item into a slot. An occupied slot displaces
    /// its current item back into the inventory.
    pub fn equip_module(
        &mut self,
        slot_index: usize,
        item_id: Uuid,
        bus: &EventBus,
    ) -> StateResult<()> {
        let slot = self
            .slots
            .get(slot_index)
            .ok_or_else(|| StateError::Validation(format!("unknown slot index {slot_index}")))?;
        if !slot.unlocked {
            return Err(StateError::Validation(format!(
                "slot {slot_index} is locked"
            )));
        }

        let position = self
            .inventory
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| StateError::NotFound(format!("item {item_id} not in inventory")))?;

        let item = self.inventory.remove(position);
        let displaced = self.slots[slot_index].equipped.replace(item);
        let displaced_id = displaced.as_ref().map(|i| i.id);
        if let Some(prev) = displaced {
            self.inventory.push(prev);
        }

        bus.publish(GameEvent::ModuleEquipped {
            index: slot_index,
            item_id,
            displaced: displaced_id,
        });
        Ok(())
    }

    /// Moves a slot's equipped item back into the inventory.
    pub fn unequip_module(&mut self, slot_index: usize, bus: &EventBus) -> StateResult<()> {
        let slot = self
            .slots
            .get_mut(slot_index)
            .ok_or_else(|| StateError::Validation(format!("unknown slot index {slot_index}")))?;
        let item = slot
            .equipped
            .take()
            .ok_or_else(|| StateError::NotFound(format!("slot {slot_index} is empty")))?;

        let item_id = item.id;
        self.inventory.push(item);
        bus.publish(GameEvent::ModuleUnequipped {
            index: slot_index,
            item_id,
        });
        Ok(())
    }

    /// Sells an inventory item for its fixed rarity value.
    pub fn sell_module(&mut self, item_id: Uuid, bus: &EventBus) -> StateResult<u64> {
        let position = self
            .inventory
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| StateError::NotFound(format!("item {item_id} not in inventory")))?;

        let item = self.inventory.remove(position);
        let gold = item.rarity.sell_value();
        self.economy.gold += gold;
        bus.publish(GameEvent::ItemSold {
            item_id,
            rarity: item.rarity,
            gold,
        });
        Ok(gold)
    }

    /// Unlocks a slot, gated by gold and (for the last slot) a boss
    /// defeat. Unlocking is monotonic; a slot never re-locks.
    pub fn unlock_slot(&mut self, index: usize, bus: &EventBus) -> StateResult<()> {
        let slot = self
            .slots
            .get(index)
            .ok_or_else(|| StateError::Validation(format!("unknown slot index {index}")))?;
        if slot.unlocked {
            return Err(StateError::Validation(format!(
                "slot {index} is already unlocked"
            )));
        }

        if let Some(boss) = SLOT_BOSS_PREREQS[index] {
            if !self.zones.bosses_defeated.contains(boss) {
                return Err(StateError::Validation(format!(
                    "slot {index} requires defeating {boss}"
                )));
            }
        }

        let cost = SLOT_UNLOCK_COSTS[index];
        if self.economy.gold < cost {
            return Err(StateError::InsufficientResource(Resource::Gold));
        }

        self.economy.gold -= cost;
        self.slots[index].unlocked = true;
        bus.publish(GameEvent::SlotUnlocked { index, cost });
        Ok(())
    }

    /// Buys the next level of a per-slot stat, capped at the tank's
    /// level like every other upgrade.
    pub fn upgrade_slot_stat(
        &mut self,
        slot_index: usize,
        stat: SlotStat,
        bus: &EventBus,
    ) -> StateResult<u32> {
        let slot = self
            .slots
            .get(slot_index)
            .ok_or_else(|| StateError::Validation(format!("unknown slot index {slot_index}")))?;
        if !slot.unlocked {
            return Err(StateError::Validation(format!(
                "slot {slot_index} is locked"
            )));
        }

        let current = slot.stat_level(stat);
        if current >= self.tank.level {
            return Err(StateError::InsufficientResource(Resource::LevelCap));
        }
        let cost = slot_stat_cost(current);
        if self.economy.gold < cost {
            return Err(StateError::InsufficientResource(Resource::Gold));
        }

        self.economy.gold -= cost;
        let level = self.slots[slot_index].raise_stat(stat);
        bus.publish(GameEvent::SlotStatUpgraded {
            index: slot_index,
            stat,
            level,
            cost,
        });
        Ok(level)
    }

    /// Replaces the auto-sell policy. Settings come from the host and
    /// publish no event.
    pub fn set_sell_policy(&mut self, policy: SellPolicy) {
        self.sell_policy = policy;
    }
}

//! Prestige resets the run while banking paragon points earned from
//! the furthest progression watermark.

use super::constants::{PARAGON_POINTS_PER_ZONE, PRESTIGE_MIN_LEVEL, ZONES_PER_ACT};
use super::errors::{StateError, StateResult};
use super::game_state::{Economy, GameState, TankProgression, TankVitals, ZoneProgress};
use crate::events::{EventBus, GameEvent};

impl GameState {
    /// Zones cleared at the watermark, the basis for the paragon award.
    fn watermark_zones(&self) -> u64 {
        let full_acts = u64::from(self.zones.highest_act - 1);
        full_acts * u64::from(ZONES_PER_ACT) + u64::from(self.zones.highest_zone)
    }

    /// Resets the run in exchange for paragon points. Everything but
    /// the paragon record and the sell policy goes back to a new game;
    /// slots re-lock and items are destroyed.
    pub fn prestige(&mut self, bus: &EventBus) -> StateResult<u64> {
        if self.tank.level < PRESTIGE_MIN_LEVEL {
            return Err(StateError::Validation(format!(
                "prestige requires level {PRESTIGE_MIN_LEVEL}, currently {}",
                self.tank.level
            )));
        }

        let points_awarded = self.watermark_zones() * PARAGON_POINTS_PER_ZONE;
        self.paragon.times_prestiged += 1;
        self.paragon.points += points_awarded;

        self.tank = TankProgression::new();
        self.vitals = TankVitals::new();
        self.economy = Economy::default();
        self.zones = ZoneProgress::new();
        self.inventory.clear();
        let fresh = GameState::new();
        self.slots = fresh.slots;

        bus.publish(GameEvent::Prestiged {
            times_prestiged: self.paragon.times_prestiged,
            points_awarded,
        });
        Ok(points_awarded)
    }
}

//! Act/zone/wave progression. The furthest-reached watermark only
//! moves forward; the current position may move backward for replay.

use super::constants::{WAVES_PER_ZONE, ZONES_PER_ACT};
use super::errors::{StateError, StateResult};
use super::game_state::GameState;
use crate::events::{EventBus, GameEvent};

impl GameState {
    /// Marks the current wave as cleared. Returns true when it was the
    /// last wave of the zone, in which case the host follows up with
    /// [`GameState::complete_zone`].
    pub fn complete_wave(&mut self, bus: &EventBus) -> bool {
        let zones = &mut self.zones;
        bus.publish(GameEvent::WaveCompleted {
            act: zones.current_act,
            zone: zones.current_zone,
            wave: zones.current_wave,
        });

        if zones.current_wave < WAVES_PER_ZONE {
            zones.current_wave += 1;
            false
        } else {
            true
        }
    }

    /// Advances past the current zone, wrapping into the next act at
    /// the zones-per-act boundary and pushing the watermark forward.
    pub fn complete_zone(&mut self, bus: &EventBus) {
        let zones = &mut self.zones;
        let (done_act, done_zone) = (zones.current_act, zones.current_zone);

        if zones.current_zone < ZONES_PER_ACT {
            zones.current_zone += 1;
        } else {
            zones.current_zone = 1;
            zones.current_act += 1;
        }
        zones.current_wave = 1;

        // Lexicographic watermark advance; replaying an old zone never
        // pulls it back.
        if (zones.current_act, zones.current_zone) > (zones.highest_act, zones.highest_zone) {
            zones.highest_act = zones.current_act;
            zones.highest_zone = zones.current_zone;
        }

        bus.publish(GameEvent::ZoneCompleted {
            act: done_act,
            zone: done_zone,
        });
    }

    /// Jumps to a zone the watermark has already unlocked. The wave
    /// counter restarts at 1 and the watermark is untouched.
    pub fn set_zone(&mut self, act: u32, zone: u32, bus: &EventBus) -> StateResult<()> {
        if act < 1 || zone < 1 || zone > ZONES_PER_ACT {
            return Err(StateError::Validation(format!(
                "zone coordinates out of range: act {act} zone {zone}"
            )));
        }

        let zones = &self.zones;
        let unlocked = (act == 1 && zone == 1)
            || act < zones.highest_act
            || (act == zones.highest_act && zone <= zones.highest_zone);
        if !unlocked {
            return Err(StateError::Validation(format!(
                "act {act} zone {zone} is beyond the furthest point reached"
            )));
        }

        self.zones.current_act = act;
        self.zones.current_zone = zone;
        self.zones.current_wave = 1;
        bus.publish(GameEvent::ZoneChanged { act, zone });
        Ok(())
    }

    /// Records a boss kill. Returns true on the first defeat of this
    /// boss id within the tracked set (standard and uber kills are
    /// tracked separately).
    pub fn record_boss_defeated(&mut self, boss_id: &str, uber: bool, bus: &EventBus) -> bool {
        let newly = if uber {
            self.zones.ubers_defeated.insert(boss_id.to_string())
        } else {
            self.zones.bosses_defeated.insert(boss_id.to_string())
        };
        bus.publish(GameEvent::BossDefeated {
            boss_id: boss_id.to_string(),
            uber,
        });
        newly
    }
}

//! Weapon attack resolution.
//!
//! The fist is an area attack: every living pawn inside the attack radius of
//! the wielder takes the full damage amount. (Earlier revisions hit only the
//! closest pawn; the area behavior is the one that shipped.)

use anyhow::{Context, Result};

use crate::ServerState;
use crate::actor::ActorId;

impl ServerState {
    /// Swing a weapon given its wielder's position. Client-side calls are
    /// silently ignored; swinging an unwielded weapon is a caller bug.
    pub fn weapon_attack(&mut self, weapon_id: ActorId) -> Result<()> {
        if !self.authority {
            return Ok(());
        }
        let (wielder, radius, damage) = {
            let weapon = self
                .world
                .get(weapon_id)
                .and_then(|a| a.weapon())
                .with_context(|| format!("attack: weapon {weapon_id:?} not found"))?;
            let wielder = weapon
                .wielder
                .with_context(|| format!("attack: weapon {weapon_id:?} has no wielder"))?;
            (wielder, weapon.attack_radius, weapon.damage)
        };
        let origin = self
            .world
            .get(wielder)
            .map(|a| a.tr.pos)
            .with_context(|| format!("attack: wielder {wielder:?} not found"))?;

        for target in self.world.pawns_in_range(origin, radius, wielder) {
            self.apply_damage(target, damage, Some(wielder), "fist");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{armed_goon, loose_fist, state_with_players};
    use glam::vec2;

    #[test]
    fn unwielded_attack_is_a_caller_bug() {
        let mut s = state_with_players();
        let w = loose_fist(&mut s, vec2(0.0, 0.0));
        assert!(s.weapon_attack(w).is_err());
    }

    #[test]
    fn client_side_attack_is_silently_ignored() {
        let mut s = state_with_players();
        let (_, w) = armed_goon(&mut s, vec2(0.0, 0.0));
        s.authority = false;
        assert!(s.weapon_attack(w).is_ok());
        let hp = s.world.get(crate::actor::PLAYER_ONE).unwrap().pawn().unwrap().hp.hp;
        assert_eq!(hp, 100.0);
    }

    #[test]
    fn area_attack_hits_everyone_in_range_except_wielder() {
        let mut s = state_with_players();
        // Both players on top of the goon; both inside the fist radius.
        for pid in [crate::actor::PLAYER_ONE, crate::actor::PLAYER_TWO] {
            s.world.get_mut(pid).unwrap().tr.pos = vec2(2.0, 0.0);
        }
        let (goon, w) = armed_goon(&mut s, vec2(0.0, 0.0));
        s.weapon_attack(w).expect("attack");
        for pid in [crate::actor::PLAYER_ONE, crate::actor::PLAYER_TWO] {
            let hp = s.world.get(pid).unwrap().pawn().unwrap().hp.hp;
            assert!(hp < 100.0, "player {pid:?} should have been hit");
        }
        let goon_hp = s.world.get(goon).unwrap().pawn().unwrap().hp.hp;
        assert_eq!(goon_hp, 10.0, "wielder must not hit itself");
    }
}

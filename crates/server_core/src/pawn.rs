//! Pawn damage pipeline and weapon-slot ownership.
//!
//! All mutation goes through the authoritative [`ServerState`]; clients only
//! ever see the replicated results. The died transition is latched so it
//! fires exactly once per life no matter how many damage events or sweep
//! ticks observe the death.

use anyhow::{Context, Result, bail, ensure};
use glam::vec2;
use rand::Rng;

use crate::ServerState;
use crate::actor::{ActorId, ActorKind, PawnRole};

impl ServerState {
    /// Apply damage to a pawn. No-op once dead, and refused when the target's
    /// damage policy rejects the instigator (players never hurt players).
    /// Crossing zero fires the died transition immediately.
    pub fn apply_damage(&mut self, target: ActorId, amount: f32, instigator: Option<ActorId>, reason: &str) {
        if !self.can_take_damage(target, instigator) {
            return;
        }
        let Some(pawn) = self.world.get_mut(target).and_then(|a| a.pawn_mut()) else {
            return;
        };
        if pawn.hp.dead() {
            return;
        }
        pawn.hp.hp -= amount;
        if pawn.hp.dead() {
            self.died_transition(target, instigator, reason);
        }
    }

    /// Damage admission policy. Default permissive; a player refuses damage
    /// instigated by another player (no friendly fire).
    #[must_use]
    pub fn can_take_damage(&self, target: ActorId, instigator: Option<ActorId>) -> bool {
        let Some(t) = self.world.get(target) else {
            return false;
        };
        if t.kind == ActorKind::Player
            && let Some(src) = instigator
            && self.world.get(src).is_some_and(|a| a.kind == ActorKind::Player)
        {
            return false;
        }
        true
    }

    /// One-shot died transition. Drops any held weapon near the corpse;
    /// enemies additionally go dormant and are queued for the end-of-tick
    /// cull. Subsequent calls for the same life are no-ops.
    fn died_transition(&mut self, target: ActorId, instigator: Option<ActorId>, reason: &str) {
        let Some(actor) = self.world.get_mut(target) else {
            return;
        };
        let kind = actor.kind;
        let Some(pawn) = actor.pawn_mut() else {
            return;
        };
        if pawn.called_on_died {
            return;
        }
        pawn.called_on_died = true;
        log::info!("pawn {target:?} ({kind:?}) died, instigator={instigator:?}, reason={reason}");
        metrics::counter!("pawn.deaths_total").increment(1);

        self.drop_weapon(target);

        if let Some(actor) = self.world.get_mut(target)
            && let Some(pawn) = actor.pawn_mut()
            && let PawnRole::Enemy(ai) = &mut pawn.role
        {
            // The phase countdown dies with the actor; nothing to cancel.
            ai.phase = crate::actor::AiPhase::Dormant;
            ai.target = None;
            self.world.queue_kill(target);
        }
    }

    /// Secondary death check, run once per tick. Catches deaths applied
    /// through paths that bypass `apply_damage` (e.g. desynchronized
    /// replication); the same latch keeps the transition one-shot.
    pub fn death_sweep(&mut self) {
        let newly_dead: Vec<ActorId> = self
            .world
            .iter()
            .filter(|a| a.pawn().is_some_and(|p| p.hp.dead() && !p.called_on_died))
            .map(|a| a.id)
            .collect();
        for id in newly_dead {
            self.died_transition(id, None, "sweep");
        }
    }

    /// Pick up a weapon by id. Server-authoritative; drops any held weapon
    /// first. Invalid ids and already-wielded weapons are caller bugs.
    pub fn pickup_weapon(&mut self, pawn_id: ActorId, weapon_id: ActorId) -> Result<()> {
        ensure!(self.authority, "must only pickup weapons on the authority");
        ensure!(
            self.world.get(pawn_id).is_some_and(|a| a.pawn().is_some()),
            "pickup_weapon: {pawn_id:?} is not a pawn"
        );
        self.drop_weapon(pawn_id);
        self.assign_weapon_to_slot(pawn_id, weapon_id)
            .with_context(|| format!("pickup_weapon for {pawn_id:?}"))
    }

    /// Establish the bidirectional pawn<->weapon link. Fails if the weapon is
    /// unknown or already has a wielder.
    pub(crate) fn assign_weapon_to_slot(&mut self, pawn_id: ActorId, weapon_id: ActorId) -> Result<()> {
        let pawn_pos = self
            .world
            .get(pawn_id)
            .map(|a| a.tr.pos)
            .with_context(|| format!("assign: pawn {pawn_id:?} not found"))?;
        let Some(weapon) = self.world.get_mut(weapon_id).and_then(|a| a.weapon_mut()) else {
            bail!("assign: weapon {weapon_id:?} not found");
        };
        ensure!(
            weapon.wielder.is_none(),
            "assign: weapon {weapon_id:?} already wielded by {:?}",
            weapon.wielder
        );
        weapon.wielder = Some(pawn_id);
        if let Some(w) = self.world.get_mut(weapon_id) {
            w.tr.pos = pawn_pos;
        }
        if let Some(pawn) = self.world.get_mut(pawn_id).and_then(|a| a.pawn_mut()) {
            pawn.weapon_slot = Some(weapon_id);
        }
        Ok(())
    }

    /// Drop the held weapon, if any, scattering it to a random point in a
    /// fixed box above-and-around the pawn. Idempotent: unarmed pawns are a
    /// no-op, never an error.
    pub fn drop_weapon(&mut self, pawn_id: ActorId) {
        let Some(weapon_id) = self
            .world
            .get(pawn_id)
            .and_then(|a| a.pawn())
            .and_then(|p| p.weapon_slot)
        else {
            return;
        };
        let pawn_pos = self.world.get(pawn_id).map(|a| a.tr.pos).unwrap_or_default();
        let scatter = vec2(
            self.rng.random_range(-16.0..=16.0),
            self.rng.random_range(-24.0..=-8.0),
        );
        if let Some(pawn) = self.world.get_mut(pawn_id).and_then(|a| a.pawn_mut()) {
            pawn.weapon_slot = None;
        }
        if let Some(weapon) = self.world.get_mut(weapon_id) {
            weapon.tr.pos = pawn_pos + scatter;
            if let Some(w) = weapon.weapon_mut() {
                w.wielder = None;
            }
        }
    }

    /// Toggle the weapon slot: drop when armed, otherwise pick up the current
    /// grab candidate. Non-authoritative calls defer to the server.
    pub fn toggle_weapon_slot(&mut self, pawn_id: ActorId) -> Result<()> {
        if !self.authority {
            return Ok(());
        }
        let Some(pawn) = self.world.get(pawn_id).and_then(|a| a.pawn()) else {
            return Ok(());
        };
        if pawn.weapon_slot.is_some() {
            self.drop_weapon(pawn_id);
            return Ok(());
        }
        let candidate = match &pawn.role {
            PawnRole::Player(slot) => slot.grab_candidate,
            PawnRole::Enemy(_) => None,
        };
        if let Some(weapon_id) = candidate {
            self.pickup_weapon(pawn_id, weapon_id)?;
        }
        Ok(())
    }
}

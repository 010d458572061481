//! Player input routing and slot possession.
//!
//! Commands arrive as named actions from the transport and are routed to the
//! player actor possessed by the sending peer. Movement tweaks velocity only;
//! integration happens in the schedule.

use anyhow::{Result, ensure};

use crate::ServerState;
use crate::actor::{ActorId, PLAYER_ONE, PLAYER_TWO, PeerId};
use net_core::command::ClientCmd;

impl ServerState {
    /// Player actor currently possessed by `peer`, if any.
    #[must_use]
    pub fn player_for_peer(&self, peer: PeerId) -> Option<ActorId> {
        self.world
            .players()
            .find(|a| a.player_slot().is_some_and(|s| s.owner == Some(peer)))
            .map(|a| a.id)
    }

    /// Possess the first unpossessed slot. A third join is left unassigned
    /// (still connected, just spectating).
    pub fn player_joined(&mut self, peer: PeerId) {
        for slot_id in [PLAYER_ONE, PLAYER_TWO] {
            if let Some(slot) = self.world.get_mut(slot_id).and_then(|a| a.player_slot_mut())
                && slot.owner.is_none()
            {
                slot.owner = Some(peer);
                log::info!("assigning peer {peer:?} to slot {slot_id:?}");
                return;
            }
        }
        log::info!("peer {peer:?} joined with both slots possessed");
    }

    /// Unpossess whichever slot `peer` held. Readiness drops with it, which
    /// the match predicates observe next tick (halt when mid-match).
    pub fn player_disconnected(&mut self, peer: PeerId) {
        for slot_id in [PLAYER_ONE, PLAYER_TWO] {
            if let Some(slot) = self.world.get_mut(slot_id).and_then(|a| a.player_slot_mut())
                && slot.owner == Some(peer)
            {
                slot.owner = None;
                slot.is_ready = false;
                log::info!("invalidating peer {peer:?} on slot {slot_id:?}");
                return;
            }
        }
    }

    /// Mark a peer's slot ready/unready. Executed only on the authority; a
    /// client proxies this through the transport.
    pub fn set_player_ready(&mut self, peer: PeerId, ready: bool) -> Result<()> {
        ensure!(self.authority, "set_player_ready must run on the authority");
        if let Some(id) = self.player_for_peer(peer)
            && let Some(slot) = self.world.get_mut(id).and_then(|a| a.player_slot_mut())
        {
            slot.is_ready = ready;
        }
        Ok(())
    }

    /// Route one named action to the peer's possessed player.
    pub fn apply_command(&mut self, peer: PeerId, cmd: ClientCmd) -> Result<()> {
        if let ClientCmd::SetReady { ready } = cmd {
            return self.set_player_ready(peer, ready);
        }
        let Some(id) = self.player_for_peer(peer) else {
            return Ok(());
        };
        match cmd {
            ClientCmd::Left => self.player_move(id, -1.0),
            ClientCmd::Right => self.player_move(id, 1.0),
            ClientCmd::Jump => self.player_jump(id),
            ClientCmd::Attack => self.player_attack(id)?,
            ClientCmd::WeaponSlot => self.toggle_weapon_slot(id)?,
            ClientCmd::SetReady { .. } => {}
        }
        Ok(())
    }

    fn is_airborne(&self, id: ActorId) -> bool {
        self.world
            .get(id)
            .is_some_and(|a| a.tr.vel.y.abs() > self.tuning.player.air_vel_threshold)
    }

    fn player_move(&mut self, id: ActorId, dir: f32) {
        let speed = if self.is_airborne(id) {
            self.tuning.player.air_move_speed
        } else {
            self.tuning.player.move_speed
        };
        if let Some(actor) = self.world.get_mut(id) {
            if !actor.is_alive_pawn() {
                return;
            }
            actor.tr.vel.x += dir * speed;
            if let Some(pawn) = actor.pawn_mut() {
                pawn.facing_right = dir >= 0.0;
            }
        }
    }

    fn player_jump(&mut self, id: ActorId) {
        if self.is_airborne(id) {
            return;
        }
        let impulse = self.tuning.player.jump_impulse;
        if let Some(actor) = self.world.get_mut(id)
            && actor.is_alive_pawn()
        {
            // y grows downward; jumping is a negative impulse.
            actor.tr.vel.y -= impulse;
        }
    }

    /// Swing the held weapon. Needs authority and a wielded weapon; anything
    /// else is silently ignored (clients mash the button freely).
    fn player_attack(&mut self, id: ActorId) -> Result<()> {
        if !self.authority {
            return Ok(());
        }
        let Some(weapon) = self
            .world
            .get(id)
            .and_then(|a| a.pawn())
            .and_then(|p| p.weapon_slot)
        else {
            return Ok(());
        };
        self.weapon_attack(weapon)
    }
}

//! Fixed-order tick orchestration.
//!
//! One authoritative thread advances everything, once per tick, in this
//! order: match predicates -> mover integration -> grab-candidate scan ->
//! enemy AI -> elevator sequencing -> death sweep -> deferred cull ->
//! elevator auto-trigger -> AI auto-activation. Nothing else mutates
//! simulation state, so no two logical operations can interleave mid-tick.

use anyhow::Result;

use crate::ServerState;
use crate::actor::{ActorId, ActorKind, PawnRole};
use crate::systems::{ai, elevator};

pub fn run_tick(state: &mut ServerState) -> Result<()> {
    state.match_tick()?;
    integrate_movers(state);
    track_carried_weapons(state);
    grab_candidate_scan(state);
    ai::ai_tick(state);
    elevator::elevator_tick(state);
    state.death_sweep();
    state.world.flush_kills();
    elevator::elevator_auto_trigger(state)?;
    ai::ai_auto_activate(state);
    Ok(())
}

/// Minimal mover support for player pawns: integrate velocity, pull airborne
/// pawns down, land them on the nearest floor surface below, and bleed off
/// ground friction. Full collision response is the physics substrate's job;
/// this is just enough for jump gating and movement feel.
fn integrate_movers(state: &mut ServerState) {
    let gravity = state.level.gravity;
    let supports = state.supports.clone();
    for actor in state.world.iter_mut() {
        if actor.kind != ActorKind::Player {
            continue;
        }
        let tr = &mut actor.tr;
        let grounded = tr.vel.y == 0.0 && supports.iter().any(|s| (tr.pos.y - s).abs() < 0.01);
        if !grounded {
            tr.vel.y += gravity;
        }
        let new_y = tr.pos.y + tr.vel.y;
        tr.pos.x += tr.vel.x;
        if tr.vel.y >= 0.0
            && let Some(s) = supports
                .iter()
                .copied()
                .find(|s| *s >= tr.pos.y - 0.01 && *s <= new_y)
        {
            tr.pos.y = s;
            tr.vel.y = 0.0;
            tr.vel.x *= 0.5;
        } else {
            tr.pos.y = new_y;
            if grounded {
                tr.vel.x *= 0.5;
            }
        }
    }
}

/// Wielded weapons ride their wielder.
fn track_carried_weapons(state: &mut ServerState) {
    let pairs: Vec<(ActorId, ActorId)> = state
        .world
        .iter()
        .filter_map(|a| a.weapon().and_then(|w| w.wielder).map(|p| (a.id, p)))
        .collect();
    for (weapon, wielder) in pairs {
        let Some(pos) = state.world.get(wielder).map(|a| a.tr.pos) else {
            continue;
        };
        if let Some(w) = state.world.get_mut(weapon) {
            w.tr.pos = pos;
        }
    }
}

/// Recompute each player's nearest grabbable weapon. The actual pickup only
/// happens on an explicit weapon-slot action.
fn grab_candidate_scan(state: &mut ServerState) {
    let radius = state.tuning.pickup_radius;
    let players: Vec<ActorId> = state.world.players().map(|a| a.id).collect();
    for id in players {
        let Some(pos) = state.world.get(id).map(|a| a.tr.pos) else {
            continue;
        };
        let candidate = state.world.closest_loose_weapon(pos, radius);
        if let Some(pawn) = state.world.get_mut(id).and_then(|a| a.pawn_mut())
            && let PawnRole::Player(slot) = &mut pawn.role
        {
            slot.grab_candidate = candidate;
        }
    }
}

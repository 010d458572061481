//! Enemy AI phase scheduler.
//!
//! Two phases repeat in order: advance toward the attack target, then wait
//! at the point (attacking on entry when in range). Phase length is a
//! per-transition uniform draw, counted down in ticks by the authoritative
//! loop — there is no real-time timer to race against actor destruction.
//!
//! If the target is destroyed mid-advance the enemy simply idles until its
//! next advancing transition re-acquires one; that matches the shipped
//! behavior and keeps target churn low.

use glam::Vec2;
use rand::Rng;

use crate::ServerState;
use crate::actor::{ActorId, ActorKind, AiPhase};

/// Advancing stops short of the target inside this distance.
const ARRIVE_DISTANCE: f32 = 16.0;

/// Begin phase scheduling for a dormant enemy. Subsequent calls are ignored.
pub fn activate_ai(state: &mut ServerState, enemy: ActorId) {
    let Some(ai) = state.world.get_mut(enemy).and_then(|a| a.enemy_ai_mut()) else {
        return;
    };
    if ai.phase != AiPhase::Dormant {
        return;
    }
    enter_advancing(state, enemy);
}

/// Activate any dormant enemy that a living player has come close enough to.
/// Keeps far-off floors idle instead of burning ticks before the players
/// arrive.
pub fn ai_auto_activate(state: &mut ServerState) {
    let player_pos: Vec<Vec2> = state
        .world
        .players()
        .filter(|a| a.is_alive_pawn())
        .map(|a| a.tr.pos)
        .collect();
    if player_pos.is_empty() {
        return;
    }
    let reach = state.level.ai_activation_distance;
    let dormant: Vec<ActorId> = state
        .world
        .iter()
        .filter(|a| a.is_alive_pawn())
        .filter(|a| a.enemy_ai().is_some_and(|ai| ai.phase == AiPhase::Dormant))
        .filter(|a| player_pos.iter().any(|p| p.distance(a.tr.pos) <= reach))
        .map(|a| a.id)
        .collect();
    for id in dormant {
        activate_ai(state, id);
    }
}

/// Advance every active enemy's phase logic by one tick.
pub fn ai_tick(state: &mut ServerState) {
    let ids: Vec<ActorId> = state
        .world
        .iter()
        .filter(|a| a.is_alive_pawn())
        .filter(|a| a.enemy_ai().is_some_and(|ai| ai.phase != AiPhase::Dormant))
        .map(|a| a.id)
        .collect();
    for id in ids {
        // An earlier enemy's area attack this tick may have killed this one.
        if !state.world.get(id).is_some_and(|a| a.is_alive_pawn()) {
            continue;
        }
        let Some(ai) = state.world.get(id).and_then(|a| a.enemy_ai()) else {
            continue;
        };
        let (phase, target) = (ai.phase, ai.target);
        match phase {
            AiPhase::Advancing => advance_towards_target(state, id, target),
            AiPhase::Waiting => face_target(state, id, target),
            AiPhase::Dormant => {}
        }

        let Some(ai) = state.world.get_mut(id).and_then(|a| a.enemy_ai_mut()) else {
            continue;
        };
        ai.ticks_left = ai.ticks_left.saturating_sub(1);
        if ai.ticks_left == 0 {
            match phase {
                AiPhase::Advancing => enter_waiting(state, id),
                _ => enter_advancing(state, id),
            }
        }
    }
}

/// Pick a fresh attack target. Goons chase the closest living player; the
/// boss round-robins, avoiding its previous pick when another player lives.
fn pick_attack_target(state: &ServerState, enemy: ActorId) -> Option<ActorId> {
    let actor = state.world.get(enemy)?;
    let pos = actor.tr.pos;
    if actor.kind == ActorKind::Boss {
        let last = actor.enemy_ai().and_then(|ai| ai.last_target);
        let players = state.world.living_players();
        if let Some(prev) = last
            && players.len() > 1
            && let Some(other) = players.iter().find(|p| **p != prev)
        {
            return Some(*other);
        }
        return players.first().copied();
    }
    state.world.closest_player(pos)
}

fn enter_advancing(state: &mut ServerState, enemy: ActorId) {
    let target = pick_attack_target(state, enemy);
    let Some(ai) = state.world.get_mut(enemy).and_then(|a| a.enemy_ai_mut()) else {
        return;
    };
    let (lo, hi) = ai.follow_ticks;
    ai.phase = AiPhase::Advancing;
    ai.target = target;
    ai.last_target = target;
    ai.ticks_left = state.rng.random_range(lo..=hi).max(1);
}

/// Enter the waiting phase and run its entry behavior once: face the target
/// and swing the held weapon if the target is inside the attack radius.
fn enter_waiting(state: &mut ServerState, enemy: ActorId) {
    let Some(ai) = state.world.get_mut(enemy).and_then(|a| a.enemy_ai_mut()) else {
        return;
    };
    let (lo, hi) = ai.wait_ticks;
    ai.phase = AiPhase::Waiting;
    ai.ticks_left = state.rng.random_range(lo..=hi).max(1);
    let (target, radius) = (ai.target, ai.attack_phase_radius);

    face_target(state, enemy, target);
    let Some(tpos) = target.and_then(|t| state.world.get(t)).map(|a| a.tr.pos) else {
        return;
    };
    let Some(actor) = state.world.get(enemy) else {
        return;
    };
    if actor.tr.pos.distance(tpos) <= radius
        && let Some(weapon) = actor.pawn().and_then(|p| p.weapon_slot)
        && let Err(e) = state.weapon_attack(weapon)
    {
        log::warn!("enemy {enemy:?} attack failed: {e:#}");
    }
}

/// Step toward the target when farther than the arrive distance. A missing
/// target just skips movement for the tick.
fn advance_towards_target(state: &mut ServerState, enemy: ActorId, target: Option<ActorId>) {
    let Some(tpos) = target.and_then(|t| state.world.get(t)).map(|a| a.tr.pos) else {
        return;
    };
    let Some(actor) = state.world.get_mut(enemy) else {
        return;
    };
    let to = tpos - actor.tr.pos;
    if to.length() > ARRIVE_DISTANCE {
        let speed = actor.enemy_ai().map(|ai| ai.move_speed).unwrap_or(1.0);
        let dir = to.normalize_or_zero();
        actor.tr.pos += dir * speed;
        if let Some(pawn) = actor.pawn_mut() {
            pawn.facing_right = dir.x >= 0.0;
        }
    }
}

fn face_target(state: &mut ServerState, enemy: ActorId, target: Option<ActorId>) {
    let Some(tpos) = target.and_then(|t| state.world.get(t)).map(|a| a.tr.pos) else {
        return;
    };
    if let Some(actor) = state.world.get_mut(enemy) {
        let dx = tpos.x - actor.tr.pos.x;
        if let Some(pawn) = actor.pawn_mut() {
            pawn.facing_right = dx >= 0.0;
        }
    }
}

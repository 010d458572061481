//! Elevator transition choreography.
//!
//! A sequence walks Idle -> Elevating -> Settling -> Idle, driven by tick
//! countdowns. While elevating, the platform lerps from `start_pos` to
//! `end_pos` and the four shaft walls ride along at fixed offsets; after
//! arrival the walls stay up for a short grace period so players are still
//! boxed in while the interpolating clients catch up, then come down.

use anyhow::{Result, ensure};
use glam::{Vec2, vec2};

use crate::ServerState;
use crate::actor::{ActorExt, ActorId, ActorKind, Transform};

/// Shaft wall rectangles as (offset, width, height) relative to the elevator
/// position: lid, floor, left post, right post.
const WALL_RECTS: [(f32, f32, f32, f32); 4] = [
    (0.0, -12.0, 112.0, 16.0),
    (0.0, 48.0, 112.0, 16.0),
    (0.0, 0.0, 16.0, 64.0),
    (96.0, 0.0, 16.0, 64.0),
];

/// Where the two players stand inside the shaft, relative to the elevator.
const RIDER_OFFSETS: [Vec2; 2] = [vec2(32.0, 16.0), vec2(64.0, 16.0)];

/// Interior bounds used by the approach auto-trigger.
const CAB_W: f32 = 112.0;
const CAB_H: f32 = 64.0;

impl ServerState {
    /// Start an animated elevator descent: build the shaft walls, box both
    /// players in and begin the countdown. Authority-only, and the session
    /// must have exactly two player slots in the world — anything else means
    /// the match layer called at the wrong time.
    pub fn start_elevator_sequence(&mut self, elevator_id: ActorId) -> Result<()> {
        log::info!("elevator {elevator_id:?} sequence start");
        ensure!(self.authority, "must only start an elevator sequence on the authority");
        let players: Vec<ActorId> = self.world.players().map(|a| a.id).collect();
        ensure!(players.len() == 2, "must be 2 players for the elevator to start");

        let start_pos = self
            .world
            .get(elevator_id)
            .and_then(|a| a.elevator())
            .ok_or_else(|| anyhow::anyhow!("{elevator_id:?} is not an elevator"))?
            .start_pos;

        let mut walls = Vec::with_capacity(WALL_RECTS.len());
        for (dx, dy, w, h) in WALL_RECTS {
            let id = self.world.spawn(
                ActorKind::Wall,
                Transform::at(start_pos + vec2(dx, dy), w, h),
                true,
                ActorExt::None,
            );
            self.register_transient(id);
            walls.push(id);
        }

        for (pid, off) in players.iter().zip(RIDER_OFFSETS) {
            if let Some(p) = self.world.get_mut(*pid) {
                p.tr.pos = start_pos + off;
                p.tr.vel = Vec2::ZERO;
            }
        }

        if let Some(ext) = self.world.get_mut(elevator_id).and_then(|a| a.elevator_mut()) {
            ext.walls = walls;
            ext.anim_ticks_left = ext.duration.max(1);
            ext.settle_ticks_left = 0;
            ext.is_elevating = true;
        }
        Ok(())
    }
}

/// Advance every elevator's sequence by one tick.
pub fn elevator_tick(state: &mut ServerState) {
    let ids: Vec<ActorId> = state
        .world
        .iter()
        .filter(|a| a.kind == ActorKind::Elevator)
        .map(|a| a.id)
        .collect();
    for id in ids {
        step_one(state, id);
    }
}

fn step_one(state: &mut ServerState, id: ActorId) {
    let Some(ext) = state.world.get(id).and_then(|a| a.elevator()) else {
        return;
    };
    let (anim_left, settle_left, walls) = (ext.anim_ticks_left, ext.settle_ticks_left, ext.walls.clone());
    let (start, end, duration, settle) = (ext.start_pos, ext.end_pos, ext.duration, ext.settle_ticks);

    if anim_left > 0 && walls.len() == WALL_RECTS.len() {
        let left = anim_left - 1;
        let bias = 1.0 - (left as f32 / duration as f32);
        let pos = start.lerp(end, bias);
        if let Some(a) = state.world.get_mut(id) {
            a.tr.pos = pos;
        }
        // The walls keep their fixed offsets around the moving platform.
        for (wid, (dx, dy, _, _)) in walls.iter().zip(WALL_RECTS) {
            if let Some(w) = state.world.get_mut(*wid) {
                w.tr.pos = pos + vec2(dx, dy);
            }
        }
        // Hold the riders at their cab offsets; interpolation on the far
        // side would otherwise fight the moving collision walls.
        let riders: Vec<ActorId> = state.world.players().map(|p| p.id).collect();
        for (rid, off) in riders.into_iter().zip(RIDER_OFFSETS) {
            if let Some(p) = state.world.get_mut(rid) {
                p.tr.pos = pos + off;
                p.tr.vel = Vec2::ZERO;
            }
        }
        if let Some(e) = state.world.get_mut(id).and_then(|a| a.elevator_mut()) {
            e.anim_ticks_left = left;
            if left == 0 {
                // Arrived: hold the walls for the grace period.
                e.settle_ticks_left = settle.max(1);
            }
        }
    } else if settle_left > 0 {
        let Some(e) = state.world.get_mut(id).and_then(|a| a.elevator_mut()) else {
            return;
        };
        e.settle_ticks_left -= 1;
        if e.settle_ticks_left == 0 {
            let walls = std::mem::take(&mut e.walls);
            e.is_elevating = false;
            for wid in walls {
                state.world.queue_kill(wid);
            }
            log::info!("elevator {id:?} settled, shaft walls queued for removal");
        }
    } else if anim_left > 0 {
        // Walls went missing mid-sequence (e.g. a reset tore them down):
        // abandon the run rather than animating an open platform.
        if let Some(e) = state.world.get_mut(id).and_then(|a| a.elevator_mut()) {
            e.anim_ticks_left = 0;
            e.is_elevating = false;
            e.walls.clear();
        }
    }
}

/// Start an idle elevator when a player walks into the approach band just
/// before its x-position. Owned by the match layer, not the elevator itself.
pub fn elevator_auto_trigger(state: &mut ServerState) -> Result<()> {
    if !state.match_state.started || state.match_state.ended {
        return Ok(());
    }
    let player_pos: Vec<Vec2> = state
        .world
        .players()
        .filter(|a| a.is_alive_pawn())
        .map(|a| a.tr.pos)
        .collect();
    let candidates: Vec<ActorId> = state
        .world
        .iter()
        .filter(|a| a.kind == ActorKind::Elevator)
        .filter(|a| {
            a.elevator().is_some_and(|e| {
                !e.is_elevating && e.anim_ticks_left == 0 && e.settle_ticks_left == 0 && e.walls.is_empty()
            })
        })
        .map(|a| a.id)
        .collect();
    for id in candidates {
        let Some((pos, band)) = state
            .world
            .get(id)
            .map(|a| (a.tr.pos, a.elevator().map(|e| e.trigger_band).unwrap_or(0.0)))
        else {
            continue;
        };
        let in_band = player_pos
            .iter()
            .any(|p| p.x >= pos.x - band && p.x < pos.x && (p.y - pos.y).abs() < CAB_H);
        if in_band {
            state.start_elevator_sequence(id)?;
        }
    }
    Ok(())
}

/// Whether a position lies inside the elevator cab.
#[must_use]
pub fn is_inside(elevator_pos: Vec2, pos: Vec2) -> bool {
    elevator_pos.x < pos.x
        && pos.x < elevator_pos.x + CAB_W
        && elevator_pos.y < pos.y
        && pos.y < elevator_pos.y + CAB_H
}

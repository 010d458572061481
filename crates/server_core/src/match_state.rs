//! Match session state machine.
//!
//! Idle -> Starting -> Playing -> {Won, Lost} -> Finalizing -> Idle, with a
//! Halted short-circuit from Playing back to Idle when a participant drops
//! out mid-match. Transition predicates are evaluated once per authoritative
//! tick in priority order; the first true predicate wins the tick.

use anyhow::{Result, ensure};
use glam::{Vec2, vec2};

use crate::ServerState;
use crate::actor::{ActorId, PLAYER_ONE, PLAYER_TWO, PawnRole};
use net_core::event::MatchEvent;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ReadyRule {
    /// Any possessed, ready slot is enough to start.
    AnyReady,
    /// Both slots must be possessed and ready.
    #[default]
    AllReady,
}

#[derive(Debug, Clone, Default)]
pub struct MatchState {
    pub started: bool,
    pub ended: bool,
    pub ready_rule: ReadyRule,
    /// Elevators spawned for this session.
    pub elevators: Vec<ActorId>,
    /// Enemy ids grouped by floor.
    pub floors: Vec<Vec<ActorId>>,
    pub boss: Option<ActorId>,
    /// Everything spawned since match start that a reset must sweep.
    transient: Vec<ActorId>,
}

impl MatchState {
    #[must_use]
    pub fn transient_count(&self) -> usize {
        self.transient.len()
    }
}

impl ServerState {
    /// Record a post-start spawn for the reset sweep. Each actor registers
    /// exactly once; re-registration from independent paths is collapsed.
    pub fn register_transient(&mut self, id: ActorId) {
        if !self.match_state.transient.contains(&id) {
            self.match_state.transient.push(id);
        }
    }

    /// Number of player slot actors in the world (the session invariant is
    /// exactly two; they persist across resets).
    #[must_use]
    pub fn players_present(&self) -> usize {
        self.world.players().count()
    }

    /// The configured readiness threshold for starting a match.
    #[must_use]
    pub fn ready_met(&self) -> bool {
        let ready = |id: ActorId| {
            self.world
                .get(id)
                .and_then(|a| a.player_slot())
                .is_some_and(|s| s.owner.is_some() && s.is_ready)
        };
        match self.match_state.ready_rule {
            ReadyRule::AnyReady => ready(PLAYER_ONE) || ready(PLAYER_TWO),
            ReadyRule::AllReady => ready(PLAYER_ONE) && ready(PLAYER_TWO),
        }
    }

    fn boss_dead_or_absent(&self) -> bool {
        match self.match_state.boss {
            Some(id) => self
                .world
                .get(id)
                .and_then(|a| a.pawn())
                .is_none_or(|p| p.hp.dead()),
            None => true,
        }
    }

    fn any_player_dead(&self) -> bool {
        self.world
            .players()
            .any(|a| a.pawn().is_some_and(|p| p.hp.dead()))
    }

    // Transition predicates, in priority order.

    #[must_use]
    pub fn can_start_match(&self) -> bool {
        !self.match_state.started
            && !self.match_state.ended
            && self.players_present() == 2
            && self.ready_met()
    }

    #[must_use]
    pub fn can_halt_match(&self) -> bool {
        self.match_state.started
            && !self.match_state.ended
            && self.players_present() == 2
            && !self.ready_met()
    }

    #[must_use]
    pub fn can_win_match(&self) -> bool {
        self.match_state.started && !self.match_state.ended && self.boss_dead_or_absent()
    }

    #[must_use]
    pub fn can_lose_match(&self) -> bool {
        self.match_state.started && !self.match_state.ended && self.any_player_dead()
    }

    #[must_use]
    pub fn can_finalize_match(&self) -> bool {
        self.match_state.started
            && self.match_state.ended
            && self.players_present() == 2
            && !self.ready_met()
    }

    /// Evaluate the transition predicates for this tick. First true wins —
    /// the ordering matters at edges where several hold simultaneously.
    pub fn match_tick(&mut self) -> Result<()> {
        if self.can_start_match() {
            self.start_match()?;
        } else if self.can_halt_match() {
            self.reset_match()?;
            metrics::counter!("match.halts_total").increment(1);
            self.events.push(MatchEvent::MatchHalt);
        } else if self.can_win_match() {
            self.match_state.ended = true;
            log::info!("match won at tick {}", self.tick);
            metrics::counter!("match.wins_total").increment(1);
            self.events.push(MatchEvent::MatchWin);
        } else if self.can_lose_match() {
            self.match_state.ended = true;
            log::info!("match lost at tick {}", self.tick);
            metrics::counter!("match.losses_total").increment(1);
            self.events.push(MatchEvent::MatchLose);
        } else if self.can_finalize_match() {
            self.reset_match()?;
            self.events.push(MatchEvent::MatchFinalize);
        }
        Ok(())
    }

    /// Spawn the session content (elevators, per-floor waves, armed boss,
    /// loose pickups), registering everything as transient.
    pub fn start_match(&mut self) -> Result<()> {
        ensure!(self.authority, "must only start a match on the authority");
        ensure!(
            !self.match_state.started && !self.match_state.ended,
            "start_match called outside Idle"
        );

        for cfg in self.level.elevators.clone() {
            let id = self.spawn_elevator(&cfg);
            self.register_transient(id);
            self.match_state.elevators.push(id);
        }

        for floor in self.level.floors.clone() {
            let mut wave = Vec::with_capacity(floor.goons.len());
            for (x, y) in floor.goons {
                let goon = self.spawn_goon(vec2(x, y));
                let fist = self.spawn_fist(vec2(x, y));
                self.register_transient(goon);
                self.register_transient(fist);
                self.assign_weapon_to_slot(goon, fist)?;
                wave.push(goon);
            }
            for (x, y) in floor.loose_weapons {
                let fist = self.spawn_fist(vec2(x, y));
                self.register_transient(fist);
            }
            self.match_state.floors.push(wave);
        }

        let (bx, by) = self.level.boss_spawn;
        let boss = self.spawn_boss(vec2(bx, by));
        let boss_fist = self.spawn_fist(vec2(bx, by));
        self.register_transient(boss);
        self.register_transient(boss_fist);
        self.assign_weapon_to_slot(boss, boss_fist)?;
        self.match_state.boss = Some(boss);

        self.match_state.started = true;
        log::info!(
            "match started: {} elevators, {} floors, boss {boss:?}",
            self.match_state.elevators.len(),
            self.match_state.floors.len()
        );
        metrics::counter!("match.starts_total").increment(1);
        self.events.push(MatchEvent::MatchStart);
        Ok(())
    }

    /// Full session reset back to Idle: player slots are unpossessed, healed
    /// and teleported to their fixed spawns; every transient actor is queued
    /// for the end-of-tick cull; the bookkeeping is cleared.
    pub fn reset_match(&mut self) -> Result<()> {
        ensure!(self.authority, "must only reset a match on the authority");
        ensure!(
            self.players_present() == 2,
            "reset with wrong player count: {}",
            self.players_present()
        );

        let initial_health = self.tuning.player.initial_health;
        let spawns = self.level.player_spawns;
        for (slot_id, (sx, sy)) in [PLAYER_ONE, PLAYER_TWO].into_iter().zip(spawns) {
            self.drop_weapon(slot_id);
            if let Some(actor) = self.world.get_mut(slot_id) {
                actor.tr.pos = vec2(sx, sy);
                actor.tr.vel = Vec2::ZERO;
                if let Some(pawn) = actor.pawn_mut() {
                    pawn.hp = crate::actor::Health::full(initial_health);
                    pawn.called_on_died = false;
                    if let PawnRole::Player(slot) = &mut pawn.role {
                        slot.owner = None;
                        slot.is_ready = false;
                        slot.grab_candidate = None;
                    }
                }
            }
        }

        self.match_state.started = false;
        self.match_state.ended = false;
        let transient = std::mem::take(&mut self.match_state.transient);
        let count = transient.len();
        for id in transient {
            self.world.queue_kill(id);
        }
        self.match_state.elevators.clear();
        self.match_state.floors.clear();
        self.match_state.boss = None;
        log::info!("match reset: {count} transient actors queued for removal");
        Ok(())
    }

    /// Drain the lifecycle events emitted since the last call. The host
    /// forwards them to clients alongside the snapshot.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }
}

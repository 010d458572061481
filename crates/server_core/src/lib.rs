//! server_core: the authoritative match/actor simulation.
//!
//! Owns the world of actors (player slots, enemies, weapons, elevators,
//! shaft walls), the match session state machine and the fixed-order tick
//! that advances everything. Clients hold read-only mirrors fed from
//! [`ServerState::tick_snapshot`]; nothing outside the tick mutates state.

use glam::{Vec2, vec2};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use data_runtime::configs::level::{ElevatorCfg, LevelCfg};
use data_runtime::configs::pawns::{EnemyTuning, PawnTuning};
use net_core::event::MatchEvent;
use net_core::snapshot::{ElevatorRep, EnemyRep, PlayerRep, TickSnapshot, WeaponRep};

pub mod actor;
mod input;
pub mod match_state;
mod pawn;
pub mod schedule;
pub mod systems;
mod weapon;
pub mod world;

pub use actor::{
    Actor, ActorExt, ActorId, ActorKind, AiPhase, ElevatorExt, EnemyAi, Health, PLAYER_ONE,
    PLAYER_TWO, PawnExt, PawnRole, PeerId, PlayerSlot, Transform, WeaponExt,
};
pub use match_state::{MatchState, ReadyRule};
pub use world::World;

pub const SNAPSHOT_VERSION: u8 = 1;

#[derive(Debug)]
pub struct ServerState {
    /// True on the server process. Authority-gated operations check this;
    /// a structurally parallel client copy must never pass the gates.
    pub authority: bool,
    pub world: World,
    pub match_state: MatchState,
    pub tuning: PawnTuning,
    pub level: LevelCfg,
    pub tick: u32,
    /// Walkable surface heights, ascending; derived from the level floors.
    pub(crate) supports: Vec<f32>,
    pub(crate) rng: SmallRng,
    pub(crate) events: Vec<MatchEvent>,
}

impl ServerState {
    /// Authoritative state with an OS-seeded RNG.
    #[must_use]
    pub fn new(tuning: PawnTuning, level: LevelCfg) -> Self {
        Self::build(tuning, level, SmallRng::from_os_rng(), true)
    }

    /// Authoritative state with a fixed seed, for deterministic tests.
    #[must_use]
    pub fn with_seed(tuning: PawnTuning, level: LevelCfg, seed: u64) -> Self {
        Self::build(tuning, level, SmallRng::seed_from_u64(seed), true)
    }

    /// Non-authoritative structural copy. Exists so the permission gates are
    /// exercisable; a real client drives `client_core` instead.
    #[must_use]
    pub fn new_replica(tuning: PawnTuning, level: LevelCfg) -> Self {
        Self::build(tuning, level, SmallRng::seed_from_u64(0), false)
    }

    fn build(tuning: PawnTuning, level: LevelCfg, rng: SmallRng, authority: bool) -> Self {
        let mut supports: Vec<f32> = level.floors.iter().map(|fl| fl.surface_y).collect();
        supports.sort_by(f32::total_cmp);
        supports.dedup();

        let mut state = Self {
            authority,
            world: World::new(),
            match_state: MatchState::default(),
            tuning,
            level,
            tick: 0,
            supports,
            rng,
            events: Vec::new(),
        };
        // The two player slots exist for the whole session; only their
        // possession changes across joins, disconnects and resets.
        let pt = state.tuning.player.clone();
        for (slot_id, (sx, sy)) in [PLAYER_ONE, PLAYER_TWO]
            .into_iter()
            .zip(state.level.player_spawns)
        {
            state.world.spawn_reserved(
                slot_id,
                ActorKind::Player,
                Transform::at(vec2(sx, sy), pt.width, pt.height),
                ActorExt::Pawn(PawnExt::new(
                    pt.initial_health,
                    PawnRole::Player(PlayerSlot::default()),
                )),
            );
        }
        state
    }

    fn ms_to_ticks(&self, ms: u32) -> u32 {
        (ms.saturating_mul(self.level.tick_hz) / 1000).max(1)
    }

    fn enemy_ai_from(&self, t: &EnemyTuning) -> EnemyAi {
        let follow = (
            self.ms_to_ticks(t.follow_duration_ms.0),
            self.ms_to_ticks(t.follow_duration_ms.1),
        );
        let wait = (
            self.ms_to_ticks(t.wait_duration_ms.0),
            self.ms_to_ticks(t.wait_duration_ms.1),
        );
        EnemyAi::dormant(t.move_speed, follow, wait, t.attack_phase_radius)
    }

    pub fn spawn_goon(&mut self, pos: Vec2) -> ActorId {
        let t = self.tuning.goon.clone();
        let ai = self.enemy_ai_from(&t);
        self.world.spawn(
            ActorKind::Goon,
            Transform::at(pos, t.width, t.height),
            false,
            ActorExt::Pawn(PawnExt::new(t.initial_health, PawnRole::Enemy(ai))),
        )
    }

    pub fn spawn_boss(&mut self, pos: Vec2) -> ActorId {
        let t = self.tuning.boss.clone();
        let ai = self.enemy_ai_from(&t);
        let id = self.world.spawn(
            ActorKind::Boss,
            Transform::at(pos, t.width, t.height),
            false,
            ActorExt::Pawn(PawnExt::new(t.initial_health, PawnRole::Enemy(ai))),
        );
        log::info!("spawned boss {id:?} (hp={})", t.initial_health);
        id
    }

    pub fn spawn_fist(&mut self, pos: Vec2) -> ActorId {
        let t = &self.tuning.fist;
        self.world.spawn(
            ActorKind::Fist,
            Transform::at(pos, 8.0, 8.0),
            false,
            ActorExt::Weapon(WeaponExt {
                wielder: None,
                attack_radius: t.attack_radius,
                damage: t.damage,
            }),
        )
    }

    pub fn spawn_elevator(&mut self, cfg: &ElevatorCfg) -> ActorId {
        let start = vec2(cfg.start.0, cfg.start.1);
        self.world.spawn(
            ActorKind::Elevator,
            Transform::at(start, 112.0, 16.0),
            true,
            ActorExt::Elevator(ElevatorExt {
                start_pos: start,
                end_pos: vec2(cfg.end.0, cfg.end.1),
                duration: cfg.duration_ticks.max(1),
                anim_ticks_left: 0,
                settle_ticks: cfg.settle_ticks,
                settle_ticks_left: 0,
                is_elevating: false,
                trigger_band: cfg.trigger_band,
                walls: Vec::new(),
            }),
        )
    }

    /// Advance the authoritative simulation by one tick. No-op on a
    /// non-authoritative copy; clients only ever apply snapshots.
    pub fn step_authoritative(&mut self) -> anyhow::Result<()> {
        if !self.authority {
            return Ok(());
        }
        let t0 = std::time::Instant::now();
        self.tick = self.tick.wrapping_add(1);
        schedule::run_tick(self)?;
        let ms = t0.elapsed().as_secs_f64() * 1000.0;
        metrics::histogram!("tick.ms").record(ms);
        Ok(())
    }

    fn opt_id(id: Option<ActorId>) -> i32 {
        id.map_or(0, |i| i.0 as i32)
    }

    /// Build the consolidated snapshot replicated to clients this tick.
    #[must_use]
    pub fn tick_snapshot(&self) -> TickSnapshot {
        let mut players: Vec<PlayerRep> = Vec::with_capacity(2);
        let mut enemies = Vec::new();
        let mut weapons = Vec::new();
        let mut elevators = Vec::new();
        for a in self.world.iter() {
            match a.kind {
                ActorKind::Player => {
                    let Some(pawn) = a.pawn() else { continue };
                    let Some(slot) = a.player_slot() else { continue };
                    players.push(PlayerRep {
                        id: a.id.0 as i32,
                        pos: a.tr.pos.to_array(),
                        vel: a.tr.vel.to_array(),
                        health: pawn.hp.hp,
                        is_facing_right: u8::from(pawn.facing_right),
                        is_ready: u8::from(slot.is_ready),
                        weapon_slot: Self::opt_id(pawn.weapon_slot),
                        grab_candidate: Self::opt_id(slot.grab_candidate),
                    });
                }
                ActorKind::Goon | ActorKind::Boss => {
                    let Some(pawn) = a.pawn() else { continue };
                    enemies.push(EnemyRep {
                        id: a.id.0 as i32,
                        archetype: u8::from(a.kind == ActorKind::Boss),
                        pos: a.tr.pos.to_array(),
                        health: pawn.hp.hp,
                        is_facing_right: u8::from(pawn.facing_right),
                        weapon_slot: Self::opt_id(pawn.weapon_slot),
                    });
                }
                ActorKind::Fist => {
                    let Some(w) = a.weapon() else { continue };
                    weapons.push(WeaponRep {
                        id: a.id.0 as i32,
                        pos: a.tr.pos.to_array(),
                        wielder_id: Self::opt_id(w.wielder),
                    });
                }
                ActorKind::Elevator => {
                    let Some(e) = a.elevator() else { continue };
                    elevators.push(ElevatorRep {
                        id: a.id.0 as i32,
                        pos: a.tr.pos.to_array(),
                        is_elevating: u8::from(e.is_elevating),
                    });
                }
                ActorKind::Wall => {}
            }
        }
        players.sort_by_key(|p| p.id);
        TickSnapshot {
            v: SNAPSHOT_VERSION,
            tick: self.tick,
            players,
            enemies,
            weapons,
            elevators,
        }
    }
}

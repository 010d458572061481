//! Authoritative actor store types.
//!
//! One tagged `Actor` kind set replaces the original per-class inheritance
//! chains: every actor shares the base transform fields, and kind-specific
//! state lives in `ActorExt`. Capability accessors (`pawn()`, `weapon()`, …)
//! stand in for virtual dispatch.

use glam::Vec2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u32);

/// Network identity of a connected human. Distinct from `ActorId`: a player
/// actor exists per slot regardless of whether a human possesses it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PeerId(pub u32);

/// Reserved world identities for the two player slots. Allocation of all
/// other ids starts above these, so id 0 stays free as the wire sentinel.
pub const PLAYER_ONE: ActorId = ActorId(1);
pub const PLAYER_TWO: ActorId = ActorId(2);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActorKind {
    Player,
    Goon,
    Boss,
    Fist,
    Elevator,
    Wall,
}

#[derive(Copy, Clone, Debug)]
pub struct Transform {
    pub pos: Vec2,
    pub vel: Vec2,
    pub w: f32,
    pub h: f32,
}

impl Transform {
    #[must_use]
    pub fn at(pos: Vec2, w: f32, h: f32) -> Self {
        Self { pos, vel: Vec2::ZERO, w, h }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Health {
    pub hp: f32,
    pub max: f32,
}

impl Health {
    #[must_use]
    pub fn full(max: f32) -> Self {
        Self { hp: max, max }
    }
    #[inline]
    pub fn alive(&self) -> bool {
        self.hp > 0.0
    }
    #[inline]
    pub fn dead(&self) -> bool {
        !self.alive()
    }
}

#[derive(Clone, Debug)]
pub struct Actor {
    pub id: ActorId,
    pub kind: ActorKind,
    pub tr: Transform,
    pub is_static: bool,
    pub ext: ActorExt,
}

#[derive(Clone, Debug)]
pub enum ActorExt {
    Pawn(PawnExt),
    Weapon(WeaponExt),
    Elevator(ElevatorExt),
    None,
}

#[derive(Clone, Debug)]
pub struct PawnExt {
    pub hp: Health,
    /// Held weapon. At most one; the weapon's `wielder` must point back.
    pub weapon_slot: Option<ActorId>,
    pub facing_right: bool,
    /// One-shot latch: the died transition fires exactly once per life.
    pub called_on_died: bool,
    pub role: PawnRole,
}

impl PawnExt {
    #[must_use]
    pub fn new(hp: f32, role: PawnRole) -> Self {
        Self {
            hp: Health::full(hp),
            weapon_slot: None,
            facing_right: true,
            called_on_died: false,
            role,
        }
    }
}

#[derive(Clone, Debug)]
pub enum PawnRole {
    Player(PlayerSlot),
    Enemy(EnemyAi),
}

#[derive(Clone, Debug, Default)]
pub struct PlayerSlot {
    /// Possessing human, `None` while unpossessed.
    pub owner: Option<PeerId>,
    pub is_ready: bool,
    /// Nearest unwielded weapon in pickup range; recomputed every tick.
    pub grab_candidate: Option<ActorId>,
}

/// Which of the two AI phases is driving the enemy this tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AiPhase {
    /// Not yet activated; no phase logic runs.
    Dormant,
    /// Move toward the attack target, facing the direction of travel.
    Advancing,
    /// Hold position, face the target, swing on phase entry when in range.
    Waiting,
}

#[derive(Clone, Debug)]
pub struct EnemyAi {
    pub phase: AiPhase,
    /// Ticks until the next phase transition; advanced by the tick loop.
    pub ticks_left: u32,
    pub target: Option<ActorId>,
    /// Previous pick, used by the boss's round-robin targeting.
    pub last_target: Option<ActorId>,
    pub move_speed: f32,
    pub follow_ticks: (u32, u32),
    pub wait_ticks: (u32, u32),
    pub attack_phase_radius: f32,
}

impl EnemyAi {
    #[must_use]
    pub fn dormant(move_speed: f32, follow: (u32, u32), wait: (u32, u32), radius: f32) -> Self {
        Self {
            phase: AiPhase::Dormant,
            ticks_left: 0,
            target: None,
            last_target: None,
            move_speed,
            follow_ticks: follow,
            wait_ticks: wait,
            attack_phase_radius: radius,
        }
    }
}

#[derive(Clone, Debug)]
pub struct WeaponExt {
    /// Wielding pawn. `None` is the only "unwielded" representation; no
    /// sentinel id is ever reused for this.
    pub wielder: Option<ActorId>,
    pub attack_radius: f32,
    pub damage: f32,
}

#[derive(Clone, Debug)]
pub struct ElevatorExt {
    pub start_pos: Vec2,
    pub end_pos: Vec2,
    /// Total descent length in ticks.
    pub duration: u32,
    /// Countdown while elevating; 0 when idle or settled.
    pub anim_ticks_left: u32,
    /// Grace delay between arrival and wall teardown.
    pub settle_ticks: u32,
    pub settle_ticks_left: u32,
    pub is_elevating: bool,
    /// Width of the approach band that auto-starts the sequence.
    pub trigger_band: f32,
    /// Shaft wall ids, populated for the duration of a sequence.
    pub walls: Vec<ActorId>,
}

impl Actor {
    #[must_use]
    pub fn pawn(&self) -> Option<&PawnExt> {
        match &self.ext {
            ActorExt::Pawn(p) => Some(p),
            _ => None,
        }
    }

    pub fn pawn_mut(&mut self) -> Option<&mut PawnExt> {
        match &mut self.ext {
            ActorExt::Pawn(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn weapon(&self) -> Option<&WeaponExt> {
        match &self.ext {
            ActorExt::Weapon(w) => Some(w),
            _ => None,
        }
    }

    pub fn weapon_mut(&mut self) -> Option<&mut WeaponExt> {
        match &mut self.ext {
            ActorExt::Weapon(w) => Some(w),
            _ => None,
        }
    }

    #[must_use]
    pub fn elevator(&self) -> Option<&ElevatorExt> {
        match &self.ext {
            ActorExt::Elevator(e) => Some(e),
            _ => None,
        }
    }

    pub fn elevator_mut(&mut self) -> Option<&mut ElevatorExt> {
        match &mut self.ext {
            ActorExt::Elevator(e) => Some(e),
            _ => None,
        }
    }

    #[must_use]
    pub fn player_slot(&self) -> Option<&PlayerSlot> {
        match self.pawn() {
            Some(PawnExt { role: PawnRole::Player(s), .. }) => Some(s),
            _ => None,
        }
    }

    pub fn player_slot_mut(&mut self) -> Option<&mut PlayerSlot> {
        match self.pawn_mut() {
            Some(PawnExt { role: PawnRole::Player(s), .. }) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn enemy_ai(&self) -> Option<&EnemyAi> {
        match self.pawn() {
            Some(PawnExt { role: PawnRole::Enemy(ai), .. }) => Some(ai),
            _ => None,
        }
    }

    pub fn enemy_ai_mut(&mut self) -> Option<&mut EnemyAi> {
        match self.pawn_mut() {
            Some(PawnExt { role: PawnRole::Enemy(ai), .. }) => Some(ai),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_alive_pawn(&self) -> bool {
        self.pawn().is_some_and(|p| p.hp.alive())
    }
}

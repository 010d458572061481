//! Shadow views of replicated actors.
//!
//! Each view mirrors exactly the fields its class declares in the wire
//! scheme; `sync_to` overwrites all of them from an authoritative record.
//! A partially synced view desyncs that field forever, so none of these
//! methods get selective.

use glam::{Vec2, vec2};

use net_core::snapshot::{ElevatorRep, EnemyRep, PlayerRep, WeaponRep};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub id: i32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub health: f32,
    pub is_facing_right: bool,
    pub is_ready: bool,
    pub weapon_slot: i32,
    pub grab_candidate: i32,
}

impl PlayerView {
    #[must_use]
    pub fn from_rep(r: &PlayerRep) -> Self {
        let mut v = Self {
            id: r.id,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            health: 0.0,
            is_facing_right: false,
            is_ready: false,
            weapon_slot: 0,
            grab_candidate: 0,
        };
        v.sync_to(r);
        v
    }

    pub fn sync_to(&mut self, r: &PlayerRep) {
        self.id = r.id;
        self.pos = vec2(r.pos[0], r.pos[1]);
        self.vel = vec2(r.vel[0], r.vel[1]);
        self.health = r.health;
        self.is_facing_right = r.is_facing_right != 0;
        self.is_ready = r.is_ready != 0;
        self.weapon_slot = r.weapon_slot;
        self.grab_candidate = r.grab_candidate;
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    #[must_use]
    pub fn is_packing(&self) -> bool {
        self.weapon_slot != 0
    }

    #[must_use]
    pub fn can_grab(&self) -> bool {
        !self.is_packing() && self.grab_candidate != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyView {
    pub id: i32,
    pub archetype: u8,
    pub pos: Vec2,
    pub health: f32,
    pub is_facing_right: bool,
    pub weapon_slot: i32,
}

impl EnemyView {
    #[must_use]
    pub fn from_rep(r: &EnemyRep) -> Self {
        let mut v = Self {
            id: r.id,
            archetype: 0,
            pos: Vec2::ZERO,
            health: 0.0,
            is_facing_right: false,
            weapon_slot: 0,
        };
        v.sync_to(r);
        v
    }

    pub fn sync_to(&mut self, r: &EnemyRep) {
        self.id = r.id;
        self.archetype = r.archetype;
        self.pos = vec2(r.pos[0], r.pos[1]);
        self.health = r.health;
        self.is_facing_right = r.is_facing_right != 0;
        self.weapon_slot = r.weapon_slot;
    }

    #[must_use]
    pub fn is_boss(&self) -> bool {
        self.archetype == 1
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponView {
    pub id: i32,
    pub pos: Vec2,
    pub wielder_id: i32,
}

impl WeaponView {
    #[must_use]
    pub fn from_rep(r: &WeaponRep) -> Self {
        let mut v = Self { id: r.id, pos: Vec2::ZERO, wielder_id: 0 };
        v.sync_to(r);
        v
    }

    pub fn sync_to(&mut self, r: &WeaponRep) {
        self.id = r.id;
        self.pos = vec2(r.pos[0], r.pos[1]);
        self.wielder_id = r.wielder_id;
    }

    #[must_use]
    pub fn is_wielded(&self) -> bool {
        self.wielder_id != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevatorView {
    pub id: i32,
    pub pos: Vec2,
    pub is_elevating: bool,
}

impl ElevatorView {
    #[must_use]
    pub fn from_rep(r: &ElevatorRep) -> Self {
        let mut v = Self { id: r.id, pos: Vec2::ZERO, is_elevating: false };
        v.sync_to(r);
        v
    }

    pub fn sync_to(&mut self, r: &ElevatorRep) {
        self.id = r.id;
        self.pos = vec2(r.pos[0], r.pos[1]);
        self.is_elevating = r.is_elevating != 0;
    }
}

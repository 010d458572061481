//! Per-class replication field schemes.
//!
//! The replication substrate consumes, for every replicated class, an ordered
//! list of `(field, wire type)` pairs. The encoders in `snapshot.rs` write
//! fields in exactly this order; a scheme change without a matching codec
//! change is a silent desync, so the tests cross-check the two.
//!
//! Conventions: booleans travel as `U8` (the substrate has no boolean
//! primitive); optional actor references travel as `I32` with `0` meaning
//! "none" (actor ids start at 1, so the sentinel never collides with a live
//! object).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    F32,
    I32,
    I16,
    I8,
    U8,
    Str,
}

impl WireType {
    /// Encoded size in bytes, or `None` for variable-length types.
    #[must_use]
    pub fn size(self) -> Option<usize> {
        match self {
            WireType::F32 | WireType::I32 => Some(4),
            WireType::I16 => Some(2),
            WireType::I8 | WireType::U8 => Some(1),
            WireType::Str => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub name: &'static str,
    pub ty: WireType,
}

const fn f(name: &'static str, ty: WireType) -> FieldDef {
    FieldDef { name, ty }
}

/// Classes with a declared scheme replicate field-by-field in scheme order.
pub trait NetScheme {
    const SCHEME: &'static [FieldDef];

    /// Fixed encoded size of one record, if every field is fixed-width.
    #[must_use]
    fn scheme_size() -> Option<usize> {
        Self::SCHEME.iter().try_fold(0usize, |acc, fd| Some(acc + fd.ty.size()?))
    }
}

pub const PLAYER_SCHEME: &[FieldDef] = &[
    f("id", WireType::I32),
    f("pos_x", WireType::F32),
    f("pos_y", WireType::F32),
    f("vel_x", WireType::F32),
    f("vel_y", WireType::F32),
    f("health", WireType::F32),
    f("is_facing_right", WireType::U8),
    f("is_ready", WireType::U8),
    f("weapon_slot", WireType::I32),
    f("grab_candidate", WireType::I32),
];

pub const ENEMY_SCHEME: &[FieldDef] = &[
    f("id", WireType::I32),
    f("archetype", WireType::U8),
    f("pos_x", WireType::F32),
    f("pos_y", WireType::F32),
    f("health", WireType::F32),
    f("is_facing_right", WireType::U8),
    f("weapon_slot", WireType::I32),
];

pub const WEAPON_SCHEME: &[FieldDef] = &[
    f("id", WireType::I32),
    f("pos_x", WireType::F32),
    f("pos_y", WireType::F32),
    f("wielder_id", WireType::I32),
];

pub const ELEVATOR_SCHEME: &[FieldDef] = &[
    f("id", WireType::I32),
    f("pos_x", WireType::F32),
    f("pos_y", WireType::F32),
    f("is_elevating", WireType::U8),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemes_are_fixed_width() {
        for scheme in [PLAYER_SCHEME, ENEMY_SCHEME, WEAPON_SCHEME, ELEVATOR_SCHEME] {
            for fd in scheme {
                assert!(fd.ty.size().is_some(), "variable-width field {}", fd.name);
            }
        }
    }

    #[test]
    fn field_names_are_unique_per_scheme() {
        for scheme in [PLAYER_SCHEME, ENEMY_SCHEME, WEAPON_SCHEME, ELEVATOR_SCHEME] {
            for (i, a) in scheme.iter().enumerate() {
                for b in &scheme[i + 1..] {
                    assert_ne!(a.name, b.name);
                }
            }
        }
    }
}

//! Snapshot encode/decode for the per-tick replicated world state.
//!
//! Encoding is a naive little-endian walk of each class's field scheme (see
//! `wire.rs`); later phases can swap in delta encoders without breaking the
//! traits. Clients apply a decoded snapshot by overwriting every declared
//! field on their local shadow — no more, no fewer.

use crate::wire::{ELEVATOR_SCHEME, ENEMY_SCHEME, FieldDef, NetScheme, PLAYER_SCHEME, WEAPON_SCHEME};

/// Leading tag distinguishing snapshot payloads from commands/events.
pub const TAG_SNAPSHOT: u8 = 0xB1;

/// Types implementing snapshot encoding write themselves into a byte buffer.
pub trait SnapshotEncode {
    fn encode(&self, out: &mut Vec<u8>);
}

/// Types implementing snapshot decoding reconstruct themselves from a byte slice.
pub trait SnapshotDecode: Sized {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self>;
}

pub(crate) fn take<const N: usize>(inp: &mut &[u8]) -> anyhow::Result<[u8; N]> {
    if inp.len() < N {
        anyhow::bail!("short read");
    }
    let (a, b) = inp.split_at(N);
    *inp = b;
    let mut buf = [0u8; N];
    buf.copy_from_slice(a);
    Ok(buf)
}

fn take_f32(inp: &mut &[u8]) -> anyhow::Result<f32> {
    Ok(f32::from_le_bytes(take::<4>(inp)?))
}

fn take_i32(inp: &mut &[u8]) -> anyhow::Result<i32> {
    Ok(i32::from_le_bytes(take::<4>(inp)?))
}

fn take_u32(inp: &mut &[u8]) -> anyhow::Result<u32> {
    Ok(u32::from_le_bytes(take::<4>(inp)?))
}

fn take_u8(inp: &mut &[u8]) -> anyhow::Result<u8> {
    Ok(take::<1>(inp)?[0])
}

/// Replicated state of a player slot. Scheme: [`PLAYER_SCHEME`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerRep {
    pub id: i32,
    pub pos: [f32; 2],
    pub vel: [f32; 2],
    pub health: f32,
    pub is_facing_right: u8,
    pub is_ready: u8,
    /// Held weapon id, 0 when unarmed.
    pub weapon_slot: i32,
    /// Nearest grabbable weapon id, 0 when none in range.
    pub grab_candidate: i32,
}

impl NetScheme for PlayerRep {
    const SCHEME: &'static [FieldDef] = PLAYER_SCHEME;
}

/// Replicated state of an enemy pawn. Scheme: [`ENEMY_SCHEME`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyRep {
    pub id: i32,
    /// 0 = goon, 1 = boss.
    pub archetype: u8,
    pub pos: [f32; 2],
    pub health: f32,
    pub is_facing_right: u8,
    pub weapon_slot: i32,
}

impl NetScheme for EnemyRep {
    const SCHEME: &'static [FieldDef] = ENEMY_SCHEME;
}

/// Replicated state of a weapon. Scheme: [`WEAPON_SCHEME`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponRep {
    pub id: i32,
    pub pos: [f32; 2],
    /// Wielding pawn id, 0 when unwielded.
    pub wielder_id: i32,
}

impl NetScheme for WeaponRep {
    const SCHEME: &'static [FieldDef] = WEAPON_SCHEME;
}

/// Replicated state of an elevator platform. Scheme: [`ELEVATOR_SCHEME`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevatorRep {
    pub id: i32,
    pub pos: [f32; 2],
    pub is_elevating: u8,
}

impl NetScheme for ElevatorRep {
    const SCHEME: &'static [FieldDef] = ELEVATOR_SCHEME;
}

/// Consolidated per-tick world snapshot sent to clients.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickSnapshot {
    pub v: u8,
    pub tick: u32,
    pub players: Vec<PlayerRep>,
    pub enemies: Vec<EnemyRep>,
    pub weapons: Vec<WeaponRep>,
    pub elevators: Vec<ElevatorRep>,
}

impl SnapshotEncode for PlayerRep {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.id.to_le_bytes());
        for c in self.pos {
            out.extend_from_slice(&c.to_le_bytes());
        }
        for c in self.vel {
            out.extend_from_slice(&c.to_le_bytes());
        }
        out.extend_from_slice(&self.health.to_le_bytes());
        out.push(self.is_facing_right);
        out.push(self.is_ready);
        out.extend_from_slice(&self.weapon_slot.to_le_bytes());
        out.extend_from_slice(&self.grab_candidate.to_le_bytes());
    }
}

impl SnapshotDecode for PlayerRep {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            id: take_i32(inp)?,
            pos: [take_f32(inp)?, take_f32(inp)?],
            vel: [take_f32(inp)?, take_f32(inp)?],
            health: take_f32(inp)?,
            is_facing_right: take_u8(inp)?,
            is_ready: take_u8(inp)?,
            weapon_slot: take_i32(inp)?,
            grab_candidate: take_i32(inp)?,
        })
    }
}

impl SnapshotEncode for EnemyRep {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.id.to_le_bytes());
        out.push(self.archetype);
        for c in self.pos {
            out.extend_from_slice(&c.to_le_bytes());
        }
        out.extend_from_slice(&self.health.to_le_bytes());
        out.push(self.is_facing_right);
        out.extend_from_slice(&self.weapon_slot.to_le_bytes());
    }
}

impl SnapshotDecode for EnemyRep {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            id: take_i32(inp)?,
            archetype: take_u8(inp)?,
            pos: [take_f32(inp)?, take_f32(inp)?],
            health: take_f32(inp)?,
            is_facing_right: take_u8(inp)?,
            weapon_slot: take_i32(inp)?,
        })
    }
}

impl SnapshotEncode for WeaponRep {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.id.to_le_bytes());
        for c in self.pos {
            out.extend_from_slice(&c.to_le_bytes());
        }
        out.extend_from_slice(&self.wielder_id.to_le_bytes());
    }
}

impl SnapshotDecode for WeaponRep {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            id: take_i32(inp)?,
            pos: [take_f32(inp)?, take_f32(inp)?],
            wielder_id: take_i32(inp)?,
        })
    }
}

impl SnapshotEncode for ElevatorRep {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.id.to_le_bytes());
        for c in self.pos {
            out.extend_from_slice(&c.to_le_bytes());
        }
        out.push(self.is_elevating);
    }
}

impl SnapshotDecode for ElevatorRep {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            id: take_i32(inp)?,
            pos: [take_f32(inp)?, take_f32(inp)?],
            is_elevating: take_u8(inp)?,
        })
    }
}

fn encode_list<T: SnapshotEncode>(list: &[T], out: &mut Vec<u8>) {
    let n = u32::try_from(list.len()).expect("list len fits u32");
    out.extend_from_slice(&n.to_le_bytes());
    for item in list {
        item.encode(out);
    }
}

fn decode_list<T: SnapshotDecode>(inp: &mut &[u8]) -> anyhow::Result<Vec<T>> {
    let n = take_u32(inp)? as usize;
    let mut out = Vec::with_capacity(n.min(1024));
    for _ in 0..n {
        out.push(T::decode(inp)?);
    }
    Ok(out)
}

impl SnapshotEncode for TickSnapshot {
    fn encode(&self, out: &mut Vec<u8>) {
        out.push(TAG_SNAPSHOT);
        out.push(self.v);
        out.extend_from_slice(&self.tick.to_le_bytes());
        encode_list(&self.players, out);
        encode_list(&self.enemies, out);
        encode_list(&self.weapons, out);
        encode_list(&self.elevators, out);
    }
}

impl SnapshotDecode for TickSnapshot {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self> {
        let tag = take_u8(inp)?;
        if tag != TAG_SNAPSHOT {
            anyhow::bail!("not a snapshot tag: {tag:#x}");
        }
        Ok(Self {
            v: take_u8(inp)?,
            tick: take_u32(inp)?,
            players: decode_list(inp)?,
            enemies: decode_list(inp)?,
            weapons: decode_list(inp)?,
            elevators: decode_list(inp)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rep_encoding_matches_declared_scheme_size() {
        let p = PlayerRep {
            id: 1,
            pos: [1.0, 2.0],
            vel: [0.0, 0.0],
            health: 100.0,
            is_facing_right: 1,
            is_ready: 0,
            weapon_slot: 0,
            grab_candidate: 7,
        };
        let mut buf = Vec::new();
        p.encode(&mut buf);
        assert_eq!(Some(buf.len()), PlayerRep::scheme_size());

        let e = EnemyRep {
            id: 9,
            archetype: 0,
            pos: [3.0, 4.0],
            health: 10.0,
            is_facing_right: 0,
            weapon_slot: 10,
        };
        buf.clear();
        e.encode(&mut buf);
        assert_eq!(Some(buf.len()), EnemyRep::scheme_size());
    }
}

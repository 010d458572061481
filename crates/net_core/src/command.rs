//! Client->Server commands (authoritative input/actions).
//! Minimal binary encoding with a leading tag distinct from snapshots.

use crate::snapshot::{SnapshotDecode, SnapshotEncode, take};

pub const TAG_CLIENT_CMD: u8 = 0xC1;

/// Named input actions routed to the sender's possessed player, plus the
/// ready toggle executed only on the authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCmd {
    Left,
    Right,
    Jump,
    Attack,
    /// Toggle weapon pickup/drop against the current grab candidate.
    WeaponSlot,
    SetReady { ready: bool },
}

impl SnapshotEncode for ClientCmd {
    fn encode(&self, out: &mut Vec<u8>) {
        out.push(TAG_CLIENT_CMD);
        match self {
            ClientCmd::Left => out.push(0),
            ClientCmd::Right => out.push(1),
            ClientCmd::Jump => out.push(2),
            ClientCmd::Attack => out.push(3),
            ClientCmd::WeaponSlot => out.push(4),
            ClientCmd::SetReady { ready } => {
                out.push(5);
                out.push(u8::from(*ready));
            }
        }
    }
}

impl SnapshotDecode for ClientCmd {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self> {
        use anyhow::bail;
        let tag = take::<1>(inp)?[0];
        if tag != TAG_CLIENT_CMD {
            bail!("not a client cmd tag: {tag:#x}");
        }
        let kind = take::<1>(inp)?[0];
        Ok(match kind {
            0 => Self::Left,
            1 => Self::Right,
            2 => Self::Jump,
            3 => Self::Attack,
            4 => Self::WeaponSlot,
            5 => Self::SetReady { ready: take::<1>(inp)?[0] != 0 },
            other => bail!("unknown client cmd kind: {other}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_kinds() {
        for cmd in [
            ClientCmd::Left,
            ClientCmd::Right,
            ClientCmd::Jump,
            ClientCmd::Attack,
            ClientCmd::WeaponSlot,
            ClientCmd::SetReady { ready: true },
        ] {
            let mut buf = Vec::new();
            cmd.encode(&mut buf);
            let mut slice: &[u8] = &buf;
            assert_eq!(ClientCmd::decode(&mut slice).expect("decode"), cmd);
            assert!(slice.is_empty());
        }
    }

    #[test]
    fn rejects_snapshot_tag() {
        let mut slice: &[u8] = &[crate::snapshot::TAG_SNAPSHOT, 0];
        assert!(ClientCmd::decode(&mut slice).is_err());
    }
}

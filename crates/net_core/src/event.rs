//! Match lifecycle events emitted by the authority and mirrored to clients.
//!
//! Clients react to these for presentation only, with one exception: on
//! `MatchHalt` a non-authoritative side is expected to disconnect itself.

use crate::snapshot::{SnapshotDecode, SnapshotEncode, take};

pub const TAG_MATCH_EVENT: u8 = 0xE1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEvent {
    MatchStart,
    MatchHalt,
    MatchWin,
    MatchLose,
    MatchFinalize,
}

impl SnapshotEncode for MatchEvent {
    fn encode(&self, out: &mut Vec<u8>) {
        out.push(TAG_MATCH_EVENT);
        out.push(match self {
            MatchEvent::MatchStart => 0,
            MatchEvent::MatchHalt => 1,
            MatchEvent::MatchWin => 2,
            MatchEvent::MatchLose => 3,
            MatchEvent::MatchFinalize => 4,
        });
    }
}

impl SnapshotDecode for MatchEvent {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self> {
        use anyhow::bail;
        let tag = take::<1>(inp)?[0];
        if tag != TAG_MATCH_EVENT {
            bail!("not a match event tag: {tag:#x}");
        }
        Ok(match take::<1>(inp)?[0] {
            0 => Self::MatchStart,
            1 => Self::MatchHalt,
            2 => Self::MatchWin,
            3 => Self::MatchLose,
            4 => Self::MatchFinalize,
            other => bail!("unknown match event kind: {other}"),
        })
    }
}

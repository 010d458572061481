//! Shared scenario helpers for the integration tests.
#![allow(dead_code)] // not every test binary uses every helper

use data_runtime::configs::level::LevelCfg;
use data_runtime::configs::pawns::PawnTuning;
use server_core::{PeerId, ServerState};

pub const PEER_A: PeerId = PeerId(101);
pub const PEER_B: PeerId = PeerId(102);

/// Deterministic authoritative state with both slots unpossessed.
pub fn fresh_state() -> ServerState {
    ServerState::with_seed(PawnTuning::default(), LevelCfg::default(), 42)
}

/// Join two peers and mark both ready; the next tick starts the match.
pub fn ready_up(s: &mut ServerState) {
    s.player_joined(PEER_A);
    s.player_joined(PEER_B);
    s.set_player_ready(PEER_A, true).expect("ready A");
    s.set_player_ready(PEER_B, true).expect("ready B");
}

/// Drive a fresh state into a started match.
pub fn started_match() -> ServerState {
    let mut s = fresh_state();
    ready_up(&mut s);
    s.step_authoritative().expect("start tick");
    assert!(s.match_state.started, "match should have started");
    s
}

/// Walk every pawn/weapon pair and assert the ownership link holds in both
/// directions. Any one-sided link is a contract violation.
pub fn assert_weapon_links_consistent(s: &ServerState) {
    for a in s.world.iter() {
        if let Some(pawn) = a.pawn()
            && let Some(wid) = pawn.weapon_slot
        {
            let back = s.world.get(wid).and_then(|w| w.weapon()).and_then(|w| w.wielder);
            assert_eq!(back, Some(a.id), "pawn {:?} holds {wid:?} but weapon disagrees", a.id);
        }
        if let Some(w) = a.weapon()
            && let Some(pid) = w.wielder
        {
            let slot = s.world.get(pid).and_then(|p| p.pawn()).and_then(|p| p.weapon_slot);
            assert_eq!(slot, Some(a.id), "weapon {:?} claims {pid:?} but pawn disagrees", a.id);
        }
    }
}

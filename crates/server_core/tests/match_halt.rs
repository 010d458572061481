//! Mid-match participant loss: the session halts and resets to Idle, and the
//! halt event is what tells the other side to disconnect.

mod support;

use net_core::event::MatchEvent;
use server_core::{PLAYER_ONE, PLAYER_TWO, PeerId};

#[test]
fn disconnect_mid_match_halts_and_resets() {
    let mut s = support::started_match();
    s.drain_events();

    s.player_disconnected(support::PEER_B);
    s.step_authoritative().expect("tick");

    assert_eq!(s.drain_events(), vec![MatchEvent::MatchHalt]);
    assert!(!s.match_state.started);
    assert!(!s.match_state.ended);
    assert_eq!(s.match_state.transient_count(), 0);
    assert_eq!(s.world.len(), 2, "only the persistent slots survive the halt");
}

#[test]
fn unready_mid_match_also_halts() {
    let mut s = support::started_match();
    s.drain_events();
    s.set_player_ready(support::PEER_A, false).expect("unready");
    s.step_authoritative().expect("tick");
    assert_eq!(s.drain_events(), vec![MatchEvent::MatchHalt]);
}

#[test]
fn slots_recycle_after_a_halt() {
    let mut s = support::started_match();
    s.player_disconnected(support::PEER_A);
    s.step_authoritative().expect("tick");
    // Both slots are unpossessed after the reset; a new pair can join.
    let c = PeerId(7);
    let d = PeerId(8);
    s.player_joined(c);
    s.player_joined(d);
    let owner1 = s.world.get(PLAYER_ONE).unwrap().player_slot().unwrap().owner;
    let owner2 = s.world.get(PLAYER_TWO).unwrap().player_slot().unwrap().owner;
    assert_eq!(owner1, Some(c));
    assert_eq!(owner2, Some(d));
}

//! Grab-candidate scan and the weapon-slot toggle action.

mod support;

use glam::vec2;
use net_core::command::ClientCmd;
use server_core::{PLAYER_ONE, PLAYER_TWO};

#[test]
fn scan_finds_the_nearest_loose_weapon_in_range() {
    let mut s = support::fresh_state();
    s.player_joined(support::PEER_A);
    let near = s.spawn_fist(vec2(108.0, 30.0));
    let _far = s.spawn_fist(vec2(130.0, 30.0));
    s.step_authoritative().expect("tick");
    let slot = s.world.get(PLAYER_ONE).unwrap().player_slot().unwrap();
    assert_eq!(slot.grab_candidate, Some(near));
}

#[test]
fn scan_clears_when_nothing_is_in_range() {
    let mut s = support::fresh_state();
    let _far = s.spawn_fist(vec2(200.0, 30.0));
    s.step_authoritative().expect("tick");
    let slot = s.world.get(PLAYER_ONE).unwrap().player_slot().unwrap();
    assert_eq!(slot.grab_candidate, None);
}

#[test]
fn wielded_weapons_are_not_grab_candidates() {
    let mut s = support::fresh_state();
    // Player two stands right next to player one, holding the only weapon.
    s.world.get_mut(PLAYER_TWO).unwrap().tr.pos = vec2(104.0, 30.0);
    let fist = s.spawn_fist(vec2(104.0, 30.0));
    s.pickup_weapon(PLAYER_TWO, fist).expect("player two grabs it first");
    s.step_authoritative().expect("tick");
    let slot = s.world.get(PLAYER_ONE).unwrap().player_slot().unwrap();
    assert_eq!(slot.grab_candidate, None);
}

#[test]
fn weapon_slot_toggle_picks_up_then_drops() {
    let mut s = support::fresh_state();
    s.player_joined(support::PEER_A);
    let fist = s.spawn_fist(vec2(108.0, 30.0));
    s.step_authoritative().expect("scan tick");

    s.apply_command(support::PEER_A, ClientCmd::WeaponSlot).expect("pickup");
    assert_eq!(
        s.world.get(PLAYER_ONE).unwrap().pawn().unwrap().weapon_slot,
        Some(fist)
    );
    support::assert_weapon_links_consistent(&s);

    // Carried weapons ride the wielder.
    s.world.get_mut(PLAYER_ONE).unwrap().tr.pos = vec2(140.0, 30.0);
    s.step_authoritative().expect("tick");
    assert_eq!(s.world.get(fist).unwrap().tr.pos, vec2(140.0, 30.0));

    s.apply_command(support::PEER_A, ClientCmd::WeaponSlot).expect("drop");
    assert_eq!(s.world.get(PLAYER_ONE).unwrap().pawn().unwrap().weapon_slot, None);
    assert_eq!(s.world.get(fist).unwrap().weapon().unwrap().wielder, None);
}

#[test]
fn attack_command_without_a_weapon_is_ignored() {
    let mut s = support::fresh_state();
    s.player_joined(support::PEER_A);
    let goon = s.spawn_goon(vec2(104.0, 30.0));
    s.apply_command(support::PEER_A, ClientCmd::Attack).expect("no-op");
    let hp = s.world.get(goon).unwrap().pawn().unwrap().hp.hp;
    assert_eq!(hp, 10.0);
}

#[test]
fn armed_attack_command_damages_enemies_in_reach() {
    let mut s = support::fresh_state();
    s.player_joined(support::PEER_A);
    let fist = s.spawn_fist(vec2(108.0, 30.0));
    let goon = s.spawn_goon(vec2(106.0, 30.0));
    s.step_authoritative().expect("scan tick");
    s.apply_command(support::PEER_A, ClientCmd::WeaponSlot).expect("pickup");
    s.apply_command(support::PEER_A, ClientCmd::Attack).expect("attack");
    let pawn = s.world.get(goon).unwrap().pawn().unwrap();
    assert!(pawn.hp.dead(), "one fist hit kills a goon");
    assert!(pawn.called_on_died);
}

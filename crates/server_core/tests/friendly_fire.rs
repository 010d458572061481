//! Damage admission: players never hurt players; everything else lands.

mod support;

use glam::vec2;
use server_core::{PLAYER_ONE, PLAYER_TWO};

#[test]
fn player_on_player_damage_is_refused() {
    let mut s = support::fresh_state();
    s.apply_damage(PLAYER_ONE, 25.0, Some(PLAYER_TWO), "fist");
    let hp = s.world.get(PLAYER_ONE).unwrap().pawn().unwrap().hp.hp;
    assert_eq!(hp, 100.0);
}

#[test]
fn enemy_on_player_damage_applies() {
    let mut s = support::fresh_state();
    let goon = s.spawn_goon(vec2(110.0, 0.0));
    s.apply_damage(PLAYER_ONE, 25.0, Some(goon), "fist");
    let hp = s.world.get(PLAYER_ONE).unwrap().pawn().unwrap().hp.hp;
    assert_eq!(hp, 75.0);
}

#[test]
fn player_on_enemy_damage_applies() {
    let mut s = support::fresh_state();
    let goon = s.spawn_goon(vec2(110.0, 0.0));
    s.apply_damage(goon, 4.0, Some(PLAYER_ONE), "fist");
    let hp = s.world.get(goon).unwrap().pawn().unwrap().hp.hp;
    assert_eq!(hp, 6.0);
}

#[test]
fn armed_players_cannot_punch_each_other() {
    let mut s = support::fresh_state();
    // Stand the players next to each other, both inside fist range.
    s.world.get_mut(PLAYER_ONE).unwrap().tr.pos = vec2(100.0, 30.0);
    s.world.get_mut(PLAYER_TWO).unwrap().tr.pos = vec2(104.0, 30.0);
    let fist = s.spawn_fist(vec2(100.0, 30.0));
    s.pickup_weapon(PLAYER_ONE, fist).expect("pickup");
    s.weapon_attack(fist).expect("attack");
    let hp = s.world.get(PLAYER_TWO).unwrap().pawn().unwrap().hp.hp;
    assert_eq!(hp, 100.0, "friendly fire must be refused at the damage gate");
}

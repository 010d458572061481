//! Enemy AI scheduler: advancing moves straight at the target, waiting
//! swings on entry, and a destroyed target idles the enemy until the next
//! advancing transition.

mod support;

use glam::vec2;
use server_core::systems::ai;
use server_core::{AiPhase, PLAYER_ONE, PLAYER_TWO};

fn phase_of(s: &server_core::ServerState, id: server_core::ActorId) -> AiPhase {
    s.world.get(id).unwrap().enemy_ai().unwrap().phase
}

#[test]
fn advancing_closes_on_the_target_at_fixed_speed() {
    let mut s = support::fresh_state();
    // Park both players on the first floor; the goon should chase the closer.
    s.world.get_mut(PLAYER_ONE).unwrap().tr.pos = vec2(100.0, 30.0);
    s.world.get_mut(PLAYER_TWO).unwrap().tr.pos = vec2(10.0, 30.0);
    let goon = s.spawn_goon(vec2(160.0, 30.0));
    ai::activate_ai(&mut s, goon);
    assert_eq!(phase_of(&s, goon), AiPhase::Advancing);

    let speed = s.world.get(goon).unwrap().enemy_ai().unwrap().move_speed;
    let before = s.world.get(goon).unwrap().tr.pos;
    ai::ai_tick(&mut s);
    let after = s.world.get(goon).unwrap().tr.pos;
    let step = before.distance(after);
    assert!((step - speed).abs() < 1e-4, "moved {step}, expected {speed}");
    assert!(after.x < before.x, "should move toward the closest player");
    let pawn = s.world.get(goon).unwrap().pawn().unwrap();
    assert!(!pawn.facing_right, "facing follows the direction of travel");
}

#[test]
fn advancing_stops_short_of_the_target() {
    let mut s = support::fresh_state();
    s.world.get_mut(PLAYER_ONE).unwrap().tr.pos = vec2(100.0, 30.0);
    s.world.get_mut(PLAYER_TWO).unwrap().tr.pos = vec2(100.0, 30.0);
    let goon = s.spawn_goon(vec2(110.0, 30.0));
    ai::activate_ai(&mut s, goon);
    let before = s.world.get(goon).unwrap().tr.pos;
    ai::ai_tick(&mut s);
    let after = s.world.get(goon).unwrap().tr.pos;
    assert_eq!(before, after, "inside arrive distance there is no movement");
}

#[test]
fn waiting_phase_attacks_a_target_in_range() {
    let mut s = support::fresh_state();
    s.world.get_mut(PLAYER_ONE).unwrap().tr.pos = vec2(100.0, 30.0);
    s.world.get_mut(PLAYER_TWO).unwrap().tr.pos = vec2(0.0, 30.0);
    // Inside the arrive distance already, and inside the fist's reach, so
    // the waiting-entry swing both triggers and lands.
    let goon = s.spawn_goon(vec2(108.0, 30.0));
    let fist = s.spawn_fist(vec2(108.0, 30.0));
    s.pickup_weapon(goon, fist).expect("arm goon");
    ai::activate_ai(&mut s, goon);

    let mut guard = 0;
    while phase_of(&s, goon) == AiPhase::Advancing {
        ai::ai_tick(&mut s);
        guard += 1;
        assert!(guard < 10_000, "never left the advancing phase");
    }
    assert_eq!(phase_of(&s, goon), AiPhase::Waiting);
    let hp = s.world.get(PLAYER_ONE).unwrap().pawn().unwrap().hp.hp;
    assert!(hp < 100.0, "waiting entry should have swung the fist");
}

#[test]
fn destroyed_target_idles_the_enemy_without_reacquisition() {
    let mut s = support::fresh_state();
    s.world.get_mut(PLAYER_ONE).unwrap().tr.pos = vec2(100.0, 30.0);
    let goon = s.spawn_goon(vec2(200.0, 30.0));
    let decoy = s.spawn_goon(vec2(260.0, 30.0));
    ai::activate_ai(&mut s, goon);
    // Retarget the advancing goon onto the decoy, then destroy it.
    s.world.get_mut(goon).unwrap().enemy_ai_mut().unwrap().target = Some(decoy);
    s.world.queue_kill(decoy);
    s.world.flush_kills();

    let before = s.world.get(goon).unwrap().tr.pos;
    ai::ai_tick(&mut s);
    let after = s.world.get(goon).unwrap().tr.pos;
    assert_eq!(before, after, "missing target skips movement, no crash");
    assert_eq!(
        s.world.get(goon).unwrap().enemy_ai().unwrap().target,
        Some(decoy),
        "target is not reacquired until the next advancing transition"
    );
}

#[test]
fn dormant_enemies_auto_activate_when_players_close_in() {
    let mut s = support::started_match();
    // Default layout: first-floor goons sit ~160 away from the spawns, past
    // the activation distance.
    let dormant: Vec<_> = s
        .world
        .iter()
        .filter(|a| a.enemy_ai().is_some_and(|ai| ai.phase == AiPhase::Dormant))
        .map(|a| a.id)
        .collect();
    assert!(!dormant.is_empty(), "far goons start dormant");

    let goon = dormant[0];
    let goon_pos = s.world.get(goon).unwrap().tr.pos;
    s.world.get_mut(PLAYER_ONE).unwrap().tr.pos = goon_pos + vec2(-50.0, 0.0);
    s.step_authoritative().expect("tick");
    assert_ne!(phase_of(&s, goon), AiPhase::Dormant, "player proximity activates the AI");
}

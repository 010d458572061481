//! Snapshot application onto shadow views: full-field overwrite, replication
//! into existence, destruction on absence, and the halt signal.

use client_core::replication::ReplicationBuffer;
use net_core::event::MatchEvent;
use net_core::frame;
use net_core::snapshot::{EnemyRep, PlayerRep, SnapshotEncode, TickSnapshot, WeaponRep};

fn player(id: i32, hp: f32) -> PlayerRep {
    PlayerRep {
        id,
        pos: [100.0, 30.0],
        vel: [0.0, 0.0],
        health: hp,
        is_facing_right: 1,
        is_ready: 0,
        weapon_slot: 0,
        grab_candidate: 0,
    }
}

fn snapshot(tick: u32, players: Vec<PlayerRep>, enemies: Vec<EnemyRep>) -> Vec<u8> {
    let snap = TickSnapshot { v: 1, tick, players, enemies, ..Default::default() };
    let mut out = Vec::new();
    snap.encode(&mut out);
    out
}

#[test]
fn snapshot_overwrites_every_replicated_field() {
    let mut buf = ReplicationBuffer::default();
    assert!(buf.apply_message(&snapshot(1, vec![player(1, 100.0)], vec![])));
    assert_eq!(buf.tick, 1);
    assert_eq!(buf.players.len(), 1);
    assert!(buf.player(1).unwrap().is_alive());

    let mut hurt = player(1, 40.0);
    hurt.pos = [120.0, 30.0];
    hurt.weapon_slot = 9;
    assert!(buf.apply_message(&snapshot(2, vec![hurt], vec![])));
    let v = buf.player(1).unwrap();
    assert_eq!(v.health, 40.0);
    assert_eq!(v.pos.x, 120.0);
    assert!(v.is_packing());
}

#[test]
fn actors_replicate_into_existence_and_drop_on_absence() {
    let mut buf = ReplicationBuffer::default();
    let goon = EnemyRep {
        id: 20,
        archetype: 0,
        pos: [260.0, 30.0],
        health: 10.0,
        is_facing_right: 0,
        weapon_slot: 0,
    };
    buf.apply_message(&snapshot(1, vec![player(1, 100.0)], vec![goon]));
    assert_eq!(buf.enemies.len(), 1);
    assert!(!buf.enemies[0].is_boss());

    // Next snapshot omits the goon: it was culled on the authority.
    buf.apply_message(&snapshot(2, vec![player(1, 100.0)], vec![]));
    assert!(buf.enemies.is_empty());
    assert_eq!(buf.players.len(), 1, "players persist across snapshots");
}

#[test]
fn framed_stream_applies_in_order() {
    let mut buf = ReplicationBuffer::default();
    let mut wire = Vec::new();
    frame::write_msg(&mut wire, &snapshot(1, vec![player(1, 100.0)], vec![]));
    let mut ev = Vec::new();
    MatchEvent::MatchStart.encode(&mut ev);
    frame::write_msg(&mut wire, &ev);
    let applied = buf.apply_framed(&wire).expect("apply");
    assert_eq!(applied, 2);
    assert_eq!(buf.drain_events(), vec![MatchEvent::MatchStart]);
    assert!(!buf.should_disconnect);
}

#[test]
fn halt_event_raises_the_disconnect_flag() {
    let mut buf = ReplicationBuffer::default();
    let mut ev = Vec::new();
    MatchEvent::MatchHalt.encode(&mut ev);
    assert!(buf.apply_message(&ev));
    assert!(buf.should_disconnect);
    assert_eq!(buf.drain_events(), vec![MatchEvent::MatchHalt]);
}

#[test]
fn weapon_views_expose_wielded_state() {
    let mut buf = ReplicationBuffer::default();
    let snap = TickSnapshot {
        v: 1,
        tick: 3,
        weapons: vec![
            WeaponRep { id: 9, pos: [60.0, 30.0], wielder_id: 0 },
            WeaponRep { id: 10, pos: [100.0, 30.0], wielder_id: 1 },
        ],
        ..Default::default()
    };
    let mut bytes = Vec::new();
    snap.encode(&mut bytes);
    buf.apply_message(&bytes);
    assert!(!buf.weapons[0].is_wielded());
    assert!(buf.weapons[1].is_wielded());
}

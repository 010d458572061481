//! Client replication buffer.
//!
//! Buffers incoming framed messages and applies them to the shadow views.
//! Snapshots are authoritative: actors missing from a snapshot were
//! destroyed on the server and their views drop; unknown ids are replicated
//! into existence. Match events queue for the presentation layer, except
//! `MatchHalt` which also raises the disconnect flag — the session is over
//! for this side.

use net_core::event::MatchEvent;
use net_core::frame;
use net_core::snapshot::{SnapshotDecode, TickSnapshot};

use crate::views::{ElevatorView, EnemyView, PlayerView, WeaponView};

#[derive(Debug, Default)]
pub struct ReplicationBuffer {
    pub tick: u32,
    pub players: Vec<PlayerView>,
    pub enemies: Vec<EnemyView>,
    pub weapons: Vec<WeaponView>,
    pub elevators: Vec<ElevatorView>,
    pub pending_events: Vec<MatchEvent>,
    /// Set on `MatchHalt`; the host should tear the session down.
    pub should_disconnect: bool,
}

impl ReplicationBuffer {
    /// Apply a buffer of framed messages. Returns how many were applied;
    /// unrecognized payloads are skipped with a warning.
    pub fn apply_framed(&mut self, bytes: &[u8]) -> anyhow::Result<usize> {
        let mut applied = 0;
        for payload in frame::read_all(bytes)? {
            if self.apply_message(payload) {
                applied += 1;
            }
        }
        Ok(applied)
    }

    /// Apply a single unframed message. Returns whether any state changed.
    pub fn apply_message(&mut self, bytes: &[u8]) -> bool {
        let mut slice: &[u8] = bytes;
        if let Ok(snap) = TickSnapshot::decode(&mut slice) {
            self.apply_snapshot(&snap);
            return true;
        }
        let mut slice2: &[u8] = bytes;
        if let Ok(ev) = MatchEvent::decode(&mut slice2) {
            if ev == MatchEvent::MatchHalt {
                self.should_disconnect = true;
            }
            self.pending_events.push(ev);
            return true;
        }
        log::warn!("unrecognized replication payload ({} bytes)", bytes.len());
        false
    }

    fn apply_snapshot(&mut self, snap: &TickSnapshot) {
        self.tick = snap.tick;
        sync_views(
            &mut self.players,
            &snap.players,
            |r| r.id,
            |v| v.id,
            PlayerView::from_rep,
            PlayerView::sync_to,
        );
        sync_views(
            &mut self.enemies,
            &snap.enemies,
            |r| r.id,
            |v| v.id,
            EnemyView::from_rep,
            EnemyView::sync_to,
        );
        sync_views(
            &mut self.weapons,
            &snap.weapons,
            |r| r.id,
            |v| v.id,
            WeaponView::from_rep,
            WeaponView::sync_to,
        );
        sync_views(
            &mut self.elevators,
            &snap.elevators,
            |r| r.id,
            |v| v.id,
            ElevatorView::from_rep,
            ElevatorView::sync_to,
        );
    }

    /// Drain queued lifecycle events for the presentation layer.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.pending_events)
    }

    #[must_use]
    pub fn player(&self, id: i32) -> Option<&PlayerView> {
        self.players.iter().find(|p| p.id == id)
    }
}

/// Reconcile a view list against the authoritative records: sync existing,
/// replicate missing into existence, drop destroyed.
fn sync_views<V, R>(
    views: &mut Vec<V>,
    reps: &[R],
    rep_id: impl Fn(&R) -> i32 + Copy,
    view_id: impl Fn(&V) -> i32 + Copy,
    from_rep: impl Fn(&R) -> V,
    sync_to: impl Fn(&mut V, &R),
) {
    for rep in reps {
        let id = rep_id(rep);
        if let Some(v) = views.iter_mut().find(|v| view_id(v) == id) {
            sync_to(v, rep);
        } else {
            views.push(from_rep(rep));
        }
    }
    views.retain(|v| reps.iter().any(|r| rep_id(r) == view_id(v)));
}

//! World store: actor ownership, id allocation, queries, deferred cull.

use glam::Vec2;

use crate::actor::{Actor, ActorExt, ActorId, ActorKind, PLAYER_TWO, Transform};

#[derive(Debug, Clone)]
pub struct World {
    next_id: u32,
    actors: Vec<Actor>,
    pending_kill: Vec<ActorId>,
}

impl World {
    #[must_use]
    pub fn new() -> Self {
        Self {
            // Ids 1 and 2 are reserved for the player slots; 0 is the wire
            // sentinel and is never allocated.
            next_id: PLAYER_TWO.0 + 1,
            actors: Vec::new(),
            pending_kill: Vec::new(),
        }
    }

    pub fn spawn(&mut self, kind: ActorKind, tr: Transform, is_static: bool, ext: ActorExt) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.actors.push(Actor { id, kind, tr, is_static, ext });
        id
    }

    /// Spawn at one of the reserved identities. Panics in debug builds if the
    /// identity is already live; reserved slots are created exactly once.
    pub fn spawn_reserved(&mut self, id: ActorId, kind: ActorKind, tr: Transform, ext: ActorExt) -> ActorId {
        debug_assert!(self.get(id).is_none(), "reserved id {id:?} already live");
        self.actors.push(Actor { id, kind, tr, is_static: false, ext });
        id
    }

    #[must_use]
    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ActorId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.iter_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Queue an actor for removal at the end-of-tick cull. Double-queuing is
    /// fine; the flush tolerates ids that are already gone.
    pub fn queue_kill(&mut self, id: ActorId) {
        self.pending_kill.push(id);
    }

    /// Flush queued removals. Each id is existence-checked so that a death
    /// handler and a match reset may both queue the same actor. Removing an
    /// elevator also removes any shaft walls it still owns.
    pub fn flush_kills(&mut self) -> usize {
        if self.pending_kill.is_empty() {
            return 0;
        }
        let mut ids: Vec<ActorId> = std::mem::take(&mut self.pending_kill);
        let cascade: Vec<ActorId> = ids
            .iter()
            .filter_map(|id| self.get(*id).and_then(Actor::elevator))
            .flat_map(|e| e.walls.iter().copied())
            .collect();
        ids.extend(cascade);
        ids.sort_unstable();
        ids.dedup();
        let before = self.actors.len();
        self.actors.retain(|a| !ids.contains(&a.id));
        before - self.actors.len()
    }

    // Queries

    pub fn players(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter().filter(|a| a.kind == ActorKind::Player)
    }

    /// Living player ids in slot order.
    #[must_use]
    pub fn living_players(&self) -> Vec<ActorId> {
        let mut ids: Vec<ActorId> = self
            .players()
            .filter(|a| a.is_alive_pawn())
            .map(|a| a.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Nearest living player to `pos`, if any.
    #[must_use]
    pub fn closest_player(&self, pos: Vec2) -> Option<ActorId> {
        let mut best: Option<(f32, ActorId)> = None;
        for a in self.players() {
            if !a.is_alive_pawn() {
                continue;
            }
            let d2 = a.tr.pos.distance_squared(pos);
            if best.map(|(b, _)| d2 < b).unwrap_or(true) {
                best = Some((d2, a.id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Nearest unwielded weapon within `max_dist` of `pos`.
    #[must_use]
    pub fn closest_loose_weapon(&self, pos: Vec2, max_dist: f32) -> Option<ActorId> {
        let max2 = max_dist * max_dist;
        let mut best: Option<(f32, ActorId)> = None;
        for a in &self.actors {
            let Some(w) = a.weapon() else { continue };
            if w.wielder.is_some() {
                continue;
            }
            let d2 = a.tr.pos.distance_squared(pos);
            if d2 < max2 && best.map(|(b, _)| d2 < b).unwrap_or(true) {
                best = Some((d2, a.id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Living pawns strictly within `max_dist` of `pos`, excluding `exclude`.
    #[must_use]
    pub fn pawns_in_range(&self, pos: Vec2, max_dist: f32, exclude: ActorId) -> Vec<ActorId> {
        let max2 = max_dist * max_dist;
        self.actors
            .iter()
            .filter(|a| a.id != exclude && a.is_alive_pawn())
            .filter(|a| a.tr.pos.distance_squared(pos) < max2)
            .map(|a| a.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{PawnExt, PawnRole, PlayerSlot};
    use glam::vec2;

    fn pawn_at(w: &mut World, kind: ActorKind, pos: Vec2) -> ActorId {
        w.spawn(
            kind,
            Transform::at(pos, 16.0, 16.0),
            false,
            ActorExt::Pawn(PawnExt::new(10.0, PawnRole::Player(PlayerSlot::default()))),
        )
    }

    #[test]
    fn cull_tolerates_double_queue_and_missing_ids() {
        let mut w = World::new();
        let a = pawn_at(&mut w, ActorKind::Player, vec2(0.0, 0.0));
        w.queue_kill(a);
        w.queue_kill(a);
        w.queue_kill(ActorId(999));
        assert_eq!(w.flush_kills(), 1);
        assert!(!w.contains(a));
        assert_eq!(w.flush_kills(), 0);
    }

    #[test]
    fn ids_start_above_reserved_range() {
        let mut w = World::new();
        let a = pawn_at(&mut w, ActorKind::Goon, vec2(0.0, 0.0));
        assert!(a.0 > PLAYER_TWO.0);
    }
}

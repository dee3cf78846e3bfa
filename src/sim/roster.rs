//! NPC collection with deferred spawn/despawn
//!
//! Scans hand out indices into the roster. Structural changes are queued and
//! only applied by `apply_pending`, so an index found during a scan stays
//! valid until the frame boundary.

use glam::Vec2;

use super::actor::{Actor, ActorId, NpcVariant, Size};
use super::rect::Rect;

/// First actor (in slice order, not nearest) whose box overlaps `rect`
pub fn first_overlap(actors: &[Actor], rect: &Rect) -> Option<usize> {
    actors.iter().position(|a| a.bounds.overlaps(rect))
}

/// A queued NPC spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub variant: NpcVariant,
    pub pos: Vec2,
    pub size: Size,
}

/// Owning NPC collection
#[derive(Debug, Clone)]
pub struct Roster {
    actors: Vec<Actor>,
    pending_spawns: Vec<SpawnRequest>,
    pending_despawns: Vec<ActorId>,
    /// Next NPC ID (0 is reserved for the player)
    next_id: u32,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    pub fn new() -> Self {
        Self {
            actors: Vec::new(),
            pending_spawns: Vec::new(),
            pending_despawns: Vec::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actors_mut(&mut self) -> &mut [Actor] {
        &mut self.actors
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.iter_mut()
    }

    pub fn index_of(&self, id: ActorId) -> Option<usize> {
        self.actors.iter().position(|a| a.id == id)
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.id == id)
    }

    /// First NPC overlapping `rect`
    pub fn first_overlap(&self, rect: &Rect) -> Option<usize> {
        first_overlap(&self.actors, rect)
    }

    /// Queue an NPC to appear at the next `apply_pending`
    pub fn queue_spawn(&mut self, request: SpawnRequest) {
        self.pending_spawns.push(request);
    }

    /// Queue an NPC for removal at the next `apply_pending`
    pub fn queue_despawn(&mut self, id: ActorId) {
        if !self.pending_despawns.contains(&id) {
            self.pending_despawns.push(id);
        }
    }

    /// Queue removal of the most recently added NPC
    pub fn queue_despawn_last(&mut self) {
        let last = self
            .actors
            .iter()
            .rev()
            .map(|a| a.id)
            .find(|id| !self.pending_despawns.contains(id));
        if let Some(id) = last {
            self.pending_despawns.push(id);
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.pending_spawns.is_empty() || !self.pending_despawns.is_empty()
    }

    /// Apply queued despawns, then spawns. Returns (spawned, despawned) IDs.
    pub fn apply_pending(&mut self) -> (Vec<ActorId>, Vec<ActorId>) {
        let mut despawned = Vec::new();
        if !self.pending_despawns.is_empty() {
            let doomed = std::mem::take(&mut self.pending_despawns);
            self.actors.retain(|a| {
                let remove = doomed.contains(&a.id);
                if remove {
                    despawned.push(a.id);
                }
                !remove
            });
        }

        let mut spawned = Vec::with_capacity(self.pending_spawns.len());
        for request in std::mem::take(&mut self.pending_spawns) {
            let id = self.allocate_id();
            self.actors
                .push(Actor::npc(id, request.variant, request.pos, request.size));
            spawned.push(id);
        }

        (spawned, despawned)
    }

    /// Drop everything, including queued work
    pub fn clear(&mut self) {
        self.actors.clear();
        self.pending_spawns.clear();
        self.pending_despawns.clear();
    }

    fn allocate_id(&mut self) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        id
    }
}

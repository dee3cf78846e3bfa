//! Game state and core simulation types
//!
//! Everything one session needs between ticks: the level, the player, the
//! NPC roster, the camera and the cosmetic particles. Given the same seed,
//! level and inputs, a session replays identically.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::actor::{Actor, ActorId, NpcVariant, Size};
use super::ai::Wander;
use super::camera::Camera;
use super::level::Level;
use super::particle::ParticleField;
use super::roster::{Roster, SpawnRequest};
use crate::consts::*;
use crate::settings::{Settings, Tuning};

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// Came to rest on a floor after being airborne
    Landed { actor: ActorId },
    /// Knocked back by a weapon hit
    Struck { target: ActorId, attacker: ActorId },
    /// Jumped on from above; leaves at the end of the frame
    Stomped { target: ActorId, by: ActorId },
    /// Struck timer ran out
    Recovered { actor: ActorId },
    Spawned { actor: ActorId },
    Despawned { actor: ActorId },
    Restarted,
}

/// NPCs present at the start of every session
const STARTING_NPCS: [NpcVariant; 5] = [
    NpcVariant::Villager(2),
    NpcVariant::Villager(2),
    NpcVariant::Villager(3),
    NpcVariant::Villager(1),
    NpcVariant::Brute,
];

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub level: Level,
    pub settings: Settings,
    pub tuning: Tuning,
    pub player: Actor,
    pub npcs: Roster,
    pub camera: Camera,
    pub particles: ParticleField,
    pub wander: Wander,
    /// Simulated seconds since the session started
    pub time: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last `drain_events`
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a session on `level` with the player and the starting NPCs
    pub fn new(seed: u64, level: Level, settings: Settings, tuning: Tuning) -> Self {
        let player = Actor::player(Vec2::ZERO, player_size(&settings));
        let mut state = Self {
            seed,
            level,
            settings,
            wander: Wander::new(tuning.ai_interval),
            tuning,
            player,
            npcs: Roster::new(),
            camera: Camera::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            particles: ParticleField::default(),
            time: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.populate();
        state
    }

    /// Put the player back at the start and repopulate the NPCs.
    /// The level, settings and RNG stream carry over.
    pub fn restart(&mut self) {
        log::info!("Restarting session");
        self.npcs.clear();
        self.particles.clear();
        self.wander.reset();
        self.populate();
        self.events.push(GameEvent::Restarted);
    }

    /// Swap in a new level and restart on it
    pub fn replace_level(&mut self, level: Level) {
        self.level = level;
        self.restart();
    }

    /// Build a spawn request for a random NPC variant at `pos`
    pub fn random_spawn(&mut self, pos: Vec2) -> SpawnRequest {
        let variant = match self.rng.random_range(1..=4u8) {
            4 => NpcVariant::Brute,
            n => NpcVariant::Villager(n),
        };
        SpawnRequest {
            variant,
            pos,
            size: npc_size(variant, &self.settings),
        }
    }

    /// Apply the roster's queued spawns/despawns and record them as events
    pub fn apply_roster_changes(&mut self) {
        if !self.npcs.has_pending() {
            return;
        }
        let (spawned, despawned) = self.npcs.apply_pending();
        for actor in despawned {
            log::debug!("NPC {} despawned", actor.0);
            self.events.push(GameEvent::Despawned { actor });
        }
        for actor in spawned {
            log::debug!("NPC {} spawned", actor.0);
            self.events.push(GameEvent::Spawned { actor });
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Every actor, player first
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        std::iter::once(&self.player).chain(self.npcs.iter())
    }

    fn populate(&mut self) {
        let size = player_size(&self.settings);
        let start = Vec2::new((size.w + self.level.layout().tile_width) as f32, 0.0);
        self.player = Actor::player(start, size);

        for variant in STARTING_NPCS {
            let size = npc_size(variant, &self.settings);
            let span = (self.level.width() - size.w).max(1);
            let x = self.rng.random_range(0..span) + self.level.layout().tile_width;
            self.npcs.queue_spawn(SpawnRequest {
                variant,
                pos: Vec2::new(x as f32, 0.0),
                size,
            });
        }
        self.apply_roster_changes();
        self.camera.follow(&self.player.bounds, self.level.width(), self.level.height());
    }
}

/// Player box after the configured character scales
pub fn player_size(settings: &Settings) -> Size {
    Size::new(PLAYER_WIDTH, PLAYER_HEIGHT)
        .scaled(settings.character_width_scale, settings.character_height_scale)
}

/// NPC box for `variant` after the global scale
pub fn npc_size(variant: NpcVariant, settings: &Settings) -> Size {
    let base = match variant {
        NpcVariant::Villager(_) => Size::new(NPC_WIDTH, NPC_HEIGHT),
        NpcVariant::Brute => Size::new(BRUTE_WIDTH, BRUTE_HEIGHT),
    };
    base.scaled(settings.scale, settings.scale)
}

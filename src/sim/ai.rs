//! NPC wander AI
//!
//! Every interval each NPC that isn't reeling from a hit picks one of: walk
//! left, walk right, stand still.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, Facing};

/// Interval timer driving the wander decisions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wander {
    elapsed: f32,
    interval: f32,
}

impl Wander {
    pub fn new(interval: f32) -> Self {
        Self {
            elapsed: 0.0,
            interval,
        }
    }

    /// Advance the timer; when it fires, re-roll every NPC's intent.
    /// Returns true when a re-roll happened.
    pub fn update(&mut self, dt: f32, npcs: &mut [Actor], rng: &mut Pcg32, speed: f32) -> bool {
        self.elapsed += dt;
        if self.interval <= 0.0 || self.elapsed < self.interval {
            return false;
        }
        self.elapsed -= self.interval;

        for npc in npcs.iter_mut().filter(|npc| !npc.is_struck()) {
            match rng.random_range(0..3) {
                0 => walk(npc, Facing::Left, speed),
                1 => walk(npc, Facing::Right, speed),
                _ => {
                    npc.is_moving = false;
                    npc.vel.x = 0.0;
                }
            }
        }
        true
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

fn walk(npc: &mut Actor, facing: Facing, speed: f32) {
    npc.is_moving = true;
    npc.facing = facing;
    npc.vel.x = facing.sign() * speed;
}

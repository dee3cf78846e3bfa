//! Sparkle particles around the player
//!
//! Purely cosmetic. Each particle lives a handful of frames at a jittered
//! spot around the actor's box and is replaced when it dies.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::{PARTICLE_FRAME_CAP, TOTAL_PARTICLES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    Red,
    Green,
    Blue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Particle {
    /// World position (top-left)
    pub x: i32,
    pub y: i32,
    pub frame: u32,
    pub color: ParticleColor,
}

impl Particle {
    pub fn spawn(around: &Rect, rng: &mut Pcg32) -> Self {
        let color = match rng.random_range(0..3) {
            0 => ParticleColor::Red,
            1 => ParticleColor::Green,
            _ => ParticleColor::Blue,
        };
        Self {
            x: around.x - 5 + rng.random_range(0..around.w.max(0) + 5),
            y: around.y - 5 + rng.random_range(0..around.h.max(0) + 5),
            frame: rng.random_range(0..5),
            color,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.frame > PARTICLE_FRAME_CAP
    }

    /// Shimmer overlay shows on even frames
    pub fn shimmer(&self) -> bool {
        self.frame % 2 == 0
    }
}

/// Fixed-size particle pool, toggled on and off by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleField {
    pub enabled: bool,
    particles: Vec<Particle>,
}

impl Default for ParticleField {
    fn default() -> Self {
        Self {
            enabled: true,
            particles: Vec::with_capacity(TOTAL_PARTICLES),
        }
    }
}

impl ParticleField {
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Flip the effect on/off. Turning it off drops every particle.
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
        if !self.enabled {
            self.particles.clear();
        }
    }

    /// Age particles, replace dead ones and top the pool up around `around`
    pub fn update(&mut self, around: &Rect, rng: &mut Pcg32) {
        if !self.enabled {
            return;
        }
        for particle in &mut self.particles {
            particle.frame += 1;
            if particle.is_dead() {
                *particle = Particle::spawn(around, rng);
            }
        }
        while self.particles.len() < TOTAL_PARTICLES {
            self.particles.push(Particle::spawn(around, rng));
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

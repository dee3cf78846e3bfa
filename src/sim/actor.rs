//! Actors: the player and NPCs
//!
//! One type covers every moving entity. The variant only decides size,
//! sprite and whether the actor can fight.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::{Axis, Rect};
use crate::consts::MAX_ACTOR_EXTENT;

/// Stable actor identifier (survives roster reordering)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl ActorId {
    pub const PLAYER: ActorId = ActorId(0);
}

/// NPC flavors, one per sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NpcVariant {
    /// Regular-sized townsfolk, sheet 1-3
    Villager(u8),
    /// Large NPC with its own clip layout
    Brute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    Npc(NpcVariant),
}

/// Horizontal facing. Sprites are drawn facing left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Facing for a horizontal velocity; `None` when standing still
    pub fn from_velocity(vx: f32) -> Option<Self> {
        if vx > 0.0 {
            Some(Facing::Right)
        } else if vx < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Integer width/height of an actor's box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// Scale both dimensions, truncating like the sprite loader does.
    /// Each side stays within `1..=MAX_ACTOR_EXTENT`.
    pub fn scaled(self, sx: f32, sy: f32) -> Self {
        let side = |v: i32, s: f32| {
            ((v as f32 * s).min(MAX_ACTOR_EXTENT as f32) as i32).clamp(1, MAX_ACTOR_EXTENT)
        };
        Self {
            w: side(self.w, sx),
            h: side(self.h, sy),
        }
    }

    pub fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.w,
            Axis::Vertical => self.h,
        }
    }
}

/// A positioned, velocity-bearing entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub kind: ActorKind,
    /// Authoritative position (top-left, sub-pixel)
    pub pos: Vec2,
    /// Pixels per second
    pub vel: Vec2,
    pub size: Size,
    /// Integer box derived from `pos`; refresh with `sync_bounds`
    pub bounds: Rect,
    pub facing: Facing,
    pub is_jumping: bool,
    pub is_moving: bool,
    pub is_attacking: bool,
    /// Remaining struck time in seconds; knockback is locked while set
    pub struck: Option<f32>,
    /// Landed on from above by the player; removed at the end of the tick
    pub jumped_on: bool,
    /// Bounce queued after stomping another actor
    pub head_jump: bool,
    /// Accumulated seconds driving animation frame selection
    pub anim_clock: f32,
}

impl Actor {
    pub fn new(id: ActorId, kind: ActorKind, pos: Vec2, size: Size) -> Self {
        let mut actor = Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            size,
            bounds: Rect::default(),
            facing: Facing::default(),
            is_jumping: false,
            is_moving: false,
            is_attacking: false,
            struck: None,
            jumped_on: false,
            head_jump: false,
            anim_clock: 0.0,
        };
        actor.sync_bounds();
        actor
    }

    pub fn player(pos: Vec2, size: Size) -> Self {
        Self::new(ActorId::PLAYER, ActorKind::Player, pos, size)
    }

    pub fn npc(id: ActorId, variant: NpcVariant, pos: Vec2, size: Size) -> Self {
        Self::new(id, ActorKind::Npc(variant), pos, size)
    }

    pub fn is_player(&self) -> bool {
        self.kind == ActorKind::Player
    }

    /// Only the player swings a weapon and stomps
    pub fn is_combatant(&self) -> bool {
        self.is_player()
    }

    pub fn is_struck(&self) -> bool {
        self.struck.is_some()
    }

    /// Recompute the integer box from the float position
    pub fn sync_bounds(&mut self) {
        self.bounds = Rect::new(self.pos.x as i32, self.pos.y as i32, self.size.w, self.size.h);
    }

    pub fn position_on(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.pos.x,
            Axis::Vertical => self.pos.y,
        }
    }

    pub fn set_position_on(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Horizontal => self.pos.x = value,
            Axis::Vertical => self.pos.y = value,
        }
    }

    pub fn velocity_on(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.vel.x,
            Axis::Vertical => self.vel.y,
        }
    }

    /// Weapon hitbox in front of an attacking combatant
    pub fn weapon_box(&self, reach: i32) -> Option<Rect> {
        if !self.is_combatant() || !self.is_attacking {
            return None;
        }
        let b = self.bounds;
        let x = match self.facing {
            Facing::Right => b.right(),
            Facing::Left => b.x - reach,
        };
        Some(Rect::new(x, b.y + b.h / 4, reach, (b.h / 2).max(1)))
    }

    /// Advance the animation clock
    pub fn advance_animation(&mut self, dt: f32) {
        self.anim_clock += dt;
    }

    /// Frame index for a looping animation of `frames` frames
    pub fn animation_frame(&self, frame_seconds: f32, frames: usize) -> usize {
        if frames == 0 || frame_seconds <= 0.0 {
            return 0;
        }
        (self.anim_clock / frame_seconds) as usize % frames
    }
}

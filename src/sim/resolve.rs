//! Collision and movement resolution
//!
//! Axis-separated, discrete: each tick the actor is moved along x, pushed out
//! of whatever it now overlaps, then the same happens along y. There is no
//! sweep, so a very large time step can still tunnel through thin geometry.

use super::actor::Actor;
use super::combat::strike;
use super::level::Level;
use super::rect::{Axis, Rect};
use super::roster::first_overlap;
use super::state::GameEvent;
use crate::settings::Tuning;

/// Level edge an axis pass was clamped against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Min,
    Max,
}

/// What a single axis pass ran into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisContact {
    pub boundary: Option<Boundary>,
    /// Index of the tile the actor was pushed out of
    pub tile: Option<usize>,
    /// Index (into `others`) of the actor it was pushed out of
    pub actor: Option<usize>,
}

impl AxisContact {
    pub fn any(&self) -> bool {
        self.boundary.is_some() || self.tile.is_some() || self.actor.is_some()
    }
}

/// Negative and non-finite steps count as no time passing
#[inline]
pub fn sanitize_step(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}

/// Accelerate downward, capped at terminal velocity
pub fn apply_gravity(actor: &mut Actor, tuning: &Tuning, dt: f32) {
    let dt = sanitize_step(dt);
    actor.vel.y = (actor.vel.y + tuning.gravity * dt).min(tuning.terminal_velocity);
}

/// Snap `actor` against `obstacle` along `axis`, opposite to its motion
fn push_out(actor: &mut Actor, axis: Axis, velocity: f32, obstacle: &Rect) {
    let (start, extent) = match axis {
        Axis::Horizontal => (obstacle.x, obstacle.w),
        Axis::Vertical => (obstacle.y, obstacle.h),
    };
    let size = actor.size.along(axis);
    if velocity > 0.0 {
        actor.set_position_on(axis, (start - size) as f32);
    } else if velocity < 0.0 {
        actor.set_position_on(axis, (start + extent) as f32);
    }
    actor.sync_bounds();
}

/// Keep the actor's position on `axis` inside the level.
fn clamp_to_level(actor: &mut Actor, axis: Axis, level: &Level) -> Option<Boundary> {
    let max = (level.extent(axis) - actor.size.along(axis)).max(0) as f32;
    let pos = actor.position_on(axis);
    let (clamped, boundary) = if !pos.is_finite() || pos < 0.0 {
        (0.0, Some(Boundary::Min))
    } else if pos > max {
        (max, Some(Boundary::Max))
    } else {
        (pos, None)
    };
    actor.set_position_on(axis, clamped);
    boundary
}

/// Move `actor` along one axis and resolve its collisions.
///
/// Order: integrate, clamp to the level (wins over tiles), push out of the
/// first blocking tile, push out of the first overlapping actor in `others`,
/// then clamp once more so a push-out can never leave the level.
pub fn resolve_axis(
    actor: &mut Actor,
    axis: Axis,
    level: &Level,
    others: &[Actor],
    dt: f32,
) -> AxisContact {
    let dt = sanitize_step(dt);
    let velocity = actor.velocity_on(axis);
    let mut contact = AxisContact::default();

    let moved = actor.position_on(axis) + velocity * dt;
    actor.set_position_on(axis, moved);
    contact.boundary = clamp_to_level(actor, axis, level);
    actor.sync_bounds();

    if let Some(index) = level.first_blocking_tile(&actor.bounds, axis, velocity) {
        let obstacle = level.tiles()[index].collision_box();
        push_out(actor, axis, velocity, &obstacle);
        contact.tile = Some(index);
    }

    if let Some(index) = first_overlap(others, &actor.bounds) {
        push_out(actor, axis, velocity, &others[index].bounds);
        contact.actor = Some(index);
    }

    clamp_to_level(actor, axis, level);
    actor.sync_bounds();

    if axis == Axis::Vertical && velocity > 0.0 && !contact.any() {
        settle_on_support(actor, level, others, &mut contact);
    }
    contact
}

/// A sub-pixel fall can leave the integer box flush on a surface without
/// overlapping it. Count that as contact and drop the fractional drift.
fn settle_on_support(actor: &mut Actor, level: &Level, others: &[Actor], contact: &mut AxisContact) {
    let below = actor.bounds.offset(0, 1);
    if let Some(index) = level.first_blocking_tile(&below, Axis::Vertical, 1.0) {
        contact.tile = Some(index);
    } else if let Some(index) = first_overlap(others, &below) {
        contact.actor = Some(index);
    } else {
        return;
    }
    actor.pos.y = actor.bounds.y as f32;
}

/// Resolve one tick of movement for `actor` against the level and `others`.
///
/// Combat side effects only apply when `actor` is a combatant: landing on
/// another actor stomps it (or strikes it, while attacking), and an active
/// weapon box strikes the first actor it overlaps.
pub fn resolve_movement(
    actor: &mut Actor,
    level: &Level,
    others: &mut [Actor],
    tuning: &Tuning,
    dt: f32,
    events: &mut Vec<GameEvent>,
) {
    if !actor.pos.x.is_finite() {
        actor.pos.x = 0.0;
    }
    if !actor.pos.y.is_finite() {
        actor.pos.y = 0.0;
    }

    resolve_axis(actor, Axis::Horizontal, level, others, dt);

    let falling = actor.vel.y > 0.0;
    let contact = resolve_axis(actor, Axis::Vertical, level, others, dt);
    let landed_on = contact.actor.filter(|_| falling);
    let grounded = falling
        && (contact.tile.is_some() || contact.boundary == Some(Boundary::Max) || landed_on.is_some());

    if grounded {
        if actor.is_jumping {
            events.push(GameEvent::Landed { actor: actor.id });
        }
        actor.is_jumping = false;
        actor.vel.y = 0.0;
    } else if actor.vel.y != 0.0 {
        actor.is_jumping = true;
    }

    if !actor.is_combatant() {
        return;
    }

    if let Some(index) = landed_on {
        let target = &mut others[index];
        if actor.is_attacking {
            if strike(actor.bounds.center(), actor.facing, target, tuning) {
                events.push(GameEvent::Struck {
                    target: target.id,
                    attacker: actor.id,
                });
            }
        } else if !target.jumped_on {
            target.jumped_on = true;
            actor.head_jump = true;
            events.push(GameEvent::Stomped {
                target: target.id,
                by: actor.id,
            });
        }
    }

    if let Some(weapon) = actor.weapon_box(tuning.weapon_reach) {
        if let Some(index) = first_overlap(others, &weapon) {
            let target = &mut others[index];
            if strike(actor.bounds.center(), actor.facing, target, tuning) {
                events.push(GameEvent::Struck {
                    target: target.id,
                    attacker: actor.id,
                });
            }
        }
    }
}

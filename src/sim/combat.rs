//! Weapon hits, knockback and the struck timer

use glam::Vec2;

use super::actor::{Actor, Facing};
use crate::settings::Tuning;
use crate::signum_or_zero;

/// Knock `target` away from `attacker_center`.
///
/// A target that is still struck is left alone: the knockback cannot be
/// re-triggered until its timer has run out. Returns whether the hit landed.
pub fn strike(attacker_center: Vec2, attacker_facing: Facing, target: &mut Actor, tuning: &Tuning) -> bool {
    if target.is_struck() {
        return false;
    }

    let mut direction = signum_or_zero(target.bounds.center().x - attacker_center.x);
    if direction == 0.0 {
        direction = attacker_facing.sign();
    }

    target.vel.x = direction * tuning.knockback_speed;
    target.struck = Some(tuning.struck_duration);
    target.is_moving = false;
    true
}

/// Count down the struck timer. On expiry the knockback stops.
/// Returns true on the tick the actor recovers.
pub fn tick_struck(actor: &mut Actor, dt: f32) -> bool {
    let Some(remaining) = actor.struck else {
        return false;
    };
    let remaining = remaining - dt;
    if remaining <= 0.0 {
        actor.struck = None;
        actor.vel.x = 0.0;
        true
    } else {
        actor.struck = Some(remaining);
        false
    }
}

/// Turn a queued head-jump into an upward bounce
pub fn apply_head_jump(actor: &mut Actor, tuning: &Tuning) -> bool {
    if !actor.head_jump {
        return false;
    }
    actor.head_jump = false;
    actor.vel.y = -tuning.jump_speed;
    actor.is_jumping = true;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::{ActorId, NpcVariant, Size};

    fn npc_at(x: f32) -> Actor {
        Actor::npc(ActorId(1), NpcVariant::Villager(1), Vec2::new(x, 0.0), Size::new(40, 40))
    }

    #[test]
    fn test_strike_knocks_away_from_attacker() {
        let tuning = Tuning::default();
        let mut right_of = npc_at(200.0);
        assert!(strike(Vec2::new(100.0, 20.0), Facing::Left, &mut right_of, &tuning));
        assert_eq!(right_of.vel.x, tuning.knockback_speed);
        assert_eq!(right_of.struck, Some(tuning.struck_duration));

        let mut left_of = npc_at(0.0);
        assert!(strike(Vec2::new(100.0, 20.0), Facing::Right, &mut left_of, &tuning));
        assert_eq!(left_of.vel.x, -tuning.knockback_speed);
    }

    #[test]
    fn test_strike_falls_back_to_facing_when_centered() {
        let tuning = Tuning::default();
        let mut target = npc_at(80.0); // center x = 100
        assert!(strike(Vec2::new(100.0, 0.0), Facing::Right, &mut target, &tuning));
        assert_eq!(target.vel.x, tuning.knockback_speed);
    }

    #[test]
    fn test_no_retrigger_while_struck() {
        let tuning = Tuning::default();
        let mut target = npc_at(200.0);
        assert!(strike(Vec2::new(100.0, 0.0), Facing::Right, &mut target, &tuning));

        // Half the timer elapses; a second hit from the other side is ignored
        tick_struck(&mut target, tuning.struck_duration / 2.0);
        assert!(!strike(Vec2::new(400.0, 0.0), Facing::Left, &mut target, &tuning));
        assert_eq!(target.vel.x, tuning.knockback_speed);

        // Once it elapses, knockback stops and the target can be hit again
        assert!(tick_struck(&mut target, tuning.struck_duration));
        assert_eq!(target.vel.x, 0.0);
        assert!(!target.is_struck());
        assert!(strike(Vec2::new(400.0, 0.0), Facing::Left, &mut target, &tuning));
        assert_eq!(target.vel.x, -tuning.knockback_speed);
    }

    #[test]
    fn test_head_jump_bounce() {
        let tuning = Tuning::default();
        let mut player = Actor::player(Vec2::ZERO, Size::new(37, 48));
        assert!(!apply_head_jump(&mut player, &tuning));

        player.head_jump = true;
        player.vel.y = 300.0;
        assert!(apply_head_jump(&mut player, &tuning));
        assert_eq!(player.vel.y, -tuning.jump_speed);
        assert!(player.is_jumping);
        assert!(!player.head_jump);
    }
}

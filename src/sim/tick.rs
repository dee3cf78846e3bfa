//! Per-frame simulation tick
//!
//! Advances a session by one variable-length step. Roster changes requested
//! during a frame only take effect at its boundaries, so every scan inside
//! the frame sees a stable NPC list.

use glam::Vec2;

use super::actor::{Actor, ActorId, Facing};
use super::combat::{apply_head_jump, tick_struck};
use super::resolve::{apply_gravity, resolve_movement, sanitize_step};
use super::state::{GameEvent, GameState};
use crate::consts::{ANIMATION_FRAMES, NPC_FRAME_SECONDS};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal intent: negative left, positive right, zero stop
    pub move_x: i8,
    /// Jump (ignored while airborne)
    pub jump: bool,
    /// Weapon held out this frame
    pub attack: bool,
    pub toggle_particles: bool,
    /// Start the session over
    pub restart: bool,
    /// World positions to spawn a random NPC at
    pub spawn_at: Vec<Vec2>,
    /// Remove the most recently added NPC
    pub despawn_last: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = sanitize_step(dt);

    if input.restart {
        state.restart();
        return;
    }

    if input.toggle_particles {
        state.particles.toggle();
    }
    for &pos in &input.spawn_at {
        let request = state.random_spawn(pos);
        state.npcs.queue_spawn(request);
    }
    if input.despawn_last {
        state.npcs.queue_despawn_last();
    }
    state.apply_roster_changes();

    // Player intent
    let player = &mut state.player;
    player.vel.x = f32::from(input.move_x.signum()) * state.tuning.player_speed;
    player.is_moving = input.move_x != 0;
    if let Some(facing) = Facing::from_velocity(player.vel.x) {
        player.facing = facing;
    }
    player.is_attacking = input.attack;
    if input.jump && !player.is_jumping {
        player.vel.y = -state.tuning.jump_speed;
        player.is_jumping = true;
    }
    apply_head_jump(player, &state.tuning);

    for npc in state.npcs.iter_mut() {
        if tick_struck(npc, dt) {
            state.events.push(GameEvent::Recovered { actor: npc.id });
        }
    }

    state.wander.update(dt, state.npcs.actors_mut(), &mut state.rng, state.tuning.npc_speed);

    apply_gravity(&mut state.player, &state.tuning, dt);
    for npc in state.npcs.iter_mut() {
        apply_gravity(npc, &state.tuning, dt);
    }

    // Player first, then NPCs in roster order
    resolve_movement(
        &mut state.player,
        &state.level,
        state.npcs.actors_mut(),
        &state.tuning,
        dt,
        &mut state.events,
    );
    for npc in state.npcs.iter_mut() {
        resolve_movement(
            npc,
            &state.level,
            std::slice::from_mut(&mut state.player),
            &state.tuning,
            dt,
            &mut state.events,
        );
    }

    let stomped: Vec<ActorId> = state.npcs.iter().filter(|n| n.jumped_on).map(|n| n.id).collect();
    for id in stomped {
        state.npcs.queue_despawn(id);
    }
    state.apply_roster_changes();

    state
        .camera
        .follow(&state.player.bounds, state.level.width(), state.level.height());
    state.particles.update(&state.player.bounds, &mut state.rng);

    if state.player.is_moving {
        state.player.advance_animation(dt);
    }
    for npc in state.npcs.iter_mut().filter(|n| n.is_moving) {
        npc.advance_animation(dt);
    }

    state.time += dt;
    state.time_ticks += 1;
}

/// Current walk-cycle frame of an actor, using the configured character rate
pub fn walk_frame(state: &GameState, actor: &Actor) -> usize {
    let seconds = if actor.is_player() {
        state.settings.character_frame_seconds()
    } else {
        NPC_FRAME_SECONDS
    };
    actor.animation_frame(seconds, ANIMATION_FRAMES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::{Settings, Tuning};
    use crate::sim::actor::{NpcVariant, Size};
    use crate::sim::level::Level;
    use crate::sim::roster::SpawnRequest;

    const DT: f32 = 1.0 / 60.0;

    fn demo_state(seed: u64) -> GameState {
        let level = Level::parse_standard(include_str!("../../maps/demo.map")).unwrap();
        GameState::new(seed, level, Settings::default(), Tuning::default())
    }

    fn run(state: &mut GameState, input: &TickInput, frames: usize) {
        for _ in 0..frames {
            tick(state, input, DT);
        }
    }

    #[test]
    fn test_deterministic_replay() {
        let mut a = demo_state(1234);
        let mut b = demo_state(1234);
        let right = TickInput {
            move_x: 1,
            ..Default::default()
        };
        run(&mut a, &right, 120);
        run(&mut b, &right, 120);

        assert_eq!(a.player.pos, b.player.pos);
        let npcs = |s: &GameState| s.npcs.iter().map(|n| (n.id, n.pos)).collect::<Vec<_>>();
        assert_eq!(npcs(&a), npcs(&b));
        assert_eq!(a.time_ticks, 120);
    }

    #[test]
    fn test_player_settles_on_floor() {
        let mut state = demo_state(7);
        state.npcs.clear();
        run(&mut state, &TickInput::default(), 180);

        // Ground row is the last tile row
        let floor = (TILE_ROWS as i32 - 1) * TILE_HEIGHT;
        assert_eq!(state.player.bounds.bottom(), floor);
        assert!(!state.player.is_jumping);
        assert_eq!(state.player.vel.y, 0.0);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut state = demo_state(7);
        state.npcs.clear();
        run(&mut state, &TickInput::default(), 180);

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump, DT);
        assert!(state.player.is_jumping);
        let vy = state.player.vel.y;
        assert!(vy < 0.0);

        // Held jump in the air does not re-launch
        tick(&mut state, &jump, DT);
        assert!(state.player.vel.y > vy);
    }

    fn assert_grounded_at_rate(dt: f32) {
        let mut state = demo_state(7);
        state.npcs.clear();
        let idle = TickInput::default();
        for _ in 0..(3.0 / dt) as usize {
            tick(&mut state, &idle, dt);
        }

        let floor = (TILE_ROWS as i32 - 1) * TILE_HEIGHT;
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        for _ in 0..12 {
            tick(&mut state, &idle, dt);
            assert!(!state.player.is_jumping, "flagged airborne at dt {dt}");
            assert_eq!(state.player.pos.y, (floor - PLAYER_HEIGHT) as f32);
            assert_eq!(state.player.bounds.bottom(), floor);

            // A jump is honored on every frame while standing
            let mut jumped = state.clone();
            tick(&mut jumped, &jump, dt);
            assert!(jumped.player.vel.y < 0.0);
            assert!(jumped.player.is_jumping);
        }
    }

    #[test]
    fn test_grounded_at_high_frame_rates() {
        assert_grounded_at_rate(1.0 / 120.0);
        assert_grounded_at_rate(1.0 / 144.0);
        assert_grounded_at_rate(1.0 / 240.0);
    }

    #[test]
    fn test_stomp_removes_npc_and_bounces() {
        let mut state = demo_state(3);
        state.npcs.clear();
        state.apply_roster_changes();
        state.drain_events();

        let floor = (TILE_ROWS as i32 - 1) * TILE_HEIGHT;
        state.npcs.queue_spawn(SpawnRequest {
            variant: NpcVariant::Villager(1),
            pos: Vec2::new(400.0, (floor - NPC_HEIGHT) as f32),
            size: Size::new(NPC_WIDTH, NPC_HEIGHT),
        });
        state.apply_roster_changes();
        let target = state.npcs.actors()[0].id;

        // Player just above the NPC's head, falling
        state.player.pos = Vec2::new(400.0, (floor - NPC_HEIGHT - PLAYER_HEIGHT - 5) as f32);
        state.player.vel.y = 600.0;
        state.player.is_jumping = true;
        state.player.sync_bounds();

        tick(&mut state, &TickInput::default(), DT);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Stomped {
            target,
            by: ActorId::PLAYER
        }));
        assert!(events.contains(&GameEvent::Despawned { actor: target }));
        assert!(state.npcs.is_empty());

        // Bounce is applied on the following frame
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.player.vel.y < 0.0);
        assert!(state.player.is_jumping);
    }

    #[test]
    fn test_spawn_and_despawn_requests() {
        let mut state = demo_state(11);
        state.npcs.clear();
        state.drain_events();
        let spawn = TickInput {
            spawn_at: vec![Vec2::new(300.0, 100.0), Vec2::new(500.0, 100.0)],
            ..Default::default()
        };
        tick(&mut state, &spawn, DT);
        assert_eq!(state.npcs.len(), 2);
        let spawned = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Spawned { .. }))
            .count();
        assert_eq!(spawned, 2);

        let despawn = TickInput {
            despawn_last: true,
            ..Default::default()
        };
        tick(&mut state, &despawn, DT);
        assert_eq!(state.npcs.len(), 1);
    }

    #[test]
    fn test_restart_input() {
        let mut state = demo_state(2);
        run(
            &mut state,
            &TickInput {
                move_x: 1,
                ..Default::default()
            },
            30,
        );
        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
            DT,
        );
        assert_eq!(state.player.pos, Vec2::new((PLAYER_WIDTH + TILE_WIDTH) as f32, 0.0));
        assert!(state.events.contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_facing_follows_intent() {
        let mut state = demo_state(2);
        let left = TickInput {
            move_x: -1,
            ..Default::default()
        };
        tick(&mut state, &left, DT);
        assert_eq!(state.player.facing, Facing::Left);
        assert!(state.player.is_moving);
        tick(
            &mut state,
            &TickInput {
                move_x: 1,
                ..Default::default()
            },
            DT,
        );
        assert_eq!(state.player.facing, Facing::Right);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.player.facing, Facing::Right);
        assert!(!state.player.is_moving);
    }

    #[test]
    fn test_zero_step_changes_nothing_physical() {
        let mut state = demo_state(4);
        let before = state.player.pos;
        tick(&mut state, &TickInput::default(), f32::NAN);
        assert_eq!(state.player.pos, before);
    }
}

//! Frame rendering as draw commands
//!
//! Turns a `GameState` into an ordered list of textured-quad draws in screen
//! space. Whatever presents them (a window, a test, a JSON dump) implements
//! `RenderTarget`.

pub mod sprites;

use serde::{Deserialize, Serialize};

pub use sprites::{SpriteSheet, tile_clips};

use crate::consts::*;
use crate::sim::actor::{Actor, ActorKind, Facing, NpcVariant};
use crate::sim::particle::ParticleColor;
use crate::sim::rect::Rect;
use crate::sim::state::GameState;
use crate::sim::tick::walk_frame;

/// On-screen size of a particle quad
pub const PARTICLE_SIZE: i32 = 10;

/// Standing pose
const IDLE_FRAME: usize = 1;
/// Pose held while falling away from a ceiling tap
const FALL_FRAME: usize = 0;

/// Which texture a draw samples from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureId {
    Tiles,
    Player,
    Villager(u8),
    Brute,
    Particle(ParticleColor),
    Shimmer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
}

/// One textured quad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub texture: TextureId,
    /// Destination in screen pixels
    pub dest: Rect,
    /// Source rectangle; `None` samples the whole texture
    pub clip: Option<Rect>,
    pub flip: Flip,
}

/// Sink for draw commands
pub trait RenderTarget {
    fn draw(&mut self, command: &DrawCommand);
}

impl RenderTarget for Vec<DrawCommand> {
    fn draw(&mut self, command: &DrawCommand) {
        self.push(*command);
    }
}

/// Clip layouts for every sheet a frame can reference
#[derive(Debug, Clone)]
pub struct SpriteAtlas {
    pub tiles: Vec<Rect>,
    pub player: SpriteSheet,
    pub villager: SpriteSheet,
    pub brute: SpriteSheet,
}

impl SpriteAtlas {
    pub fn new(state: &GameState) -> Self {
        Self {
            tiles: tile_clips(state.level.layout(), TILESHEET_WIDTH),
            player: SpriteSheet::uniform(
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
                ANIMATION_FRAMES,
                PLAYER_WIDTH * ANIMATION_FRAMES as i32 + ANIMATION_FRAMES as i32,
            ),
            villager: SpriteSheet::uniform(
                NPC_WIDTH,
                NPC_HEIGHT,
                ANIMATION_FRAMES,
                NPC_WIDTH * ANIMATION_FRAMES as i32 + ANIMATION_FRAMES as i32,
            ),
            brute: SpriteSheet::brute(),
        }
    }
}

/// Draw one frame: visible tiles, the player, NPCs, then particles on top
pub fn render_frame(state: &GameState, atlas: &SpriteAtlas, target: &mut impl RenderTarget) {
    let camera = &state.camera;

    for tile in state.level.tiles() {
        if !camera.visible(&tile.bounds()) {
            continue;
        }
        let Some(clip) = atlas.tiles.get(usize::from(tile.code())) else {
            continue;
        };
        target.draw(&DrawCommand {
            texture: TextureId::Tiles,
            dest: camera.to_screen(&tile.bounds()),
            clip: Some(*clip),
            flip: Flip::None,
        });
    }

    draw_actor(state, atlas, &state.player, target);
    for npc in state.npcs.iter() {
        draw_actor(state, atlas, npc, target);
    }

    if !state.particles.enabled {
        return;
    }
    for particle in state.particles.particles() {
        let dest = camera.to_screen(&Rect::new(particle.x, particle.y, PARTICLE_SIZE, PARTICLE_SIZE));
        target.draw(&DrawCommand {
            texture: TextureId::Particle(particle.color),
            dest,
            clip: None,
            flip: Flip::None,
        });
        if particle.shimmer() {
            target.draw(&DrawCommand {
                texture: TextureId::Shimmer,
                dest,
                clip: None,
                flip: Flip::None,
            });
        }
    }
}

fn draw_actor(state: &GameState, atlas: &SpriteAtlas, actor: &Actor, target: &mut impl RenderTarget) {
    if !state.camera.visible(&actor.bounds) {
        return;
    }

    let (texture, sheet) = match actor.kind {
        ActorKind::Player => (TextureId::Player, &atlas.player),
        ActorKind::Npc(NpcVariant::Villager(n)) => (TextureId::Villager(n), &atlas.villager),
        ActorKind::Npc(NpcVariant::Brute) => (TextureId::Brute, &atlas.brute),
    };

    let brute = matches!(actor.kind, ActorKind::Npc(NpcVariant::Brute));
    let frame = if actor.is_player()
        && actor.is_jumping
        && state.level.touches_tap(&actor.bounds, state.tuning.tap_margin)
    {
        FALL_FRAME
    } else if actor.is_moving || brute {
        walk_frame(state, actor)
    } else {
        IDLE_FRAME
    };

    // Sheets are drawn facing left
    let flip = match actor.facing {
        Facing::Left => Flip::None,
        Facing::Right => Flip::Horizontal,
    };

    target.draw(&DrawCommand {
        texture,
        dest: state.camera.to_screen(&actor.bounds),
        clip: sheet.clip(frame),
        flip,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Settings, Tuning};
    use crate::sim::level::Level;
    use crate::sim::tick::{TickInput, tick};
    use glam::Vec2;

    fn demo_state() -> GameState {
        let level = Level::parse_standard(include_str!("../../maps/demo.map")).unwrap();
        GameState::new(8, level, Settings::default(), Tuning::default())
    }

    fn draws(state: &GameState) -> Vec<DrawCommand> {
        let atlas = SpriteAtlas::new(state);
        let mut out = Vec::new();
        render_frame(state, &atlas, &mut out);
        out
    }

    #[test]
    fn test_draw_order() {
        let mut state = demo_state();
        tick(&mut state, &TickInput::default(), 1.0 / 60.0);
        let out = draws(&state);

        let first_actor = out
            .iter()
            .position(|d| d.texture == TextureId::Player)
            .unwrap();
        assert!(out[..first_actor].iter().all(|d| d.texture == TextureId::Tiles));
        let last_tile = out.iter().rposition(|d| d.texture == TextureId::Tiles).unwrap();
        assert!(last_tile < first_actor);
        assert!(matches!(
            out.last().map(|d| d.texture),
            Some(TextureId::Particle(_) | TextureId::Shimmer)
        ));
    }

    #[test]
    fn test_only_visible_tiles_drawn() {
        let state = demo_state();
        let tiles = draws(&state)
            .iter()
            .filter(|d| d.texture == TextureId::Tiles)
            .count();
        // 1024×768 view over 80 px tiles at the origin: 13 columns, 10 rows
        assert_eq!(tiles, 13 * 10);
    }

    #[test]
    fn test_player_flip_and_screen_space() {
        let mut state = demo_state();
        state.player.facing = Facing::Right;
        state.player.pos = Vec2::new(200.0, 100.0);
        state.player.sync_bounds();

        let out = draws(&state);
        let player = out.iter().find(|d| d.texture == TextureId::Player).unwrap();
        assert_eq!(player.flip, Flip::Horizontal);
        assert_eq!(player.dest, state.camera.to_screen(&state.player.bounds));
        assert_eq!(player.clip, atlas_player_clip(&state, IDLE_FRAME));
    }

    #[test]
    fn test_particles_hidden_when_disabled() {
        let mut state = demo_state();
        tick(
            &mut state,
            &TickInput {
                toggle_particles: true,
                ..Default::default()
            },
            1.0 / 60.0,
        );
        assert!(
            draws(&state)
                .iter()
                .all(|d| !matches!(d.texture, TextureId::Particle(_) | TextureId::Shimmer))
        );
    }

    fn atlas_player_clip(state: &GameState, frame: usize) -> Option<Rect> {
        SpriteAtlas::new(state).player.clip(frame)
    }
}

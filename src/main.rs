//! Side Scroller demo driver
//!
//! Runs a scripted session headlessly and prints the last frame's draw list
//! as JSON. Pass `--realtime` to pace the loop at the screen rate.

use glam::Vec2;

use side_scroller::{Settings, Tuning};
use side_scroller::consts::*;
use side_scroller::platform::FrameClock;
use side_scroller::renderer::{DrawCommand, SpriteAtlas, render_frame};
use side_scroller::sim::{GameEvent, GameState, Level, LevelLayout, TickInput, TileClassifier, tick};

const CONFIG_PATH: &str = "config.txt";
const MAP_PATH: &str = "lazy.map";
const ALT_MAP_PATH: &str = "lazy2.map";
const DEMO_MAP: &str = include_str!("../maps/demo.map");
const SESSION_FRAMES: u64 = 600;
const SEED: u64 = 0x5eed;

fn load_settings() -> Settings {
    match Settings::load(CONFIG_PATH) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Using default settings, could not read {CONFIG_PATH}: {e}");
            Settings::default()
        }
    }
}

fn load_level(path: &str) -> Option<Level> {
    let layout = LevelLayout::standard();
    let classifier = TileClassifier::banded(layout.sprite_count);
    match Level::load_map(path, layout, classifier) {
        Ok(level) => Some(level),
        Err(e) => {
            log::warn!("Could not load map {path}: {e}");
            None
        }
    }
}

/// Scripted input for frame `n`
fn scripted_input(n: u64) -> TickInput {
    let mut input = TickInput {
        move_x: match n {
            0..120 => 1,
            200..260 => -1,
            _ => 0,
        },
        jump: n == 90 || n == 230,
        attack: (150..170).contains(&n),
        ..Default::default()
    };
    match n {
        180 => input.spawn_at = vec![Vec2::new(400.0, 0.0), Vec2::new(700.0, 0.0)],
        320 => input.despawn_last = true,
        400 | 460 => input.toggle_particles = true,
        _ => {}
    }
    input
}

fn main() {
    env_logger::init();
    log::info!("Side Scroller (native) starting...");

    let realtime = std::env::args().any(|a| a == "--realtime");
    let settings = load_settings();
    let level = match load_level(MAP_PATH) {
        Some(level) => level,
        None => match Level::parse_standard(DEMO_MAP) {
            Ok(level) => {
                log::warn!("Falling back to the bundled demo map");
                level
            }
            Err(e) => {
                log::error!("Bundled demo map is invalid: {e}");
                std::process::exit(1);
            }
        },
    };

    let mut state = GameState::new(SEED, level, settings, Tuning::default());
    let mut clock = FrameClock::default();
    let frame_dt = 1.0 / SCREEN_FPS as f32;

    for n in 0..SESSION_FRAMES {
        let measured = clock.step();
        let dt = if realtime { measured } else { frame_dt };

        if n == 300 {
            if let Some(level) = load_level(ALT_MAP_PATH) {
                log::info!("Switching to {ALT_MAP_PATH}");
                state.replace_level(level);
            }
        }

        tick(&mut state, &scripted_input(n), dt);
        for event in state.drain_events() {
            match event {
                GameEvent::Stomped { target, .. } => log::info!("NPC {} stomped", target.0),
                GameEvent::Struck { target, .. } => log::info!("NPC {} struck", target.0),
                other => log::debug!("{other:?}"),
            }
        }

        if realtime {
            clock.pace();
        }
    }

    log::info!(
        "Session done: {} frames, {:.1} fps, player at ({:.0}, {:.0}), {} NPCs",
        clock.frames(),
        clock.average_fps(),
        state.player.pos.x,
        state.player.pos.y,
        state.npcs.len()
    );

    let atlas = SpriteAtlas::new(&state);
    let mut frame: Vec<DrawCommand> = Vec::new();
    render_frame(&state, &atlas, &mut frame);
    match serde_json::to_string_pretty(&frame) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not serialize draw list: {e}"),
    }
}

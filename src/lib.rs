//! Side Scroller - a tile-based 2D platformer simulation
//!
//! Core modules:
//! - `sim`: Simulation (tiles, actors, collision resolution, combat, AI)
//! - `renderer`: Draw-command production for an external renderer
//! - `platform`: Frame clock and pacing for the game loop
//! - `settings`: Config file parsing and physics tuning

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{ConfigError, Settings, Tuning};

/// Game configuration constants
pub mod consts {
    /// Visible screen size in pixels
    pub const SCREEN_WIDTH: i32 = 1024;
    pub const SCREEN_HEIGHT: i32 = 768;

    /// Level extent in pixels
    pub const LEVEL_WIDTH: i32 = 1280;
    pub const LEVEL_HEIGHT: i32 = 960;

    /// Frame rate cap
    pub const SCREEN_FPS: u32 = 60;

    /// Tile grid
    pub const TILE_WIDTH: i32 = 80;
    pub const TILE_HEIGHT: i32 = 80;
    pub const TILE_COLUMNS: usize = 16;
    pub const TILE_ROWS: usize = 12;
    pub const TOTAL_TILES: usize = TILE_COLUMNS * TILE_ROWS;
    /// Number of tile codes a map may use (`0..TOTAL_TILE_SPRITES`)
    pub const TOTAL_TILE_SPRITES: usize = 68;
    /// Tile sheet width in pixels (two halves, two columns each)
    pub const TILESHEET_WIDTH: i32 = 320;

    /// Unscaled sprite sizes
    pub const PLAYER_WIDTH: i32 = 37;
    pub const PLAYER_HEIGHT: i32 = 48;
    pub const NPC_WIDTH: i32 = 38;
    pub const NPC_HEIGHT: i32 = 55;
    pub const BRUTE_WIDTH: i32 = 76;
    pub const BRUTE_HEIGHT: i32 = 105;
    pub const ANIMATION_FRAMES: usize = 4;
    /// Largest accepted config scale factor
    pub const MAX_SCALE: f32 = 8.0;
    /// Upper bound on a scaled actor box side, in pixels
    pub const MAX_ACTOR_EXTENT: i32 = 1024;

    /// Horizontal run speed of the player (pixels/s)
    pub const PLAYER_SPEED_X: f32 = 600.0;
    /// Upward launch speed of a jump or head-jump bounce (pixels/s)
    pub const JUMP_SPEED: f32 = 900.0;
    /// Horizontal walk speed of NPCs (pixels/s)
    pub const NPC_SPEED_X: f32 = 60.0;
    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 3600.0;
    /// Maximum falling speed (pixels/s)
    pub const TERMINAL_VELOCITY: f32 = 900.0;

    /// Horizontal velocity imparted on a struck actor (pixels/s)
    pub const KNOCKBACK_SPEED: f32 = 900.0;
    /// How long a struck actor stays struck (seconds)
    pub const STRUCK_DURATION: f32 = 0.3;
    /// Width of the weapon hitbox in front of an attacking actor
    pub const WEAPON_REACH: i32 = 30;

    /// NPCs re-roll their wander decision this often (seconds)
    pub const AI_INTERVAL: f32 = 2.0;
    /// Upward extension of tap-surface tiles for the ceiling-tap query
    pub const TAP_MARGIN: i32 = 50;

    /// Particles kept around the player
    pub const TOTAL_PARTICLES: usize = 15;
    /// Frames a particle lives
    pub const PARTICLE_FRAME_CAP: u32 = 10;

    /// NPC animation frame duration (seconds)
    pub const NPC_FRAME_SECONDS: f32 = 0.1;
}

/// Sign of `v` as -1, 0 or 1
#[inline]
pub fn signum_or_zero(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

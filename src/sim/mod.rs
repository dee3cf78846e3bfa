//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Stable iteration order (roster order, player first)
//! - Roster changes only at frame boundaries
//! - No rendering or platform dependencies

pub mod actor;
pub mod ai;
pub mod camera;
pub mod combat;
pub mod level;
pub mod particle;
pub mod rect;
pub mod resolve;
pub mod roster;
pub mod state;
pub mod tick;
pub mod tile;

pub use actor::{Actor, ActorId, ActorKind, Facing, NpcVariant, Size};
pub use camera::Camera;
pub use level::{Level, LevelLayout, MapError};
pub use particle::{Particle, ParticleColor, ParticleField};
pub use rect::{Axis, Rect};
pub use resolve::{AxisContact, Boundary, resolve_axis, resolve_movement};
pub use roster::{Roster, SpawnRequest};
pub use state::{GameEvent, GameState};
pub use tick::{TickInput, tick, walk_frame};
pub use tile::{Tile, TileClassifier, TileKind};

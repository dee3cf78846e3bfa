//! Tiles and tile-kind classification
//!
//! A map stores raw type codes. Which codes block movement is a level-design
//! decision, so it is captured once in a `TileClassifier` lookup table
//! instead of being re-derived from numeric ranges at every query.

use serde::{Deserialize, Serialize};

use super::rect::{Axis, Rect};

/// Collision behavior of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileKind {
    /// Background/decoration, never blocks
    #[default]
    Empty,
    /// Blocks on both axes with the full tile box
    Solid,
    /// Top half only, one-way: blocks falling actors, passable from below
    Platform,
    /// Diagonal tile; passable to the resolver, kept for rendering
    Ramp,
}

impl TileKind {
    /// Whether this kind stops an actor moving along `axis` at `velocity`
    pub fn blocks(self, axis: Axis, velocity: f32) -> bool {
        match self {
            TileKind::Solid => true,
            TileKind::Platform => axis == Axis::Vertical && velocity > 0.0,
            TileKind::Empty | TileKind::Ramp => false,
        }
    }
}

/// Code → kind lookup table, built once per level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileClassifier {
    kinds: Vec<TileKind>,
    /// Codes whose tops register a ceiling tap
    tap: Vec<bool>,
}

impl TileClassifier {
    /// Classifier for the stock tile sheet.
    ///
    /// Every fourth code is a background variant. Solid bands are `1..20` and
    /// `49..68`, the platform band is `21..=27` (minus 23), and code 48 is the
    /// diagonal ramp.
    pub fn banded(sprite_count: usize) -> Self {
        let kinds = (0..sprite_count)
            .map(|code| {
                let decorated = code % 4 == 0;
                if code == 48 {
                    TileKind::Ramp
                } else if !decorated && (code < 20 || (49..68).contains(&code)) {
                    TileKind::Solid
                } else if !decorated && (21..=27).contains(&code) && code != 23 {
                    TileKind::Platform
                } else {
                    TileKind::Empty
                }
            })
            .collect();
        let tap = (0..sprite_count).map(|code| code % 4 != 0 && code < 20).collect();
        Self { kinds, tap }
    }

    /// Classifier from an explicit table. Solid codes double as tap surfaces.
    pub fn from_kinds(kinds: Vec<TileKind>) -> Self {
        let tap = kinds.iter().map(|k| *k == TileKind::Solid).collect();
        Self { kinds, tap }
    }

    /// Kind for `code`. Codes outside the table are `Empty`.
    pub fn classify(&self, code: u16) -> TileKind {
        self.kinds.get(code as usize).copied().unwrap_or_default()
    }

    pub fn is_tap_surface(&self, code: u16) -> bool {
        self.tap.get(code as usize).copied().unwrap_or(false)
    }

    /// Number of codes in the table
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// A static level cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    code: u16,
    kind: TileKind,
    bounds: Rect,
    collision_box: Rect,
    tap_surface: bool,
}

impl Tile {
    pub fn new(x: i32, y: i32, w: i32, h: i32, code: u16, classifier: &TileClassifier) -> Self {
        let kind = classifier.classify(code);
        let bounds = Rect::new(x, y, w, h);
        let collision_box = match kind {
            TileKind::Platform => Rect::new(x, y, w, h / 2),
            _ => bounds,
        };
        Self {
            code,
            kind,
            bounds,
            collision_box,
            tap_surface: classifier.is_tap_surface(code),
        }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    /// Full grid cell, used for rendering and culling
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Box used for collision (half height for platforms)
    pub fn collision_box(&self) -> Rect {
        self.collision_box
    }

    pub fn is_tap_surface(&self) -> bool {
        self.tap_surface
    }

    /// Whether `rect` moving along `axis` at `velocity` is stopped by this tile
    pub fn blocks(&self, rect: &Rect, axis: Axis, velocity: f32) -> bool {
        self.kind.blocks(axis, velocity) && rect.overlaps(&self.collision_box)
    }
}

//! Level geometry and map loading
//!
//! A map file is a whitespace-separated list of tile codes, laid out
//! row-major over a fixed grid. The level owns every tile; reloading a map
//! replaces the level wholesale.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::rect::{Axis, Rect};
use super::tile::{Tile, TileClassifier};
use crate::consts::*;

/// Map loading failures
#[derive(thiserror::Error, Debug)]
pub enum MapError {
    #[error("unable to read map file: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of map after {index} tiles")]
    UnexpectedEnd { index: usize },

    #[error("tile {index}: `{token}` is not a tile code")]
    InvalidToken { index: usize, token: String },

    #[error("tile {index}: invalid tile type {code}")]
    InvalidTileType { index: usize, code: u64 },

    #[error("map has more than the expected {expected} tiles")]
    TrailingData { expected: usize },
}

/// Grid dimensions and level extent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub columns: usize,
    pub rows: usize,
    pub tile_width: i32,
    pub tile_height: i32,
    /// Level extent in pixels; actors are clamped to it
    pub width: i32,
    pub height: i32,
    /// Valid codes are `0..sprite_count`
    pub sprite_count: usize,
}

impl LevelLayout {
    /// 16×12 grid of 80 px tiles in a 1280×960 level
    pub const fn standard() -> Self {
        Self {
            columns: TILE_COLUMNS,
            rows: TILE_ROWS,
            tile_width: TILE_WIDTH,
            tile_height: TILE_HEIGHT,
            width: LEVEL_WIDTH,
            height: LEVEL_HEIGHT,
            sprite_count: TOTAL_TILE_SPRITES,
        }
    }

    pub fn total_tiles(&self) -> usize {
        self.columns * self.rows
    }
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self::standard()
    }
}

/// The static tile set of one map
#[derive(Debug, Clone)]
pub struct Level {
    layout: LevelLayout,
    classifier: TileClassifier,
    tiles: Vec<Tile>,
}

impl Level {
    /// Build a level from raw codes (row-major)
    pub fn from_codes(
        codes: &[u64],
        layout: LevelLayout,
        classifier: TileClassifier,
    ) -> Result<Self, MapError> {
        let expected = layout.total_tiles();
        if codes.len() < expected {
            return Err(MapError::UnexpectedEnd { index: codes.len() });
        }
        if codes.len() > expected {
            return Err(MapError::TrailingData { expected });
        }

        let mut tiles = Vec::with_capacity(expected);
        for (index, &code) in codes.iter().enumerate() {
            if code >= layout.sprite_count as u64 {
                return Err(MapError::InvalidTileType { index, code });
            }
            let x = (index % layout.columns) as i32 * layout.tile_width;
            let y = (index / layout.columns) as i32 * layout.tile_height;
            tiles.push(Tile::new(
                x,
                y,
                layout.tile_width,
                layout.tile_height,
                code as u16,
                &classifier,
            ));
        }

        Ok(Self {
            layout,
            classifier,
            tiles,
        })
    }

    /// Parse map text
    pub fn parse_map(
        text: &str,
        layout: LevelLayout,
        classifier: TileClassifier,
    ) -> Result<Self, MapError> {
        let codes = text
            .split_whitespace()
            .enumerate()
            .map(|(index, token)| {
                token.parse::<u64>().map_err(|_| MapError::InvalidToken {
                    index,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_codes(&codes, layout, classifier)
    }

    /// Read and parse a map file
    pub fn load_map(
        path: impl AsRef<Path>,
        layout: LevelLayout,
        classifier: TileClassifier,
    ) -> Result<Self, MapError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let level = Self::parse_map(&text, layout, classifier)?;
        log::info!("Loaded map {} ({} tiles)", path.display(), level.tiles.len());
        Ok(level)
    }

    /// Standard layout with the stock classifier
    pub fn parse_standard(text: &str) -> Result<Self, MapError> {
        let layout = LevelLayout::standard();
        Self::parse_map(text, layout, TileClassifier::banded(layout.sprite_count))
    }

    pub fn layout(&self) -> &LevelLayout {
        &self.layout
    }

    pub fn classifier(&self) -> &TileClassifier {
        &self.classifier
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn width(&self) -> i32 {
        self.layout.width
    }

    pub fn height(&self) -> i32 {
        self.layout.height
    }

    /// Extent along `axis`
    pub fn extent(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.layout.width,
            Axis::Vertical => self.layout.height,
        }
    }

    /// First tile, in storage order, that stops `rect` moving along `axis`.
    ///
    /// Not necessarily the nearest: overlapping neighbours resolve against
    /// whichever comes first in the grid.
    pub fn first_blocking_tile(&self, rect: &Rect, axis: Axis, velocity: f32) -> Option<usize> {
        self.tiles
            .iter()
            .position(|tile| tile.blocks(rect, axis, velocity))
    }

    /// Whether `rect` is under (or inside) a tap-surface tile, with the
    /// tile's box stretched upward by `margin` pixels
    pub fn touches_tap(&self, rect: &Rect, margin: i32) -> bool {
        self.tiles
            .iter()
            .any(|tile| tile.is_tap_surface() && rect.overlaps_with_top_margin(&tile.bounds(), margin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tile::TileKind;

    fn two_tile_layout() -> LevelLayout {
        LevelLayout {
            columns: 2,
            rows: 1,
            sprite_count: TOTAL_TILE_SPRITES,
            ..LevelLayout::standard()
        }
    }

    #[test]
    fn test_from_codes_lays_out_row_major() {
        let layout = LevelLayout {
            columns: 2,
            rows: 2,
            ..LevelLayout::standard()
        };
        let level = Level::from_codes(&[1, 0, 0, 21], layout, TileClassifier::banded(68)).unwrap();

        assert_eq!(level.tiles().len(), 4);
        assert_eq!(level.tile(1).unwrap().bounds(), Rect::new(80, 0, 80, 80));
        assert_eq!(level.tile(2).unwrap().bounds(), Rect::new(0, 80, 80, 80));
        assert_eq!(level.tile(3).unwrap().kind(), TileKind::Platform);
    }

    #[test]
    fn test_parse_map_errors() {
        let layout = two_tile_layout();
        let c = || TileClassifier::banded(TOTAL_TILE_SPRITES);

        assert!(matches!(
            Level::parse_map("1", layout, c()),
            Err(MapError::UnexpectedEnd { index: 1 })
        ));
        assert!(matches!(
            Level::parse_map("1 0 0", layout, c()),
            Err(MapError::TrailingData { expected: 2 })
        ));
        assert!(matches!(
            Level::parse_map("1 99", layout, c()),
            Err(MapError::InvalidTileType { index: 1, code: 99 })
        ));
        assert!(matches!(
            Level::parse_map("1 -3", layout, c()),
            Err(MapError::InvalidToken { index: 1, .. })
        ));
        assert!(Level::parse_map("1\n0\n", layout, c()).is_ok());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = Level::load_map(
            "definitely/not/here.map",
            two_tile_layout(),
            TileClassifier::banded(TOTAL_TILE_SPRITES),
        );
        assert!(matches!(result, Err(MapError::Io(_))));
    }

    #[test]
    fn test_first_blocking_tile_returns_storage_order() {
        let layout = LevelLayout {
            columns: 3,
            rows: 1,
            ..LevelLayout::standard()
        };
        let level = Level::from_codes(&[1, 2, 0], layout, TileClassifier::banded(68)).unwrap();

        // Straddles tiles 0 and 1; the first one wins
        let rect = Rect::new(60, 10, 40, 40);
        assert_eq!(level.first_blocking_tile(&rect, Axis::Horizontal, 1.0), Some(0));
        let clear = Rect::new(170, 10, 40, 40);
        assert_eq!(level.first_blocking_tile(&clear, Axis::Horizontal, 1.0), None);
    }

    #[test]
    fn test_touches_tap_margin() {
        let layout = LevelLayout {
            columns: 1,
            rows: 2,
            ..LevelLayout::standard()
        };
        // Tile 1 (second row) is a tap surface at y = 80
        let level = Level::from_codes(&[0, 1], layout, TileClassifier::banded(68)).unwrap();
        let hovering = Rect::new(10, 20, 20, 20); // bottom at 40

        assert!(level.touches_tap(&hovering, TAP_MARGIN));
        assert!(!level.touches_tap(&hovering, 10));
    }

    #[test]
    fn test_bundled_demo_map_parses() {
        let level = Level::parse_standard(include_str!("../../maps/demo.map")).unwrap();
        assert_eq!(level.tiles().len(), TOTAL_TILES);
    }
}

//! Sprite sheet clip layouts

use serde::{Deserialize, Serialize};

use crate::sim::level::LevelLayout;
use crate::sim::rect::Rect;

/// Brute sheet: frames of uneven width on a single row
const BRUTE_CLIPS: [Rect; 4] = [
    Rect::new(0, 0, 76, 105),
    Rect::new(77, 0, 96, 105),
    Rect::new(174, 0, 75, 105),
    Rect::new(250, 0, 96, 105),
];

/// Source rectangles for one character's animation frames
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSheet {
    clips: Vec<Rect>,
}

impl SpriteSheet {
    /// Frames of `w`×`h` laid left to right with a 1 px gutter, wrapping to
    /// a new row once `sheet_width` is reached
    pub fn uniform(w: i32, h: i32, frames: usize, sheet_width: i32) -> Self {
        let mut clips = Vec::with_capacity(frames);
        let (mut x, mut y) = (0, 0);
        for _ in 0..frames {
            clips.push(Rect::new(x, y, w, h));
            x += w + 1;
            if x >= sheet_width {
                x = 0;
                y += h;
            }
        }
        Self { clips }
    }

    pub fn brute() -> Self {
        Self {
            clips: BRUTE_CLIPS.to_vec(),
        }
    }

    pub fn from_clips(clips: Vec<Rect>) -> Self {
        Self { clips }
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Clip for `frame`, wrapping past the end
    pub fn clip(&self, frame: usize) -> Option<Rect> {
        if self.clips.is_empty() {
            return None;
        }
        Some(self.clips[frame % self.clips.len()])
    }
}

/// Tile sprite clips, indexed by tile code.
///
/// The sheet is split down the middle: the first half of the codes fill the
/// left half row by row, the rest fill the right half.
pub fn tile_clips(layout: &LevelLayout, sheet_width: i32) -> Vec<Rect> {
    let (tw, th) = (layout.tile_width, layout.tile_height);
    let half = layout.sprite_count / 2;
    let mid = sheet_width / 2;
    let mut clips = Vec::with_capacity(layout.sprite_count);

    let (mut x, mut y) = (0, 0);
    for _ in 0..half {
        clips.push(Rect::new(x, y, tw, th));
        x += tw;
        if x >= mid {
            x = 0;
            y += th;
        }
    }

    let (mut x, mut y) = (mid, 0);
    for _ in half..layout.sprite_count {
        clips.push(Rect::new(x, y, tw, th));
        x += tw;
        if x >= sheet_width {
            x = mid;
            y += th;
        }
    }
    clips
}

//! Scrolling camera

use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Viewport into the level, in world pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    pub view: Rect,
}

impl Camera {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            view: Rect::new(0, 0, width, height),
        }
    }

    /// Center on `target`, then keep the view inside the level
    pub fn follow(&mut self, target: &Rect, level_width: i32, level_height: i32) {
        let v = &mut self.view;
        v.x = (target.x + target.w / 2) - v.w / 2;
        v.y = (target.y + target.h / 2) - v.h / 2;

        v.x = v.x.min(level_width - v.w).max(0);
        v.y = v.y.min(level_height - v.h).max(0);
    }

    pub fn visible(&self, rect: &Rect) -> bool {
        self.view.overlaps(rect)
    }

    /// World rect → screen rect
    pub fn to_screen(&self, rect: &Rect) -> Rect {
        rect.offset(-self.view.x, -self.view.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_centers_and_clamps() {
        let mut camera = Camera::new(1024, 768);

        camera.follow(&Rect::new(600, 500, 40, 40), 1280, 960);
        assert_eq!(camera.view.x, 620 - 512);
        assert_eq!(camera.view.y, 520 - 384);

        camera.follow(&Rect::new(0, 0, 40, 40), 1280, 960);
        assert_eq!((camera.view.x, camera.view.y), (0, 0));

        camera.follow(&Rect::new(1240, 920, 40, 40), 1280, 960);
        assert_eq!((camera.view.x, camera.view.y), (256, 192));
    }

    #[test]
    fn test_small_level_pins_to_origin() {
        let mut camera = Camera::new(1024, 768);
        camera.follow(&Rect::new(100, 100, 40, 40), 160, 80);
        assert_eq!((camera.view.x, camera.view.y), (0, 0));
    }

    #[test]
    fn test_to_screen_and_visibility() {
        let mut camera = Camera::new(100, 100);
        camera.view.x = 50;
        camera.view.y = 20;
        let r = Rect::new(60, 30, 10, 10);
        assert_eq!(camera.to_screen(&r), Rect::new(10, 10, 10, 10));
        assert!(camera.visible(&r));
        assert!(!camera.visible(&Rect::new(0, 0, 50, 20)));
    }
}

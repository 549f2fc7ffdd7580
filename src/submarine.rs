//! The player's submarine
//!
//! Movement is applied by the driver before the level update; the sim only
//! reads the bounding rectangle and triggers the invulnerability blink on a
//! hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::render::{Rasterizer, TextureId};
use crate::sim::geom::Rect;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submarine {
    pub texture: TextureId,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    blink_timer: i32,
}

impl Submarine {
    pub fn new(texture: TextureId, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            texture,
            x,
            y,
            width,
            height,
            blink_timer: 0,
        }
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Keep the submarine inside the playable band.
    pub fn clamp(&mut self, min_x: i32, max_x: i32, min_y: i32, max_y: i32) {
        self.x = self.x.clamp(min_x, max_x);
        self.y = self.y.clamp(min_y, max_y);
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Arm the post-hit invulnerability blink.
    pub fn start_blink(&mut self) {
        self.blink_timer = SUB_BLINK_FRAMES;
    }

    pub fn update_blink(&mut self) {
        if self.blink_timer > 0 {
            self.blink_timer -= 1;
        }
    }

    /// While blinking the submarine takes no further damage.
    pub fn is_invulnerable(&self) -> bool {
        self.blink_timer > 0
    }

    /// Clear movement-independent state (blink) on a game reset.
    pub fn reset(&mut self) {
        self.blink_timer = 0;
    }

    pub fn render(&self, r: &mut dyn Rasterizer) {
        // Flash by skipping draw frames while invulnerable
        if self.blink_timer > 0 && (self.blink_timer / SUB_BLINK_PERIOD) % 2 == 0 {
            return;
        }
        r.sprite(self.texture, self.rect());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_bounds() {
        let mut sub = Submarine::new(TextureId(0), 200, 275, 80, 40);
        sub.move_by(1000, -1000);
        sub.clamp(50, 650, 0, 540);
        assert_eq!(sub.x, 650);
        assert_eq!(sub.y, 0);

        sub.move_by(-1000, 1000);
        sub.clamp(50, 650, 0, 540);
        assert_eq!(sub.x, 50);
        assert_eq!(sub.y, 540);
    }

    #[test]
    fn test_blink_expires() {
        let mut sub = Submarine::new(TextureId(0), 200, 275, 80, 40);
        assert!(!sub.is_invulnerable());
        sub.start_blink();
        assert!(sub.is_invulnerable());
        for _ in 0..SUB_BLINK_FRAMES {
            sub.update_blink();
        }
        assert!(!sub.is_invulnerable());
    }

    #[test]
    fn test_render_flashes_while_blinking() {
        use crate::render::DrawList;
        let mut sub = Submarine::new(TextureId(0), 200, 275, 80, 40);
        sub.start_blink();

        let mut drawn = 0;
        for _ in 0..SUB_BLINK_FRAMES {
            let mut list = DrawList::new();
            sub.render(&mut list);
            drawn += list.len();
            sub.update_blink();
        }
        // Some frames drawn, some skipped
        assert!(drawn > 0);
        assert!(drawn < SUB_BLINK_FRAMES as usize);
    }
}

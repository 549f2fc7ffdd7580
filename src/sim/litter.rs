//! Drifting litter collectibles

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::render::{Rasterizer, TextureId};
use crate::sim::geom::Rect;

/// A collectible piece of litter drifting leftward with the current.
///
/// While inactive the item is invisible and non-colliding; a respawn timer
/// counts down and the item re-enters from off-screen right.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Litter {
    pub texture: TextureId,
    pub pos: Vec2,
    pub speed: f32,
    pub width: i32,
    pub height: i32,
    pub active: bool,
    pub respawn_timer: i32,
}

impl Litter {
    pub fn new(texture: TextureId, x: f32, y: f32, speed: f32) -> Self {
        Self::with_size(texture, x, y, speed, 64, 64)
    }

    pub fn with_size(
        texture: TextureId,
        x: f32,
        y: f32,
        speed: f32,
        width: i32,
        height: i32,
    ) -> Self {
        Self {
            texture,
            pos: Vec2::new(x, y),
            speed,
            width,
            height,
            active: true,
            respawn_timer: 0,
        }
    }

    /// Advance one frame. Returns true exactly on the frame an active item
    /// drifts past the left edge (a miss); the item then wraps to a fresh
    /// spawn position.
    pub fn update(&mut self, rng: &mut Pcg32) -> bool {
        if !self.active {
            self.respawn_timer -= 1;
            if self.respawn_timer <= 0 {
                self.active = true;
                self.respawn(rng);
            }
            return false;
        }

        self.pos.x -= self.speed;
        if self.pos.x < LITTER_EXIT_X {
            self.respawn(rng);
            return true;
        }
        false
    }

    fn respawn(&mut self, rng: &mut Pcg32) {
        self.pos.x = LITTER_SPAWN_X;
        self.pos.y = rng.random_range(LITTER_BAND_MIN_Y..LITTER_BAND_MAX_Y);
    }

    /// Deactivate and arm the respawn countdown.
    pub fn collect(&mut self) {
        self.active = false;
        self.respawn_timer = LITTER_RESPAWN_FRAMES;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x as i32, self.pos.y as i32, self.width, self.height)
    }

    /// Inactive litter never collides.
    pub fn check_collision(&self, rect: &Rect) -> bool {
        self.active && self.rect().overlaps(rect)
    }

    pub fn render(&self, r: &mut dyn Rasterizer) {
        if !self.active {
            return;
        }
        r.sprite(self.texture, self.rect());
    }
}

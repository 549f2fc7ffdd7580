//! Trash clusters: multi-hit destructible debris (final level only)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::render::{Rasterizer, Rgba, TextureId};
use crate::sim::geom::Rect;

/// Base footprint of a fresh cluster; the rendered size shrinks with damage
pub const CLUSTER_SIZE: i32 = 120;
/// Frames the cluster flashes after a hit; doubles as a re-hit cooldown
pub const CLUSTER_BLINK_FRAMES: i32 = 15;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrashCluster {
    pub texture: TextureId,
    pub pos: Vec2,
    pub health: i32,
    pub max_health: i32,
    pub active: bool,
    pub blink_timer: i32,
}

impl TrashCluster {
    pub fn new(texture: TextureId, x: f32, y: f32, hp: i32) -> Self {
        Self {
            texture,
            pos: Vec2::new(x, y),
            health: hp,
            max_health: hp,
            active: true,
            blink_timer: 0,
        }
    }

    /// Move left with the scroll and tick the blink; despawn off-screen.
    pub fn update(&mut self, scroll_speed: f32) {
        if !self.active {
            return;
        }
        self.pos.x -= scroll_speed;
        if self.blink_timer > 0 {
            self.blink_timer -= 1;
        }
        if self.pos.x < -(CLUSTER_SIZE as f32) {
            self.active = false;
        }
    }

    /// Take one hit: flash, and break apart at zero health.
    pub fn hit(&mut self) {
        self.health -= 1;
        self.blink_timer = CLUSTER_BLINK_FRAMES;
        if self.health <= 0 {
            self.active = false;
        }
    }

    /// Collision uses the full footprint regardless of remaining health.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x as i32,
            self.pos.y as i32,
            CLUSTER_SIZE,
            CLUSTER_SIZE,
        )
    }

    pub fn check_collision(&self, rect: &Rect) -> bool {
        self.active && self.rect().overlaps(rect)
    }

    pub fn render(&self, r: &mut dyn Rasterizer) {
        if !self.active {
            return;
        }
        // Drawn size scales with the remaining health fraction
        let ratio = self.health as f32 / self.max_health as f32;
        let dst = Rect::new(
            self.pos.x as i32,
            self.pos.y as i32,
            (CLUSTER_SIZE as f32 * ratio) as i32,
            (CLUSTER_SIZE as f32 * ratio) as i32,
        );
        let tint = if self.blink_timer > 0 && (self.blink_timer / 3) % 2 == 0 {
            Rgba::new(255, 200, 100, 255)
        } else {
            Rgba::new(180, 180, 180, 255)
        };
        r.sprite_tinted(self.texture, dst, tint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCmd, DrawList};

    #[test]
    fn test_hits_destroy_at_zero() {
        let mut cluster = TrashCluster::new(TextureId(0), 400.0, 200.0, 3);
        cluster.hit();
        cluster.hit();
        assert!(cluster.active);
        assert_eq!(cluster.health, 1);
        cluster.hit();
        assert!(!cluster.active);
    }

    #[test]
    fn test_scrolls_off_left_edge() {
        let mut cluster = TrashCluster::new(TextureId(0), 0.0, 200.0, 3);
        for _ in 0..40 {
            cluster.update(4.0);
        }
        assert!(!cluster.active);
    }

    #[test]
    fn test_render_scales_with_health() {
        let mut cluster = TrashCluster::new(TextureId(0), 100.0, 100.0, 4);
        cluster.hit();
        cluster.blink_timer = 0;

        let mut list = DrawList::new();
        cluster.render(&mut list);
        match list.cmds[0] {
            DrawCmd::SpriteTinted { dst, .. } => {
                assert_eq!(dst.w, 90); // 3/4 of 120
            }
            _ => panic!("expected tinted sprite"),
        }
    }

    #[test]
    fn test_inactive_never_collides() {
        let mut cluster = TrashCluster::new(TextureId(0), 100.0, 100.0, 1);
        let rect = Rect::new(100, 100, 64, 64);
        assert!(cluster.check_collision(&rect));
        cluster.hit();
        assert!(!cluster.check_collision(&rect));
    }
}

//! Marine enemy behavior
//!
//! Movement is a tagged state machine: exactly one motion mode governs each
//! frame, with falling taking priority over deflection, deflection over calm
//! drift, and calm drift over the species AI.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::SpriteSpec;
use crate::consts::*;
use crate::render::{Rasterizer, Rgba, TextureId};
use crate::sim::geom::Rect;

/// Enemy species. The discriminant order matches the external sprite tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Swordfish,
    Eel,
    Octopus,
    Angler,
    Shark,
}

impl Species {
    pub const COUNT: usize = 5;
    pub const ALL: [Species; Species::COUNT] = [
        Species::Swordfish,
        Species::Eel,
        Species::Octopus,
        Species::Angler,
        Species::Shark,
    ];

    pub fn from_index(index: usize) -> Species {
        Species::ALL[index]
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Motion state; exactly one governs a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Species AI: drift left (octopuses rise instead)
    Patrolling,
    /// Shark homing on the submarine inside its detection radius
    Chasing,
    /// Post-hit ragdoll; gravity accumulates in `fall_speed`
    Falling { fall_speed: f32 },
    /// Knocked away from a calm pulse
    Deflecting { dir: Vec2, frames_left: i32 },
    /// Neutralized; drifts off-screen and despawns
    CalmDrifting,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub species: Species,
    pub texture: TextureId,
    pub pos: Vec2,
    pub speed: f32,
    pub width: i32,
    pub height: i32,
    pub active: bool,
    pub motion: Motion,
    /// Set once by a calm pulse; calmed enemies are harmless and are skipped
    /// by later pulses
    pub calmed: bool,
    pub blink_timer: i32,
    pub detection_radius: f32,
    /// Sprite orientation; only the shark ever turns around
    pub facing_right: bool,
}

impl Enemy {
    pub fn new(species: Species, spec: SpriteSpec, pos: Vec2) -> Self {
        Self {
            species,
            texture: spec.texture,
            pos,
            speed: spec.speed,
            width: spec.width,
            height: spec.height,
            active: true,
            motion: Motion::Patrolling,
            calmed: false,
            blink_timer: 0,
            detection_radius: SHARK_DETECTION_RADIUS,
            facing_right: false,
        }
    }

    /// Advance one frame. `sub_center` is the submarine center, used by the
    /// shark's chase behavior.
    pub fn update(&mut self, sub_center: Vec2) {
        if !self.active {
            return;
        }
        if self.blink_timer > 0 {
            self.blink_timer -= 1;
        }

        match self.motion {
            Motion::Falling { fall_speed } => {
                let fall_speed = fall_speed + ENEMY_FALL_GRAVITY;
                self.pos.y += fall_speed;
                self.motion = Motion::Falling { fall_speed };
                if self.pos.y > ENEMY_FALL_FLOOR {
                    self.active = false;
                }
            }
            Motion::Deflecting { dir, frames_left } => {
                self.pos += dir * DEFLECT_SPEED;
                if frames_left <= 1 {
                    self.motion = Motion::CalmDrifting;
                } else {
                    self.motion = Motion::Deflecting {
                        dir,
                        frames_left: frames_left - 1,
                    };
                }
            }
            Motion::CalmDrifting => {
                if self.species == Species::Octopus {
                    self.pos.y -= self.speed;
                    if self.pos.y < -(self.height as f32) {
                        self.active = false;
                    }
                } else {
                    self.pos.x -= self.speed;
                    if self.pos.x < ENEMY_EXIT_X {
                        self.active = false;
                    }
                }
            }
            Motion::Patrolling | Motion::Chasing => self.species_step(sub_center),
        }
    }

    fn species_step(&mut self, sub_center: Vec2) {
        match self.species {
            Species::Octopus => {
                // Rises from the seabed; no leftward drift
                self.pos.y -= self.speed;
                if self.pos.y < -(self.height as f32) {
                    self.active = false;
                }
            }
            Species::Shark => {
                let to_sub = sub_center - self.center();
                if to_sub.length() < self.detection_radius {
                    self.motion = Motion::Chasing;
                    let dir = to_sub.normalize_or_zero();
                    self.pos += dir * self.speed;
                    self.facing_right = dir.x > 0.0;
                } else {
                    self.motion = Motion::Patrolling;
                    self.pos.x -= self.speed;
                    self.facing_right = false;
                    if self.pos.x < ENEMY_EXIT_X {
                        self.active = false;
                    }
                }
            }
            _ => {
                self.pos.x -= self.speed;
                if self.pos.x < ENEMY_EXIT_X {
                    self.active = false;
                }
            }
        }
    }

    /// Arm (or re-arm) the post-hit blink.
    pub fn start_hit_blink(&mut self) {
        self.blink_timer = HIT_BLINK_FRAMES;
    }

    /// Switch into the ragdoll fall. A hit is terminal: the enemy never
    /// returns to combat. Re-invoking resets the fall speed.
    pub fn start_falling(&mut self) {
        self.motion = Motion::Falling { fall_speed: 0.0 };
    }

    /// Calm-pulse response: deflect away from the pulse point and mark the
    /// enemy as calmed.
    pub fn deflect_from(&mut self, point: Vec2) {
        let away = self.center() - point;
        let dir = if away.length_squared() > 0.0 {
            away.normalize()
        } else {
            Vec2::NEG_X
        };
        self.motion = Motion::Deflecting {
            dir,
            frames_left: DEFLECT_FRAMES,
        };
        self.calmed = true;
    }

    pub fn is_falling(&self) -> bool {
        matches!(self.motion, Motion::Falling { .. })
    }

    /// Calmed or already falling enemies cannot cost a life.
    pub fn is_harmless(&self) -> bool {
        self.calmed || self.is_falling()
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x as i32, self.pos.y as i32, self.width, self.height)
    }

    /// Inactive enemies never collide.
    pub fn check_collision(&self, rect: &Rect) -> bool {
        self.active && self.rect().overlaps(rect)
    }

    pub fn render(&self, r: &mut dyn Rasterizer) {
        if !self.active {
            return;
        }
        let dst = self.rect();
        let blinking = self.blink_timer > 0 && (self.blink_timer / HIT_BLINK_PERIOD) % 2 == 0;
        if blinking {
            r.sprite_tinted(self.texture, dst, Rgba::new(255, 120, 120, 255));
        } else if self.facing_right {
            r.sprite_flipped(self.texture, dst);
        } else {
            r.sprite(self.texture, dst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpeciesTable;

    fn spawn(species: Species, x: f32, y: f32) -> Enemy {
        Enemy::new(species, SpeciesTable::defaults().spec(species), Vec2::new(x, y))
    }

    #[test]
    fn test_drifters_move_left() {
        let mut eel = spawn(Species::Eel, 400.0, 300.0);
        eel.update(Vec2::new(-1000.0, -1000.0));
        assert_eq!(eel.pos.x, 394.0);
        assert_eq!(eel.pos.y, 300.0);
    }

    #[test]
    fn test_octopus_rises() {
        let mut octopus = spawn(Species::Octopus, 400.0, 300.0);
        octopus.update(Vec2::ZERO);
        assert_eq!(octopus.pos.x, 400.0);
        assert_eq!(octopus.pos.y, 294.0);
    }

    #[test]
    fn test_shark_chases_in_range_drifts_outside() {
        let mut shark = spawn(Species::Shark, 400.0, 300.0);
        // Submarine far away: plain leftward drift
        shark.update(Vec2::new(2000.0, 2000.0));
        assert_eq!(shark.motion, Motion::Patrolling);
        assert_eq!(shark.pos.x, 396.0);

        // Submarine to the right within detection range: chase and flip
        let before = shark.pos;
        let target = shark.center() + Vec2::new(150.0, 0.0);
        shark.update(target);
        assert_eq!(shark.motion, Motion::Chasing);
        assert!(shark.pos.x > before.x);
        assert!(shark.facing_right);
    }

    #[test]
    fn test_falling_accumulates_gravity_and_despawns() {
        let mut angler = spawn(Species::Angler, 400.0, 580.0);
        angler.start_falling();
        angler.update(Vec2::ZERO);
        assert!(matches!(angler.motion, Motion::Falling { fall_speed } if fall_speed == 0.5));

        // Far from the floor the fall keeps accelerating
        let mut high = spawn(Species::Angler, 400.0, 0.0);
        high.start_falling();
        high.update(Vec2::ZERO);
        high.update(Vec2::ZERO);
        assert!(matches!(high.motion, Motion::Falling { fall_speed } if fall_speed == 1.0));

        // Already near the floor: one frame is enough to drop out
        let mut done = false;
        let mut low = spawn(Species::Angler, 400.0, 599.9);
        low.start_falling();
        for _ in 0..10 {
            low.update(Vec2::ZERO);
            if !low.active {
                done = true;
                break;
            }
        }
        assert!(done);
    }

    #[test]
    fn test_hit_is_terminal() {
        let mut shark = spawn(Species::Shark, 400.0, 100.0);
        shark.start_hit_blink();
        shark.start_falling();
        assert!(shark.is_falling());
        assert!(shark.is_harmless());

        // Still falling after a chase-worthy submarine appears next to it
        shark.update(shark.center() + Vec2::new(10.0, 0.0));
        assert!(shark.is_falling());
    }

    #[test]
    fn test_deflect_then_calm_drift() {
        let mut eel = spawn(Species::Eel, 400.0, 300.0);
        let pulse = eel.center() + Vec2::new(-50.0, 0.0);
        eel.deflect_from(pulse);
        assert!(eel.calmed);
        let start_x = eel.pos.x;

        for _ in 0..DEFLECT_FRAMES {
            eel.update(Vec2::ZERO);
        }
        // Pushed away (rightward) during deflection, then switched to drift
        assert!(eel.pos.x > start_x);
        assert_eq!(eel.motion, Motion::CalmDrifting);

        // Calm drift carries the eel off the left edge eventually
        for _ in 0..2000 {
            eel.update(Vec2::ZERO);
            if !eel.active {
                break;
            }
        }
        assert!(!eel.active);
    }

    #[test]
    fn test_calmed_octopus_drifts_up() {
        let mut octopus = spawn(Species::Octopus, 400.0, 300.0);
        octopus.deflect_from(octopus.center() + Vec2::new(0.0, 60.0));
        for _ in 0..DEFLECT_FRAMES {
            octopus.update(Vec2::ZERO);
        }
        assert_eq!(octopus.motion, Motion::CalmDrifting);
        let y = octopus.pos.y;
        octopus.update(Vec2::ZERO);
        assert!(octopus.pos.y < y);
    }

    #[test]
    fn test_blink_alternation() {
        use crate::render::{DrawCmd, DrawList};
        let mut eel = spawn(Species::Eel, 400.0, 300.0);
        eel.start_hit_blink();

        let mut tinted = 0;
        let mut plain = 0;
        for _ in 0..HIT_BLINK_FRAMES {
            let mut list = DrawList::new();
            eel.render(&mut list);
            match list.cmds[0] {
                DrawCmd::SpriteTinted { .. } => tinted += 1,
                _ => plain += 1,
            }
            eel.update(Vec2::ZERO);
        }
        assert!(tinted > 0 && plain > 0);
    }
}

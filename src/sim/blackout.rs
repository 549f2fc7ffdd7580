//! Oil blackout hazard (level 3)
//!
//! A timed phase machine sweeps an ink curtain across the screen from the
//! right, with a wavy leading edge built from three summed sine waves, holds
//! full coverage for a beat, and recedes. Phases are driven purely by frame
//! counters; nothing external interrupts a cycle except a level reset.
//!
//! Ink splotches are a separate, purely cosmetic effect: short-lived dark
//! blots that fade in, hold and fade out near active octopuses.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::SCREEN_W;
use crate::sim::geom::Rect;

/// Frames of calm water between cycles
pub const BLACKOUT_IDLE_FRAMES: i32 = 600;
/// Frames of warning before the curtain starts moving
pub const BLACKOUT_WARNING_FRAMES: i32 = 120;
/// Minimum hold at full coverage
pub const BLACKOUT_SETTLED_FRAMES: i32 = 300;
/// Curtain sweep speeds (pixels per frame)
pub const BLACKOUT_EXPAND_PER_FRAME: f32 = 8.0;
pub const BLACKOUT_FADE_PER_FRAME: f32 = 10.0;
/// Widest excursion of the wavy edge; full coverage overshoots by this much
/// so no scanline is left uncovered
pub const WAVE_AMPLITUDE: f32 = 33.0;

/// Wavy-edge offset for a scanline. Three sines of unrelated frequency and
/// phase; a single sine reads as a mechanical ripple.
pub fn wave_offset(y: i32, frame: i32) -> f32 {
    let y = y as f32;
    let t = frame as f32;
    18.0 * (0.035 * y + 0.050 * t).sin()
        + 9.0 * (0.011 * y - 0.030 * t + 1.7).sin()
        + 6.0 * (0.078 * y + 0.110 * t + 4.2).sin()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlackoutPhase {
    Idle,
    Warning,
    Expanding,
    Settled,
    Fading,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blackout {
    phase: BlackoutPhase,
    counter: i32,
    width: f32,
    frame: i32,
}

impl Default for Blackout {
    fn default() -> Self {
        Self::new()
    }
}

impl Blackout {
    pub fn new() -> Self {
        Self {
            phase: BlackoutPhase::Idle,
            counter: 0,
            width: 0.0,
            frame: 0,
        }
    }

    /// Force the machine back to calm water mid-cycle.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn full_width() -> f32 {
        SCREEN_W as f32 + WAVE_AMPLITUDE
    }

    /// Advance the phase machine one frame.
    pub fn update(&mut self) {
        self.frame += 1;
        match self.phase {
            BlackoutPhase::Idle => {
                self.counter += 1;
                if self.counter >= BLACKOUT_IDLE_FRAMES {
                    self.phase = BlackoutPhase::Warning;
                    self.counter = 0;
                }
            }
            BlackoutPhase::Warning => {
                self.counter += 1;
                if self.counter >= BLACKOUT_WARNING_FRAMES {
                    self.phase = BlackoutPhase::Expanding;
                    self.counter = 0;
                }
            }
            BlackoutPhase::Expanding => {
                self.width += BLACKOUT_EXPAND_PER_FRAME;
                if self.width >= Self::full_width() {
                    self.width = Self::full_width();
                    self.phase = BlackoutPhase::Settled;
                    self.counter = 0;
                }
            }
            BlackoutPhase::Settled => {
                self.counter += 1;
                if self.counter >= BLACKOUT_SETTLED_FRAMES {
                    self.phase = BlackoutPhase::Fading;
                }
            }
            BlackoutPhase::Fading => {
                self.width -= BLACKOUT_FADE_PER_FRAME;
                if self.width <= 0.0 {
                    self.width = 0.0;
                    self.phase = BlackoutPhase::Idle;
                    self.counter = 0;
                }
            }
        }
    }

    pub fn phase(&self) -> BlackoutPhase {
        self.phase
    }

    pub fn is_warning(&self) -> bool {
        self.phase == BlackoutPhase::Warning
    }

    /// True while any part of the curtain is on screen.
    pub fn is_covering(&self) -> bool {
        matches!(
            self.phase,
            BlackoutPhase::Expanding | BlackoutPhase::Settled | BlackoutPhase::Fading
        )
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn frame(&self) -> i32 {
        self.frame
    }

    /// Leading-edge x for a scanline (may fall outside the screen).
    pub fn edge_x(&self, y: i32) -> f32 {
        SCREEN_W as f32 - self.width + wave_offset(y, self.frame)
    }

    /// Point-in-hazard test using the same wave formula as the render.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.is_covering() && (x as f32) >= self.edge_x(y)
    }
}

/// Ink splotch lifecycle (frames)
pub const INK_FADE_IN: i32 = 20;
pub const INK_HOLD: i32 = 60;
pub const INK_FADE_OUT: i32 = 20;

/// A short-lived cosmetic ink blot near an octopus
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InkSplotch {
    pub pos: Vec2,
    pub size: i32,
    pub age: i32,
}

impl InkSplotch {
    pub fn new(pos: Vec2, size: i32) -> Self {
        Self { pos, size, age: 0 }
    }

    /// Age one frame; false once fully faded.
    pub fn update(&mut self) -> bool {
        self.age += 1;
        self.age < INK_FADE_IN + INK_HOLD + INK_FADE_OUT
    }

    /// Alpha over the fade-in / hold / fade-out envelope.
    pub fn alpha(&self) -> u8 {
        let a = if self.age < INK_FADE_IN {
            self.age as f32 / INK_FADE_IN as f32
        } else if self.age < INK_FADE_IN + INK_HOLD {
            1.0
        } else {
            let out = (self.age - INK_FADE_IN - INK_HOLD) as f32;
            1.0 - (out / INK_FADE_OUT as f32).min(1.0)
        };
        (a * 255.0) as u8
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x as i32, self.pos.y as i32, self.size, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order_is_monotonic() {
        let mut blackout = Blackout::new();
        let mut seen = vec![blackout.phase()];

        // Run through two full cycles, recording each phase change
        for _ in 0..2 * (BLACKOUT_IDLE_FRAMES + BLACKOUT_WARNING_FRAMES + 400 + BLACKOUT_SETTLED_FRAMES) {
            blackout.update();
            if *seen.last().unwrap() != blackout.phase() {
                seen.push(blackout.phase());
            }
        }

        use BlackoutPhase::*;
        let expected = [Idle, Warning, Expanding, Settled, Fading, Idle];
        for window in seen.windows(2) {
            let from = expected.iter().position(|p| *p == window[0]).unwrap();
            assert_eq!(
                expected[from + 1],
                window[1],
                "illegal transition {:?} -> {:?}",
                window[0],
                window[1]
            );
        }
        assert!(seen.len() >= expected.len(), "did not complete a cycle");
    }

    #[test]
    fn test_idle_until_interval() {
        let mut blackout = Blackout::new();
        for _ in 0..BLACKOUT_IDLE_FRAMES - 1 {
            blackout.update();
        }
        assert_eq!(blackout.phase(), BlackoutPhase::Idle);
        blackout.update();
        assert_eq!(blackout.phase(), BlackoutPhase::Warning);
    }

    #[test]
    fn test_reset_forces_idle() {
        let mut blackout = Blackout::new();
        for _ in 0..BLACKOUT_IDLE_FRAMES + BLACKOUT_WARNING_FRAMES + 10 {
            blackout.update();
        }
        assert_eq!(blackout.phase(), BlackoutPhase::Expanding);
        blackout.reset();
        assert_eq!(blackout.phase(), BlackoutPhase::Idle);
        assert_eq!(blackout.width(), 0.0);
        assert!(!blackout.contains(799, 300));
    }

    #[test]
    fn test_wave_offset_bounded() {
        for y in 0..600 {
            for frame in [0, 37, 500, 9999] {
                let w = wave_offset(y, frame);
                assert!(w.abs() <= WAVE_AMPLITUDE, "wave {w} out of range at y={y}");
            }
        }
    }

    #[test]
    fn test_contains_tracks_edge() {
        let mut blackout = Blackout::new();
        // Idle: nothing is covered
        assert!(!blackout.contains(799, 300));

        // Drive to full coverage
        for _ in 0..BLACKOUT_IDLE_FRAMES + BLACKOUT_WARNING_FRAMES + 200 {
            blackout.update();
        }
        assert_eq!(blackout.phase(), BlackoutPhase::Settled);
        // At full width even the left edge is inside for every scanline
        for y in [0, 150, 300, 599] {
            assert!(blackout.contains(0, y));
        }
    }

    #[test]
    fn test_ink_splotch_envelope() {
        let mut ink = InkSplotch::new(Vec2::new(100.0, 100.0), 40);
        assert_eq!(ink.alpha(), 0);

        for _ in 0..INK_FADE_IN {
            assert!(ink.update());
        }
        assert_eq!(ink.alpha(), 255);

        for _ in 0..INK_HOLD {
            assert!(ink.update());
        }
        // Fade-out finishes exactly at the end of life
        let mut alive = true;
        for _ in 0..INK_FADE_OUT {
            alive = ink.update();
        }
        assert!(!alive);
        assert_eq!(ink.alpha(), 0);
    }
}

//! TideSweepers - a side-scrolling ocean-cleanup arcade game
//!
//! Core modules:
//! - `sim`: Deterministic level simulation (litter, enemies, hazards)
//! - `story`: Narrative triggers feeding the radio message display
//! - `render`: Abstract 2D rasterizer boundary (no graphics dependency)
//! - `game`: Fixed-tick driver wiring input, levels and story together

pub mod config;
pub mod game;
pub mod messages;
pub mod render;
pub mod score;
pub mod sim;
pub mod story;
pub mod submarine;

pub use game::{Game, GameInput, GameOutcome};
pub use score::Scoreboard;
pub use submarine::Submarine;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const SCREEN_W: i32 = 800;
    pub const SCREEN_H: i32 = 600;

    /// Fixed simulation rate; every timer below is a frame count at this rate
    pub const FRAME_RATE: i32 = 60;

    /// Litter spawns just off the right edge and despawns past the left edge
    pub const LITTER_SPAWN_X: f32 = 850.0;
    pub const LITTER_EXIT_X: f32 = -100.0;
    /// Vertical band for fresh litter spawns
    pub const LITTER_BAND_MIN_Y: f32 = 50.0;
    pub const LITTER_BAND_MAX_Y: f32 = 550.0;
    /// Frames a collected item stays gone (~2 s)
    pub const LITTER_RESPAWN_FRAMES: i32 = 120;

    /// Score deltas for collecting and missing litter
    pub const SCORE_COLLECT: i32 = 10;
    pub const SCORE_MISS: i32 = -10;

    /// Enemies despawn past this x (same margin as litter)
    pub const ENEMY_EXIT_X: f32 = -100.0;
    /// A falling enemy is removed once it drops below the screen
    pub const ENEMY_FALL_FLOOR: f32 = 600.0;
    /// Gravity added to vertical speed each frame while ragdolling
    pub const ENEMY_FALL_GRAVITY: f32 = 0.5;
    /// Post-hit blink length and tint toggle period
    pub const HIT_BLINK_FRAMES: i32 = 30;
    pub const HIT_BLINK_PERIOD: i32 = 3;
    /// Calm-pulse deflection length and speed
    pub const DEFLECT_FRAMES: i32 = 30;
    pub const DEFLECT_SPEED: f32 = 5.0;
    /// Shark sight range
    pub const SHARK_DETECTION_RADIUS: f32 = 200.0;

    /// Submarine movement (pixels per frame; crawls inside the oil slick)
    pub const SUB_SPEED: i32 = 5;
    pub const SUB_SPEED_IN_OIL: i32 = 2;
    /// Post-hit invulnerability blink
    pub const SUB_BLINK_FRAMES: i32 = 90;
    pub const SUB_BLINK_PERIOD: i32 = 5;
    /// Radius of the calm pulse around the submarine
    pub const CALM_PULSE_RADIUS: f32 = 150.0;

    /// Storm countdown for the final level (~30 s)
    pub const STORM_FRAMES: i32 = 1800;

    /// Starting lives
    pub const START_LIVES: i32 = 3;
}

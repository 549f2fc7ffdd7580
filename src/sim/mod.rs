//! Deterministic level simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only; every timer is a frame counter
//! - Seeded RNG only, owned by the level
//! - No rendering or platform dependencies beyond the `Rasterizer` trait

pub mod blackout;
pub mod cluster;
pub mod enemy;
pub mod geom;
pub mod level;
pub mod litter;

pub use blackout::{Blackout, BlackoutPhase, InkSplotch, wave_offset};
pub use cluster::TrashCluster;
pub use enemy::{Enemy, Motion, Species};
pub use geom::Rect;
pub use level::{Level, LevelRules, LevelTag, LitterFeed};
pub use litter::Litter;

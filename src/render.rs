//! Abstract 2D rasterizer boundary
//!
//! The sim issues draw calls against the `Rasterizer` trait; the concrete
//! backend (and all asset loading) lives outside the crate. `DrawList`
//! records commands so headless runs and tests can inspect what would have
//! been drawn.

use serde::{Deserialize, Serialize};

use crate::sim::geom::Rect;

/// Opaque texture handle assigned by the external asset loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// RGBA color for solid fills and sprite tints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
}

/// Minimal 2D draw surface the sim renders against
pub trait Rasterizer {
    /// Draw a textured rectangle
    fn sprite(&mut self, tex: TextureId, dst: Rect);
    /// Draw a textured rectangle mirrored horizontally
    fn sprite_flipped(&mut self, tex: TextureId, dst: Rect);
    /// Draw a textured rectangle with a color/alpha modulation
    fn sprite_tinted(&mut self, tex: TextureId, dst: Rect, tint: Rgba);
    /// Fill a rectangle with a solid color
    fn fill(&mut self, dst: Rect, color: Rgba);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawCmd {
    Sprite {
        tex: TextureId,
        dst: Rect,
        flipped: bool,
    },
    SpriteTinted {
        tex: TextureId,
        dst: Rect,
        tint: Rgba,
    },
    Fill {
        dst: Rect,
        color: Rgba,
    },
}

/// Rasterizer that records commands instead of drawing
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DrawList {
    pub cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }
}

impl Rasterizer for DrawList {
    fn sprite(&mut self, tex: TextureId, dst: Rect) {
        self.cmds.push(DrawCmd::Sprite {
            tex,
            dst,
            flipped: false,
        });
    }

    fn sprite_flipped(&mut self, tex: TextureId, dst: Rect) {
        self.cmds.push(DrawCmd::Sprite {
            tex,
            dst,
            flipped: true,
        });
    }

    fn sprite_tinted(&mut self, tex: TextureId, dst: Rect, tint: Rgba) {
        self.cmds.push(DrawCmd::SpriteTinted { tex, dst, tint });
    }

    fn fill(&mut self, dst: Rect, color: Rgba) {
        self.cmds.push(DrawCmd::Fill { dst, color });
    }
}

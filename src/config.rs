//! Sprite and species configuration tables
//!
//! Supplied by the caller at level construction; the sim never loads assets.
//! The original game passed parallel texture/speed/width/height vectors, so
//! the constructors accept that shape and validate it up front; a length
//! mismatch is a programming error, not a runtime condition.

use serde::{Deserialize, Serialize};

use crate::render::TextureId;
use crate::sim::enemy::Species;

/// Per-entry sprite and movement data
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpriteSpec {
    pub texture: TextureId,
    pub speed: f32,
    pub width: i32,
    pub height: i32,
}

/// Movement/sprite table indexed by `Species`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesTable {
    specs: [SpriteSpec; Species::COUNT],
}

impl SpeciesTable {
    /// Build from the classic parallel sequences. All four slices must have
    /// exactly one entry per species.
    pub fn from_parallel(
        textures: &[TextureId],
        speeds: &[f32],
        widths: &[i32],
        heights: &[i32],
    ) -> Self {
        assert_eq!(textures.len(), Species::COUNT, "species texture table length");
        assert_eq!(speeds.len(), Species::COUNT, "species speed table length");
        assert_eq!(widths.len(), Species::COUNT, "species width table length");
        assert_eq!(heights.len(), Species::COUNT, "species height table length");

        let specs = std::array::from_fn(|i| SpriteSpec {
            texture: textures[i],
            speed: speeds[i],
            width: widths[i],
            height: heights[i],
        });
        Self { specs }
    }

    /// The shipped tuning: swordfish, eel, octopus, angler, shark.
    pub fn defaults() -> Self {
        Self::from_parallel(
            &[
                TextureId(10),
                TextureId(11),
                TextureId(12),
                TextureId(13),
                TextureId(14),
            ],
            &[6.0, 6.0, 6.0, 6.0, 4.0],
            &[70, 70, 60, 60, 60],
            &[50, 30, 60, 55, 40],
        )
    }

    pub fn spec(&self, species: Species) -> SpriteSpec {
        self.specs[species.index()]
    }
}

/// One litter art asset
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LitterSpec {
    pub texture: TextureId,
    pub width: i32,
    pub height: i32,
}

/// Litter sprite pool; levels cycle through it when placing items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LitterTable {
    pub entries: Vec<LitterSpec>,
}

impl LitterTable {
    pub fn new(entries: Vec<LitterSpec>) -> Self {
        assert!(!entries.is_empty(), "litter table must not be empty");
        Self { entries }
    }

    /// Seven placeholder sprites matching the shipped asset set
    /// (can, bottle, bag, cup, cola, small can, beer).
    pub fn defaults() -> Self {
        Self::new(
            (0..7)
                .map(|i| LitterSpec {
                    texture: TextureId(i),
                    width: 64,
                    height: 64,
                })
                .collect(),
        )
    }

    /// Entry for the i-th placement, wrapping around the pool.
    pub fn cycle(&self, i: usize) -> LitterSpec {
        self.entries[i % self.entries.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_table_lookup() {
        let table = SpeciesTable::defaults();
        assert_eq!(table.spec(Species::Shark).speed, 4.0);
        assert_eq!(table.spec(Species::Eel).height, 30);
        assert_eq!(table.spec(Species::Swordfish).width, 70);
    }

    #[test]
    #[should_panic(expected = "species speed table length")]
    fn test_mismatched_tables_panic() {
        SpeciesTable::from_parallel(
            &[TextureId(0); 5],
            &[1.0, 2.0],
            &[10; 5],
            &[10; 5],
        );
    }

    #[test]
    fn test_litter_cycle_wraps() {
        let table = LitterTable::defaults();
        assert_eq!(table.cycle(0).texture, table.cycle(7).texture);
        assert_eq!(table.cycle(3).texture, TextureId(3));
    }
}

//! Level simulation: litter economy, enemy policy and level hazards
//!
//! One `Level` type covers all four zones. A `LevelRules` value selected by
//! `LevelTag` decides the spawn policy, species exclusions, litter feed and
//! hazard, so the differences between zones are data plus a couple of
//! `match`es rather than an inheritance tree.
//!
//! The level owns its entity collections and its RNG; the driver owns the
//! submarine, scoreboard and lives and passes them in each frame.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::{LitterTable, SpeciesTable};
use crate::consts::*;
use crate::render::{Rasterizer, Rgba, TextureId};
use crate::score::Scoreboard;
use crate::sim::blackout::{Blackout, InkSplotch};
use crate::sim::cluster::TrashCluster;
use crate::sim::enemy::{Enemy, Species};
use crate::sim::geom::Rect;
use crate::sim::litter::Litter;
use crate::submarine::Submarine;

/// Color of the ink curtain and splotches
const INK_COLOR: Rgba = Rgba::new(8, 8, 16, 255);

/// Zone selector for the four levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelTag {
    /// Level 1: coastal litter, no animals
    Reef,
    /// Level 2: wildlife joins in
    Shallows,
    /// Level 3: oil spill corridor with the blackout hazard
    OilField,
    /// Level 4: the dumping grounds, storm countdown and debris stream
    DumpingGrounds,
}

impl LevelTag {
    pub fn number(self) -> u32 {
        match self {
            LevelTag::Reef => 1,
            LevelTag::Shallows => 2,
            LevelTag::OilField => 3,
            LevelTag::DumpingGrounds => 4,
        }
    }

    pub fn from_number(n: u32) -> LevelTag {
        match n {
            1 => LevelTag::Reef,
            2 => LevelTag::Shallows,
            3 => LevelTag::OilField,
            _ => LevelTag::DumpingGrounds,
        }
    }
}

/// How a level feeds litter into the playfield
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LitterFeed {
    /// Fixed opening layout; collected and missed items respawn
    FixedLayout,
    /// Continuous bursts from the right edge; items despawn off the left
    /// edge without a miss penalty
    Stream { interval: i32, speed: f32 },
}

/// Which hazard machine the level runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    None,
    OilBlackout,
}

/// Data-driven differences between the four zones
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelRules {
    pub tag: LevelTag,
    pub enemies_enabled: bool,
    pub spawn_interval: i32,
    pub max_active_enemies: usize,
    pub excluded_species: Vec<Species>,
    pub enemy_speed_mult: f32,
    pub litter_feed: LitterFeed,
    pub hazard: HazardKind,
    pub storm_frames: Option<i32>,
    pub clusters: bool,
}

impl LevelRules {
    pub fn for_tag(tag: LevelTag) -> Self {
        let base = Self {
            tag,
            enemies_enabled: true,
            spawn_interval: 120,
            max_active_enemies: 2,
            excluded_species: Vec::new(),
            enemy_speed_mult: 1.0,
            litter_feed: LitterFeed::FixedLayout,
            hazard: HazardKind::None,
            storm_frames: None,
            clusters: false,
        };
        match tag {
            LevelTag::Reef => Self {
                enemies_enabled: false,
                ..base
            },
            LevelTag::Shallows => Self {
                excluded_species: vec![Species::Octopus],
                ..base
            },
            LevelTag::OilField => Self {
                hazard: HazardKind::OilBlackout,
                ..base
            },
            LevelTag::DumpingGrounds => Self {
                spawn_interval: 90,
                max_active_enemies: 3,
                excluded_species: vec![Species::Octopus, Species::Shark],
                enemy_speed_mult: 3.0,
                litter_feed: LitterFeed::Stream {
                    interval: 10,
                    speed: 13.0,
                },
                storm_frames: Some(STORM_FRAMES),
                clusters: true,
                ..base
            },
        }
    }
}

/// Opening litter layout shared by the fixed-feed zones (x, y, speed)
const OPENING_LAYOUT: [(f32, f32, f32); 7] = [
    (200.0, 300.0, 1.5),
    (500.0, 400.0, 2.0),
    (650.0, 250.0, 1.8),
    (350.0, 200.0, 1.3),
    (700.0, 500.0, 2.2),
    (100.0, 450.0, 1.6),
    (400.0, 350.0, 1.9),
];

/// Trash clusters enter every 5 seconds and crawl with the scroll
const CLUSTER_SPAWN_INTERVAL: i32 = 300;
const CLUSTER_SCROLL_SPEED: f32 = 4.0;
const CLUSTER_HP: i32 = 3;

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub rules: LevelRules,
    litter: Vec<Litter>,
    enemies: Vec<Enemy>,
    clusters: Vec<TrashCluster>,
    ink: Vec<InkSplotch>,
    blackout: Blackout,
    species: SpeciesTable,
    litter_sprites: LitterTable,
    oil_texture: Option<TextureId>,
    spawn_timer: i32,
    litter_timer: i32,
    cluster_timer: i32,
    storm_timer: i32,
    seed: u64,
    #[serde(skip, default = "default_rng")]
    rng: Pcg32,
}

impl Level {
    pub fn new(tag: LevelTag, species: SpeciesTable, litter_sprites: LitterTable, seed: u64) -> Self {
        let rules = LevelRules::for_tag(tag);
        let litter = match rules.litter_feed {
            LitterFeed::FixedLayout => Self::opening_layout(&litter_sprites),
            LitterFeed::Stream { .. } => Vec::new(),
        };
        let storm_timer = rules.storm_frames.unwrap_or(0);
        log::info!("level {} ready (seed {seed})", tag.number());
        Self {
            rules,
            litter,
            enemies: Vec::new(),
            clusters: Vec::new(),
            ink: Vec::new(),
            blackout: Blackout::new(),
            species,
            litter_sprites,
            oil_texture: None,
            spawn_timer: 0,
            litter_timer: 0,
            cluster_timer: 0,
            storm_timer,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn opening_layout(sprites: &LitterTable) -> Vec<Litter> {
        OPENING_LAYOUT
            .iter()
            .enumerate()
            .map(|(i, &(x, y, speed))| {
                let spec = sprites.cycle(i);
                Litter::with_size(spec.texture, x, y, speed, spec.width, spec.height)
            })
            .collect()
    }

    /// Advance the level one frame: litter first, then the enemy policy,
    /// then the hazard machinery and storm countdown.
    pub fn update(
        &mut self,
        submarine: &mut Submarine,
        scoreboard: &mut Scoreboard,
        lives: &mut i32,
        game_over: &mut bool,
    ) {
        self.update_litter(submarine, scoreboard);
        if self.rules.enemies_enabled {
            self.update_enemies(submarine, lives, game_over);
        }
        self.update_hazard();
        if self.rules.clusters {
            self.update_clusters(submarine);
        }
        if self.rules.storm_frames.is_some() && self.storm_timer > 0 {
            self.storm_timer -= 1;
        }
    }

    fn update_litter(&mut self, submarine: &Submarine, scoreboard: &mut Scoreboard) {
        let sub_rect = submarine.rect();
        match self.rules.litter_feed {
            LitterFeed::FixedLayout => {
                for item in &mut self.litter {
                    if item.update(&mut self.rng) {
                        scoreboard.add(SCORE_MISS);
                    }
                    if item.check_collision(&sub_rect) {
                        item.collect();
                        scoreboard.add(SCORE_COLLECT);
                    }
                }
            }
            LitterFeed::Stream { interval, speed } => {
                self.litter_timer += 1;
                if self.litter_timer >= interval {
                    self.litter_timer = 0;
                    let burst = self.rng.random_range(2..=3);
                    for i in 0..burst {
                        let spec = self.litter_sprites.cycle(
                            self.rng.random_range(0..self.litter_sprites.entries.len()),
                        );
                        let y = self.rng.random_range(100.0..500.0);
                        self.litter.push(Litter::with_size(
                            spec.texture,
                            SCREEN_W as f32 + (i as f32) * 30.0,
                            y,
                            speed,
                            spec.width,
                            spec.height,
                        ));
                    }
                }
                for item in &mut self.litter {
                    item.pos.x -= item.speed;
                    if item.check_collision(&sub_rect) {
                        item.collect();
                        scoreboard.add(SCORE_COLLECT);
                    }
                }
                // Stream items despawn off the left edge; no miss penalty
                self.litter
                    .retain(|item| item.active && item.pos.x >= LITTER_EXIT_X);
            }
        }
    }

    fn update_enemies(&mut self, submarine: &mut Submarine, lives: &mut i32, game_over: &mut bool) {
        self.spawn_timer += 1;
        if self.spawn_timer >= self.rules.spawn_interval {
            self.spawn_timer = 0;
            let active = self.enemies.iter().filter(|e| e.active).count();
            if active < self.rules.max_active_enemies {
                let species = self.roll_species();
                self.spawn_enemy(species);
            }
        }

        let sub_center = submarine.center();
        let sub_rect = submarine.rect();
        for enemy in &mut self.enemies {
            enemy.update(sub_center);
            if enemy.is_harmless() || submarine.is_invulnerable() {
                continue;
            }
            if enemy.check_collision(&sub_rect) {
                *lives -= 1;
                submarine.start_blink();
                enemy.start_hit_blink();
                enemy.start_falling();
                log::debug!("hit by {:?}, {lives} lives left", enemy.species);
                if *lives <= 0 {
                    *game_over = true;
                }
            }
        }
        self.enemies.retain(|e| e.active);
    }

    /// Uniform species pick, re-rolling anything this zone excludes.
    fn roll_species(&mut self) -> Species {
        loop {
            let species = Species::from_index(self.rng.random_range(0..Species::COUNT));
            if !self.rules.excluded_species.contains(&species) {
                return species;
            }
        }
    }

    fn spawn_enemy(&mut self, species: Species) {
        let spec = self.species.spec(species);
        // Octopuses rise from the seabed; everything else enters from the right
        let pos = match species {
            Species::Octopus => Vec2::new(
                self.rng.random_range(300.0..500.0),
                SCREEN_H as f32 + 20.0,
            ),
            _ => Vec2::new(
                LITTER_SPAWN_X,
                self.rng.random_range(LITTER_BAND_MIN_Y..LITTER_BAND_MAX_Y),
            ),
        };
        let mut enemy = Enemy::new(species, spec, pos);
        enemy.speed *= self.rules.enemy_speed_mult;
        log::debug!("spawned {:?} at {:?}", species, enemy.pos);
        self.enemies.push(enemy);
    }

    fn update_hazard(&mut self) {
        if self.rules.hazard != HazardKind::OilBlackout {
            return;
        }
        self.blackout.update();

        // Active octopuses dribble cosmetic ink splotches
        let mut spawns: Vec<Vec2> = Vec::new();
        for enemy in &self.enemies {
            if enemy.species == Species::Octopus && enemy.active && self.rng.random_bool(0.05) {
                spawns.push(enemy.center());
            }
        }
        for center in spawns {
            let jitter = Vec2::new(
                self.rng.random_range(-30.0..30.0),
                self.rng.random_range(-30.0..30.0),
            );
            let size = self.rng.random_range(20..60);
            self.ink.push(InkSplotch::new(center + jitter, size));
        }
        self.ink.retain_mut(|splotch| splotch.update());
    }

    fn update_clusters(&mut self, submarine: &mut Submarine) {
        self.cluster_timer += 1;
        if self.cluster_timer >= CLUSTER_SPAWN_INTERVAL {
            self.cluster_timer = 0;
            let spec = self.litter_sprites.cycle(0);
            let y = self.rng.random_range(100.0..420.0);
            self.clusters
                .push(TrashCluster::new(spec.texture, SCREEN_W as f32 + 20.0, y, CLUSTER_HP));
        }

        let sub_rect = submarine.rect();
        for cluster in &mut self.clusters {
            cluster.update(CLUSTER_SCROLL_SPEED);
            // Ramming breaks debris off; the blink doubles as a re-hit cooldown
            if cluster.blink_timer == 0 && cluster.check_collision(&sub_rect) {
                cluster.hit();
                if !cluster.active {
                    log::debug!("trash cluster destroyed");
                }
            }
        }
        self.clusters.retain(|c| c.active);
    }

    /// Calm pulse: deflect every active, not-yet-calmed enemy within
    /// `radius` of the point away from it. Already-calmed and falling
    /// enemies are skipped, so repeated pulses are idempotent.
    pub fn calm_enemies(&mut self, x: f32, y: f32, radius: f32) {
        let point = Vec2::new(x, y);
        for enemy in &mut self.enemies {
            if !enemy.active || enemy.calmed || enemy.is_falling() {
                continue;
            }
            if enemy.center().distance(point) <= radius {
                enemy.deflect_from(point);
            }
        }
    }

    /// Draw order is fixed: litter under enemies, clusters on top.
    pub fn render(&self, r: &mut dyn Rasterizer) {
        for item in &self.litter {
            item.render(r);
        }
        for enemy in &self.enemies {
            enemy.render(r);
        }
        for cluster in &self.clusters {
            cluster.render(r);
        }
    }

    /// Hazard overlays, drawn above the scene. The submarine is redrawn on
    /// top of the curtain so the player never loses their position.
    pub fn render_blackout_effects(&self, r: &mut dyn Rasterizer, submarine: &Submarine) {
        if self.rules.hazard != HazardKind::OilBlackout {
            return;
        }

        for splotch in &self.ink {
            match self.oil_texture {
                Some(tex) => {
                    r.sprite_tinted(tex, splotch.rect(), Rgba::new(255, 255, 255, splotch.alpha()))
                }
                None => r.fill(
                    splotch.rect(),
                    Rgba::new(INK_COLOR.r, INK_COLOR.g, INK_COLOR.b, splotch.alpha()),
                ),
            }
        }

        if self.blackout.is_warning() {
            // Pulsing sliver at the right edge announces the incoming wave
            let pulse = 90 + ((self.blackout.frame() / 10) % 2) * 60;
            r.fill(
                Rect::new(SCREEN_W - 24, 0, 24, SCREEN_H),
                Rgba::new(INK_COLOR.r, INK_COLOR.g, INK_COLOR.b, pulse as u8),
            );
        }

        if self.blackout.is_covering() {
            // Per-scanline fill from the wavy leading edge to the right side
            for y in 0..SCREEN_H {
                let start = self.blackout.edge_x(y).clamp(0.0, SCREEN_W as f32) as i32;
                if start < SCREEN_W {
                    r.fill(Rect::new(start, y, SCREEN_W - start, 1), INK_COLOR);
                }
            }
            submarine.render(r);
        }
    }

    /// Restore the opening state: litter repositioned and reactivated,
    /// enemies and hazards cleared, every counter back to zero. Safe to call
    /// at any point in the frame cycle.
    pub fn reset(&mut self) {
        match self.rules.litter_feed {
            LitterFeed::FixedLayout => {
                for item in &mut self.litter {
                    item.active = true;
                    item.respawn_timer = 0;
                    item.pos.x = LITTER_SPAWN_X;
                    item.pos.y = self.rng.random_range(LITTER_BAND_MIN_Y..LITTER_BAND_MAX_Y);
                }
            }
            LitterFeed::Stream { .. } => self.litter.clear(),
        }
        self.enemies.clear();
        self.clusters.clear();
        self.ink.clear();
        self.blackout.reset();
        self.spawn_timer = 0;
        self.litter_timer = 0;
        self.cluster_timer = 0;
        self.storm_timer = self.rules.storm_frames.unwrap_or(0);
    }

    // --- accessors used by the driver across level transitions ---

    pub fn litter_items(&self) -> &[Litter] {
        &self.litter
    }

    pub fn set_litter_items(&mut self, litter: Vec<Litter>) {
        self.litter = litter;
    }

    pub fn enemy_items(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn set_enemy_items(&mut self, enemies: Vec<Enemy>) {
        self.enemies = enemies;
    }

    pub fn cluster_items(&self) -> &[TrashCluster] {
        &self.clusters
    }

    pub fn set_oil_texture(&mut self, texture: TextureId) {
        self.oil_texture = Some(texture);
    }

    /// Frames left on the storm countdown (final level; 0 elsewhere).
    /// Interpreting zero as victory or defeat is the driver's business.
    pub fn storm_timer(&self) -> i32 {
        self.storm_timer
    }

    /// Extra background scroll that builds up as the storm runs.
    pub fn scroll_offset(&self) -> f32 {
        match self.rules.storm_frames {
            Some(total) => (total - self.storm_timer) as f32 / 120.0,
            None => 0.0,
        }
    }

    /// Point-in-hazard test; the driver slows the submarine inside the slick.
    pub fn is_position_in_blackout(&self, x: i32, y: i32) -> bool {
        self.rules.hazard == HazardKind::OilBlackout && self.blackout.contains(x, y)
    }

    pub fn is_oil_warning(&self) -> bool {
        self.rules.hazard == HazardKind::OilBlackout && self.blackout.is_warning()
    }

    pub fn blackout(&self) -> &Blackout {
        &self.blackout
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

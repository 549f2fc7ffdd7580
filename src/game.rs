//! Fixed-tick game driver
//!
//! Owns the submarine, scoreboard, level and story engine and advances them
//! in the original frame order: input, submarine movement, calm pulse, level
//! update, story update, event detection, level transition. Rendering and
//! input collection stay outside; each frame the caller supplies a
//! `GameInput` and drains the message outbox.

use serde::{Deserialize, Serialize};

use crate::config::{LitterTable, SpeciesTable};
use crate::consts::*;
use crate::messages::Outbox;
use crate::render::{Rasterizer, TextureId};
use crate::score::Scoreboard;
use crate::sim::level::{Level, LevelTag};
use crate::story::{LevelStatus, StoryManager};
use crate::submarine::Submarine;

/// Scores that complete levels 1-3; level 4 ends on the storm clock
const LEVEL_GOALS: [i32; 3] = [80, 180, 380];

/// Gameplay freeze while the final-level intro plays (~3 s)
const LEVEL4_INTRO_FRAMES: i32 = 180;

/// One frame of player intent
#[derive(Debug, Clone, Copy, Default)]
pub struct GameInput {
    /// Direction in {-1, 0, 1}; scaled by the submarine speed
    pub dx: i32,
    pub dy: i32,
    /// Calm pulse held
    pub calm: bool,
}

/// Where the run stands after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Playing,
    GameOver,
    Victory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub submarine: Submarine,
    pub scoreboard: Scoreboard,
    pub level: Level,
    pub story: StoryManager,
    pub outbox: Outbox,
    pub lives: i32,
    pub game_over: bool,
    species: SpeciesTable,
    litter_sprites: LitterTable,
    oil_texture: Option<TextureId>,
    sub_texture: TextureId,
    intro_freeze: i32,
    seed: u64,
}

impl Game {
    pub fn new(
        species: SpeciesTable,
        litter_sprites: LitterTable,
        sub_texture: TextureId,
        seed: u64,
    ) -> Self {
        let level = Level::new(LevelTag::Reef, species.clone(), litter_sprites.clone(), seed);
        let mut story = StoryManager::new();
        let mut outbox = Outbox::new();
        story.on_level_change(1, &mut outbox);

        Self {
            submarine: Submarine::new(sub_texture, 200, 275, 80, 40),
            scoreboard: Scoreboard::new(),
            level,
            story,
            outbox,
            lives: START_LIVES,
            game_over: false,
            species,
            litter_sprites,
            oil_texture: None,
            sub_texture,
            intro_freeze: 0,
            seed,
        }
    }

    /// Register the oil overlay sprite with the current and future levels.
    pub fn set_oil_texture(&mut self, texture: TextureId) {
        self.oil_texture = Some(texture);
        self.level.set_oil_texture(texture);
    }

    /// Advance one frame.
    pub fn advance(&mut self, input: &GameInput) -> GameOutcome {
        if self.game_over {
            return GameOutcome::GameOver;
        }
        if let Some(outcome) = self.storm_outcome() {
            return outcome;
        }

        // Final-level intro: gameplay holds while the banner plays
        if self.intro_freeze > 0 {
            self.intro_freeze -= 1;
            return GameOutcome::Playing;
        }

        // Movement, slowed to a crawl inside the oil slick
        let center = self.submarine.center();
        let speed = if self
            .level
            .is_position_in_blackout(center.x as i32, center.y as i32)
        {
            SUB_SPEED_IN_OIL
        } else {
            SUB_SPEED
        };
        self.submarine.move_by(input.dx * speed, input.dy * speed);
        self.submarine.clamp(50, 650, 0, 540);
        self.submarine.update_blink();

        if input.calm {
            let center = self.submarine.center();
            self.level
                .calm_enemies(center.x, center.y, CALM_PULSE_RADIUS);
        }

        self.level.update(
            &mut self.submarine,
            &mut self.scoreboard,
            &mut self.lives,
            &mut self.game_over,
        );

        let status = LevelStatus {
            remaining_seconds: self
                .level
                .rules
                .storm_frames
                .map(|_| self.level.storm_timer() / FRAME_RATE),
            oil_warning: self.level.is_oil_warning(),
        };
        self.story.update(
            self.scoreboard.score(),
            self.scoreboard.level(),
            &status,
            &mut self.outbox,
        );

        // One-shot event detection
        if self.scoreboard.level() == 2 && !self.level.enemy_items().is_empty() {
            self.story.on_first_animal(&mut self.outbox);
        }
        if self.scoreboard.level() == 3 && status.oil_warning {
            self.story.on_oil_detected(&mut self.outbox);
        }

        self.check_level_transition();

        if self.game_over {
            GameOutcome::GameOver
        } else {
            self.storm_outcome().unwrap_or(GameOutcome::Playing)
        }
    }

    /// The storm clock reaching zero ends the run: victory with lives left,
    /// defeat otherwise.
    fn storm_outcome(&self) -> Option<GameOutcome> {
        if self.scoreboard.level() == 4 && self.level.storm_timer() <= 0 && self.intro_freeze == 0 {
            if self.lives > 0 {
                return Some(GameOutcome::Victory);
            }
            return Some(GameOutcome::GameOver);
        }
        None
    }

    fn check_level_transition(&mut self) {
        let current = self.scoreboard.level();
        let Some(&goal) = LEVEL_GOALS.get((current - 1) as usize) else {
            return;
        };
        if self.scoreboard.score() < goal {
            return;
        }

        let next = current + 1;
        self.story.on_level_end(current);
        self.story.on_level_change(next, &mut self.outbox);
        self.scoreboard.set_level(next);

        let tag = LevelTag::from_number(next);
        let mut new_level = Level::new(
            tag,
            self.species.clone(),
            self.litter_sprites.clone(),
            self.seed.wrapping_add(next as u64),
        );
        if tag == LevelTag::DumpingGrounds {
            // The storm arena starts fresh behind its intro card
            self.intro_freeze = LEVEL4_INTRO_FRAMES;
        } else {
            // Litter and wildlife drift across the zone boundary
            new_level.set_litter_items(self.level.litter_items().to_vec());
            new_level.set_enemy_items(self.level.enemy_items().to_vec());
        }
        if let Some(oil) = self.oil_texture {
            new_level.set_oil_texture(oil);
        }
        self.level = new_level;
        log::info!("entering level {next} at score {}", self.scoreboard.score());
    }

    /// Restart the run from level 1.
    pub fn reset(&mut self) {
        self.story.reset();
        self.outbox.reset();
        self.story.on_level_change(1, &mut self.outbox);

        self.lives = START_LIVES;
        self.game_over = false;
        self.intro_freeze = 0;
        self.submarine.set_position(200, 275);
        self.submarine.reset();
        self.scoreboard.set_score(0);
        self.scoreboard.reset_level();

        self.level = Level::new(
            LevelTag::Reef,
            self.species.clone(),
            self.litter_sprites.clone(),
            self.seed,
        );
        if let Some(oil) = self.oil_texture {
            self.level.set_oil_texture(oil);
        }
        log::info!("game reset");
    }

    /// Scene draw order: level entities, submarine, hazard overlays on top.
    pub fn render(&self, r: &mut dyn Rasterizer) {
        self.level.render(r);
        self.submarine.render(r);
        self.level.render_blackout_effects(r, &self.submarine);
    }

    pub fn sub_texture(&self) -> TextureId {
        self.sub_texture
    }
}

/// Ocean facts rotated through the pause and game-over screens
pub const OCEAN_FACTS: &[&str] = &[
    "Lost fishing line can trap animals and stay in the ocean for up to 600 years.",
    "Sea turtles often mistake plastic bags for jellyfish and can choke or starve.",
    "Ghost nets make up a major part of ocean plastic and trap animals for years.",
    "Illegal dumping harms marine life and destroys fragile ecosystems.",
    "Over 8 million tons of plastic enter the ocean every year.",
    "Microplastics have been found in Arctic snow and deep-sea trenches.",
    "Plastic never fully disappears; it breaks into tiny pieces that last for centuries.",
    "Coral reefs can get sick from chemicals in sunscreen or plastic waste.",
    "Around 700 marine species are harmed by plastic pollution.",
    "The Great Pacific Garbage Patch is larger than Texas.",
    "Some plastics absorb toxic chemicals and become more dangerous to animals.",
    "Cigarette filters are the most common litter found on beaches.",
    "One liter of oil can pollute up to one million liters of seawater.",
    "The ocean floor contains millions of tons of trash, including lost cargo.",
    "Recycling one plastic bottle saves enough energy to power a light bulb for hours.",
];

/// Fact shown for a given zone (clamped into the pool)
pub fn fact_for_level(level: u32) -> &'static str {
    let index = (level.saturating_sub(1) as usize).min(OCEAN_FACTS.len() - 1);
    OCEAN_FACTS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(seed: u64) -> Game {
        Game::new(
            SpeciesTable::defaults(),
            LitterTable::defaults(),
            TextureId(99),
            seed,
        )
    }

    #[test]
    fn test_new_game_queues_level1_intro() {
        let mut g = game(1);
        let msg = g.outbox.pop().unwrap();
        assert!(msg.text.contains("Begin your sweep"));
        assert_eq!(g.scoreboard.level(), 1);
        assert_eq!(g.lives, START_LIVES);
    }

    #[test]
    fn test_score_goal_transitions_and_carries_entities() {
        let mut g = game(2);
        g.outbox.reset();

        // Force the score past the level-1 goal and tick once
        g.scoreboard.set_score(80);
        let input = GameInput::default();
        g.advance(&input);

        assert_eq!(g.scoreboard.level(), 2);
        assert_eq!(g.level.rules.tag, LevelTag::Shallows);
        // The fixed litter layout crossed the boundary with us
        assert_eq!(g.level.litter_items().len(), 7);
        // Intro line for the new zone was queued
        let texts: Vec<_> = std::iter::from_fn(|| g.outbox.pop()).collect();
        assert!(texts.iter().any(|m| m.text.contains("Stay alert")));
    }

    #[test]
    fn test_level4_entry_freezes_for_intro() {
        let mut g = game(3);
        g.scoreboard.set_level(3);
        g.level = Level::new(
            LevelTag::OilField,
            SpeciesTable::defaults(),
            LitterTable::defaults(),
            3,
        );
        g.scoreboard.set_score(380);

        let input = GameInput::default();
        g.advance(&input);
        assert_eq!(g.scoreboard.level(), 4);
        assert_eq!(g.level.storm_timer(), STORM_FRAMES);

        // Frozen frames do not run the storm clock
        for _ in 0..LEVEL4_INTRO_FRAMES {
            g.advance(&input);
        }
        assert_eq!(g.level.storm_timer(), STORM_FRAMES);
        g.advance(&input);
        assert_eq!(g.level.storm_timer(), STORM_FRAMES - 1);
    }

    #[test]
    fn test_storm_expiry_is_victory_with_lives() {
        let mut g = game(4);
        g.scoreboard.set_level(3);
        g.level = Level::new(
            LevelTag::OilField,
            SpeciesTable::defaults(),
            LitterTable::defaults(),
            4,
        );
        g.scoreboard.set_score(380);

        // Park out of harm's way and run the whole storm
        let input = GameInput { dx: -1, dy: -1, calm: true };
        let mut outcome = g.advance(&GameInput::default());
        let mut frames = 0;
        while outcome == GameOutcome::Playing && frames < 5000 {
            outcome = g.advance(&input);
            frames += 1;
        }
        assert_eq!(outcome, GameOutcome::Victory);
        assert!(g.lives > 0);
    }

    #[test]
    fn test_reset_restores_run() {
        let mut g = game(5);
        g.scoreboard.set_score(200);
        g.scoreboard.set_level(3);
        g.lives = 1;
        g.game_over = true;

        g.reset();
        assert_eq!(g.scoreboard.score(), 0);
        assert_eq!(g.scoreboard.level(), 1);
        assert_eq!(g.lives, START_LIVES);
        assert!(!g.game_over);
        assert_eq!(g.level.rules.tag, LevelTag::Reef);
        // Reset re-queues the level-1 intro
        let texts: Vec<_> = std::iter::from_fn(|| g.outbox.pop()).collect();
        assert!(texts.iter().any(|m| m.text.contains("Begin your sweep")));
    }

    #[test]
    fn test_game_over_sticks() {
        let mut g = game(6);
        g.game_over = true;
        assert_eq!(g.advance(&GameInput::default()), GameOutcome::GameOver);
        assert_eq!(g.advance(&GameInput::default()), GameOutcome::GameOver);
    }

    #[test]
    fn test_fact_for_level_clamps() {
        assert_eq!(fact_for_level(0), OCEAN_FACTS[0]);
        assert_eq!(fact_for_level(1), OCEAN_FACTS[0]);
        assert_eq!(fact_for_level(4), OCEAN_FACTS[3]);
        assert_eq!(fact_for_level(99), OCEAN_FACTS[OCEAN_FACTS.len() - 1]);
    }
}

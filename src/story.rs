//! Narrative triggers: zone banners, radio milestones and one-shot events
//!
//! Watches score/level/time snapshots each frame and pushes radio lines into
//! the external message outbox. Every milestone and one-shot fires at most
//! once per level visit; the timed final level fires off its remaining
//! seconds instead of the score.

use serde::{Deserialize, Serialize};

use crate::messages::{MessageStyle, Outbox};

/// Static script for one zone
#[derive(Debug, Clone, Copy)]
pub struct LevelScript {
    pub zone_name: &'static str,
    pub radio_intro: &'static str,
    pub milestones: &'static [&'static str],
    pub end_message: &'static str,
    pub end_score: i32,
    /// Score at which the first milestone fires (levels 2 and 3 hold theirs
    /// until after the zone's one-shot event)
    pub first_milestone_score: i32,
    /// Seconds-remaining thresholds for the timed final level, descending;
    /// paired one-to-one with `milestones`
    pub time_triggers: &'static [i32],
}

pub const SCRIPTS: [LevelScript; 4] = [
    LevelScript {
        zone_name: "Entering Zone: Coastal Litter Zone",
        radio_intro: "Scanning conditions. Low threat. Begin your sweep.",
        milestones: &["Currents shifting. Adjust your heading."],
        end_message: "Picking up early wildlife activity. Proceed to next zone.",
        end_score: 80,
        first_milestone_score: 30,
        time_triggers: &[],
    },
    LevelScript {
        zone_name: "Entering Zone: Wildlife Disturbance",
        radio_intro: "Animal patterns are erratic. Stay alert.",
        milestones: &["Debris density rising ahead. Navigate with care."],
        end_message: "Disturbance levels climbing. Source still unknown.",
        end_score: 180,
        first_milestone_score: 60,
        time_triggers: &[],
    },
    LevelScript {
        zone_name: "Entering Zone: Oil Spill Corridor",
        radio_intro: "Oil traces confirmed. Visibility will drop.",
        milestones: &["Heavy contaminants approaching. Adjust your course."],
        end_message: "Oil spread increasing. Situation becoming unstable.",
        end_score: 380,
        first_milestone_score: 90,
        time_triggers: &[],
    },
    LevelScript {
        zone_name: "Entering Zone: Illegal Dumping Grounds",
        radio_intro: "We are close to the source. Stay focused.",
        milestones: &[
            "Debris surge detected, sweep fast!",
            "Collect, collect, collect!",
            "Halfway there, debris flooding in!",
            "Getting close, keep sweeping!",
            "Final push, grab everything you can!",
        ],
        end_message: "Cleanup complete. Returning to safer waters.",
        end_score: 1000,
        first_milestone_score: 30,
        time_triggers: &[25, 20, 15, 10, 5],
    },
];

pub fn script_for(level: u32) -> &'static LevelScript {
    &SCRIPTS[(level.clamp(1, 4) - 1) as usize]
}

/// Per-frame snapshot of level state the story engine cares about; replaces
/// the original's back-pointer into the live level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelStatus {
    pub remaining_seconds: Option<i32>,
    pub oil_warning: bool,
}

/// Milestone score bands advance by this much per firing
const MILESTONE_STEP: i32 = 30;

/// HUD banner timing: ~3.5 s total, solid for 3 s, flickering at the end
pub const BANNER_FRAMES: i32 = 210;
const BANNER_SOLID_FRAMES: i32 = 180;
const BANNER_FLICKER_PERIOD: i32 = 4;

/// What the external HUD should show for the zone banner this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerView<'a> {
    pub text: &'a str,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct LevelProgress {
    milestone_index: usize,
    next_score: i32,
    time_index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryManager {
    current_level: u32,
    progress: [LevelProgress; 4],
    pub animal_message_played: bool,
    pub oil_message_played: bool,
    end_message_played: bool,
    banner_text: String,
    banner_frames_left: i32,
}

impl Default for StoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StoryManager {
    pub fn new() -> Self {
        let mut story = Self {
            current_level: 1,
            progress: [LevelProgress::default(); 4],
            animal_message_played: false,
            oil_message_played: false,
            end_message_played: false,
            banner_text: String::new(),
            banner_frames_left: 0,
        };
        story.reset();
        story
    }

    /// Restore every milestone band and one-shot flag to the start of a run.
    pub fn reset(&mut self) {
        for (i, progress) in self.progress.iter_mut().enumerate() {
            *progress = LevelProgress {
                milestone_index: 0,
                next_score: SCRIPTS[i].first_milestone_score,
                time_index: 0,
            };
        }
        self.animal_message_played = false;
        self.oil_message_played = false;
        self.end_message_played = false;
        self.current_level = 1;
        self.banner_text.clear();
        self.banner_frames_left = 0;
    }

    /// Entering a new zone: arm the banner, reset one-shot flags for the
    /// visit and queue the zone's intro line.
    pub fn on_level_change(&mut self, new_level: u32, outbox: &mut Outbox) {
        self.current_level = new_level;
        self.animal_message_played = false;
        self.oil_message_played = false;
        self.end_message_played = false;

        let script = script_for(new_level);
        self.banner_text = script.zone_name.to_string();
        self.banner_frames_left = BANNER_FRAMES;
        outbox.queue_message(MessageStyle::Radio, script.radio_intro);
    }

    /// Leaving a zone: show its sign-off in the banner.
    pub fn on_level_end(&mut self, old_level: u32) {
        self.banner_text = script_for(old_level).end_message.to_string();
        self.banner_frames_left = BANNER_FRAMES;
    }

    /// First animal sighted (level 2). Defers while the display is mid-line
    /// so the priority message does not stomp an in-flight one.
    pub fn on_first_animal(&mut self, outbox: &mut Outbox) {
        if self.animal_message_played || outbox.is_typewriting() {
            return;
        }
        self.animal_message_played = true;
        outbox.queue_priority_message(MessageStyle::Radio, "Marine life detected, maintain distance.");
    }

    /// Oil warning phase entered (level 3).
    pub fn on_oil_detected(&mut self, outbox: &mut Outbox) {
        if self.oil_message_played {
            return;
        }
        self.oil_message_played = true;
        outbox.queue_priority_message(MessageStyle::Radio, "Oil slick detected, visibility compromised.");
    }

    /// Per-frame trigger check. Level 4 fires off the storm clock; every
    /// other level fires off score bands.
    pub fn update(&mut self, score: i32, level: u32, status: &LevelStatus, outbox: &mut Outbox) {
        if self.banner_frames_left > 0 {
            self.banner_frames_left -= 1;
        }

        let script = script_for(level);
        if level == 4 {
            let Some(seconds_left) = status.remaining_seconds else {
                return;
            };
            let progress = &mut self.progress[3];
            if progress.time_index < script.time_triggers.len()
                && seconds_left <= script.time_triggers[progress.time_index]
            {
                outbox.queue_message(MessageStyle::Radio, script.milestones[progress.time_index]);
                progress.time_index += 1;
            }
            return;
        }

        let progress = &mut self.progress[(level.clamp(1, 4) - 1) as usize];
        if score >= progress.next_score && progress.milestone_index < script.milestones.len() {
            outbox.queue_message(MessageStyle::Radio, script.milestones[progress.milestone_index]);
            progress.milestone_index += 1;
            progress.next_score += MILESTONE_STEP;
        }

        if !self.end_message_played && score >= script.end_score {
            self.end_message_played = true;
            outbox.queue_message(MessageStyle::Radio, script.end_message);
        }
    }

    /// Banner readout for the HUD: solid, then flickering out.
    pub fn banner(&self) -> Option<BannerView<'_>> {
        if self.banner_frames_left <= 0 || self.banner_text.is_empty() {
            return None;
        }
        let elapsed = BANNER_FRAMES - self.banner_frames_left;
        let visible =
            elapsed < BANNER_SOLID_FRAMES || (elapsed / BANNER_FLICKER_PERIOD) % 2 == 0;
        Some(BannerView {
            text: &self.banner_text,
            visible,
        })
    }

    pub fn current_level(&self) -> u32 {
        self.current_level
    }
}

//! Search candidate data structure.

use serde::{Deserialize, Serialize};

/// One game entry parsed from a search-result page.
///
/// Duration fields default to 0 when the site reports no figure for a
/// category. Single-player listings populate `main_story_seconds` /
/// `main_extra_seconds` / `completionist_seconds`; multiplayer listings
/// populate `solo_seconds` / `co_op_seconds` / `vs_seconds` instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchCandidate {
    /// Display title as published by the site
    pub name: String,

    /// The site's numeric identifier for the game
    pub game_id: u32,

    /// Absolute URL of the thumbnail image
    pub image_url: String,

    /// Absolute URL of the game's detail page
    pub detail_url: String,

    /// Main Story completion time in seconds
    pub main_story_seconds: u64,

    /// Main + Extra completion time in seconds
    pub main_extra_seconds: u64,

    /// Completionist time in seconds
    pub completionist_seconds: u64,

    /// Solo playtime in seconds (multiplayer listings)
    pub solo_seconds: u64,

    /// Co-Op playtime in seconds (multiplayer listings)
    pub co_op_seconds: u64,

    /// Vs. playtime in seconds (multiplayer listings)
    pub vs_seconds: u64,
}

impl SearchCandidate {
    /// Whether the site reported any completion time for this entry.
    pub fn has_data(&self) -> bool {
        self.max_seconds() > 0
    }

    /// Largest reported duration across all categories.
    ///
    /// Callers use this as the scale when rendering the player's own
    /// playtime against the benchmarks.
    pub fn max_seconds(&self) -> u64 {
        [
            self.main_story_seconds,
            self.main_extra_seconds,
            self.completionist_seconds,
            self.solo_seconds,
            self.co_op_seconds,
            self.vs_seconds,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

//! Player feedback preferences
//!
//! Loaded alongside [`crate::Tuning`] from the config file.

use serde::{Deserialize, Serialize};

/// Feedback preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Vibrate on bumps and boundary hits
    pub vibration: bool,
    /// Short sound effects for jumps, bumps and pickups
    pub sound_effects: bool,
    /// Background music at session start (toggled in game with Down)
    pub music: bool,
    /// Show world/screen position debug overlay
    pub show_debug: bool,
    /// Mute all audio regardless of the flags above
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vibration: true,
            sound_effects: true,
            music: false,
            show_debug: true,
            muted: false,
        }
    }
}

impl Settings {
    /// Effective sound effects (respects mute)
    pub fn effective_sound_effects(&self) -> bool {
        self.sound_effects && !self.muted
    }

    /// Effective initial music state (respects mute)
    pub fn effective_music(&self) -> bool {
        self.music && !self.muted
    }
}

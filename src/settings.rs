//! Game settings and preferences
//!
//! Persisted separately from scores through the same key-value store.

use serde::{Deserialize, Serialize};

use crate::persistence::ScoreStore;

const STORAGE_KEY: &str = "shredwave_settings";

/// Player preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Feedback ===
    /// Screen shake on big landings/impacts
    pub screen_shake: bool,
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (minimize shake, flashes)
    pub reduced_motion: bool,
    /// High contrast mode
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            show_fps: false,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            mute_on_blur: true,

            reduced_motion: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Load settings; any failure falls back to defaults
    pub fn load(store: &dyn ScoreStore) -> Self {
        match store.get(STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("settings unreadable ({}), using defaults", e);
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("settings load failed ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Persist settings; failure is logged and ignored
    pub fn save(&self, store: &mut dyn ScoreStore) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if let Err(e) = store.set(STORAGE_KEY, &json) {
                    log::warn!("settings save failed ({})", e);
                }
            }
            Err(e) => log::warn!("settings serialization failed ({})", e),
        }
    }
}

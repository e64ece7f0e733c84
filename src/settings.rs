//! Player input preferences
//!
//! Persisted as JSON in LocalStorage on web; native builds always start from
//! defaults and never write.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MAX_FRAME_MS, DEFAULT_TICK_RATE_HZ};
use crate::input::SwipeOptions;
use crate::platform;
use crate::ui::DPadAnchor;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Fixed simulation rate (Hz)
    pub tick_rate_hz: f64,
    /// Frame deltas above this are clamped before reaching the clock (ms)
    pub max_frame_ms: f64,

    // === Touch ===
    /// Swipe detection tuning
    pub swipe: SwipeOptions,
    /// Show the on-screen D-pad
    pub show_dpad: bool,
    /// D-pad placement (left-handed players want bottom-left)
    pub dpad_anchor: DPadAnchor,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            max_frame_ms: DEFAULT_MAX_FRAME_MS,
            swipe: SwipeOptions::default(),
            show_dpad: true,
            dpad_anchor: DPadAnchor::BottomRight,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "pwa_game_kit_settings";

    /// Parse settings JSON; unknown fields are ignored, missing ones default
    pub fn from_json(json: &str) -> Result<Self, crate::ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from LocalStorage, falling back to defaults
    pub fn load() -> Self {
        if let Some(json) = platform::storage_get(Self::STORAGE_KEY) {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring stored settings: {e}"),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (no-op on native)
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            if platform::storage_set(Self::STORAGE_KEY, &json) {
                log::info!("Settings saved");
            }
        }
    }
}

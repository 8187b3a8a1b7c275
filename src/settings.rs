//! Player preferences
//!
//! Persisted separately from the best score in LocalStorage.

use serde::{Deserialize, Serialize};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Sound effects on/off
    pub sound: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Accessibility ===
    /// Keep orbs still regardless of the browser preference
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective reduced motion (player setting or system preference)
    pub fn effective_reduced_motion(&self, system_prefers: bool) -> bool {
        self.reduced_motion || system_prefers
    }

    /// Flip sound on/off, returning the new state
    pub fn toggle_sound(&mut self) -> bool {
        self.sound = !self.sound;
        self.sound
    }

    /// Volumes clamped into range (hand-edited storage may hold anything)
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    /// Parse stored JSON, ignoring fields from older versions
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str::<Settings>(json)
            .ok()
            .map(Self::sanitized)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "orb_pop_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        if let Some(storage) = crate::platform::storage::local_storage() {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
                log::warn!("Stored settings unreadable, using defaults");
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if let Some(storage) = crate::platform::storage::local_storage() {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_reduced_motion() {
        let mut settings = Settings::default();
        assert!(!settings.effective_reduced_motion(false));
        assert!(settings.effective_reduced_motion(true));
        settings.reduced_motion = true;
        assert!(settings.effective_reduced_motion(false));
    }

    #[test]
    fn test_toggle_sound() {
        let mut settings = Settings::default();
        assert!(!settings.toggle_sound());
        assert!(settings.toggle_sound());
    }

    #[test]
    fn test_from_json_partial_and_clamped() {
        let settings = Settings::from_json(r#"{"sound":false,"master_volume":3.5,"legacy":1}"#)
            .unwrap();
        assert!(!settings.sound);
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 1.0);
    }

    #[test]
    fn test_from_json_garbage() {
        assert_eq!(Settings::from_json("{not json"), None);
    }
}

//! Day/night theme selection from an ambient light sensor
//!
//! Independent of the heading pipeline. In automatic mode each light reading
//! picks the theme; in manual mode the user's switch does, and light readings
//! are ignored.
//!
//! # Example
//! ```
//! use heading_fusion::{ThemeController, ThemeMode, ThemeSettings};
//!
//! let mut theme = ThemeController::new(ThemeSettings { auto: true, ..Default::default() });
//! assert_eq!(theme.on_light_level(12.0), Some(ThemeMode::Night));
//! assert_eq!(theme.on_light_level(300.0), Some(ThemeMode::Day));
//! ```

use log::debug;

use crate::types::{ThemeMode, ThemeSettings};

/// Theme state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeController {
    settings: ThemeSettings,
    auto: bool,
    mode: ThemeMode,
}

impl ThemeController {
    /// Create a controller starting in day mode
    pub fn new(settings: ThemeSettings) -> Self {
        Self::with_mode(settings, ThemeMode::Day)
    }

    /// Create a controller starting in the mode the host UI is already in
    pub fn with_mode(settings: ThemeSettings, mode: ThemeMode) -> Self {
        Self {
            settings,
            auto: settings.auto,
            mode,
        }
    }

    /// Current mode
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Whether light readings drive the mode
    pub fn is_auto(&self) -> bool {
        self.auto
    }

    /// Enable or disable automatic mode
    ///
    /// The manual switch is locked while automatic mode is on.
    pub fn set_auto(&mut self, auto: bool) {
        self.auto = auto;
    }

    /// Apply the manual night switch
    ///
    /// # Returns
    /// The new mode when the switch was accepted, `None` while automatic
    /// mode holds the switch.
    pub fn set_night(&mut self, night: bool) -> Option<ThemeMode> {
        if self.auto {
            return None;
        }
        let mode = if night { ThemeMode::Night } else { ThemeMode::Day };
        Some(self.apply(mode))
    }

    /// Feed a light sensor reading in lux
    ///
    /// # Returns
    /// The selected mode in automatic mode, `None` in manual mode.
    pub fn on_light_level(&mut self, lux: f32) -> Option<ThemeMode> {
        if !self.auto {
            return None;
        }
        let mode = if lux < self.settings.night_threshold {
            ThemeMode::Night
        } else {
            ThemeMode::Day
        };
        Some(self.apply(mode))
    }

    fn apply(&mut self, mode: ThemeMode) -> ThemeMode {
        if mode != self.mode {
            debug!("theme {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
        mode
    }
}

impl Default for ThemeController {
    fn default() -> Self {
        Self::new(ThemeSettings::default())
    }
}

//! Platform configuration
//!
//! Options are fixed when the platform is initialized. Defaults can be
//! overridden from the environment:
//!
//! - `EMBEDKIT_SCALING`: initial render scaling, a positive number
//! - `EMBEDKIT_WINDOW_SIZE`: default window size as `WIDTHxHEIGHT`
//! - `EMBEDKIT_FRAME_INTERVAL_MS`: frame interval of the demo host loop

use std::time::Duration;

use crate::error::{BridgeError, Result};
use crate::geometry::PixelSize;
use crate::input::RawInputModifiers;

pub const SCALING_VAR: &str = "EMBEDKIT_SCALING";
pub const WINDOW_SIZE_VAR: &str = "EMBEDKIT_WINDOW_SIZE";
pub const FRAME_INTERVAL_VAR: &str = "EMBEDKIT_FRAME_INTERVAL_MS";

/// Modifiers the toolkit uses for keyboard shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyConfiguration {
    /// Modifier for commands such as copy and paste
    pub command_modifiers: RawInputModifiers,
    /// Modifier for moving or deleting whole words
    pub whole_word_text_action_modifiers: RawInputModifiers,
}

impl HotkeyConfiguration {
    /// Hotkeys for macOS or for other systems
    pub fn for_platform(macos: bool) -> Self {
        if macos {
            Self {
                command_modifiers: RawInputModifiers::META,
                whole_word_text_action_modifiers: RawInputModifiers::ALT,
            }
        } else {
            Self {
                command_modifiers: RawInputModifiers::CONTROL,
                whole_word_text_action_modifiers: RawInputModifiers::CONTROL,
            }
        }
    }
}

impl Default for HotkeyConfiguration {
    fn default() -> Self {
        Self::for_platform(cfg!(target_os = "macos"))
    }
}

/// Options for [`crate::platform::Platform`]
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformOptions {
    /// Render scaling of windows before the host reports one
    pub initial_scaling: f64,
    /// Size the demo host gives new windows
    pub default_window_size: PixelSize,
    /// Interval between host frames in the demo loop
    pub frame_interval: Duration,
    pub hotkeys: HotkeyConfiguration,
}

impl PlatformOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self {
            initial_scaling: 1.0,
            default_window_size: PixelSize::new(800, 600),
            frame_interval: Duration::from_millis(16),
            hotkeys: HotkeyConfiguration::default(),
        }
    }

    pub fn with_initial_scaling(mut self, scaling: f64) -> Self {
        self.initial_scaling = scaling;
        self
    }

    pub fn with_default_window_size(mut self, size: PixelSize) -> Self {
        self.default_window_size = size;
        self
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    pub fn with_hotkeys(mut self, hotkeys: HotkeyConfiguration) -> Self {
        self.hotkeys = hotkeys;
        self
    }

    /// Defaults overridden from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by `lookup`
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut options = Self::new();

        if let Some(value) = lookup(SCALING_VAR) {
            options.initial_scaling = parse_scaling(&value)?;
        }

        if let Some(value) = lookup(WINDOW_SIZE_VAR) {
            options.default_window_size = parse_window_size(&value)?;
        }

        if let Some(value) = lookup(FRAME_INTERVAL_VAR) {
            let millis: u64 = value.trim().parse().map_err(|_| {
                BridgeError::InvalidConfig(format!("{}={:?} is not a number", FRAME_INTERVAL_VAR, value))
            })?;
            if millis == 0 {
                return Err(BridgeError::InvalidConfig(format!(
                    "{} must be positive",
                    FRAME_INTERVAL_VAR
                )));
            }
            options.frame_interval = Duration::from_millis(millis);
        }

        options.validate()?;
        Ok(options)
    }

    /// Check that the options are usable
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_scaling.is_finite() && self.initial_scaling > 0.0) {
            return Err(BridgeError::InvalidConfig(format!(
                "initial scaling {} must be positive",
                self.initial_scaling
            )));
        }
        if self.frame_interval.is_zero() {
            return Err(BridgeError::InvalidConfig(
                "frame interval must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PlatformOptions {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_scaling(value: &str) -> Result<f64> {
    let scaling: f64 = value.trim().parse().map_err(|_| {
        BridgeError::InvalidConfig(format!("{}={:?} is not a number", SCALING_VAR, value))
    })?;

    if !(scaling.is_finite() && scaling > 0.0) {
        return Err(BridgeError::InvalidConfig(format!(
            "{} must be positive, got {}",
            SCALING_VAR, scaling
        )));
    }
    Ok(scaling)
}

fn parse_window_size(value: &str) -> Result<PixelSize> {
    let invalid = || {
        BridgeError::InvalidConfig(format!(
            "{}={:?} is not WIDTHxHEIGHT",
            WINDOW_SIZE_VAR, value
        ))
    };

    let (width, height) = value.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
    let width: u32 = width.trim().parse().map_err(|_| invalid())?;
    let height: u32 = height.trim().parse().map_err(|_| invalid())?;

    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok(PixelSize::new(width, height))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let options = PlatformOptions::from_env_with(lookup(&[])).unwrap();
        assert_eq!(options, PlatformOptions::default());
        assert_eq!(options.initial_scaling, 1.0);
    }

    #[test]
    fn test_env_overrides() {
        let options = PlatformOptions::from_env_with(lookup(&[
            (SCALING_VAR, "1.5"),
            (WINDOW_SIZE_VAR, "1280x720"),
            (FRAME_INTERVAL_VAR, "33"),
        ]))
        .unwrap();

        assert_eq!(options.initial_scaling, 1.5);
        assert_eq!(options.default_window_size, PixelSize::new(1280, 720));
        assert_eq!(options.frame_interval, Duration::from_millis(33));
    }

    #[test]
    fn test_invalid_values() {
        for vars in [
            [(SCALING_VAR, "zero")],
            [(SCALING_VAR, "-2")],
            [(WINDOW_SIZE_VAR, "1280")],
            [(WINDOW_SIZE_VAR, "0x10")],
            [(FRAME_INTERVAL_VAR, "0")],
        ] {
            assert!(matches!(
                PlatformOptions::from_env_with(lookup(&vars)),
                Err(BridgeError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_builder() {
        let options = PlatformOptions::new()
            .with_initial_scaling(2.0)
            .with_default_window_size(PixelSize::new(320, 240));
        assert_eq!(options.initial_scaling, 2.0);
        assert!(options.validate().is_ok());
        assert!(PlatformOptions::new()
            .with_initial_scaling(0.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_hotkeys() {
        let mac = HotkeyConfiguration::for_platform(true);
        assert_eq!(mac.command_modifiers, RawInputModifiers::META);
        assert_eq!(mac.whole_word_text_action_modifiers, RawInputModifiers::ALT);

        let other = HotkeyConfiguration::for_platform(false);
        assert_eq!(other.command_modifiers, RawInputModifiers::CONTROL);
    }
}

//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default debounce interval in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u16 = 50;

/// Default pulse width in microseconds
pub const DEFAULT_PULSE_US: u16 = 10;

/// Debounced button configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ButtonConfig {
    /// Minimum time between accepted samples (ms)
    ///
    /// Zero samples on every poll, with no debounce protection.
    pub debounce_ms: u16,
}

impl ButtonConfig {
    /// Configuration with the given debounce interval
    pub const fn new(debounce_ms: u16) -> Self {
        Self { debounce_ms }
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

/// Timed pulse output configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PulseConfig {
    /// Pulse width (us); zero disables the pulse
    pub width_us: u16,
}

impl PulseConfig {
    /// Configuration with the given pulse width
    pub const fn new(width_us: u16) -> Self {
        Self { width_us }
    }
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PULSE_US)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(ButtonConfig::default().debounce_ms, 50);
        assert_eq!(PulseConfig::default().width_us, 10);
    }

    #[test]
    fn test_const_construction() {
        const BUTTON: ButtonConfig = ButtonConfig::new(20);
        const PULSE: PulseConfig = PulseConfig::new(0);
        assert_eq!(BUTTON.debounce_ms, 20);
        assert_eq!(PULSE.width_us, 0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_board_sections() {
        let config: toml::Value = toml::from_str(
            r#"
            [button]
            pin = "D2"
            debounce_ms = 20

            [trigger]
            pin = "D8"
            "#,
        )
        .unwrap();

        let button: ButtonConfig = config["button"].clone().try_into().unwrap();
        assert_eq!(button, ButtonConfig::new(20));

        // Missing keys fall back to the defaults
        let pulse: PulseConfig = config["trigger"].clone().try_into().unwrap();
        assert_eq!(pulse, PulseConfig::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rejects_out_of_range() {
        let section: toml::Value = toml::from_str("width_us = 70000").unwrap();
        assert!(section.try_into::<PulseConfig>().is_err());
    }
}

// SPDX-License-Identifier: GPL-3.0-only
//! Brightness target calculation
//!
//! Applies per-monitor policy from the configuration before a value is
//! handed to the accessor, which then clamps it to 0-100.

use crate::config::Config;
use crate::vcp::{MAX_PERCENTAGE, VcpFeature};

/// Handles target calculation with minimum brightness
pub struct BrightnessCalculator<'a> {
    config: &'a Config,
}

impl<'a> BrightnessCalculator<'a> {
    /// Create a new calculator with the given configuration
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Value to send for an absolute request
    ///
    /// Brightness is raised to the configured minimum for the display,
    /// contrast is passed through untouched.
    pub fn target(&self, feature: VcpFeature, requested: i32, display_name: &str) -> i32 {
        if feature != VcpFeature::Luminance {
            return requested;
        }

        let min_brightness = i32::from(self.config.get_min_brightness(display_name));
        if requested < min_brightness {
            debug!(
                display_name = %display_name,
                requested,
                min = min_brightness,
                "Clamping brightness to minimum"
            );
            return min_brightness;
        }
        requested
    }

    /// Value to send for a relative change from `current`
    pub fn adjusted(
        &self,
        feature: VcpFeature,
        current: u32,
        delta: i32,
        display_name: &str,
    ) -> i32 {
        let current = current.min(MAX_PERCENTAGE) as i32;
        self.target(feature, current.saturating_add(delta), display_name)
    }

    /// Step used when no explicit delta is given
    pub fn step(&self) -> i32 {
        self.config.step as i32
    }
}

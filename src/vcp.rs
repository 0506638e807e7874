// SPDX-License-Identifier: GPL-3.0-only
//! MCCS VCP (Virtual Control Panel) feature codes
//!
//! Only the two continuous features this crate drives are listed. The codes
//! come from the VESA MCCS table and never change at runtime.

use std::fmt;
use std::str::FromStr;

/// VCP code for luminance (brightness)
pub const LUMINANCE_CODE: u8 = 0x10;

/// VCP code for contrast
pub const CONTRAST_CODE: u8 = 0x12;

/// Upper bound of the normalized value scale
pub const MAX_PERCENTAGE: u32 = 100;

/// A controllable monitor feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VcpFeature {
    Luminance,
    Contrast,
}

impl VcpFeature {
    /// Protocol byte for this feature
    pub const fn code(self) -> u8 {
        match self {
            VcpFeature::Luminance => LUMINANCE_CODE,
            VcpFeature::Contrast => CONTRAST_CODE,
        }
    }

    /// Two-character token used for this feature inside a capability string
    pub fn token(self) -> &'static str {
        match self {
            VcpFeature::Luminance => "10",
            VcpFeature::Contrast => "12",
        }
    }
}

impl fmt::Display for VcpFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VcpFeature::Luminance => write!(f, "brightness"),
            VcpFeature::Contrast => write!(f, "contrast"),
        }
    }
}

impl FromStr for VcpFeature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "brightness" | "luminance" => Ok(VcpFeature::Luminance),
            "contrast" => Ok(VcpFeature::Contrast),
            other => Err(format!("unknown feature: {other}")),
        }
    }
}

/// Reply of a feature read: `(minimum, current, maximum)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureReading {
    pub minimum: u32,
    pub current: u32,
    pub maximum: u32,
}

impl FeatureReading {
    pub fn new(minimum: u32, current: u32, maximum: u32) -> Self {
        Self {
            minimum,
            current,
            maximum,
        }
    }

    /// Current value expressed on the 0-100 scale relative to the reported range
    pub fn percentage(&self) -> u32 {
        if self.maximum <= self.minimum {
            return self.current.min(MAX_PERCENTAGE);
        }
        let current = self.current.clamp(self.minimum, self.maximum);
        let range = u64::from(self.maximum - self.minimum);
        let offset = u64::from(current - self.minimum);
        // At most MAX_PERCENTAGE after the division
        ((offset * u64::from(MAX_PERCENTAGE) + range / 2) / range) as u32
    }
}

/// Clamp a requested value into `[0, 100]`
///
/// Out-of-range input is not an error.
pub fn clamp_percentage(value: i32) -> u32 {
    value.clamp(0, MAX_PERCENTAGE as i32) as u32
}

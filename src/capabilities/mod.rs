// SPDX-License-Identifier: GPL-3.0-only
//! Monitor capability discovery
//!
//! Two sources describe what a monitor can do: the coarse capability flags
//! returned by a single query, and the vendor capability string whose
//! `vcp(...)` section lists every supported feature code.

mod flags;
mod parser;

pub use flags::CapabilityFlags;
pub use parser::{ScanOutcome, parse_vcp_codes, scan_vcp_codes};

use crate::vcp::VcpFeature;

/// Which of the driven features a monitor supports
///
/// Values only ever go from `false` to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureSupport {
    pub brightness: bool,
    pub contrast: bool,
}

impl FeatureSupport {
    /// Support for both brightness and contrast
    pub const fn both() -> Self {
        Self {
            brightness: true,
            contrast: true,
        }
    }

    pub fn supports(&self, feature: VcpFeature) -> bool {
        match feature {
            VcpFeature::Luminance => self.brightness,
            VcpFeature::Contrast => self.contrast,
        }
    }

    /// Record a feature as supported
    pub fn mark(&mut self, feature: VcpFeature) {
        match feature {
            VcpFeature::Luminance => self.brightness = true,
            VcpFeature::Contrast => self.contrast = true,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.brightness && self.contrast
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_support_is_monotonic() {
        let mut support = FeatureSupport::default();
        assert!(!support.is_complete());

        support.mark(VcpFeature::Contrast);
        support.mark(VcpFeature::Contrast);
        assert!(support.contrast);
        assert!(!support.brightness);

        support.mark(VcpFeature::Luminance);
        assert!(support.is_complete());
        assert_eq!(support, FeatureSupport::both());
    }
}

// SPDX-License-Identifier: GPL-3.0-only
//! Capability probing
//!
//! Runs once per monitor and decides which access path to use. The
//! high-level path is only taken when the flags advertise brightness *and*
//! contrast; brightness alone marks the monitor unusable rather than
//! partially supported.

use crate::capabilities::{CapabilityFlags, FeatureSupport, parse_vcp_codes};
use crate::protocols::PhysicalMonitor;

use super::backend::AccessStrategy;

/// Outcome of probing one monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResult {
    pub usable: bool,
    pub strategy: AccessStrategy,
    pub support: FeatureSupport,
}

impl ProbeResult {
    fn unusable(strategy: AccessStrategy, support: FeatureSupport) -> Self {
        Self {
            usable: false,
            strategy,
            support,
        }
    }
}

/// Probe a monitor through its host primitives
///
/// Only issues queries, never changes monitor state.
pub fn probe<H: PhysicalMonitor + ?Sized>(handle: &mut H) -> ProbeResult {
    let name = handle.name();

    let flags = match handle.capability_flags() {
        Ok(flags) => flags,
        Err(e) => {
            info!(display_name = %name, error = %e, "capability query failed");
            return ProbeResult::unusable(AccessStrategy::HighLevel, FeatureSupport::default());
        }
    };
    debug!(display_name = %name, ?flags, "capability flags");

    if flags.contains(CapabilityFlags::BRIGHTNESS) {
        if !flags.contains(CapabilityFlags::CONTRAST) {
            info!(
                display_name = %name,
                "brightness advertised without contrast, high-level path requires both"
            );
            return ProbeResult::unusable(
                AccessStrategy::HighLevel,
                FeatureSupport {
                    brightness: true,
                    contrast: false,
                },
            );
        }

        return ProbeResult {
            usable: true,
            strategy: AccessStrategy::HighLevel,
            support: FeatureSupport::both(),
        };
    }

    probe_low_level(handle, &name)
}

fn probe_low_level<H: PhysicalMonitor + ?Sized>(handle: &mut H, name: &str) -> ProbeResult {
    let strategy = AccessStrategy::LowLevel;

    let length = match handle.capabilities_string_length() {
        Ok(length) => length,
        Err(e) => {
            info!(display_name = %name, error = %e, "capability string length unavailable");
            return ProbeResult::unusable(strategy, FeatureSupport::default());
        }
    };

    let caps = match handle.capabilities_string(length) {
        Ok(caps) if !caps.is_empty() => caps,
        Ok(_) => {
            info!(display_name = %name, "monitor returned an empty capability string");
            return ProbeResult::unusable(strategy, FeatureSupport::default());
        }
        Err(e) => {
            info!(display_name = %name, error = %e, "capability string request failed");
            return ProbeResult::unusable(strategy, FeatureSupport::default());
        }
    };
    debug!(display_name = %name, caps = %caps, "capability string");

    let support = parse_vcp_codes(&caps);
    if !support.brightness {
        info!(display_name = %name, "capability string does not list luminance");
    }

    ProbeResult {
        usable: support.brightness,
        strategy,
        support,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocols::mock::{Call, MockMonitor};

    #[test]
    fn test_high_level_monitor() {
        let mut mock = MockMonitor::high_level();
        let result = probe(&mut mock);

        assert!(result.usable);
        assert_eq!(result.strategy, AccessStrategy::HighLevel);
        assert_eq!(result.support, FeatureSupport::both());
        // The capability string is never needed on this path
        assert_eq!(mock.calls(), vec![Call::CapabilityFlags]);
    }

    #[test]
    fn test_failed_flag_query_is_unusable() {
        let mut mock = MockMonitor::low_level("(vcp(10 12))");
        mock.state().flags = None;

        let result = probe(&mut mock);
        assert!(!result.usable);
        assert_eq!(mock.calls(), vec![Call::CapabilityFlags]);
    }

    #[test]
    fn test_brightness_without_contrast_is_unusable() {
        let mut mock = MockMonitor::high_level();
        mock.state().flags = Some(CapabilityFlags::BRIGHTNESS);

        let result = probe(&mut mock);
        assert!(!result.usable);
        assert_eq!(result.strategy, AccessStrategy::HighLevel);
        assert!(!result.support.contrast);
    }

    #[test]
    fn test_falls_back_to_capability_string() {
        let caps = "(prot(monitor)vcp(02 10(00-64) 12))";
        let mut mock = MockMonitor::low_level(caps);
        mock.state().flags = Some(CapabilityFlags::CONTRAST | CapabilityFlags::DEGAUSS);

        let result = probe(&mut mock);
        assert!(result.usable);
        assert_eq!(result.strategy, AccessStrategy::LowLevel);
        assert_eq!(result.support, FeatureSupport::both());
        assert_eq!(
            mock.calls(),
            vec![
                Call::CapabilityFlags,
                Call::CapabilitiesStringLength,
                Call::CapabilitiesString(caps.len()),
            ]
        );
    }

    #[test]
    fn test_low_level_contrast_is_optional() {
        let mut mock = MockMonitor::low_level("(vcp(02 10 60(0F 11)))");
        let result = probe(&mut mock);

        assert!(result.usable);
        assert!(result.support.brightness);
        assert!(!result.support.contrast);
    }

    #[test]
    fn test_low_level_without_luminance_is_unusable() {
        let mut mock = MockMonitor::low_level("(vcp(02 12 60(0F 11)))");
        let result = probe(&mut mock);

        assert!(!result.usable);
        assert_eq!(result.strategy, AccessStrategy::LowLevel);
        assert!(result.support.contrast);
    }

    #[test]
    fn test_missing_capability_string_is_unusable() {
        let mut mock = MockMonitor::default();
        assert!(!probe(&mut mock).usable);

        let mut mock = MockMonitor::low_level("");
        assert!(!probe(&mut mock).usable);

        let mut mock = MockMonitor::low_level("(vcp(10 12))");
        mock.state().fail_caps_length = true;
        assert!(!probe(&mut mock).usable);
        assert!(!mock.calls().iter().any(|c| matches!(c, Call::CapabilitiesString(_))));
    }

    #[test]
    fn test_probing_is_deterministic() {
        for caps in ["(vcp(10 12))", "(vcp(10))", "(type(lcd))"] {
            let first = probe(&mut MockMonitor::low_level(caps));
            let second = probe(&mut MockMonitor::low_level(caps));
            assert_eq!(first, second);
        }

        let first = probe(&mut MockMonitor::high_level());
        let second = probe(&mut MockMonitor::high_level());
        assert_eq!(first, second);
    }
}

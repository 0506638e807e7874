// SPDX-License-Identifier: GPL-3.0-only
//! High-level monitor capability bits

use bitflags::bitflags;

bitflags! {
    /// Coarse capability flags reported by the high-level configuration API
    ///
    /// Bit values follow the `MC_CAPS_*` constants of the monitor
    /// configuration API. Monitors that only speak raw VCP report none.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CapabilityFlags: u32 {
        const MONITOR_TECHNOLOGY_TYPE = 0x0000_0001;
        const BRIGHTNESS = 0x0000_0002;
        const CONTRAST = 0x0000_0004;
        const COLOR_TEMPERATURE = 0x0000_0008;
        const RED_GREEN_BLUE_GAIN = 0x0000_0010;
        const RED_GREEN_BLUE_DRIVE = 0x0000_0020;
        const DEGAUSS = 0x0000_0040;
        const DISPLAY_AREA_POSITION = 0x0000_0080;
        const DISPLAY_AREA_SIZE = 0x0000_0100;
        const RESTORE_FACTORY_DEFAULTS = 0x0000_0400;
        const RESTORE_FACTORY_COLOR_DEFAULTS = 0x0000_0800;
        const RESTORE_FACTORY_DEFAULTS_ENABLES_MONITOR_SETTINGS = 0x0000_1000;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_bits() {
        let flags = CapabilityFlags::from_bits_truncate(0x0000_0006);
        assert!(flags.contains(CapabilityFlags::BRIGHTNESS));
        assert!(flags.contains(CapabilityFlags::CONTRAST));
        assert!(!flags.contains(CapabilityFlags::DEGAUSS));
    }

    #[test]
    fn test_unknown_bits_dropped() {
        let flags = CapabilityFlags::from_bits_truncate(0x8000_0002);
        assert_eq!(flags, CapabilityFlags::BRIGHTNESS);
    }
}

// SPDX-License-Identifier: GPL-3.0-only
//! Host primitives and the monitor control surface
//!
//! The host layer owns the platform specifics: it hands out one
//! [`PhysicalMonitor`] per physical display and knows how to talk to it.
//! Everything above works only through these primitives.

#[cfg(feature = "ddc-hi-host")]
pub mod ddc_ci;

#[cfg(test)]
pub(crate) mod mock;

use anyhow::Result;

use crate::capabilities::CapabilityFlags;
use crate::vcp::{FeatureReading, VcpFeature};

/// Primitive operations a host provides for one physical monitor
///
/// Every call blocks until the display answers. An `Err` stands for the
/// failure signal of the underlying primitive.
pub trait PhysicalMonitor: Send {
    /// Human-readable name of the display
    fn name(&self) -> String;

    /// Query the coarse high-level capability flags
    fn capability_flags(&mut self) -> Result<CapabilityFlags>;

    /// Length of the raw capability string in characters
    fn capabilities_string_length(&mut self) -> Result<usize>;

    /// Fetch the raw capability string
    fn capabilities_string(&mut self, length: usize) -> Result<String>;

    /// Dedicated brightness/contrast read
    fn get_high_level(&mut self, feature: VcpFeature) -> Result<FeatureReading>;

    /// Dedicated brightness/contrast write
    fn set_high_level(&mut self, feature: VcpFeature, value: u32) -> Result<()>;

    /// Generic VCP read
    fn get_vcp_feature(&mut self, code: u8) -> Result<FeatureReading>;

    /// Generic VCP write
    fn set_vcp_feature(&mut self, code: u8, value: u32) -> Result<()>;

    /// Release the native handle
    ///
    /// Called exactly once by the owning monitor.
    fn release(&mut self);
}

/// Brightness/contrast control surface of a probed monitor
pub trait MonitorControl: std::fmt::Debug + Send {
    /// Get the human-readable name of this display
    fn name(&self) -> String;

    /// Get the current brightness
    fn get_brightness(&mut self) -> crate::Result<u32>;

    /// Set the brightness (clamped to 0-100)
    fn set_brightness(&mut self, value: i32);

    /// Get the current contrast
    fn get_contrast(&mut self) -> crate::Result<u32>;

    /// Set the contrast (clamped to 0-100)
    fn set_contrast(&mut self, value: i32);

    /// Check whether the monitor still answers
    fn is_usable(&mut self) -> bool;

    /// Identity check against another monitor
    fn is_same_monitor(&mut self, other: &dyn MonitorControl) -> bool;
}

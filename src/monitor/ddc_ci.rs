// SPDX-License-Identifier: GPL-3.0-only
//! Probed DDC/CI monitor
//!
//! Owns the physical handle for its whole lifetime, probes it once on
//! construction and then routes every read and write through the cached
//! access strategy. The handle is released exactly once, either by
//! [`DdcCiMonitor::close`] or on drop.

use crate::capabilities::FeatureSupport;
use crate::error::{Error, Result};
use crate::protocols::{MonitorControl, PhysicalMonitor};
use crate::vcp::{FeatureReading, VcpFeature, clamp_percentage};

use super::backend::AccessStrategy;
use super::probe::{ProbeResult, probe};

/// Value reported when a low-level read fails
const LOW_LEVEL_READ_FALLBACK: u32 = 0;

pub struct DdcCiMonitor<H: PhysicalMonitor> {
    handle: H,
    name: String,
    probe: ProbeResult,
    /// Set by the identity check, disables all further validation
    tested: bool,
    released: bool,
}

impl<H: PhysicalMonitor> DdcCiMonitor<H> {
    /// Take ownership of a physical handle and probe it
    pub fn new(handle: H) -> Self {
        let name = handle.name();
        Self::with_name(handle, name)
    }

    /// Like [`DdcCiMonitor::new`] with a name supplied by the caller
    pub fn with_name(mut handle: H, name: impl Into<String>) -> Self {
        let name = name.into();
        let probe = probe(&mut handle);
        info!(
            display_name = %name,
            usable = probe.usable,
            strategy = %probe.strategy,
            brightness = probe.support.brightness,
            contrast = probe.support.contrast,
            "probed monitor"
        );

        Self {
            handle,
            name,
            probe,
            tested: false,
            released: false,
        }
    }

    /// Whether capability discovery found a way to drive this monitor
    pub fn can_use(&self) -> bool {
        self.probe.usable
    }

    pub fn strategy(&self) -> AccessStrategy {
        self.probe.strategy
    }

    pub fn support(&self) -> FeatureSupport {
        self.probe.support
    }

    /// Read a feature, reporting failures on both access paths
    ///
    /// Unlike the getters this also refuses features the capability
    /// discovery did not find.
    pub fn read_feature(&mut self, feature: VcpFeature) -> Result<FeatureReading> {
        self.ensure_supported(feature)?;
        self.dispatch_read(feature)
    }

    /// Release the native handle now instead of on drop
    pub fn close(mut self) {
        self.release_once();
    }

    fn ensure_usable(&self) -> Result<()> {
        if !self.probe.usable {
            return Err(Error::Unusable {
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    fn ensure_supported(&self, feature: VcpFeature) -> Result<()> {
        self.ensure_usable()?;
        if !self.probe.support.supports(feature) {
            return Err(Error::FeatureUnsupported {
                name: self.name.clone(),
                feature,
            });
        }
        Ok(())
    }

    fn dispatch_read(&mut self, feature: VcpFeature) -> Result<FeatureReading> {
        self.ensure_usable()?;
        let strategy = self.probe.strategy;
        strategy
            .read(&mut self.handle, feature)
            .map_err(|source| match strategy {
                AccessStrategy::HighLevel => Error::HighLevelHandleInvalid {
                    name: self.name.clone(),
                    source,
                },
                AccessStrategy::LowLevel => Error::FeatureRead {
                    name: self.name.clone(),
                    feature,
                    source,
                },
            })
    }

    fn current_value(&mut self, feature: VcpFeature) -> Result<u32> {
        match self.dispatch_read(feature) {
            Ok(reading) => Ok(reading.current),
            // A failed generic read is indistinguishable from a zero reading
            Err(Error::FeatureRead { source, .. }) => {
                warn!(
                    display_name = %self.name,
                    %feature,
                    error = %source,
                    "VCP read failed, reporting {}", LOW_LEVEL_READ_FALLBACK
                );
                Ok(LOW_LEVEL_READ_FALLBACK)
            }
            Err(e) => Err(e),
        }
    }

    fn apply(&mut self, feature: VcpFeature, value: i32) {
        let value = clamp_percentage(value);
        if let Err(e) = self.ensure_usable() {
            debug!(display_name = %self.name, %feature, value, "ignoring write: {}", e);
            return;
        }

        let strategy = self.probe.strategy;
        match strategy.write(&mut self.handle, feature, value) {
            Ok(()) => debug!(display_name = %self.name, %feature, value, %strategy, "wrote feature"),
            Err(e) => warn!(
                display_name = %self.name,
                %feature,
                value,
                error = %e,
                "write failed"
            ),
        }
    }

    fn release_once(&mut self) {
        if !self.released {
            self.released = true;
            self.handle.release();
        }
    }
}

impl<H: PhysicalMonitor> MonitorControl for DdcCiMonitor<H> {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn get_brightness(&mut self) -> Result<u32> {
        self.current_value(VcpFeature::Luminance)
    }

    fn set_brightness(&mut self, value: i32) {
        self.apply(VcpFeature::Luminance, value)
    }

    fn get_contrast(&mut self) -> Result<u32> {
        self.current_value(VcpFeature::Contrast)
    }

    fn set_contrast(&mut self, value: i32) {
        self.apply(VcpFeature::Contrast, value)
    }

    fn is_usable(&mut self) -> bool {
        if self.tested || !self.probe.usable {
            return false;
        }
        self.probe
            .strategy
            .read(&mut self.handle, VcpFeature::Luminance)
            .is_ok()
    }

    /// Always false: handles carry no identity that could be compared.
    ///
    /// Calling this marks the monitor as tested, after which
    /// [`MonitorControl::is_usable`] reports false without touching the
    /// hardware. Callers use that to drop duplicates found during
    /// re-enumeration.
    fn is_same_monitor(&mut self, _other: &dyn MonitorControl) -> bool {
        self.tested = true;
        false
    }
}

impl<H: PhysicalMonitor> Drop for DdcCiMonitor<H> {
    fn drop(&mut self) {
        self.release_once();
    }
}

impl<H: PhysicalMonitor> std::fmt::Debug for DdcCiMonitor<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DdcCiMonitor")
            .field("name", &self.name)
            .field("probe", &self.probe)
            .field("tested", &self.tested)
            .finish_non_exhaustive()
    }
}

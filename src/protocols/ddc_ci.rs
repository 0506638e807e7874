// SPDX-License-Identifier: GPL-3.0-only
//! DDC/CI (Display Data Channel Command Interface) host implementation
//!
//! DDC/CI is a standard protocol for controlling monitors over I2C bus.
//! It's supported by most modern external monitors via the video cable.
//! `ddc-hi` only exposes the raw VCP commands, so monitors driven through it
//! always end up on the low-level access path.

use anyhow::{Result, anyhow, bail};
use ddc_hi::{Ddc, Display};

use super::PhysicalMonitor;
use crate::capabilities::CapabilityFlags;
use crate::vcp::{FeatureReading, VcpFeature};

/// DDC/CI display handle backed by `ddc-hi`
pub struct DdcHiDisplay {
    /// `None` once the handle has been released
    display: Option<Display>,
    id: String,
    name: String,
    /// Capability string, fetched once for the length/fetch pair
    caps: Option<Vec<u8>>,
}

impl DdcHiDisplay {
    /// Create a new DDC/CI display wrapper
    pub fn new(display: Display) -> Self {
        let id = display.info.id.clone();
        let name = display
            .info
            .model_name
            .clone()
            .unwrap_or_else(|| format!("DDC/CI display {id}"));
        Self {
            display: Some(display),
            id,
            name,
            caps: None,
        }
    }

    /// Enumerate all DDC/CI displays
    pub fn enumerate() -> Vec<Self> {
        Display::enumerate()
            .into_iter()
            .map(Self::new)
            .collect()
    }

    /// Backend specific identifier (I2C bus or OS device path)
    pub fn id(&self) -> &str {
        &self.id
    }

    fn display(&mut self) -> Result<&mut Display> {
        self.display
            .as_mut()
            .ok_or_else(|| anyhow!("display handle {} already released", self.id))
    }

    fn fetch_caps(&mut self) -> Result<&[u8]> {
        if self.caps.is_none() {
            let raw = self.display()?.handle.capabilities_string()?;
            debug!(display_id = %self.id, length = raw.len(), "fetched capability string");
            self.caps = Some(raw);
        }
        Ok(self.caps.as_deref().unwrap_or_default())
    }
}

impl PhysicalMonitor for DdcHiDisplay {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn capability_flags(&mut self) -> Result<CapabilityFlags> {
        // The query itself succeeds as long as the handle is alive, there is
        // just no high-level capability to report.
        self.display()?;
        Ok(CapabilityFlags::empty())
    }

    fn capabilities_string_length(&mut self) -> Result<usize> {
        Ok(self.fetch_caps()?.len())
    }

    fn capabilities_string(&mut self, length: usize) -> Result<String> {
        let raw = self.fetch_caps()?;
        let raw = &raw[..length.min(raw.len())];
        // Replies are NUL padded on some monitors
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        Ok(String::from_utf8_lossy(&raw[..end]).into_owned())
    }

    fn get_high_level(&mut self, feature: VcpFeature) -> Result<FeatureReading> {
        bail!("high-level {feature} control is not available through ddc-hi")
    }

    fn set_high_level(&mut self, feature: VcpFeature, _value: u32) -> Result<()> {
        bail!("high-level {feature} control is not available through ddc-hi")
    }

    fn get_vcp_feature(&mut self, code: u8) -> Result<FeatureReading> {
        let value = self.display()?.handle.get_vcp_feature(code)?;
        Ok(FeatureReading::new(
            0,
            u32::from(value.value()),
            u32::from(value.maximum()),
        ))
    }

    fn set_vcp_feature(&mut self, code: u8, value: u32) -> Result<()> {
        let value = u16::try_from(value)?;
        self.display()?.handle.set_vcp_feature(code, value)?;
        Ok(())
    }

    fn release(&mut self) {
        if self.display.take().is_some() {
            debug!(display_id = %self.id, "released DDC/CI display handle");
        }
    }
}

impl std::fmt::Debug for DdcHiDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DdcHiDisplay(id: {}, name: {})", self.id, self.name)
    }
}

// SPDX-License-Identifier: GPL-3.0-only
//! Recording host used by unit tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};

use super::PhysicalMonitor;
use crate::capabilities::CapabilityFlags;
use crate::vcp::{FeatureReading, VcpFeature};

/// A primitive invocation as seen by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CapabilityFlags,
    CapabilitiesStringLength,
    CapabilitiesString(usize),
    GetHighLevel(VcpFeature),
    SetHighLevel(VcpFeature, u32),
    GetVcp(u8),
    SetVcp(u8, u32),
    Release,
}

#[derive(Debug)]
pub struct MockState {
    /// `None` makes the flags query fail
    pub flags: Option<CapabilityFlags>,
    /// `None` makes the string fetch fail
    pub caps: Option<String>,
    pub fail_caps_length: bool,
    /// Readings served by the dedicated primitives, missing entries fail
    pub high_level: HashMap<VcpFeature, FeatureReading>,
    /// Readings served by the generic primitive, missing entries fail
    pub vcp: HashMap<u8, FeatureReading>,
    pub fail_writes: bool,
    pub calls: Vec<Call>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            flags: Some(CapabilityFlags::empty()),
            caps: None,
            fail_caps_length: false,
            high_level: HashMap::new(),
            vcp: HashMap::new(),
            fail_writes: false,
            calls: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockMonitor {
    pub inner: Arc<Mutex<MockState>>,
}

impl MockMonitor {
    /// Monitor exposing the dedicated brightness/contrast primitives
    pub fn high_level() -> Self {
        let mock = Self::default();
        {
            let mut state = mock.state();
            state.flags = Some(CapabilityFlags::BRIGHTNESS | CapabilityFlags::CONTRAST);
            state
                .high_level
                .insert(VcpFeature::Luminance, FeatureReading::new(0, 60, 100));
            state
                .high_level
                .insert(VcpFeature::Contrast, FeatureReading::new(0, 70, 100));
        }
        mock
    }

    /// Monitor that only speaks raw VCP and reports the given capability string
    pub fn low_level(caps: &str) -> Self {
        let mock = Self::default();
        {
            let mut state = mock.state();
            state.caps = Some(caps.to_string());
            state.vcp.insert(0x10, FeatureReading::new(0, 30, 100));
            state.vcp.insert(0x12, FeatureReading::new(0, 45, 100));
        }
        mock
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.inner.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    fn record(&self, call: Call) -> std::sync::MutexGuard<'_, MockState> {
        let mut state = self.state();
        state.calls.push(call);
        state
    }
}

impl PhysicalMonitor for MockMonitor {
    fn name(&self) -> String {
        "Mock Display".to_string()
    }

    fn capability_flags(&mut self) -> Result<CapabilityFlags> {
        let state = self.record(Call::CapabilityFlags);
        state.flags.ok_or_else(|| anyhow!("capability query failed"))
    }

    fn capabilities_string_length(&mut self) -> Result<usize> {
        let state = self.record(Call::CapabilitiesStringLength);
        if state.fail_caps_length {
            return Err(anyhow!("capability string length unavailable"));
        }
        Ok(state.caps.as_ref().map(|caps| caps.len()).unwrap_or(0))
    }

    fn capabilities_string(&mut self, length: usize) -> Result<String> {
        let state = self.record(Call::CapabilitiesString(length));
        state
            .caps
            .clone()
            .ok_or_else(|| anyhow!("capability request failed"))
    }

    fn get_high_level(&mut self, feature: VcpFeature) -> Result<FeatureReading> {
        let state = self.record(Call::GetHighLevel(feature));
        state
            .high_level
            .get(&feature)
            .copied()
            .ok_or_else(|| anyhow!("high-level read failed"))
    }

    fn set_high_level(&mut self, feature: VcpFeature, value: u32) -> Result<()> {
        let state = self.record(Call::SetHighLevel(feature, value));
        if state.fail_writes {
            return Err(anyhow!("high-level write failed"));
        }
        Ok(())
    }

    fn get_vcp_feature(&mut self, code: u8) -> Result<FeatureReading> {
        let state = self.record(Call::GetVcp(code));
        state
            .vcp
            .get(&code)
            .copied()
            .ok_or_else(|| anyhow!("vcp read failed"))
    }

    fn set_vcp_feature(&mut self, code: u8, value: u32) -> Result<()> {
        let state = self.record(Call::SetVcp(code, value));
        if state.fail_writes {
            return Err(anyhow!("vcp write failed"));
        }
        Ok(())
    }

    fn release(&mut self) {
        drop(self.record(Call::Release));
    }
}

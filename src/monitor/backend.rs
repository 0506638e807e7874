// SPDX-License-Identifier: GPL-3.0-only
//! Access strategy dispatch
//!
//! Each operation has exactly one dispatch point that picks the dedicated
//! primitive or the generic VCP primitive.

use anyhow::Result;

use crate::protocols::PhysicalMonitor;
use crate::vcp::{FeatureReading, VcpFeature};

/// How feature values reach the monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessStrategy {
    /// Dedicated brightness/contrast primitives
    HighLevel,
    /// Generic feature get/set by raw VCP code
    LowLevel,
}

impl AccessStrategy {
    /// Read a feature through this strategy
    pub fn read<H: PhysicalMonitor + ?Sized>(
        self,
        handle: &mut H,
        feature: VcpFeature,
    ) -> Result<FeatureReading> {
        match self {
            AccessStrategy::HighLevel => handle.get_high_level(feature),
            AccessStrategy::LowLevel => handle.get_vcp_feature(feature.code()),
        }
    }

    /// Write an already clamped value through this strategy
    pub fn write<H: PhysicalMonitor + ?Sized>(
        self,
        handle: &mut H,
        feature: VcpFeature,
        value: u32,
    ) -> Result<()> {
        match self {
            AccessStrategy::HighLevel => handle.set_high_level(feature, value),
            AccessStrategy::LowLevel => handle.set_vcp_feature(feature.code(), value),
        }
    }
}

impl std::fmt::Display for AccessStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessStrategy::HighLevel => write!(f, "high-level"),
            AccessStrategy::LowLevel => write!(f, "low-level"),
        }
    }
}

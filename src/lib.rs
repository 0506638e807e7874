// SPDX-License-Identifier: GPL-3.0-only
//! DDC/CI monitor control
//!
//! Capability negotiation and VCP feature access for external monitors.
//! A [`DdcCiMonitor`] takes ownership of a host-provided
//! [`PhysicalMonitor`] handle, probes once which access path works, and then
//! reads and writes brightness/contrast on a 0-100 scale through that path.

#[macro_use]
extern crate tracing;

pub mod brightness;
pub mod capabilities;
pub mod config;
pub mod error;
pub mod monitor;
pub mod protocols;
pub mod vcp;

pub use capabilities::{CapabilityFlags, FeatureSupport, parse_vcp_codes};
pub use error::{Error, Result};
pub use monitor::{AccessStrategy, DdcCiMonitor, ProbeResult};
pub use protocols::{MonitorControl, PhysicalMonitor};
pub use vcp::{FeatureReading, VcpFeature};

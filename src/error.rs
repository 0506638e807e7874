// SPDX-License-Identifier: GPL-3.0-only
//! Error types for monitor control
//!
//! Only failures a caller can act on are surfaced here. Write failures and
//! low-level read failures are swallowed by the accessor and logged instead.

use thiserror::Error;

use crate::vcp::VcpFeature;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// Capability discovery failed, the monitor cannot be driven at all
    #[error("Monitor {name} is not usable through DDC/CI")]
    Unusable { name: String },

    /// The dedicated brightness/contrast primitive rejected the physical handle
    #[error("High-level physical monitor handle for {name} is invalid")]
    HighLevelHandleInvalid {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// The monitor did not advertise the feature during probing
    #[error("Monitor {name} does not support {feature}")]
    FeatureUnsupported { name: String, feature: VcpFeature },

    /// Generic VCP read failed
    ///
    /// Only surfaces from the strict read, the getters report `0` instead.
    #[error("Failed to read {feature} from monitor {name}: {source}")]
    FeatureRead {
        name: String,
        feature: VcpFeature,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Error
pub type Result<T> = std::result::Result<T, Error>;

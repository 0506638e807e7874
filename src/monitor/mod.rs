mod backend;
mod ddc_ci;
#[cfg(feature = "ddc-hi-host")]
mod enumeration;
mod probe;

pub use backend::AccessStrategy;
pub use ddc_ci::DdcCiMonitor;
#[cfg(feature = "ddc-hi-host")]
pub use enumeration::{HostMonitor, enumerate_monitors};
pub use probe::{ProbeResult, probe};

// SPDX-License-Identifier: GPL-3.0-only
//! Monitor enumeration for the `ddc-hi` host
//!
//! Probing blocks for as long as the display takes to answer, so every
//! display is probed on the blocking pool and the whole batch is bounded by
//! the configured deadline. A probe that misses the deadline is abandoned;
//! its worker thread finishes (and releases the handle) in the background.

use std::time::Duration;

use tokio::time::{Instant, timeout_at};

use crate::config::Config;
use crate::protocols::PhysicalMonitor;
use crate::protocols::ddc_ci::DdcHiDisplay;

use super::ddc_ci::DdcCiMonitor;

/// Monitors that passed probing
pub type HostMonitor = DdcCiMonitor<DdcHiDisplay>;

/// Enumerate and probe all DDC/CI displays
///
/// Returns the usable monitors and whether any probe failed or timed out.
pub async fn enumerate_monitors(config: &Config) -> (Vec<HostMonitor>, bool) {
    info!("=== START ENUMERATE ===");

    let displays = tokio::task::spawn_blocking(DdcHiDisplay::enumerate)
        .await
        .unwrap_or_else(|e| {
            error!("DDC/CI enumeration task failed: {e}");
            Vec::new()
        });
    info!("Found {} DDC/CI display(s) total", displays.len());

    let mut tasks = Vec::new();
    for ddc_display in displays {
        let name = ddc_display.name();
        if config.is_ignored(&name) {
            info!("Skipping ignored DDC/CI display: {} ({})", name, ddc_display.id());
            continue;
        }

        debug!("Probing DDC/CI display: {} ({})", name, ddc_display.id());
        let task = tokio::task::spawn_blocking(move || DdcCiMonitor::new(ddc_display));
        tasks.push((name, task));
    }

    let deadline = Instant::now() + Duration::from_millis(config.probe_timeout_ms);
    let mut monitors = Vec::new();
    let mut some_failed = false;

    for (name, task) in tasks {
        match timeout_at(deadline, task).await {
            Ok(Ok(monitor)) if monitor.can_use() => {
                info!(
                    display_name = %name,
                    strategy = %monitor.strategy(),
                    "Successfully initialized DDC/CI display"
                );
                monitors.push(monitor);
            }
            Ok(Ok(monitor)) => {
                warn!(
                    display_name = %name,
                    "Monitor does not support DDC/CI brightness control"
                );
                monitor.close();
            }
            Ok(Err(e)) => {
                error!(display_name = %name, "Task join error: {e}");
                some_failed = true;
            }
            Err(_) => {
                warn!(
                    display_name = %name,
                    timeout_ms = config.probe_timeout_ms,
                    "Probing timed out, monitor skipped"
                );
                some_failed = true;
            }
        }
    }

    info!("=== END ENUMERATE: Found {} monitors ===", monitors.len());
    (monitors, some_failed)
}

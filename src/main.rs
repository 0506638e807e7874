// SPDX-License-Identifier: GPL-3.0-only
//! DDC/CI monitor control tool
//!
//! Probes every connected DDC/CI monitor and reads or writes brightness and
//! contrast through whichever access path each monitor supports.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};

use ddc_monitor_control::brightness::BrightnessCalculator;
use ddc_monitor_control::config::Config;
use ddc_monitor_control::monitor::{HostMonitor, enumerate_monitors};
use ddc_monitor_control::{MonitorControl, VcpFeature};

#[macro_use]
extern crate tracing;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum CliFeature {
    Brightness,
    Contrast,
}

impl From<CliFeature> for VcpFeature {
    fn from(feature: CliFeature) -> Self {
        match feature {
            CliFeature::Brightness => VcpFeature::Luminance,
            CliFeature::Contrast => VcpFeature::Contrast,
        }
    }
}

#[derive(Parser)]
#[command(name = "ddc-monitor-control")]
#[command(about = "Control brightness and contrast of DDC/CI monitors")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file (default: $XDG_CONFIG_HOME/ddc-monitor-control/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List usable monitors with their access path and current values
    List,
    /// Print the current value of a feature
    Get {
        #[arg(value_enum)]
        feature: CliFeature,

        /// Only this monitor (case-insensitive substring of its name)
        #[arg(short, long)]
        monitor: Option<String>,
    },
    /// Set a feature to an absolute value (clamped to 0-100)
    Set {
        #[arg(value_enum)]
        feature: CliFeature,

        #[arg(allow_negative_numbers = true)]
        value: i32,

        /// Only this monitor (case-insensitive substring of its name)
        #[arg(short, long)]
        monitor: Option<String>,
    },
    /// Change a feature relative to its current value
    Adjust {
        #[arg(value_enum)]
        feature: CliFeature,

        #[arg(allow_negative_numbers = true)]
        delta: i32,

        /// Only this monitor (case-insensitive substring of its name)
        #[arg(short, long)]
        monitor: Option<String>,
    },
    /// Raise a feature by the configured step
    Up {
        #[arg(value_enum)]
        feature: CliFeature,

        #[arg(short, long)]
        monitor: Option<String>,
    },
    /// Lower a feature by the configured step
    Down {
        #[arg(value_enum)]
        feature: CliFeature,

        #[arg(short, long)]
        monitor: Option<String>,
    },
}

fn setup_logs(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let level = if verbose { "debug" } else { "warn" };
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new(format!(
        "warn,{}={}",
        env!("CARGO_CRATE_NAME"),
        level
    )));

    if let Ok(journal_layer) = tracing_journald::layer() {
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .with(journal_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logs(cli.verbose);

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    let (monitors, some_failed) = enumerate_monitors(&config).await;
    if some_failed {
        warn!("some monitors could not be probed");
    }

    // Every DDC/CI transaction blocks, keep them off the async workers
    tokio::task::spawn_blocking(move || run(cli.command, monitors, &config))
        .await
        .context("command task failed")?
}

fn run(command: Commands, mut monitors: Vec<HostMonitor>, config: &Config) -> Result<()> {
    let calculator = BrightnessCalculator::new(config);

    match command {
        Commands::List => {
            if monitors.is_empty() {
                println!("No usable DDC/CI monitors found");
            }
            for monitor in monitors.iter_mut() {
                list(monitor);
            }
            Ok(())
        }
        Commands::Get { feature, monitor } => {
            let feature: VcpFeature = feature.into();
            let mut failed = false;
            for monitor in select(&mut monitors, monitor.as_deref())? {
                match get(monitor, feature) {
                    Ok(value) => println!("{}: {}", monitor.name(), value),
                    Err(e) => {
                        error!("{e}");
                        failed = true;
                    }
                }
            }
            if failed {
                bail!("failed to read {feature} from at least one monitor");
            }
            Ok(())
        }
        Commands::Set {
            feature,
            value,
            monitor,
        } => {
            let feature: VcpFeature = feature.into();
            for monitor in select(&mut monitors, monitor.as_deref())? {
                let name = monitor.name();
                set(monitor, feature, calculator.target(feature, value, &name));
            }
            Ok(())
        }
        Commands::Adjust {
            feature,
            delta,
            monitor,
        } => adjust(&mut monitors, &calculator, feature.into(), delta, monitor),
        Commands::Up { feature, monitor } => adjust(
            &mut monitors,
            &calculator,
            feature.into(),
            calculator.step(),
            monitor,
        ),
        Commands::Down { feature, monitor } => adjust(
            &mut monitors,
            &calculator,
            feature.into(),
            -calculator.step(),
            monitor,
        ),
    }
}

fn list(monitor: &mut HostMonitor) {
    let support = monitor.support();
    println!("{}", monitor.name());
    println!("  access:     {}", monitor.strategy());

    for feature in [VcpFeature::Luminance, VcpFeature::Contrast] {
        if !support.supports(feature) {
            println!("  {:<11} unsupported", format!("{feature}:"));
            continue;
        }
        match monitor.read_feature(feature) {
            Ok(reading) => println!(
                "  {:<11} {} (max {}, {}%)",
                format!("{feature}:"),
                reading.current,
                reading.maximum,
                reading.percentage()
            ),
            Err(e) => println!("  {:<11} unavailable ({e})", format!("{feature}:")),
        }
    }
}

fn adjust(
    monitors: &mut [HostMonitor],
    calculator: &BrightnessCalculator<'_>,
    feature: VcpFeature,
    delta: i32,
    name: Option<String>,
) -> Result<()> {
    for monitor in select(monitors, name.as_deref())? {
        let name = monitor.name();
        let current = get(monitor, feature).with_context(|| format!("failed to adjust {name}"))?;
        let target = calculator.adjusted(feature, current, delta, &name);
        set(monitor, feature, target);
        info!(display_name = %name, %feature, current, target, "adjusted");
    }
    Ok(())
}

fn get(monitor: &mut HostMonitor, feature: VcpFeature) -> ddc_monitor_control::Result<u32> {
    match feature {
        VcpFeature::Luminance => monitor.get_brightness(),
        VcpFeature::Contrast => monitor.get_contrast(),
    }
}

fn set(monitor: &mut HostMonitor, feature: VcpFeature, value: i32) {
    match feature {
        VcpFeature::Luminance => monitor.set_brightness(value),
        VcpFeature::Contrast => monitor.set_contrast(value),
    }
}

/// Monitors addressed by a command, all of them when no name is given
fn select<'a>(
    monitors: &'a mut [HostMonitor],
    name: Option<&str>,
) -> Result<Vec<&'a mut HostMonitor>> {
    if monitors.is_empty() {
        return Err(anyhow!("no usable DDC/CI monitors found"));
    }

    let Some(name) = name else {
        return Ok(monitors.iter_mut().collect());
    };

    let needle = name.to_lowercase();
    let selected: Vec<_> = monitors
        .iter_mut()
        .filter(|m| m.name().to_lowercase().contains(&needle))
        .collect();
    if selected.is_empty() {
        bail!("no usable monitor matching '{name}'");
    }
    Ok(selected)
}

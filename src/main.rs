//! ldevctl - Declarative LDEV Block Provisioning
//!
//! Loads the declared block configuration, converges the array toward it
//! (create phase, then share phase, per block), and reports the merged
//! outcome.

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ldevctl::{OperatorConfig, Provisioner, Raidcom, RaidcomRunner};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Declarative LDEV block provisioning via raidcom
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the declared block configuration
    #[arg(long, env = "LDEVCTL_CONFIG", default_value = "/etc/ldevctl/blocks.yaml")]
    config: PathBuf,

    /// Probe and report without mutating the array
    #[arg(long, env = "LDEVCTL_CHECK")]
    check: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    summary_json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

// =============================================================================
// Run Summary
// =============================================================================

#[derive(Debug, Serialize)]
struct BlockSummary {
    name: String,
    changed: bool,
    events: Vec<String>,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    changed: bool,
    check_mode: bool,
    blocks: Vec<BlockSummary>,
}

// =============================================================================
// Main
// =============================================================================

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args);

    info!("Starting {} {}", ldevctl::NAME, ldevctl::VERSION);
    info!("  Config: {}", args.config.display());
    info!("  Check mode: {}", args.check);

    let config = OperatorConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let blocks = config.to_blocks()?;

    let raidcom = Raidcom::new(config.instance);
    let runner = match &config.raidcom_path {
        Some(path) => RaidcomRunner::new(path),
        None => RaidcomRunner::default(),
    };
    let provisioner = Provisioner::new(raidcom, runner, config.tiered_pools.clone(), args.check);

    let mut summary = RunSummary {
        changed: false,
        check_mode: args.check,
        blocks: Vec::new(),
    };

    for block in &blocks {
        let outcome = provisioner
            .provision_block(block)
            .with_context(|| format!("provisioning block {}", block.name()))?;
        for event in &outcome.events {
            info!("{}", event);
        }
        summary.changed |= outcome.changed;
        summary.blocks.push(BlockSummary {
            name: block.name().to_string(),
            changed: outcome.changed,
            events: outcome.events.iter().map(ToString::to_string).collect(),
        });
    }

    info!("Run complete, changed={}", summary.changed);
    if args.summary_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}

//! rfp entry point.
//!
//! This file is intentionally thin: it parses arguments, sets up tracing,
//! loads configuration, and dispatches. All command logic lives under
//! `commands/`.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rfp_config::ClientConfig;

mod commands;

#[derive(Parser)]
#[command(name = "rfp")]
#[command(about = "RFID production portal client", long_about = None)]
struct Cli {
    /// Path to a JSON config file (defaults apply when absent)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Follow the portal live: periodic dashboard refresh, liveness probe,
    /// rejection alerts
    Watch {
        /// Initial view (dashboard | audit)
        #[arg(long, default_value = "dashboard")]
        view: String,
    },

    /// One-shot filtered session query with summary aggregates
    Audit {
        /// Start date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date, inclusive of the whole day (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Case-insensitive tag substring
        #[arg(long)]
        tag: Option<String>,

        /// Session status (em_producao | finalizado)
        #[arg(long)]
        status: Option<String>,

        /// Restrict both dates to today (UTC) when no range is given
        #[arg(long, default_value_t = false)]
        today: bool,
    },

    /// Export the filtered session list as CSV
    Export {
        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,

        #[arg(long)]
        tag: Option<String>,

        #[arg(long)]
        status: Option<String>,

        #[arg(long, default_value_t = false)]
        today: bool,

        /// Output path; defaults to rfid-audit-<date>.csv
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Antenna/device configuration passthrough
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },

    /// Device status passthrough
    Device {
        #[command(subcommand)]
        cmd: DeviceCmd,
    },
}

#[derive(Subcommand)]
enum ConfigCmd {
    /// Print the backend's device configuration
    Get,

    /// Update device configuration keys (key=value pairs; values are
    /// parsed as JSON scalars, falling back to strings)
    Set {
        #[arg(required = true)]
        entries: Vec<String>,
    },
}

#[derive(Subcommand)]
enum DeviceCmd {
    Info,
    Refresh,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Silent if the file does not exist; production injects env vars directly.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();
    let cfg = ClientConfig::load(cli.config.as_deref())?;

    match cli.cmd {
        Commands::Watch { view } => commands::watch::run_watch(cfg, &view).await,
        Commands::Audit {
            from,
            to,
            tag,
            status,
            today,
        } => {
            let filter = commands::build_filter(from, to, tag, status, today)?;
            commands::audit::run_audit(cfg, filter).await
        }
        Commands::Export {
            from,
            to,
            tag,
            status,
            today,
            out,
        } => {
            let filter = commands::build_filter(from, to, tag, status, today)?;
            commands::export::run_export(cfg, filter, out).await
        }
        Commands::Config { cmd } => match cmd {
            ConfigCmd::Get => commands::device::run_config_get(cfg).await,
            ConfigCmd::Set { entries } => commands::device::run_config_set(cfg, entries).await,
        },
        Commands::Device { cmd } => match cmd {
            DeviceCmd::Info => commands::device::run_device_info(cfg).await,
            DeviceCmd::Refresh => commands::device::run_device_refresh(cfg).await,
        },
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RFP_LOG")
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}

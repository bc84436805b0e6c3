//! CLI for devtop, a live terminal view of your accelerators.

mod commands;
mod tui;

use clap::Parser;

use devtop_core::dashboard::{DEFAULT_DISPLAY_INTERVAL, DEFAULT_SAMPLE_INTERVAL};
use devtop_core::query::NVIDIA_SMI;

#[derive(Parser)]
#[command(name = "devtop")]
#[command(about = "devtop: live utilization, memory and temperature of your GPUs")]
#[command(version = devtop_core::VERSION)]
struct Cli {
    /// Seconds between device polls. Invalid or non-positive values fall back to 0.1
    #[arg(long, value_name = "SECONDS", allow_hyphen_values = true)]
    sample_interval: Option<String>,

    /// Seconds between redraws; polls in between are averaged. Invalid or
    /// non-positive values fall back to 3
    #[arg(long, value_name = "SECONDS", allow_hyphen_values = true)]
    display_interval: Option<String>,

    /// Query program to run instead of nvidia-smi from PATH
    #[arg(long, default_value = NVIDIA_SMI)]
    smi: String,

    /// Poll once, print the device list as JSON and exit
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.json {
        commands::snapshot::run(&cli.smi);
        return;
    }

    let config = devtop_core::DashboardConfig {
        sample_interval: commands::parse_interval(
            cli.sample_interval.as_deref(),
            DEFAULT_SAMPLE_INTERVAL,
        ),
        display_interval: commands::parse_interval(
            cli.display_interval.as_deref(),
            DEFAULT_DISPLAY_INTERVAL,
        ),
    };
    commands::monitor::run(config, &cli.smi);
}

//! graphldi CLI entry point

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "graphldi")]
#[command(about = "Export a dependency graph view as an LDI document", long_about = None)]
struct Cli {
    #[command(flatten)]
    export: commands::ExportArgs,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "graphldi={0},graphldi_core={0},graphldi_export={0}",
            log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("graphldi v{}", env!("CARGO_PKG_VERSION"));

    commands::export(&cli.export)
}

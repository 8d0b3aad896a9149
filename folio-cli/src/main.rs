//! folio: assemble a portfolio page from content blocks.
//!
//! Usage:
//!   folio add project-card --field title=Folio
//!   folio move component-1760000000000-abc123xyz up
//!   folio site --out public/

use anyhow::Result;
use clap::Parser;
use folio_cli::{Cli, run};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    for line in run(&cli).await? {
        println!("{line}");
    }
    Ok(())
}

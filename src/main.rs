use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use skimmer::app::AppContext;
use skimmer::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries JSON replies, so logs go to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let ctx = AppContext::new(cli.config)?;

    match cli.command {
        Commands::Extract { url, pretty } => {
            commands::extract_url(&ctx, &url, pretty).await?;
        }
        Commands::Bridge => {
            commands::run_bridge(&ctx).await?;
        }
        Commands::Parse { path, url, pretty } => {
            commands::print_parse(&ctx, &path, &url, pretty)?;
        }
    }

    Ok(())
}

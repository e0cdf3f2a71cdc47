use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tributary::app::AppContext;
use tributary::cli::commands::{self, ShowOptions};
use tributary::cli::{Cli, Commands};
use tributary::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout belongs to the presenter
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(config, cli.db)?;

    match cli.command {
        Commands::Show {
            url,
            page,
            search,
            favorites,
            json,
        } => {
            let options = ShowOptions {
                page,
                search,
                favorites,
                json,
            };
            commands::show_feed(&ctx, &url, &options).await?;
        }
        Commands::Browse { url } => {
            commands::browse_feed(&ctx, &url).await?;
        }
        Commands::Favorites => {
            commands::list_favorites(&ctx)?;
        }
        Commands::Toggle { link } => {
            commands::toggle_favorite(&ctx, &link)?;
        }
    }

    Ok(())
}

mod interactive;
mod render;

use std::num::NonZeroUsize;

use clap::{Parser, Subcommand};
use stintel_dashboard::{Dashboard, SearchPhase, TableId};
use tracing_subscriber::EnvFilter;

use crate::render::DashboardView;

#[derive(Debug, Parser)]
#[command(name = "stintel")]
#[command(about = "Startup intelligence dashboard")]
struct Cli {
    /// Backend base URL; overrides `STINTEL_BACKEND_URL`.
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Rows per table page; overrides `STINTEL_PAGE_SIZE`.
    #[arg(long, global = true)]
    page_size: Option<NonZeroUsize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up one company and print its dashboard.
    Search {
        company: String,

        /// 1-based page of the funding rounds table to show.
        #[arg(long, default_value_t = NonZeroUsize::MIN)]
        funding_page: NonZeroUsize,

        /// 1-based page of the competitors table to show.
        #[arg(long, default_value_t = NonZeroUsize::MIN)]
        competitor_page: NonZeroUsize,

        /// Skip the news and consumer sentiment lookups.
        #[arg(long)]
        skip_enrichment: bool,
    },
    /// Read searches and table navigation from stdin.
    Interactive,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = stintel_core::load_app_config()?;

    // stdout carries only the rendered dashboard.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.log_level))?,
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Some(url) = cli.backend_url {
        config.backend_url = url;
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }

    tracing::info!(
        env = %config.env,
        backend_url = %config.backend_url,
        page_size = config.page_size.get(),
        "stintel starting"
    );
    let dashboard = Dashboard::from_config(&config)?;

    match cli.command {
        Commands::Search {
            company,
            funding_page,
            competitor_page,
            skip_enrichment,
        } => {
            run_search(
                dashboard.with_enrichment(!skip_enrichment),
                &company,
                funding_page,
                competitor_page,
            )
            .await
        }
        Commands::Interactive => interactive::run_interactive(dashboard).await,
    }
}

async fn run_search(
    mut dashboard: Dashboard,
    company: &str,
    funding_page: NonZeroUsize,
    competitor_page: NonZeroUsize,
) -> anyhow::Result<()> {
    dashboard.submit_search(company)?;
    let events = dashboard.settle().await;
    tracing::debug!(events = events.len(), "dashboard settled");

    for _ in 1..funding_page.get() {
        if !dashboard.next_page(TableId::Funding) {
            break;
        }
    }
    for _ in 1..competitor_page.get() {
        if !dashboard.next_page(TableId::Competitors) {
            break;
        }
    }

    let snapshot = dashboard.snapshot();
    print!("{}", DashboardView(&snapshot));

    if snapshot.phase == SearchPhase::Failed {
        anyhow::bail!("search for '{company}' failed");
    }
    Ok(())
}

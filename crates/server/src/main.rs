//! Catalog Server
//!
//! Axum server hosting one catalog session and serving its rendered page,
//! plus a `list` mode that runs the same load-and-filter flow on the terminal.

mod api;

use catalog_core::{CatalogConfig, CatalogSession};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Application state
pub struct AppState {
    pub session: CatalogSession,
}

pub type SharedState = Arc<AppState>;

#[derive(Parser, Clone)]
#[command(author, version, about = "Catalog - browse a remote catalog API")]
struct Args {
    #[command(subcommand)]
    command: Option<CliCommand>,

    #[command(flatten)]
    source: SourceArgs,
}

/// Overrides for where the catalog is fetched from
#[derive(ClapArgs, Clone, Default)]
struct SourceArgs {
    /// List endpoint of the catalog API
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Number of entries to fetch
    #[arg(long, global = true)]
    limit: Option<u32>,
    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
}

impl SourceArgs {
    fn apply(&self, config: &mut CatalogConfig) {
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(limit) = self.limit {
            config.page_limit = limit;
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout_secs = secs;
        }
    }
}

#[derive(Subcommand, Clone)]
enum CliCommand {
    /// Start the catalog server (default)
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
    /// Load the catalog and print the names matching a query (no server)
    List {
        /// Search query; empty lists everything
        #[arg(short, long, default_value = "")]
        query: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,catalog_core=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run_list(config: CatalogConfig, query: &str) -> anyhow::Result<()> {
    let session = CatalogSession::with_http(config)?;
    session.start().await;

    if session.store().is_empty() {
        anyhow::bail!("no entities loaded, see the log for the failure");
    }

    let visible = session.search(query);
    for view in session.entity_views().into_iter().filter(|v| v.visible) {
        println!("{}", view.name);
    }
    println!("\n{} of {} shown", visible, session.store().len());
    Ok(())
}

pub async fn run_server(config: CatalogConfig, port: u16) -> anyhow::Result<()> {
    tracing::info!(api_url = %config.api_url, limit = config.page_limit, "Starting catalog session");
    let session = CatalogSession::with_http(config)?;
    let state: SharedState = Arc::new(AppState { session });

    // The page is served while the list loads; the indicator shows meanwhile
    let loading = state.clone();
    tokio::spawn(async move {
        loading.session.start().await;
    });

    let app = api::router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("🚀 Catalog Server running at http://{}", addr);
    println!("   Page:   /  (?q= to search), POST /activate, POST /overlay/close");
    println!("   API v1: /api/v1/entities, /api/v1/status");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();
    init_tracing();

    let args = Args::parse();
    let mut config = CatalogConfig::from_env();
    args.source.apply(&mut config);

    match args.command {
        Some(CliCommand::List { query }) => run_list(config, &query).await,
        Some(CliCommand::Serve { port }) => run_server(config, port).await,
        None => run_server(config, 8080).await,
    }
}

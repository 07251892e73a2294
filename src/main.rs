//! scm-pager - a hypermedia (HAL) API over a git repository
//!
//! Serves branches and changesets of one repository as paged collections
//! with navigation links.
//!
//! # Usage
//! ```bash
//! scm-pager /path/to/repository                  # Start server on 127.0.0.1:3001
//! scm-pager /path/to/repository --page-size 25   # Change the default page size
//! scm-pager /path/to/repository --read-only      # Disallow branch creation
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scm_pager::git::GitRepository;
use scm_pager::routes::{self, ApiSettings, AppState, ResourceLinks};

/// Serve a git repository's branches and history as paged HAL collections
#[derive(Parser)]
#[command(name = "scm-pager")]
#[command(about = "A paged hypermedia API for a git repository", long_about = None)]
struct Cli {
    /// Path to the git repository to serve
    #[arg(value_name = "REPO_PATH")]
    repo_path: String,

    /// Address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to run the server on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Page size used when a request does not ask for one
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..))]
    page_size: u32,

    /// Reject branch creation and omit `create` links
    #[arg(long)]
    read_only: bool,

    /// Prefix for generated links, e.g. https://scm.example.com
    #[arg(long, default_value = "")]
    base_url: String,
}

impl Cli {
    fn settings(&self) -> ApiSettings {
        ApiSettings {
            default_page_size: self.page_size as usize,
            read_only: self.read_only,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides the default level
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // A path inside a work tree is accepted as well
    let repo = match GitRepository::open(&cli.repo_path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("✗ Failed to open repository: {}", e);
            eprintln!("  Path: {}", cli.repo_path);
            std::process::exit(1);
        }
    };

    let canonical_path = std::fs::canonicalize(&cli.repo_path)
        .unwrap_or_else(|_| PathBuf::from(&cli.repo_path))
        .to_string_lossy()
        .to_string();

    let state = AppState {
        repo: Arc::new(repo),
        links: ResourceLinks::new(&cli.base_url),
        settings: cli.settings(),
    };
    tracing::info!(
        repository = %canonical_path,
        page_size = state.settings.default_page_size,
        read_only = state.settings.read_only,
        "Starting scm-pager"
    );

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_router(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Bind
    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to {}: {}", addr, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    println!();
    println!("  Repository: {}", canonical_path);
    println!("  API:        http://{}/api/v2/repository", addr);
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        }
        println!("\n  Shutting down...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

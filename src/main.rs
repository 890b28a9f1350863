//! hashbang-router CLI
//!
//! Loads a route table from a TOML file and resolves hashbang URLs against
//! it, printing one JSON line per URL.
//!
//! ```text
//! hashbang-router --routes routes.toml 'https://app.test/#/sections/5'
//! tail -f navigations.log | hashbang-router --routes routes.toml
//! ```
//!
//! With URLs on the command line each is resolved directly. Without, every
//! stdin line is treated as a navigation: it is emitted as a hash-change
//! event (unless the URL is unchanged) and dispatched before the next line
//! is read.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use hashbang_router::config::loader::load_config;
use hashbang_router::config::RouterConfig;
use hashbang_router::events;
use hashbang_router::observability::logging;
use hashbang_router::routing::{Params, ResolveError, Router};

#[derive(Parser)]
#[command(name = "hashbang-router")]
#[command(about = "Resolve hashbang URLs against a route table", long_about = None)]
struct Cli {
    /// Route table file (TOML).
    #[arg(short, long)]
    routes: PathBuf,

    /// Log JSON lines to stderr.
    #[arg(long)]
    json_logs: bool,

    /// URLs to resolve. Reads navigations from stdin when none are given.
    urls: Vec<String>,
}

/// What every route handler returns: the route and its parameters.
#[derive(Debug, Clone, Serialize)]
struct Matched {
    route: String,
    pattern: String,
    params: Params,
}

#[derive(Serialize)]
struct Resolution<'a> {
    url: &'a str,
    matched: bool,
    #[serde(flatten)]
    route: Option<Matched>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.routes)?;
    if cli.json_logs {
        config.logging.json = true;
    }
    logging::init(&config.logging);

    tracing::info!(
        routes_file = %cli.routes.display(),
        "hashbang-router v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let router = build_router(&config)?;

    if !cli.urls.is_empty() {
        for url in &cli.urls {
            print_resolution(url, router.resolve(url))?;
        }
        return Ok(());
    }

    let (mut navigator, source) = events::channel();
    let mut dispatcher = router.init(source);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let url = line.trim();
        if url.is_empty() || !navigator.navigate(url)? {
            continue;
        }
        if let Some(dispatch) = dispatcher.dispatch_next().await {
            print_resolution(&dispatch.event.new_url, dispatch.outcome)?;
        }
    }

    tracing::info!("Input closed, shutting down");
    Ok(())
}

/// Bind every configured route to a handler reporting the match.
fn build_router(config: &RouterConfig) -> Result<Router<Matched>, Box<dyn std::error::Error>> {
    let mut builder = Router::builder();

    for route in &config.routes {
        let name = route.name.clone();
        let pattern = route.pattern.clone();
        builder = builder.route_params(route.pattern.clone(), move |params: &Params| Matched {
            route: name.clone(),
            pattern: pattern.clone(),
            params: params.clone(),
        });
    }

    Ok(builder.build()?)
}

fn print_resolution(
    url: &str,
    outcome: Result<Matched, ResolveError>,
) -> Result<(), serde_json::Error> {
    let resolution = match outcome {
        Ok(matched) => Resolution {
            url,
            matched: true,
            route: Some(matched),
            error: None,
        },
        Err(e) => Resolution {
            url,
            matched: false,
            route: None,
            error: Some(e.to_string()),
        },
    };

    println!("{}", serde_json::to_string(&resolution)?);
    Ok(())
}

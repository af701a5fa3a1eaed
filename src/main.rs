//! Route Navigator command-line driver.
//!
//! Loads a route configuration, navigates to the default route, then replays
//! a navigation script and prints each resulting route as JSON.
//!
//! ```text
//! route-navigator --config routes.toml go user id=5 go home back
//! ```
//!
//! With `--watch`, keeps running and merges route definitions from the config
//! file whenever it changes, until Ctrl-C.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use serde_json::{json, Value};
use tokio::sync::broadcast::error::RecvError;

use route_navigator::config::{load_config, NavigatorConfig};
use route_navigator::config::watcher::ConfigWatcher;
use route_navigator::navigation::{NavigationRequest, Params, Router};
use route_navigator::observability::logging::init_logging;
use route_navigator::state::{ChangeKind, RouteSnapshot};

#[derive(Parser)]
#[command(name = "route-navigator")]
#[command(about = "Replay navigation scripts against a route configuration", long_about = None)]
struct Cli {
    /// Route configuration file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep running and merge routes when the config file changes.
    #[arg(short, long)]
    watch: bool,

    /// Script: `go NAME [key=value ...]` and `back`, in any order.
    script: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum Step {
    Go(NavigationRequest),
    Back,
}

fn parse_script(tokens: &[String]) -> Result<Vec<Step>, String> {
    let mut steps = Vec::new();
    let mut tokens = tokens.iter().peekable();

    while let Some(token) = tokens.next() {
        match token.as_str() {
            "back" => steps.push(Step::Back),
            "go" => {
                let name = tokens
                    .next()
                    .ok_or_else(|| "`go` needs a route name".to_string())?;
                let mut params = Params::new();
                let is_value = |t: &&String| t.as_str() != "go" && t.as_str() != "back";
                while let Some(pair) = tokens.next_if(is_value) {
                    let (key, value) = pair
                        .split_once('=')
                        .ok_or_else(|| format!("expected key=value, got `{}`", pair))?;
                    params.insert(key.to_string(), value.to_string());
                }
                steps.push(Step::Go(NavigationRequest::new(name.clone()).with_params(params)));
            }
            other => return Err(format!("unknown step `{}`", other)),
        }
    }

    Ok(steps)
}

fn describe(snapshot: &RouteSnapshot) -> Value {
    json!({
        "name": snapshot.name(),
        "params": snapshot.params(),
        "meta": snapshot.meta(),
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let steps = parse_script(&cli.script)?;

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => NavigatorConfig::default(),
    };

    init_logging(&config.observability)?;

    tracing::info!(
        routes = config.routes.len(),
        max_redirect_depth = config.navigation.max_redirect_depth,
        "Configuration loaded"
    );

    let router = Arc::new(Router::from_config(&config));

    // Stand-in for a URL binding: report every forward change with its path
    let mut changes = router.subscribe();
    tokio::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(change) if change.kind == ChangeKind::Forward => {
                    let path = change.state.meta().path;
                    tracing::info!(route = ?change.state.name(), path = %path, "Route changed");
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Route change listener lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    if let Err(e) = router.init_from_config(&config).await {
        tracing::error!(kind = %e.kind(), "Default route failed: {}", e);
    }

    for step in steps {
        let outcome = match step {
            Step::Go(request) => router.go_to(request).await.map(|_| ()),
            Step::Back => router.back().await.map(|_| ()),
        };
        match outcome {
            Ok(()) => println!("{}", describe(&router.snapshot())),
            Err(e) => println!("{}", json!({ "error": e.kind(), "message": e.to_string() })),
        }
    }

    if cli.watch {
        let Some(path) = cli.config.as_deref() else {
            return Err("--watch requires --config".into());
        };
        let (watcher, mut updates) = ConfigWatcher::new(path, &config);
        let _watcher = watcher.run()?;

        loop {
            tokio::select! {
                update = updates.recv() => {
                    let Some(update) = update else { break };
                    router.add_routes(update.routes);
                    tracing::info!(
                        added = update.added.len(),
                        overridden = update.overridden.len(),
                        routes = router.routes().len(),
                        "Routes merged from config"
                    );
                }
                _ = tokio::signal::ctrl_c() => break,
            }
        }
    }

    tracing::info!(history_depth = router.history().len(), "Shutdown complete");
    Ok(())
}

//! Config file watcher for live route merges.
//!
//! # Responsibilities
//! - Reload and validate the config file when it changes on disk
//! - Work out which routes are new and which replace a known definition
//! - Hand only those definitions to the router, which merges them
//!
//! # Design Decisions
//! - Routes are never removed; a route dropped from the file stays registered
//! - A reload that changes no route sends nothing
//! - An invalid file is logged and skipped; the live table keeps its routes

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::{NavigatorConfig, RouteConfig};
use crate::routing::table::RouteDefinition;

/// Routes that changed in a reloaded config file.
#[derive(Debug, Clone)]
pub struct RouteUpdate {
    /// Names not seen before.
    pub added: Vec<String>,

    /// Names whose definition differs from the last one seen.
    pub overridden: Vec<String>,

    /// Definitions for every added or overridden route, in file order.
    pub routes: Vec<RouteDefinition>,
}

/// Route configs the watcher has already handed out, by name.
#[derive(Debug, Default)]
pub struct KnownRoutes {
    routes: HashMap<String, RouteConfig>,
}

impl KnownRoutes {
    pub fn new(config: &NavigatorConfig) -> Self {
        Self {
            routes: config
                .routes
                .iter()
                .map(|route| (route.name.clone(), route.clone()))
                .collect(),
        }
    }

    /// Compare `config` with the known routes and remember the result.
    ///
    /// Returns `None` when every route in `config` is already known unchanged.
    pub fn diff(&mut self, config: &NavigatorConfig) -> Option<RouteUpdate> {
        let mut update = RouteUpdate {
            added: Vec::new(),
            overridden: Vec::new(),
            routes: Vec::new(),
        };

        for route in &config.routes {
            match self.routes.get(&route.name) {
                Some(known) if known == route => continue,
                Some(_) => update.overridden.push(route.name.clone()),
                None => update.added.push(route.name.clone()),
            }
            update.routes.push(route.to_definition());
            self.routes.insert(route.name.clone(), route.clone());
        }

        if update.routes.is_empty() {
            None
        } else {
            Some(update)
        }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Watches the config file and sends route updates.
pub struct ConfigWatcher {
    path: PathBuf,
    known: KnownRoutes,
    update_tx: mpsc::UnboundedSender<RouteUpdate>,
}

impl ConfigWatcher {
    /// Create a watcher for `path`. `current` is the config the router was
    /// built from; only routes that differ from it are sent.
    pub fn new(
        path: &Path,
        current: &NavigatorConfig,
    ) -> (Self, mpsc::UnboundedReceiver<RouteUpdate>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                known: KnownRoutes::new(current),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file. The returned watcher must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self {
            path,
            mut known,
            update_tx,
        } = self;
        let reload_path = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    let config = match load_config(&reload_path) {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::error!(
                                error = %e,
                                "Config reload failed, keeping current routes"
                            );
                            return;
                        }
                    };

                    let Some(update) = known.diff(&config) else {
                        tracing::debug!("Config reloaded, no route changes");
                        return;
                    };

                    tracing::info!(
                        added = ?update.added,
                        overridden = ?update.overridden,
                        "Route changes detected in config file"
                    );
                    if update_tx.send(update).is_err() {
                        tracing::debug!("Route update receiver dropped");
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, "Config watcher started");
        Ok(watcher)
    }
}

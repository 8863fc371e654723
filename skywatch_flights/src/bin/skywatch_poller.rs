/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “Skywatch” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

use std::sync::Arc;
use anyhow::Result;
use tracing::{info,warn};
use tracing_subscriber::EnvFilter;
use skywatch_common::define_cli;
use skywatch_flights::{
    load_config, FlightsConfig, FreshnessCache, FlightUpdate, HttpStateFeed, PlaneView, Poller, RouteResolver, SqliteTrailStore
};

define_cli! { ARGS [about="poll live aircraft states, cache the latest state per aircraft and persist position trails"] =
    config: Option<String> [help="pathname of RON config file (uses defaults if not set)", long, short],
    show_updates: bool [help="log every published flight update", long]
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env()) // use RUST_LOG to set max level
        .init();

    let config = match &ARGS.config {
        Some(path) => load_config( path)?,
        None => FlightsConfig::default()
    };
    info!("feed: {}, database: {}", config.feed_url, config.database_url);

    let store = Arc::new( SqliteTrailStore::from_config( &config).await?);
    let resolver = RouteResolver::from_config( &config)?;
    if resolver.is_none() { info!("no route source configured") }

    let cache = Arc::new( FreshnessCache::new( config.cache_ttl));
    if ARGS.show_updates {
        let mut rx = cache.subscribe();
        let store = store.clone();
        tokio::spawn( async move {
            loop {
                match rx.recv().await {
                    Ok(update) => {
                        let state = update.flight();
                        if let Some(resolver) = &resolver {
                            if let Some(resolved) = resolver.resolve_state( state).await {
                                if let Some(view) = PlaneView::new( state, &resolved, resolver.airports()) {
                                    info!("{} {}: {}", view.id, view.route_type, view.route.as_deref().unwrap_or("?"));
                                }
                            }
                        }
                        match store.recent_trail( &state.icao24).await {
                            Ok(trail) => info!("{} ({} trail samples)", state, trail.len()),
                            Err(e) => warn!("trail query for {} failed: {}", state.icao24, e)
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => warn!("missed {} updates", n),
                    Err(_) => break
                }
            }
        });
    }

    let feed = HttpStateFeed::from_config( &config)?;
    let poller = Poller::new( feed, cache, store, config.poll_interval).spawn();

    tokio::signal::ctrl_c().await?;
    info!("terminating poller");
    poller.terminate();

    Ok(())
}

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

///! the ingestion loop: fetch snapshot -> parse -> filter -> cache -> persist -> sleep

use std::{fmt, sync::Arc, time::Duration};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tokio::{task::JoinHandle, time::sleep};
use tracing::{debug,info,warn,error};
use skywatch_common::net::get_json;

use crate::{
    AircraftState, FlightsConfig,
    errors::Result,
    freshness::FreshnessCache,
    parser::parse_states,
    trail_store::TrailStore
};

/// where snapshots come from. This is the injection point for tests and alternative transports
#[async_trait]
pub trait StateFeed: Send + Sync {
    async fn fetch_snapshot (&self)->Result<Value>;
}

/// HTTP GET based feed with a bounded request timeout
pub struct HttpStateFeed {
    url: String,
    client: Client,
}

impl HttpStateFeed {
    pub fn new (url: impl ToString, timeout: Duration)->Result<Self> {
        let client = Client::builder().timeout( timeout).build()?;
        Ok( HttpStateFeed::with_client( url, client) )
    }

    pub fn with_client (url: impl ToString, client: Client)->Self {
        HttpStateFeed { url: url.to_string(), client }
    }

    pub fn from_config (config: &FlightsConfig)->Result<Self> {
        HttpStateFeed::new( &config.feed_url, config.feed_timeout)
    }

    pub fn url (&self)->&str { self.url.as_str() }
}

#[async_trait]
impl StateFeed for HttpStateFeed {
    async fn fetch_snapshot (&self)->Result<Value> {
        Ok( get_json( self.client.get( self.url.as_str())).await? )
    }
}

/// what happened in one poll cycle
#[derive(Debug,Default,Clone,Copy,PartialEq,Eq)]
pub struct CycleStats {
    pub parsed: usize,      // successfully parsed records
    pub malformed: usize,   // tuples the parser skipped
    pub no_position: usize, // records dropped for lack of lat/lon
    pub stored: usize,      // records that were cached and persisted
    pub failed: usize,      // records with persistence errors
}

impl fmt::Display for CycleStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "parsed: {}, malformed: {}, no_position: {}, stored: {}, failed: {}",
                self.parsed, self.malformed, self.no_position, self.stored, self.failed)
    }
}

/// the long running ingestion task. Each cycle starts from scratch, no error is ever fatal for the loop
pub struct Poller<F,T> where F: StateFeed, T: TrailStore {
    feed: F,
    cache: Arc<FreshnessCache>,
    store: Arc<T>,
    interval: Duration,
}

impl<F,T> Poller<F,T> where F: StateFeed + 'static, T: TrailStore + 'static {
    pub fn new (feed: F, cache: Arc<FreshnessCache>, store: Arc<T>, interval: Duration)->Self {
        Poller { feed, cache, store, interval }
    }

    pub fn interval (&self)->Duration { self.interval }

    /// run one fetch/parse/persist cycle. Only feed errors are returned, record level failures are counted
    pub async fn run_cycle (&self)->Result<CycleStats> {
        let snapshot = self.feed.fetch_snapshot().await?;
        let batch = parse_states( &snapshot);

        let mut stats = CycleStats { parsed: batch.len(), malformed: batch.n_skipped(), ..CycleStats::default() };
        for (idx,reason) in &batch.skipped {
            debug!("skipped state tuple {}: {}", idx, reason);
        }

        for state in batch.states {
            if !state.has_position() {
                stats.no_position += 1;
                continue;
            }

            let state = Arc::new(state);
            match self.process_state( &state).await {
                Ok(()) => stats.stored += 1,
                Err(e) => {
                    warn!("failed to store {}: {}", state.icao24, e);
                    stats.failed += 1;
                }
            }
        }

        Ok(stats)
    }

    // a failed identity upsert skips the position sample of this record but not the following records
    async fn process_state (&self, state: &Arc<AircraftState>)->Result<()> {
        self.cache.set( &state.icao24, state.clone());
        self.store.upsert_identity( state).await?;
        self.store.append_position( state).await?;
        Ok(())
    }

    /// loop forever with a fixed sleep interval between cycles (no drift correction)
    pub async fn run (&self) {
        info!("start polling every {:?}", self.interval);
        loop {
            match self.run_cycle().await {
                Ok(stats) => debug!("poll cycle done ({})", stats),
                Err(e) => error!("poll cycle failed: {}", e)
            }
            sleep( self.interval).await;
        }
    }

    pub fn spawn (self)->PollerHandle {
        let task = tokio::spawn( async move { self.run().await });
        PollerHandle { task }
    }
}

/// handle of a spawned poller task. The task ends only if it gets terminated
pub struct PollerHandle {
    task: JoinHandle<()>
}

impl PollerHandle {
    pub fn terminate (&self) {
        self.task.abort();
    }

    pub fn is_finished (&self)->bool { self.task.is_finished() }
}

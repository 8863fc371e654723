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

///! confirmed route lookup from an authoritative (but slow and rate limited) flight history source,
///! memoized per aircraft for a freshness window

use std::{sync::Arc, time::Duration};
use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::{Client, RequestBuilder};
use serde::{Serialize,Deserialize};
use tracing::{debug,warn};
use skywatch_common::{datetime::EpochMillis, net::{get_json,SkywatchNetError}};

use crate::{config::RouteSourceConfig, errors::{Result,SkywatchFlightsError}};

pub const DEFAULT_ROUTE_CACHE_TTL: Duration = Duration::from_secs( 30 * 60);
pub const DEFAULT_LOOKUP_WINDOW: Duration = Duration::from_secs( 6 * 3600);
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs( 6);

/// the part of a flight history record we care about
#[derive(Serialize,Deserialize,Debug,Clone,Default,PartialEq)]
pub struct TripRecord {
    #[serde(rename="estDepartureAirport", default)]
    pub departure: Option<String>,

    #[serde(rename="estArrivalAirport", default)]
    pub arrival: Option<String>,

    #[serde(rename="firstSeen", default)]
    pub first_seen: Option<i64>,

    #[serde(rename="lastSeen", default)]
    pub last_seen: Option<i64>,
}

/// abstraction of the authoritative flight history source, mostly to inject mock sources for testing
#[async_trait]
pub trait RouteSource: Send + Sync {
    /// trips of aircraft `icao24` within [begin,end] (epoch secs), oldest first
    async fn get_trips (&self, icao24: &str, begin: i64, end: i64)->Result<Vec<TripRecord>>;
}

/// OpenSky style `flights/aircraft` endpoint with basic auth
pub struct OpenSkyRouteSource {
    config: Arc<RouteSourceConfig>,
    client: Client,
}

impl OpenSkyRouteSource {
    pub fn new (config: Arc<RouteSourceConfig>)->Result<Self> {
        let client = Client::builder().timeout( config.timeout).build()?;
        Ok( OpenSkyRouteSource::with_client( config, client) )
    }

    pub fn with_client (config: Arc<RouteSourceConfig>, client: Client)->Self {
        OpenSkyRouteSource { config, client }
    }

    /// the server expects lowercase hex addresses
    pub fn trips_request (&self, icao24: &str, begin: i64, end: i64)->RequestBuilder {
        self.client.get( self.config.url.as_str())
            .query( &[("icao24", icao24.to_lowercase()), ("begin", begin.to_string()), ("end", end.to_string())])
            .basic_auth( &self.config.user, Some(&self.config.password))
    }
}

#[async_trait]
impl RouteSource for OpenSkyRouteSource {
    async fn get_trips (&self, icao24: &str, begin: i64, end: i64)->Result<Vec<TripRecord>> {
        match get_json::<Vec<TripRecord>>( self.trips_request( icao24, begin, end)).await {
            Ok(trips) => Ok(trips),
            Err(SkywatchNetError::NotFoundError(_)) => Ok(Vec::new()), // that is how the server reports "no flights"
            Err(e) => Err(e.into())
        }
    }
}

/// memoized lookup result. `(None,None)` entries record failed or empty lookups so that
/// we don't hammer the source within the freshness window
#[derive(Serialize,Debug,Clone,PartialEq)]
pub struct RouteCacheEntry {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub lookup_time: EpochMillis,
}

impl RouteCacheEntry {
    pub fn is_fresh (&self, now: EpochMillis, ttl: Duration)->bool {
        now.duration_since( self.lookup_time) < ttl
    }

    pub fn route (&self)->(Option<String>,Option<String>) {
        (self.origin.clone(), self.destination.clone())
    }
}

/// explicit route cache object that owns its source. Safe to share between concurrent readers - note that
/// concurrent misses for the same aircraft can each hit the source
pub struct RouteLookupCache<S> where S: RouteSource {
    source: S,
    entries: DashMap<String,RouteCacheEntry>,
    ttl: Duration,
    lookup_window: Duration,
    lookup_timeout: Duration,
}

impl<S> RouteLookupCache<S> where S: RouteSource {
    pub fn new (source: S)->Self {
        RouteLookupCache {
            source,
            entries: DashMap::new(),
            ttl: DEFAULT_ROUTE_CACHE_TTL,
            lookup_window: DEFAULT_LOOKUP_WINDOW,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    pub fn from_config (source: S, config: &RouteSourceConfig)->Self {
        RouteLookupCache::new( source)
            .with_ttl( config.cache_ttl)
            .with_lookup_window( config.lookup_window)
            .with_lookup_timeout( config.timeout)
    }

    pub fn with_ttl (mut self, ttl: Duration)->Self { self.ttl = ttl; self }
    pub fn with_lookup_window (mut self, lookup_window: Duration)->Self { self.lookup_window = lookup_window; self }
    pub fn with_lookup_timeout (mut self, lookup_timeout: Duration)->Self { self.lookup_timeout = lookup_timeout; self }

    pub fn ttl (&self)->Duration { self.ttl }
    pub fn len (&self)->usize { self.entries.len() }

    /// the cached entry for `icao24` if it is still fresh at `now`
    pub fn get_cached (&self, icao24: &str, now: EpochMillis)->Option<RouteCacheEntry> {
        self.entries.get( icao24)
            .filter( |e| e.is_fresh( now, self.ttl))
            .map( |e| e.value().clone())
    }

    pub async fn get_or_fetch (&self, icao24: &str)->(Option<String>,Option<String>) {
        self.get_or_fetch_at( icao24, EpochMillis::now()).await
    }

    /// return the cached (origin,destination) if fresh at `now`, otherwise query the source for the
    /// lookup window ending at `now` and cache the result - whatever it is
    pub async fn get_or_fetch_at (&self, icao24: &str, now: EpochMillis)->(Option<String>,Option<String>) {
        if icao24.is_empty() { return (None,None) }

        if let Some(entry) = self.get_cached( icao24, now) {
            return entry.route()
        }

        let (origin,destination) = self.fetch( icao24, now).await;
        let entry = RouteCacheEntry { origin, destination, lookup_time: now };
        let route = entry.route();
        self.entries.insert( icao24.to_string(), entry);

        route
    }

    async fn fetch (&self, icao24: &str, now: EpochMillis)->(Option<String>,Option<String>) {
        let end = now.secs();
        let begin = now.minus( self.lookup_window).secs();

        let result = match tokio::time::timeout( self.lookup_timeout, self.source.get_trips( icao24, begin, end)).await {
            Ok(result) => result,
            Err(_) => Err( SkywatchFlightsError::TimeoutError( self.lookup_timeout))
        };

        match result {
            Ok(trips) => {
                if let Some(trip) = trips.last() { // most recent one
                    debug!("route for {}: {:?} -> {:?}", icao24, trip.departure, trip.arrival);
                    (airport_code( &trip.departure), airport_code( &trip.arrival))
                } else {
                    debug!("no recent trips for {}", icao24);
                    (None,None)
                }
            }
            Err(e) => {
                warn!("route lookup for {} failed: {}", icao24, e);
                (None,None)
            }
        }
    }
}

// blank codes are as good as unknown
fn airport_code (code: &Option<String>)->Option<String> {
    code.as_deref().map( str::trim).filter( |c| !c.is_empty()).map( str::to_string)
}

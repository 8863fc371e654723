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

use std::{sync::Arc, time::Duration};
use dashmap::DashMap;
use serde::{Serialize,Deserialize};
use tokio::sync::broadcast;
use tracing::trace;
use skywatch_common::datetime::EpochMillis;

use crate::{AircraftState, errors::Result};

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);

/// number of updates a lagging subscriber can fall behind before it starts to lose them
pub const DEFAULT_UPDATE_CAPACITY: usize = 1024;

/// storage key for the cached state of an aircraft
pub fn cache_key (icao24: &str)->String {
    format!("flight:{icao24}")
}

/// change notification. Serializes as `{"type":"update","flight":{..}}`
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(tag="type", rename_all="lowercase")]
pub enum FlightUpdate {
    Update { flight: Arc<AircraftState> }
}

impl FlightUpdate {
    pub fn flight (&self)->&AircraftState {
        match self { FlightUpdate::Update{flight} => flight.as_ref() }
    }

    pub fn to_json (&self)->Result<String> {
        Ok( serde_json::to_string(self)? )
    }
}

#[derive(Debug,Clone)]
pub struct CachedFlight {
    pub state: Arc<AircraftState>,
    pub expires: EpochMillis,
}

/// latest known state per aircraft with absolute expiry times, plus best-effort fan out of every update
/// to all currently subscribed receivers. Expired entries are not purged automatically, they just
/// become invisible to `get`
pub struct FreshnessCache {
    entries: DashMap<String,CachedFlight>,
    default_ttl: Duration,
    tx: broadcast::Sender<FlightUpdate>,
}

impl FreshnessCache {
    pub fn new (default_ttl: Duration)->Self {
        FreshnessCache::with_capacity( default_ttl, DEFAULT_UPDATE_CAPACITY)
    }

    pub fn with_capacity (default_ttl: Duration, update_capacity: usize)->Self {
        let (tx,_) = broadcast::channel( update_capacity);
        FreshnessCache { entries: DashMap::new(), default_ttl, tx }
    }

    pub fn default_ttl (&self)->Duration { self.default_ttl }

    /// a new independent receiver that gets all updates from now on (no backlog)
    pub fn subscribe (&self)->broadcast::Receiver<FlightUpdate> {
        self.tx.subscribe()
    }

    pub fn subscriber_count (&self)->usize { self.tx.receiver_count() }

    /// store with default TTL, return number of subscribers the update was sent to
    pub fn set (&self, icao24: &str, state: Arc<AircraftState>)->usize {
        self.set_at( icao24, state, self.default_ttl, EpochMillis::now())
    }

    pub fn set_with_ttl (&self, icao24: &str, state: Arc<AircraftState>, ttl: Duration)->usize {
        self.set_at( icao24, state, ttl, EpochMillis::now())
    }

    pub fn set_at (&self, icao24: &str, state: Arc<AircraftState>, ttl: Duration, now: EpochMillis)->usize {
        let expires = now.plus( ttl);
        self.entries.insert( cache_key( icao24), CachedFlight{ state: state.clone(), expires });

        // send only fails if there are no receivers, which is fine
        match self.tx.send( FlightUpdate::Update{ flight: state }) {
            Ok(n) => n,
            Err(_) => { trace!("no update subscribers for {}", icao24); 0 }
        }
    }

    pub fn get (&self, icao24: &str)->Option<Arc<AircraftState>> {
        self.get_at( icao24, EpochMillis::now())
    }

    pub fn get_at (&self, icao24: &str, now: EpochMillis)->Option<Arc<AircraftState>> {
        self.entries.get( &cache_key( icao24))
            .filter( |e| now < e.expires)
            .map( |e| e.state.clone())
    }

    /// serialized form of a live entry, as handed out to clients
    pub fn get_json (&self, icao24: &str)->Result<Option<String>> {
        match self.get( icao24) {
            Some(state) => Ok( Some( serde_json::to_string( state.as_ref())?)),
            None => Ok(None)
        }
    }

    /// explicit sweep of expired entries, returns number of removed entries
    pub fn remove_expired (&self)->usize {
        self.remove_expired_at( EpochMillis::now())
    }

    pub fn remove_expired_at (&self, now: EpochMillis)->usize {
        let len = self.entries.len();
        self.entries.retain( |_,e| now < e.expires);
        len.saturating_sub( self.entries.len()) // concurrent inserts can grow the map meanwhile
    }

    /// number of stored entries, including expired ones that were not removed yet
    pub fn len (&self)->usize { self.entries.len() }

    pub fn is_empty (&self)->bool { self.entries.is_empty() }
}

impl Default for FreshnessCache {
    fn default()->Self { FreshnessCache::new( DEFAULT_CACHE_TTL) }
}

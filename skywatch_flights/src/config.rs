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

use std::{fmt, fs, path::Path, time::Duration};
use serde::{Serialize,Deserialize};
use skywatch_common::datetime::{deserialize_duration,serialize_duration,secs,minutes,hours};

use crate::{
    airports::{Airport,AirportDirectory},
    errors::{Result,SkywatchFlightsError,op_failed},
    trail_store::DEFAULT_TRAIL_LIMIT
};

/// process configuration of the ingestion pipeline, usually loaded from a RON file such as
/// ```text
/// FlightsConfig(
///     feed_url: "https://opensky-network.org/api/states/all",
///     poll_interval: "5s",
///     database_url: "sqlite://skywatch.db?mode=rwc",
/// )
/// ```
/// all fields other than `feed_url` and `database_url` have defaults
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct FlightsConfig {
    pub feed_url: String,

    #[serde(default="default_poll_interval", deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub poll_interval: Duration,

    #[serde(default="default_feed_timeout", deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub feed_timeout: Duration,

    #[serde(default="default_cache_ttl", deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub cache_ttl: Duration,

    pub database_url: String,

    #[serde(default="default_max_connections")]
    pub max_connections: u32,

    /// default max number of samples returned for a trail
    #[serde(default="default_trail_limit")]
    pub trail_limit: usize,

    #[serde(default)]
    pub route_source: Option<RouteSourceConfig>,

    /// ordered airport directory, the builtin one is used if not set
    #[serde(default)]
    pub airports: Option<Vec<Airport>>,
}

fn default_poll_interval ()->Duration { secs(5) }
fn default_feed_timeout ()->Duration { secs(20) }
fn default_cache_ttl ()->Duration { secs(30) }
fn default_max_connections ()->u32 { 5 }
fn default_trail_limit ()->usize { DEFAULT_TRAIL_LIMIT }

impl Default for FlightsConfig {
    fn default()->Self {
        FlightsConfig {
            feed_url: "https://opensky-network.org/api/states/all".to_string(),
            poll_interval: default_poll_interval(),
            feed_timeout: default_feed_timeout(),
            cache_ttl: default_cache_ttl(),
            database_url: "sqlite://skywatch.db?mode=rwc".to_string(),
            max_connections: default_max_connections(),
            trail_limit: default_trail_limit(),
            route_source: None,
            airports: None,
        }
    }
}

impl FlightsConfig {
    pub fn airport_directory (&self)->AirportDirectory {
        match &self.airports {
            Some(airports) => AirportDirectory::new( airports.clone()),
            None => AirportDirectory::builtin()
        }
    }

    /// reject values that would stall the poller or the store
    pub fn check (&self)->Result<()> {
        if self.poll_interval.is_zero() { return Err( op_failed!("poll_interval must not be zero")) }
        if self.max_connections == 0 { return Err( op_failed!("max_connections must not be zero")) }
        if self.trail_limit == 0 { return Err( op_failed!("trail_limit must not be zero")) }
        if let Some(airports) = &self.airports {
            if airports.is_empty() { return Err( op_failed!("empty airport list")) }
        }
        Ok(())
    }
}

/// where to get confirmed routes from
#[derive(Serialize,Deserialize,Clone,PartialEq)]
pub struct RouteSourceConfig {
    pub url: String,
    pub user: String,
    pub(crate) password: String,

    #[serde(default="default_lookup_timeout", deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub timeout: Duration,

    /// how far back we look for trips of an aircraft
    #[serde(default="default_lookup_window", deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub lookup_window: Duration,

    /// how long lookup results (including failed ones) are kept
    #[serde(default="default_route_cache_ttl", deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub cache_ttl: Duration,
}

fn default_lookup_timeout ()->Duration { secs(6) }
fn default_lookup_window ()->Duration { hours(6) }
fn default_route_cache_ttl ()->Duration { minutes(30) }

impl RouteSourceConfig {
    pub fn new (url: impl ToString, user: impl ToString, password: impl ToString)->Self {
        RouteSourceConfig {
            url: url.to_string(),
            user: user.to_string(),
            password: password.to_string(),
            timeout: default_lookup_timeout(),
            lookup_window: default_lookup_window(),
            cache_ttl: default_route_cache_ttl(),
        }
    }
}

/// make sure we don't log passwords
impl fmt::Debug for RouteSourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteSourceConfig")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &"***")
            .field("timeout", &self.timeout)
            .field("lookup_window", &self.lookup_window)
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

pub fn load_config (path: impl AsRef<Path>)->Result<FlightsConfig> {
    let data = fs::read( path)?;
    let config: FlightsConfig = ron::de::from_bytes( data.as_slice())?;
    config.check()?;
    Ok(config)
}

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

use std::fmt;
use serde::{Serialize,Deserialize};

/// crate to ingest live aircraft states from a polled telemetry feed, keep the latest state per aircraft
/// in a freshness cache, persist position trails and estimate origin/destination airports

pub mod errors;

pub mod config;
pub use config::*;

pub mod parser;

pub mod airports;
pub use airports::{Airport,AirportDirectory};

pub mod estimator;
pub use estimator::{RouteEstimator,RouteEstimate};

pub mod route_lookup;
pub use route_lookup::{RouteSource,OpenSkyRouteSource,RouteLookupCache,TripRecord};

pub mod resolver;
pub use resolver::{RouteResolver,ResolvedRoute,RouteType,PlaneView};

pub mod freshness;
pub use freshness::{FreshnessCache,FlightUpdate};

pub mod trail_store;
pub use trail_store::{TrailStore,SqliteTrailStore,PositionSample,AircraftIdentity};

pub mod poller;
pub use poller::{StateFeed,HttpStateFeed,Poller,PollerHandle,CycleStats};

/// one decoded aircraft state vector of a feed snapshot. Instances are never mutated - the next poll cycle
/// produces a new one for the same `icao24`
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct AircraftState {
    pub icao24: String,  // stable hex transponder address
    pub callsign: String, // trimmed, empty if unknown
    pub origin_country: Option<String>,
    pub time_position: Option<i64>, // epoch secs
    pub last_contact: Option<i64>, // epoch secs
    pub longitude: Option<f64>, // degrees
    pub latitude: Option<f64>, // degrees
    pub baro_altitude: Option<f64>, // meters
    pub on_ground: bool,
    pub velocity: Option<f64>, // m/s
    pub heading: Option<f64>, // degrees clockwise from north
    pub vertical_rate: Option<f64>, // m/s
}

impl AircraftState {
    /// (latitude,longitude) if both are known
    pub fn position (&self)->Option<(f64,f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat,lon)),
            _ => None
        }
    }

    pub fn has_position (&self)->bool { self.position().is_some() }

    /// epoch seconds of the position sample this state represents
    pub fn sample_time (&self)->i64 {
        self.last_contact.or( self.time_position).unwrap_or(0)
    }
}

impl fmt::Display for AircraftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "AircraftState( icao24: {}", self.icao24)?;
        if !self.callsign.is_empty() { write!( f, ", cs: \"{}\"", self.callsign)?; }
        if let Some((lat,lon)) = self.position() { write!( f, ", pos: ({:.4},{:.4})", lat, lon)?; }
        if let Some(alt) = self.baro_altitude { write!( f, ", alt: {:.0}", alt)?; }
        if let Some(hdg) = self.heading { write!( f, ", hdg: {:.0}", hdg)?; }
        if let Some(spd) = self.velocity { write!( f, ", spd: {:.1}", spd)?; }
        if self.on_ground { write!( f, ", on_ground")?; }
        write!( f, ", time: {})", self.sample_time())
    }
}

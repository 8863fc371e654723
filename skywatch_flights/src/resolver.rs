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

///! read path route resolution: confirmed lookups first, geometric estimation as fallback

use std::{fmt, sync::Arc};
use serde::{Serialize,Deserialize};
use serde_json::Value;

use crate::{
    AircraftState, FlightsConfig, airports::AirportDirectory, estimator::RouteEstimator,
    errors::Result,
    route_lookup::{OpenSkyRouteSource,RouteLookupCache,RouteSource}
};

#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq)]
#[serde(rename_all="lowercase")]
pub enum RouteType {
    Confirmed,
    Estimated
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteType::Confirmed => write!(f, "confirmed"),
            RouteType::Estimated => write!(f, "estimated"),
        }
    }
}

#[derive(Serialize,Debug,Clone,PartialEq)]
pub struct ResolvedRoute {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub route_type: RouteType,
}

pub struct RouteResolver<S> where S: RouteSource {
    lookup: RouteLookupCache<S>,
    estimator: RouteEstimator,
}

impl<S> RouteResolver<S> where S: RouteSource {
    pub fn new (lookup: RouteLookupCache<S>, estimator: RouteEstimator)->Self {
        RouteResolver { lookup, estimator }
    }

    pub fn lookup (&self)->&RouteLookupCache<S> { &self.lookup }
    pub fn estimator (&self)->&RouteEstimator { &self.estimator }
    pub fn airports (&self)->&AirportDirectory { self.estimator.airports() }

    /// a lookup that yields at least one known side counts as confirmed
    pub async fn resolve (&self, icao24: &str, lat: f64, lon: f64, altitude: Option<f64>, heading: Option<f64>)->ResolvedRoute {
        let (origin,destination) = self.lookup.get_or_fetch( icao24).await;

        if origin.is_some() || destination.is_some() {
            ResolvedRoute { origin, destination, route_type: RouteType::Confirmed }
        } else {
            let estimate = self.estimator.estimate( lat, lon, altitude, heading);
            ResolvedRoute { origin: estimate.origin, destination: estimate.destination, route_type: RouteType::Estimated }
        }
    }

    /// None if the state has no position
    pub async fn resolve_state (&self, state: &AircraftState)->Option<ResolvedRoute> {
        let (lat,lon) = state.position()?;
        Some( self.resolve( &state.icao24, lat, lon, state.baro_altitude, state.heading).await )
    }
}

impl RouteResolver<OpenSkyRouteSource> {
    /// resolver with the configured route source, lookup cache settings and airport directory.
    /// None if there is no route source configured
    pub fn from_config (config: &FlightsConfig)->Result<Option<Self>> {
        if let Some(source_config) = &config.route_source {
            let source = OpenSkyRouteSource::new( Arc::new( source_config.clone()))?;
            let lookup = RouteLookupCache::from_config( source, source_config);
            let estimator = RouteEstimator::new( Arc::new( config.airport_directory()));
            Ok( Some( RouteResolver::new( lookup, estimator)) )
        } else {
            Ok(None)
        }
    }
}

/// altitudes from loosely typed JSON sources can be strings such as "ground" - only numbers count
pub fn numeric_altitude (v: &Value)->Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter( |a| a.is_finite()),
        _ => None
    }
}

/// the client facing view of a tracked aircraft with resolved airport names
#[derive(Serialize,Debug,Clone,PartialEq)]
pub struct PlaneView {
    pub id: String,
    pub callsign: String,
    pub lat: f64,
    pub lon: f64,
    pub altitude: Option<f64>,
    pub velocity: Option<f64>,
    pub heading: Option<f64>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub route: Option<String>,
    pub route_type: RouteType,
}

impl PlaneView {
    /// None if the state has no position
    pub fn new (state: &AircraftState, resolved: &ResolvedRoute, airports: &AirportDirectory)->Option<Self> {
        let (lat,lon) = state.position()?;
        let origin = resolved.origin.as_deref().map( |code| airports.display_name(code).to_string());
        let destination = resolved.destination.as_deref().map( |code| airports.display_name(code).to_string());

        let route = match (&origin, &destination) {
            (Some(o), Some(d)) => Some( format!("{} → {}", o, d)),
            _ => None
        };

        Some( PlaneView {
            id: state.icao24.clone(),
            callsign: state.callsign.clone(),
            lat, lon,
            altitude: state.baro_altitude,
            velocity: state.velocity,
            heading: state.heading,
            origin, destination, route,
            route_type: resolved.route_type
        })
    }
}

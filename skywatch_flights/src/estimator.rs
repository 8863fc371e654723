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

use std::sync::Arc;
use serde::Serialize;
use skywatch_common::geo::{haversine_distance_km, initial_bearing_deg};
use crate::airports::{Airport,AirportDirectory};

/// altitude (same unit as baro_altitude) below which an aircraft close to an airport is assumed to have departed from it
pub const ORIGIN_MAX_ALTITUDE: f64 = 3000.0;

/// max distance in km to the nearest airport for it to be considered the origin
pub const ORIGIN_MAX_DISTANCE_KM: f64 = 40.0;

// initial best bearing difference. Differences are taken on raw degree values and hence can exceed 180
const MAX_BEARING_DIFF: f64 = 360.0;

/// best-guess route, each side is `None` if the respective heuristic did not apply
#[derive(Serialize,Debug,Clone,Default,PartialEq)]
pub struct RouteEstimate {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

/// geometric origin/destination estimation for aircraft without a confirmed route.
/// Airports for which the distance or bearing cannot be computed are skipped, they never fail the estimation
#[derive(Debug,Clone)]
pub struct RouteEstimator {
    airports: Arc<AirportDirectory>
}

impl RouteEstimator {
    pub fn new (airports: Arc<AirportDirectory>)->Self {
        RouteEstimator { airports }
    }

    pub fn airports (&self)->&AirportDirectory { &self.airports }

    /// the airport with the smallest great circle distance and that distance in km.
    /// Only a strictly smaller distance replaces the current candidate, i.e. on ties the first airport
    /// in directory order wins
    pub fn nearest_airport (&self, lat: f64, lon: f64)->Option<(&Airport,f64)> {
        let mut best: Option<(&Airport,f64)> = None;

        for airport in self.airports.iter() {
            if let Some(d) = haversine_distance_km( lat, lon, airport.latitude, airport.longitude) {
                if best.map_or( true, |(_,min_dist)| d < min_dist) {
                    best = Some((airport,d));
                }
            }
        }
        best
    }

    /// nearest airport if we are low enough and close enough to it
    pub fn likely_origin (&self, lat: f64, lon: f64, altitude: Option<f64>)->Option<&Airport> {
        let alt = altitude?;
        if alt < ORIGIN_MAX_ALTITUDE {
            if let Some((airport,dist)) = self.nearest_airport( lat, lon) {
                if dist < ORIGIN_MAX_DISTANCE_KM {
                    return Some(airport)
                }
            }
        }
        None
    }

    /// the airport whose initial bearing from the given position is closest to `heading`.
    /// NOTE - the difference is not normalized to the shorter arc, so a heading of 359 is considered
    /// far away from a bearing of 1
    pub fn likely_destination (&self, lat: f64, lon: f64, heading: Option<f64>)->Option<&Airport> {
        let heading = heading?;
        let mut best_diff = MAX_BEARING_DIFF;
        let mut dest: Option<&Airport> = None;

        for airport in self.airports.iter() {
            if let Some(bearing) = initial_bearing_deg( lat, lon, airport.latitude, airport.longitude) {
                let diff = (bearing - heading).abs();
                if diff < best_diff {
                    best_diff = diff;
                    dest = Some(airport);
                }
            }
        }
        dest
    }

    pub fn estimate (&self, lat: f64, lon: f64, altitude: Option<f64>, heading: Option<f64>)->RouteEstimate {
        RouteEstimate {
            origin: self.likely_origin( lat, lon, altitude).map( |a| a.code.clone()),
            destination: self.likely_destination( lat, lon, heading).map( |a| a.code.clone()),
        }
    }
}

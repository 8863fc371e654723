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

///! spherical earth geometry on plain degree values.
///! All functions return `None` if the result is not a finite number, which is how degenerate
///! input (NaN/infinite coordinates) shows up in f64 arithmetic

use crate::{sin, sin2, cos, atan2, sqrt, deg, rad};

/// mean earth radius in kilometers
pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0;

/// great circle distance in km between two lat/lon points given in degrees
pub fn haversine_distance_km (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->Option<f64> {
    let phi1 = rad(lat1);
    let phi2 = rad(lat2);
    let dphi = rad(lat2 - lat1);
    let dlambda = rad(lon2 - lon1);

    let a = sin2(dphi / 2.0) + cos(phi1) * cos(phi2) * sin2(dlambda / 2.0);
    let d = MEAN_EARTH_RADIUS_KM * 2.0 * atan2( sqrt(a), sqrt(1.0 - a));

    finite(d)
}

/// initial bearing (forward azimuth) in degrees [0..360) of the great circle path from point 1 to point 2
pub fn initial_bearing_deg (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->Option<f64> {
    let phi1 = rad(lat1);
    let phi2 = rad(lat2);
    let dlambda = rad(lon2 - lon1);

    let y = sin(dlambda) * cos(phi2);
    let x = cos(phi1) * sin(phi2) - sin(phi1) * cos(phi2) * cos(dlambda);
    let b = (deg( atan2(y, x)) + 360.0) % 360.0;

    finite(b)
}

#[inline]
fn finite (v: f64)->Option<f64> {
    if v.is_finite() { Some(v) } else { None }
}

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

use skywatch_common::geo::*;

// run with "cargo test test_haversine -- --nocapture"

const VABB: (f64,f64) = (19.0896, 72.8656);
const VIDP: (f64,f64) = (28.5562, 77.1000);

#[test]
fn test_haversine_zero () {
    let d = haversine_distance_km( VABB.0, VABB.1, VABB.0, VABB.1).expect("no distance");
    println!("VABB -> VABB: {d} km");
    assert!( d.abs() < 1e-9);
}

#[test]
fn test_haversine_known_distance () {
    let d = haversine_distance_km( VABB.0, VABB.1, VIDP.0, VIDP.1).expect("no distance");
    println!("VABB -> VIDP: {d:.1} km");
    assert!( (d - 1140.0).abs() < 10.0, "unexpected distance {d}");

    let d_rev = haversine_distance_km( VIDP.0, VIDP.1, VABB.0, VABB.1).expect("no distance");
    assert!( (d - d_rev).abs() < 1e-9);
}

#[test]
fn test_degenerate_input () {
    assert!( haversine_distance_km( f64::NAN, 72.0, 19.0, 72.0).is_none());
    assert!( initial_bearing_deg( 19.0, f64::INFINITY, 28.0, 77.0).is_none());
}

#[test]
fn test_cardinal_bearings () {
    let north = initial_bearing_deg( 0.0, 0.0, 10.0, 0.0).unwrap();
    let east = initial_bearing_deg( 0.0, 0.0, 0.0, 10.0).unwrap();
    let south = initial_bearing_deg( 10.0, 0.0, 0.0, 0.0).unwrap();
    let west = initial_bearing_deg( 0.0, 10.0, 0.0, 0.0).unwrap();
    println!("N: {north}, E: {east}, S: {south}, W: {west}");

    assert!( north.abs() < 1e-9);
    assert!( (east - 90.0).abs() < 1e-9);
    assert!( (south - 180.0).abs() < 1e-9);
    assert!( (west - 270.0).abs() < 1e-9);
}

#[test]
fn test_bearing_range () {
    // Mumbai to Delhi is roughly north-north-east
    let b = initial_bearing_deg( VABB.0, VABB.1, VIDP.0, VIDP.1).unwrap();
    println!("VABB -> VIDP bearing: {b:.2}");
    assert!( b > 0.0 && b < 45.0);
}

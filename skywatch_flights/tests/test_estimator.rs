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
use skywatch_common::geo::initial_bearing_deg;
use skywatch_flights::{Airport, AirportDirectory, RouteEstimator, RouteEstimate};

fn builtin_estimator ()->RouteEstimator {
    RouteEstimator::new( Arc::new( AirportDirectory::builtin()))
}

#[test]
fn test_nearest_own_coordinates () {
    let estimator = builtin_estimator();

    for airport in estimator.airports().iter() {
        let (nearest,dist) = estimator.nearest_airport( airport.latitude, airport.longitude).expect("no nearest airport");
        println!("{} -> {} at {} km", airport.code, nearest.code, dist);
        assert_eq!( nearest.code, airport.code);
        assert!( dist.abs() < 1e-6);
    }
}

#[test]
fn test_nearest_tie_break () {
    // identical coordinates - first one in directory order has to win
    let airports = AirportDirectory::new( vec![
        Airport::new( "AAAA", "First", 10.0, 10.0),
        Airport::new( "BBBB", "Second", 10.0, 10.0),
    ]);
    let estimator = RouteEstimator::new( Arc::new( airports));

    let (nearest,_) = estimator.nearest_airport( 10.5, 10.5).unwrap();
    assert_eq!( nearest.code, "AAAA");
}

#[test]
fn test_nearest_empty_or_degenerate () {
    let estimator = RouteEstimator::new( Arc::new( AirportDirectory::new( vec![])));
    assert!( estimator.nearest_airport( 19.0, 72.0).is_none());

    let estimator = builtin_estimator();
    assert!( estimator.nearest_airport( f64::NAN, 72.0).is_none());
}

#[test]
fn test_degenerate_airport_is_skipped () {
    let airports = AirportDirectory::new( vec![
        Airport::new( "XXXX", "Broken", f64::NAN, f64::NAN),
        Airport::new( "VABB", "Mumbai", 19.0896, 72.8656),
    ]);
    let estimator = RouteEstimator::new( Arc::new( airports));

    let (nearest,_) = estimator.nearest_airport( 19.09, 72.87).unwrap();
    assert_eq!( nearest.code, "VABB");

    let est = estimator.estimate( 19.09, 72.87, Some(100.0), Some(0.0));
    assert_eq!( est.origin.as_deref(), Some("VABB"));
    assert_eq!( est.destination.as_deref(), Some("VABB"));
}

#[test]
fn test_origin_inference () {
    let estimator = builtin_estimator();
    let vabb = estimator.airports().get("VABB").unwrap().clone();

    let low = estimator.estimate( vabb.latitude, vabb.longitude, Some(100.0), None);
    assert_eq!( low, RouteEstimate{ origin: Some("VABB".to_string()), destination: None });

    let high = estimator.estimate( vabb.latitude, vabb.longitude, Some(10000.0), None);
    assert_eq!( high.origin, None);

    let unknown_alt = estimator.estimate( vabb.latitude, vabb.longitude, None, None);
    assert_eq!( unknown_alt.origin, None);

    // low but too far away from any airport (central India)
    let remote = estimator.estimate( 21.0, 80.0, Some(100.0), None);
    assert_eq!( remote.origin, None);
}

#[test]
fn test_destination_inference () {
    let estimator = builtin_estimator();
    let (lat,lon) = (21.0, 76.0);

    for code in ["VECC", "VIDP", "VABB"] {
        let airport = estimator.airports().get(code).unwrap();
        let heading = initial_bearing_deg( lat, lon, airport.latitude, airport.longitude).unwrap();
        let est = estimator.estimate( lat, lon, Some(10000.0), Some(heading));
        println!("heading {heading:.2} -> {:?}", est.destination);
        assert_eq!( est.destination.as_deref(), Some(code));
    }

    let no_heading = estimator.estimate( lat, lon, Some(10000.0), None);
    assert_eq!( no_heading.destination, None);
}

#[test]
fn test_destination_raw_difference () {
    // bearings from (0,0): NORTH ~1 deg, WEST ~300 deg. A heading of 359 is closer to NORTH on the
    // circle but the raw difference picks WEST
    let airports = AirportDirectory::new( vec![
        Airport::new( "NRTH", "North", 10.0, 0.17),
        Airport::new( "WEST", "West", 5.0, -8.7),
    ]);
    let estimator = RouteEstimator::new( Arc::new( airports));

    let dest = estimator.likely_destination( 0.0, 0.0, Some(359.0)).unwrap();
    assert_eq!( dest.code, "WEST");
}

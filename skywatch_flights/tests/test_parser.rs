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

use serde_json::{json, Value};
use skywatch_flights::{AircraftState, parser::{parse_states, parse_state, SkipReason, STATE_ARITY}};

// run with "cargo test test_parse -- --nocapture"

fn valid_tuple ()->Value {
    json!(["80159b", "AIC101  ", "India", 1700000000, 1700000005, 72.87, 19.09, 50.0, false, 80.5, 270.0, -1.5])
}

#[test]
fn test_parse_field_mapping () {
    let state = parse_state( &valid_tuple()).expect("failed to parse valid tuple");
    println!("{state}");

    assert_eq!( state, AircraftState {
        icao24: "80159b".to_string(),
        callsign: "AIC101".to_string(),
        origin_country: Some("India".to_string()),
        time_position: Some(1700000000),
        last_contact: Some(1700000005),
        longitude: Some(72.87),
        latitude: Some(19.09),
        baro_altitude: Some(50.0),
        on_ground: false,
        velocity: Some(80.5),
        heading: Some(270.0),
        vertical_rate: Some(-1.5),
    });
}

#[test]
fn test_parse_nulls () {
    let tuple = json!(["abc123", null, "France", null, null, null, null, null, true, null, null, null]);
    let state = parse_state( &tuple).expect("nulls should be accepted");

    assert_eq!( state.callsign, "");
    assert!( state.on_ground);
    assert!( state.position().is_none());
    assert_eq!( state.sample_time(), 0);
}

#[test]
fn test_parse_extra_fields () {
    // real feeds append sensors, geo altitude, squawk etc.
    let tuple = json!(["80159b", "AIC101", "India", 1, 2, 72.87, 19.09, 50.0, false, 80.5, 270.0, 0.0, null, 75.0, "1234", false, 0]);
    assert!( parse_state( &tuple).is_ok());
}

#[test]
fn test_parse_skip_reasons () {
    assert_eq!( parse_state( &json!(["80159b", "AIC101", "India"])), Err( SkipReason::WrongArity{ len: 3 }));
    assert_eq!( parse_state( &json!({"icao24": "80159b"})), Err( SkipReason::NotATuple));

    let mut wrong_lat = valid_tuple();
    wrong_lat[6] = json!("19.09");
    assert_eq!( parse_state( &wrong_lat), Err( SkipReason::WrongType{ field: "latitude" }));

    let mut wrong_id = valid_tuple();
    wrong_id[0] = Value::Null;
    assert_eq!( parse_state( &wrong_id), Err( SkipReason::WrongType{ field: "icao24" }));
}

#[test]
fn test_parse_mixed_batch () {
    let payload = json!({
        "time": 1700000010,
        "states": [
            valid_tuple(),
            ["short", "tuple"],
            42,
            ["4b1805", " SWR15 ", "Switzerland", 1700000001, 1700000001, 8.55, 47.45, 400.0, false, 120.0, 90.0, 5.0]
        ]
    });

    let batch = parse_states( &payload);
    println!("parsed: {:?}", batch.states.iter().map(|s| s.icao24.as_str()).collect::<Vec<_>>());
    println!("skipped: {:?}", batch.skipped);

    assert_eq!( batch.len(), 2);
    assert_eq!( batch.n_skipped(), 2);
    assert_eq!( batch.states[0].icao24, "80159b"); // input order is preserved
    assert_eq!( batch.states[1].callsign, "SWR15");
    assert_eq!( batch.skipped[0].0, 1);
    assert_eq!( batch.skipped[1], (2, SkipReason::NotATuple));
}

#[test]
fn test_parse_missing_states () {
    assert!( parse_states( &json!({"time": 1700000010})).is_empty());
    assert!( parse_states( &json!({"time": 1700000010, "states": null})).is_empty());
}

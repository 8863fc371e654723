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

///! decoder for feed snapshots in positional array format:
///! ```
///! { "time": 1700000000, "states": [ ["80159b","AIC101  ","India",1700000000,1700000001,72.87,19.09,50.0,false,80.2,270.0,0.0, ...], ... ] }
///! ```
///! Tuples may carry more than the 12 fields we map - trailing fields are ignored.

use std::fmt;
use serde_json::Value;
use crate::AircraftState;

/// number of leading tuple fields mapped into an [AircraftState]
pub const STATE_ARITY: usize = 12;

/// why a tuple of a snapshot did not make it into the parsed batch
#[derive(Debug,Clone,PartialEq)]
pub enum SkipReason {
    NotATuple,
    WrongArity { len: usize },
    WrongType { field: &'static str },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotATuple => write!( f, "not an array"),
            SkipReason::WrongArity {len} => write!( f, "expected at least {} fields, got {}", STATE_ARITY, len),
            SkipReason::WrongType {field} => write!( f, "wrong type for field '{}'", field),
        }
    }
}

/// the result of parsing one snapshot. `skipped` holds the (input index,reason) of each dropped tuple
#[derive(Debug,Default)]
pub struct ParsedBatch {
    pub states: Vec<AircraftState>,
    pub skipped: Vec<(usize,SkipReason)>,
}

impl ParsedBatch {
    pub fn len (&self)->usize { self.states.len() }
    pub fn is_empty (&self)->bool { self.states.is_empty() }
    pub fn n_skipped (&self)->usize { self.skipped.len() }
}

/// parse all tuples under the `states` field of a decoded snapshot, in input order.
/// A missing or null `states` field yields an empty batch. Malformed tuples are recorded as skipped
/// and never abort the batch
pub fn parse_states (payload: &Value)->ParsedBatch {
    let mut batch = ParsedBatch::default();

    if let Some(tuples) = payload.get("states").and_then(Value::as_array) {
        batch.states.reserve( tuples.len());

        for (idx,tuple) in tuples.iter().enumerate() {
            match parse_state( tuple) {
                Ok(state) => batch.states.push( state),
                Err(reason) => batch.skipped.push( (idx,reason))
            }
        }
    }

    batch
}

/// map a single positional tuple into an [AircraftState]
pub fn parse_state (tuple: &Value)->Result<AircraftState,SkipReason> {
    let fields = tuple.as_array().ok_or( SkipReason::NotATuple)?;
    if fields.len() < STATE_ARITY {
        return Err( SkipReason::WrongArity{ len: fields.len() })
    }

    Ok( AircraftState {
        icao24: req_str( &fields[0], "icao24")?,
        callsign: opt_str( &fields[1], "callsign")?.map( |cs| cs.trim().to_string()).unwrap_or_default(),
        origin_country: opt_str( &fields[2], "origin_country")?,
        time_position: opt_i64( &fields[3], "time_position")?,
        last_contact: opt_i64( &fields[4], "last_contact")?,
        longitude: opt_f64( &fields[5], "longitude")?,
        latitude: opt_f64( &fields[6], "latitude")?,
        baro_altitude: opt_f64( &fields[7], "baro_altitude")?,
        on_ground: req_bool( &fields[8], "on_ground")?,
        velocity: opt_f64( &fields[9], "velocity")?,
        heading: opt_f64( &fields[10], "heading")?,
        vertical_rate: opt_f64( &fields[11], "vertical_rate")?,
    })
}

//--- field extractors

fn req_str (v: &Value, field: &'static str)->Result<String,SkipReason> {
    v.as_str().map( str::to_string).ok_or( SkipReason::WrongType{field})
}

fn opt_str (v: &Value, field: &'static str)->Result<Option<String>,SkipReason> {
    match v {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        _ => Err( SkipReason::WrongType{field})
    }
}

// epoch values are integral but we tolerate fractional seconds
fn opt_i64 (v: &Value, field: &'static str)->Result<Option<i64>,SkipReason> {
    match v {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_i64()
            .or_else( || n.as_f64().map( |f| f as i64))
            .map(Some)
            .ok_or( SkipReason::WrongType{field}),
        _ => Err( SkipReason::WrongType{field})
    }
}

fn opt_f64 (v: &Value, field: &'static str)->Result<Option<f64>,SkipReason> {
    match v {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_f64().map(Some).ok_or( SkipReason::WrongType{field}),
        _ => Err( SkipReason::WrongType{field})
    }
}

fn req_bool (v: &Value, field: &'static str)->Result<bool,SkipReason> {
    v.as_bool().ok_or( SkipReason::WrongType{field})
}

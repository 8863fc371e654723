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

use chrono::{DateTime, Utc};
use serde::{Serialize,Deserialize,Serializer,Deserializer};
use std::time::Duration;
use std::fmt;
use parse_duration::parse;

/// wall clock time in milliseconds since the unix epoch. We use this instead of `Instant` for anything
/// that has to be compared against feed provided epoch timestamps or needs to be injected in tests
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct EpochMillis(i64);

impl EpochMillis {
    pub fn now ()->Self { EpochMillis( Utc::now().timestamp_millis()) }

    pub fn new(millis:i64)->Self { EpochMillis(millis) }

    pub fn from_secs(secs: i64)->Self { EpochMillis(secs*1000) }

    pub fn millis(&self)->i64 { self.0 }

    pub fn secs(&self)->i64 { self.0 / 1000 }

    /// saturates at i64::MAX for (absurdly) large durations
    pub fn plus (&self, dur: Duration)->Self {
        let dt = i64::try_from( dur.as_millis()).unwrap_or(i64::MAX);
        EpochMillis( self.0.saturating_add(dt))
    }

    pub fn minus (&self, dur: Duration)->Self {
        let dt = i64::try_from( dur.as_millis()).unwrap_or(i64::MAX);
        EpochMillis( self.0.saturating_sub(dt))
    }

    /// note this is zero if `earlier` is actually later
    pub fn duration_since (&self, earlier: EpochMillis)->Duration {
        Duration::from_millis( (self.0 - earlier.0).max(0) as u64)
    }
}

impl fmt::Display for EpochMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::<Utc>::from_timestamp_millis(self.0) {
            Some(date) => write!(f, "{}", date),
            None => write!(f, "<invalid epoch millis {}>", self.0)
        }
    }
}

impl From<DateTime<Utc>> for EpochMillis {
    fn from (date: DateTime<Utc>)->Self { EpochMillis(date.timestamp_millis()) }
}

// as of Rust 1.87 the min,hour,day Duration ctors are experimental
#[inline] pub fn millis (n: u64)->Duration { Duration::from_millis(n) }
#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }
#[inline] pub fn minutes (n: u64)->Duration { Duration::from_secs(n * 60) }
#[inline] pub fn hours (n: u64)->Duration { Duration::from_secs(n * 3600) }


/// deserialize human readable durations such as "5s" or "30min"
pub fn deserialize_duration <'a,D>(deserializer: D) -> Result<Duration,D::Error>
    where D: Deserializer<'a>
{
    String::deserialize(deserializer).and_then( |string| {
        parse(string.as_str())
            .map_err( |e| serde::de::Error::custom(format!("{:?}",e)))
    })
}

pub fn serialize_duration<S: Serializer> (dur: &Duration, s: S) -> Result<S::Ok, S::Error>  {
    let dfm = format!("{:?}", dur);
    s.serialize_str(&dfm)
}

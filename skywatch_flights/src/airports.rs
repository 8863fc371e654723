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

use serde::{Serialize,Deserialize};

/// static airport directory entry
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct Airport {
    pub code: String, // ICAO code
    pub name: String,
    pub latitude: f64,  // degrees
    pub longitude: f64, // degrees
}

impl Airport {
    pub fn new (code: impl ToString, name: impl ToString, latitude: f64, longitude: f64)->Self {
        Airport { code: code.to_string(), name: name.to_string(), latitude, longitude }
    }
}

/// immutable, ordered set of airports.
/// Iteration order is the insertion order and determines tie breaking of proximity and bearing searches,
/// which is why this is a Vec and not a map
#[derive(Debug,Clone,PartialEq)]
pub struct AirportDirectory {
    airports: Vec<Airport>
}

impl AirportDirectory {
    pub fn new (airports: Vec<Airport>)->Self {
        AirportDirectory { airports }
    }

    /// the major Indian airports we estimate routes for if nothing else is configured
    pub fn builtin ()->Self {
        AirportDirectory::new( vec![
            Airport::new( "VABB", "Mumbai",    19.0896, 72.8656),
            Airport::new( "VIDP", "Delhi",     28.5562, 77.1000),
            Airport::new( "VOBL", "Bengaluru", 13.1986, 77.7066),
            Airport::new( "VOMM", "Chennai",   12.9941, 80.1709),
            Airport::new( "VOHS", "Hyderabad", 17.2403, 78.4294),
            Airport::new( "VECC", "Kolkata",   22.6547, 88.4467),
            Airport::new( "VAAH", "Ahmedabad", 23.0772, 72.6347),
            Airport::new( "VAPO", "Pune",      18.5793, 73.9089),
        ])
    }

    pub fn iter (&self)->impl Iterator<Item=&Airport> { self.airports.iter() }
    pub fn len (&self)->usize { self.airports.len() }
    pub fn is_empty (&self)->bool { self.airports.is_empty() }

    pub fn get (&self, code: &str)->Option<&Airport> {
        self.airports.iter().find( |a| a.code == code)
    }

    /// display name of a code, or the code itself if we don't know it
    pub fn display_name<'a> (&'a self, code: &'a str)->&'a str {
        self.get( code).map( |a| a.name.as_str()).unwrap_or( code)
    }
}

impl Default for AirportDirectory {
    fn default()->Self { AirportDirectory::builtin() }
}

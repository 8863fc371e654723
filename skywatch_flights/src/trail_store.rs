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

///! append-only persistence of aircraft identities and position samples

use async_trait::async_trait;
use serde::{Serialize,Deserialize};
use sqlx::{FromRow, SqlitePool, sqlite::SqlitePoolOptions};

use crate::{AircraftState, FlightsConfig, errors::Result};

pub const DEFAULT_TRAIL_LIMIT: usize = 100;

/*
-- the persisted schema. Timestamps are stored as epoch seconds
create table if not exists flights (
    icao24 text primary key,
    callsign text,
    origin_country text
);
create table if not exists positions (
    id integer primary key autoincrement,
    icao24 text references flights(icao24),
    ts integer,
    latitude real, longitude real, altitude real, speed real, heading real
);
create index if not exists idx_positions_icao_ts on positions(icao24, ts desc);
 */
const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS flights (
        icao24 TEXT PRIMARY KEY,
        callsign TEXT,
        origin_country TEXT
    )",
    "CREATE TABLE IF NOT EXISTS positions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        icao24 TEXT REFERENCES flights(icao24),
        ts INTEGER,
        latitude REAL,
        longitude REAL,
        altitude REAL,
        speed REAL,
        heading REAL
    )",
    "CREATE INDEX IF NOT EXISTS idx_positions_icao_ts ON positions(icao24, ts DESC)",
];

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq,FromRow)]
pub struct AircraftIdentity {
    pub icao24: String,
    pub callsign: Option<String>,
    pub origin_country: Option<String>,
}

/// one stored trail point. Samples are never updated or deleted
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq,FromRow)]
pub struct PositionSample {
    pub icao24: String,
    pub ts: i64, // epoch secs
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
    pub speed: Option<f64>,
    pub heading: Option<f64>,
}

impl From<&AircraftState> for PositionSample {
    fn from (state: &AircraftState)->Self {
        PositionSample {
            icao24: state.icao24.clone(),
            ts: state.sample_time(),
            latitude: state.latitude,
            longitude: state.longitude,
            altitude: state.baro_altitude,
            speed: state.velocity,
            heading: state.heading,
        }
    }
}

/// the persistence interface used by the poller. Implementations have to be safe for concurrent use and
/// must not hold resources across calls
#[async_trait]
pub trait TrailStore: Send + Sync {
    /// insert identity or update callsign/origin_country of a known aircraft
    async fn upsert_identity (&self, state: &AircraftState)->Result<()>;

    /// append one position sample. Missing optional fields are stored as nulls
    async fn append_position (&self, state: &AircraftState)->Result<()>;

    /// the last `limit` samples of an aircraft, most recent first
    async fn get_trail (&self, icao24: &str, limit: usize)->Result<Vec<PositionSample>>;

    async fn get_identity (&self, icao24: &str)->Result<Option<AircraftIdentity>>;
}

/// [TrailStore] on top of a SQLite connection pool. Each operation acquires its own connection
#[derive(Debug,Clone)]
pub struct SqliteTrailStore {
    pool: SqlitePool,
    trail_limit: usize,
}

impl SqliteTrailStore {
    pub fn new (pool: SqlitePool)->Self {
        SqliteTrailStore { pool, trail_limit: DEFAULT_TRAIL_LIMIT }
    }

    /// connect to the configured database and make sure the schema exists
    pub async fn from_config (config: &FlightsConfig)->Result<Self> {
        let store = SqliteTrailStore::connect( &config.database_url, config.max_connections).await?
            .with_trail_limit( config.trail_limit);
        store.create_schema().await?;
        Ok(store)
    }

    pub fn with_trail_limit (mut self, trail_limit: usize)->Self { self.trail_limit = trail_limit; self }

    pub fn trail_limit (&self)->usize { self.trail_limit }

    /// [TrailStore::get_trail] with our default limit
    pub async fn recent_trail (&self, icao24: &str)->Result<Vec<PositionSample>> {
        self.get_trail( icao24, self.trail_limit).await
    }

    pub async fn connect (url: &str, max_connections: u32)->Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections( max_connections)
            .connect( url).await?;
        Ok( SqliteTrailStore::new(pool) )
    }

    /// a private in-memory database. Note that each SQLite in-memory connection has its own database, so
    /// this pool is limited to a single connection that is never recycled
    pub async fn in_memory ()->Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect( "sqlite::memory:").await?;
        let store = SqliteTrailStore::new(pool);
        store.create_schema().await?;
        Ok(store)
    }

    pub fn pool (&self)->&SqlitePool { &self.pool }

    /// create tables and index if they don't exist yet
    pub async fn create_schema (&self)->Result<()> {
        for stmt in SCHEMA {
            sqlx::query( stmt).execute( &self.pool).await?;
        }
        Ok(())
    }

    pub async fn count_positions (&self, icao24: &str)->Result<i64> {
        let (n,): (i64,) = sqlx::query_as( "SELECT COUNT(*) FROM positions WHERE icao24 = ?")
            .bind( icao24)
            .fetch_one( &self.pool)
            .await?;
        Ok(n)
    }
}

#[async_trait]
impl TrailStore for SqliteTrailStore {
    async fn upsert_identity (&self, state: &AircraftState)->Result<()> {
        sqlx::query(
            "INSERT INTO flights(icao24, callsign, origin_country) VALUES (?, ?, ?)
             ON CONFLICT(icao24) DO UPDATE SET callsign = excluded.callsign, origin_country = excluded.origin_country")
            .bind( &state.icao24)
            .bind( &state.callsign)
            .bind( &state.origin_country)
            .execute( &self.pool)
            .await?;
        Ok(())
    }

    async fn append_position (&self, state: &AircraftState)->Result<()> {
        let sample = PositionSample::from( state);
        sqlx::query(
            "INSERT INTO positions(icao24, ts, latitude, longitude, altitude, speed, heading) VALUES (?, ?, ?, ?, ?, ?, ?)")
            .bind( &sample.icao24)
            .bind( sample.ts)
            .bind( sample.latitude)
            .bind( sample.longitude)
            .bind( sample.altitude)
            .bind( sample.speed)
            .bind( sample.heading)
            .execute( &self.pool)
            .await?;
        Ok(())
    }

    async fn get_trail (&self, icao24: &str, limit: usize)->Result<Vec<PositionSample>> {
        let limit = i64::try_from( limit).unwrap_or( i64::MAX);
        let samples = sqlx::query_as::<_,PositionSample>(
            "SELECT icao24, ts, latitude, longitude, altitude, speed, heading FROM positions
             WHERE icao24 = ? ORDER BY ts DESC, id DESC LIMIT ?")
            .bind( icao24)
            .bind( limit)
            .fetch_all( &self.pool)
            .await?;
        Ok(samples)
    }

    async fn get_identity (&self, icao24: &str)->Result<Option<AircraftIdentity>> {
        let identity = sqlx::query_as::<_,AircraftIdentity>( "SELECT icao24, callsign, origin_country FROM flights WHERE icao24 = ?")
            .bind( icao24)
            .fetch_optional( &self.pool)
            .await?;
        Ok(identity)
    }
}

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
use reqwest::Client;
use tokio::{io::{AsyncReadExt, AsyncWriteExt}, net::TcpListener};
use skywatch_common::net::SkywatchNetError;
use skywatch_flights::{
    HttpStateFeed, OpenSkyRouteSource, RouteSource, StateFeed,
    config::RouteSourceConfig,
    errors::SkywatchFlightsError
};

/// serve a canned response to every connection on an ephemeral local port and return the base url
async fn serve (status: &'static str, body: &'static str)->String {
    let listener = TcpListener::bind( "127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn( async move {
        while let Ok((mut socket,_)) = listener.accept().await {
            tokio::spawn( async move {
                let mut buf = [0u8; 4096];
                let mut request = Vec::new();
                while let Ok(n) = socket.read( &mut buf).await {
                    if n == 0 { break }
                    request.extend_from_slice( &buf[..n]);
                    if request.windows(4).any( |w| w == b"\r\n\r\n") { break }
                }
                let response = format!("HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}", body.len());
                let _ = socket.write_all( response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}

fn client ()->Client {
    Client::builder().no_proxy().build().unwrap()
}

fn route_source (url: &str)->OpenSkyRouteSource {
    OpenSkyRouteSource::with_client( Arc::new( RouteSourceConfig::new( url, "gonzo", "supersecret")), client())
}

#[tokio::test]
async fn test_feed_snapshot () {
    let url = serve( "200 OK", r#"{"time":1700000000,"states":[["80159b","AIC101  ","India",null,1700000000,72.87,19.09,100.0,false,80.5,270.0,null]]}"#).await;
    let feed = HttpStateFeed::with_client( &url, client());

    let snapshot = feed.fetch_snapshot().await.expect("no snapshot");
    assert_eq!( snapshot["states"].as_array().map( |a| a.len()), Some(1));
}

#[tokio::test]
async fn test_feed_error_status () {
    let url = serve( "500 Internal Server Error", "").await;
    let feed = HttpStateFeed::with_client( &url, client());

    let res = feed.fetch_snapshot().await;
    println!("{res:?}");
    assert!( matches!( res, Err(SkywatchFlightsError::NetError(SkywatchNetError::StatusError(500)))));
}

#[tokio::test]
async fn test_route_source_not_found_is_empty () {
    let url = serve( "404 Not Found", "").await;
    let trips = route_source( &url).get_trips( "80159B", 1699978400, 1700000000).await.expect("404 not mapped");
    assert!( trips.is_empty());
}

#[tokio::test]
async fn test_route_source_trips () {
    let url = serve( "200 OK", r#"[{"icao24":"80159b","estDepartureAirport":"VABB","estArrivalAirport":"VIDP","firstSeen":1699990000,"lastSeen":1699997200}]"#).await;
    let trips = route_source( &url).get_trips( "80159b", 1699978400, 1700000000).await.expect("no trips");
    assert_eq!( trips.len(), 1);
    assert_eq!( trips[0].departure.as_deref(), Some("VABB"));
    assert_eq!( trips[0].arrival.as_deref(), Some("VIDP"));
}

#[tokio::test]
async fn test_route_source_error_status () {
    let url = serve( "401 Unauthorized", "").await;
    let res = route_source( &url).get_trips( "80159b", 1699978400, 1700000000).await;
    println!("{res:?}");
    assert!( matches!( res, Err(SkywatchFlightsError::NetError(SkywatchNetError::StatusError(401)))));
}

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

///! common utility functions for HTTP based JSON retrieval

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::define_error;

define_error!{ pub SkywatchNetError =
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    NotFoundError(String) : "not found {0}",
    StatusError(u16) : "response status {0}",
    ParseError(String) : "parse error: {0}"
}

pub type Result<T> = std::result::Result<T, SkywatchNetError>;

/// send a prepared request and deserialize the JSON body of a 2xx response.
/// Non-success status codes are mapped into errors so that callers only have to handle one path
pub async fn get_json<T> (req: RequestBuilder)->Result<T> where T: DeserializeOwned {
    let response = req.send().await?;

    match response.status() {
        status if status.is_success() => {
            from_json( response).await
        }
        StatusCode::NOT_FOUND => {
            Err( SkywatchNetError::NotFoundError( response.url().to_string()))
        }
        other => {
            Err( SkywatchNetError::StatusError( other.as_u16()))
        }
    }
}

pub async fn from_json<T> (response: Response)->Result<T> where T: DeserializeOwned {
    let bytes = response.bytes().await?;
    serde_json::from_slice( &bytes).map_err(|e| SkywatchNetError::ParseError(e.to_string()))
}

/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error,Debug)]
pub enum EngineError {
    #[error("config error {0}")]
    ConfigError( #[from] ch4_build::Ch4BuildError),

    #[error("http error {0}")]
    HttpError( #[from] reqwest::Error),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    /// the engine reported a failure
    #[error("remote error {status}: {message}")]
    RemoteError { status: u16, message: String },

    #[error("unexpected response {0}")]
    UnexpectedResponse(String),

    #[error("no access token: {0}")]
    NoAccessToken(String),

    #[error("invalid request {0}")]
    InvalidRequest(String),

    #[error("unknown layer {0}")]
    UnknownLayer(String),
}

pub fn remote_error (status: u16, msg: impl ToString)->EngineError {
    EngineError::RemoteError{ status, message: msg.to_string() }
}

pub fn unexpected_response (msg: impl ToString)->EngineError {
    EngineError::UnexpectedResponse(msg.to_string())
}

pub fn invalid_request (msg: impl ToString)->EngineError {
    EngineError::InvalidRequest(msg.to_string())
}

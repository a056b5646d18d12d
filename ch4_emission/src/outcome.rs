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

use std::fmt;
use serde::{Serialize,Deserialize};
use ch4_engine::EngineError;

/// the result of a remote query. Remote failures are not propagated as errors, they are values that
/// are reported to the user
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(tag="status", content="value", rename_all="snake_case")]
pub enum QueryOutcome<T> {
    Success(T),
    NoData,
    RemoteError(String),
}

impl<T> QueryOutcome<T> {
    /// map engine results. Ok(None) means there is no data
    pub fn from_engine (res: Result<Option<T>,EngineError>)->Self {
        match res {
            Ok(Some(v)) => QueryOutcome::Success(v),
            Ok(None) => QueryOutcome::NoData,
            Err(e) => QueryOutcome::RemoteError( error_detail(&e))
        }
    }

    pub fn success (self)->Option<T> {
        if let QueryOutcome::Success(v) = self { Some(v) } else { None }
    }

    pub fn map<U,F> (self, f: F)->QueryOutcome<U> where F: FnOnce(T)->U {
        match self {
            QueryOutcome::Success(v) => QueryOutcome::Success( f(v)),
            QueryOutcome::NoData => QueryOutcome::NoData,
            QueryOutcome::RemoteError(e) => QueryOutcome::RemoteError(e)
        }
    }

    /// turns Success values into NoData if `f` returns None
    pub fn and_then<U,F> (self, f: F)->QueryOutcome<U> where F: FnOnce(T)->Option<U> {
        match self {
            QueryOutcome::Success(v) => f(v).map_or( QueryOutcome::NoData, QueryOutcome::Success),
            QueryOutcome::NoData => QueryOutcome::NoData,
            QueryOutcome::RemoteError(e) => QueryOutcome::RemoteError(e)
        }
    }

    /// the value or why there is none
    pub fn into_result (self)->Result<T,SkipReason> {
        match self {
            QueryOutcome::Success(v) => Ok(v),
            QueryOutcome::NoData => Err( SkipReason::NoData),
            QueryOutcome::RemoteError(detail) => Err( SkipReason::RemoteError{detail})
        }
    }
}

/// the message we show for a failed engine request
pub fn error_detail (e: &EngineError)->String {
    match e {
        EngineError::RemoteError{message,..} => message.clone(),
        other => other.to_string()
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(tag="kind", rename_all="snake_case")]
pub enum SkipReason {
    NoData,
    RemoteError { detail: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoData => write!(f, "no data"),
            SkipReason::RemoteError{detail} => write!(f, "remote error: {detail}")
        }
    }
}

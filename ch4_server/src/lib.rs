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

//! the methane dashboard web server. This serves a single page with the control panel, chart and map
//! containers, plus a JSON API that the page uses to get chart and map specs for the current control
//! values. Map tiles are proxied through the server since the engine requires authorization.
//!
//! Each request is computed from scratch - the only state we keep is the (immutable) engine client and configs.

use std::{fmt::Write, net::SocketAddr, sync::Arc};
use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use bytes::Bytes;
use serde::{Serialize,Deserialize};
use serde_json::json;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use ch4_build::{define_load_asset, define_load_config};
use ch4_common::{debug, warn};
use ch4_engine::{EngineError, GeoEngine};
use ch4_emission::{
    build_map, emission_series, ChartSpec, DashboardParams, EmissionConfig, QueryOutcome, REGION_OF_INTEREST,
    chart::CHART_TITLE, params::{MIN_YEAR, MAX_YEAR, MIN_THRESHOLD, MAX_THRESHOLD}
};

mod errors;
pub use errors::*;

define_load_config!{}
define_load_asset!{ "ch4_dashboard.js", "ch4_dashboard.css" }

pub const LEAFLET_VERSION: &str = "1.9.4";

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct DashboardServerConfig {
    pub sock_addr: SocketAddr,

    /// the path prefix of all routes, i.e. the document is served at "http://{sock_addr}/{app_name}"
    pub app_name: String,

    /// log requests (requires RUST_LOG to include tower_http=debug)
    pub trace_requests: bool,

    /// serve synthetic data instead of using Earth Engine
    pub use_stub_engine: bool,
}

impl Default for DashboardServerConfig {
    fn default()->Self {
        DashboardServerConfig {
            sock_addr: SocketAddr::from( ([127,0,0,1], 9010)),
            app_name: "ch4".to_string(),
            trace_requests: false,
            use_stub_engine: false,
        }
    }
}

impl DashboardServerConfig {
    /// app_name has to be a single path element
    pub fn check (&self)->Result<()> {
        if self.app_name.is_empty() || !self.app_name.chars().all( |c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            Err( op_failed( format!("invalid app_name '{}'", self.app_name)))
        } else {
            Ok(())
        }
    }
}

/// what our handlers share
#[derive(Clone)]
pub struct DashboardState {
    pub name: Arc<String>,
    pub engine: Arc<dyn GeoEngine>,
    pub emission_config: Arc<EmissionConfig>,
}

impl DashboardState {
    pub fn new (name: impl ToString, engine: Arc<dyn GeoEngine>, emission_config: EmissionConfig)->Self {
        DashboardState { name: Arc::new(name.to_string()), engine, emission_config: Arc::new(emission_config) }
    }

    fn tile_prefix (&self)->String { format!("/{}/tiles", self.name) }
}

pub fn build_router (state: DashboardState, trace_requests: bool)->Router {
    let name = state.name.clone();

    let mut router = Router::new()
        .route( &format!("/{name}"), get( doc_handler))
        .route( &format!("/{name}/asset/{{file}}"), get( asset_handler))
        .route( &format!("/{name}/api/series"), get( series_handler))
        .route( &format!("/{name}/api/map"), get( map_handler))
        .route( &format!("/{name}/tiles/{{layer_id}}/{{z}}/{{x}}/{{y}}"), get( tile_handler))
        .with_state( state);

    // note this won't do anything unless there also is a tracing subscriber set somewhere
    if trace_requests {
        router = router.layer( TraceLayer::new_for_http());
    }

    router
}

/// run the server until it fails
pub fn spawn_server_task (config: &DashboardServerConfig, router: Router)->JoinHandle<Result<()>> {
    let sock_addr = config.sock_addr;

    tokio::spawn( async move {
        let listener = tokio::net::TcpListener::bind( sock_addr).await?;
        axum::serve( listener, router).await?;
        Ok(())
    })
}

//--- handlers

async fn doc_handler (State(state): State<DashboardState>)->Html<String> {
    Html( document( &state.name))
}

async fn asset_handler (Path(file): Path<String>)->Response {
    match load_asset( &file) {
        Ok(bytes) => get_asset_response( &file, bytes),
        Err(e) => {
            debug!("asset {file} not found: {e}");
            (StatusCode::NOT_FOUND, file).into_response()
        }
    }
}

async fn series_handler (State(state): State<DashboardState>, Query(params): Query<DashboardParams>)->Response {
    if let Err(e) = params.validate_range() {
        return error_response( StatusCode::BAD_REQUEST, e)
    }

    let series = emission_series( state.engine.as_ref(), &state.emission_config, params.year_range(), &REGION_OF_INTEREST).await;
    Json( ChartSpec::from( &series)).into_response()
}

async fn map_handler (State(state): State<DashboardState>, Query(params): Query<DashboardParams>)->Response {
    if let Err(e) = params.validate_map() {
        return error_response( StatusCode::BAD_REQUEST, e)
    }

    match build_map( state.engine.as_ref(), &state.emission_config, params.year, params.threshold_value(), &REGION_OF_INTEREST).await {
        QueryOutcome::Success(mut map) => {
            map.proxy_tiles( &state.tile_prefix());
            Json(map).into_response()
        }
        QueryOutcome::NoData => error_response( StatusCode::NOT_FOUND, format!("no map data for {}", params.year)),
        QueryOutcome::RemoteError(detail) => error_response( StatusCode::BAD_GATEWAY, detail)
    }
}

async fn tile_handler (State(state): State<DashboardState>, Path((layer_id,z,x,y)): Path<(String,u32,u32,u32)>)->Response {
    match state.engine.tile( &layer_id, z, x, y).await {
        Ok(bytes) => ([(http::header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(e) => {
            let status = match &e {
                EngineError::UnknownLayer(_) => StatusCode::NOT_FOUND,
                EngineError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::BAD_GATEWAY
            };
            warn!("tile {layer_id}/{z}/{x}/{y} failed: {e}");
            (status, e.to_string()).into_response()
        }
    }
}

//--- handler utility functions

pub fn error_response (status: StatusCode, msg: impl ToString)->Response {
    (status, Json( json!({ "error": msg.to_string() }))).into_response()
}

pub fn get_asset_response (pathname: &str, bytes: Bytes)->Response {
    let content_spec = ch4_build::get_content_spec( pathname);
    let mut builder = Response::builder()
        .status( StatusCode::OK)
        .header( http::header::CONTENT_TYPE, content_spec.mime_type);

    if let Some(enc) = content_spec.encoding {
        builder = builder.header( http::header::CONTENT_ENCODING, enc);
    }

    builder.body( Body::from(bytes)).unwrap_or_else( |e| error_response( StatusCode::INTERNAL_SERVER_ERROR, e))
}

/// render the HTML document. This is simple enough so that we don't need a doc model
pub fn document (name: &str)->String {
    let defaults = DashboardParams::default();
    let mut buf = String::with_capacity(4096);

    let _ = write!( buf, r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{CHART_TITLE}</title>
<base href="/{name}/">
<link rel="stylesheet" href="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.css">
<link rel="stylesheet" href="asset/ch4_dashboard.css">
<script src="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.js"></script>
</head>
<body>
<h1>{CHART_TITLE}</h1>
<div id="controls">
"#);

    number_input( &mut buf, "start_year", "Start Year", MIN_YEAR, MAX_YEAR, defaults.start_year);
    number_input( &mut buf, "end_year", "End Year", defaults.start_year, MAX_YEAR, defaults.end_year);
    number_input( &mut buf, "threshold", "Threshold", MIN_THRESHOLD, MAX_THRESHOLD, defaults.threshold);
    number_input( &mut buf, "year", "Year", MIN_YEAR, MAX_YEAR, defaults.year);

    let _ = write!( buf, r#"</div>
<div id="error" class="banner hidden"></div>
<div id="panels">
  <div id="chart"></div>
  <div id="map"></div>
</div>
<script type="module" src="asset/ch4_dashboard.js"></script>
</body>
</html>
"#);

    buf
}

fn number_input (buf: &mut String, id: &str, label: &str, min: i32, max: i32, value: i32) {
    let _ = write!( buf, r#"  <label for="{id}">{label}<input type="number" id="{id}" name="{id}" min="{min}" max="{max}" value="{value}" step="1"></label>
"#);
}

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

//! the narrow capability interface to a remote geospatial analysis engine. All the gridded data
//! processing (temporal compositing, clipping, spatial reduction, masking, tile rendering) happens on
//! the engine side - we only describe what we want and get back scalars or renderable map layers.
//!
//! [`EarthEngine`] talks to the Google Earth Engine REST API, [`StubEngine`] is an in-memory engine
//! over synthetic images that is used to test clients without network access.

use std::collections::BTreeMap;
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Serialize,Deserialize};

use ch4_build::define_load_config;
use ch4_common::{geo::GeoPolygon, datetime::DateRange};

mod errors;
pub use errors::*;

pub mod expr;

pub mod earth_engine;
pub use earth_engine::{EarthEngine,EarthEngineConfig};

pub mod stub;
pub use stub::{StubEngine,StubImage,StubPixel,MAX_STUB_LAYERS};

define_load_config!{}

/// band name -> spatial mean. A band can be present without value if the reduction did not cover any pixels
pub type BandValues = BTreeMap<String,Option<f64>>;

/// what we need to compute the spatial mean of a temporal mean composite
#[derive(Debug,Clone,PartialEq)]
pub struct RegionMeanQuery {
    /// image collection id (e.g. "COPERNICUS/S5P/OFFL/L3_CH4")
    pub dataset: String,
    /// optional band to restrict the query to. If None all bands are reduced
    pub band: Option<String>,
    pub dates: DateRange,
    pub region: GeoPolygon,
    /// resolution in meters at which the reduction is performed
    pub scale: f64,
}

/// the pixel source of a map layer
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub enum LayerSource {
    /// temporal mean of the selected date range
    Mean,
    /// binary mask of temporal mean pixels that are strictly greater than the threshold. Pixels
    /// at or below the threshold are transparent
    AboveThreshold(f64),
}

impl LayerSource {
    /// does this source show a pixel with the given (temporal mean) value
    pub fn selects (&self, value: f64)->bool {
        match self {
            LayerSource::Mean => true,
            LayerSource::AboveThreshold(threshold) => value > *threshold
        }
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct VisParams {
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// CSS color names or hex values
    pub palette: Vec<String>,
}

#[derive(Debug,Clone,PartialEq)]
pub struct LayerRequest {
    pub dataset: String,
    pub band: Option<String>,
    pub dates: DateRange,
    /// if set, restrict the layer to pixels within this region
    pub clip: Option<GeoPolygon>,
    pub source: LayerSource,
    pub vis: VisParams,
}

/// opaque reference to a renderable layer on the engine side. Tiles are retrieved with [`GeoEngine::tile`]
#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct LayerHandle {
    /// url-safe id to refer to this layer
    pub id: String,
    /// where the engine serves tiles ('{z}/{x}/{y}' template)
    pub upstream_url: String,
}

#[async_trait]
pub trait GeoEngine: Send + Sync + 'static {
    /// spatial mean over `region` of the temporal mean composite of all dataset images within `dates`.
    /// Returns Ok(None) if there are no images within `dates` or the clipped composite has no bands
    async fn mean_over_region (&self, query: &RegionMeanQuery) -> Result<Option<BandValues>>;

    /// create a renderable layer for the given request
    async fn renderable_layer (&self, request: &LayerRequest) -> Result<LayerHandle>;

    /// retrieve a rendered (PNG) map tile for a layer previously created by `renderable_layer`
    async fn tile (&self, layer_id: &str, z: u32, x: u32, y: u32) -> Result<Bytes>;
}

/// check if a layer id can be used as a path element in tile URLs
pub fn is_valid_layer_id (id: &str)->bool {
    !id.is_empty() && id.chars().all( |c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

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

use serde::{Serialize,Deserialize};
use ch4_common::{geo::{GeoPoint,GeoPolygon}, datetime::DateRange, info, warn};
use ch4_engine::{EngineError, GeoEngine, LayerHandle, LayerRequest, LayerSource, VisParams};

use crate::{EmissionConfig, QueryOutcome, outcome::error_detail};

pub const MEAN_LAYER_NAME: &str = "Methane Emission";
pub const MASK_LAYER_NAME: &str = "High Methane Emission";

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct MapLayer {
    pub name: String,
    pub layer_id: String,
    /// '{z}/{x}/{y}' tile URL template
    pub tile_url: String,
    pub vis: VisParams,
}

impl MapLayer {
    fn new (name: &str, handle: LayerHandle, vis: VisParams)->Self {
        MapLayer { name: name.to_string(), layer_id: handle.id, tile_url: handle.upstream_url, vis }
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

/// what the browser needs to show the map for a single year
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct MapSpec {
    pub year: i32,
    pub threshold: f64,
    pub season: DateRange,
    pub center: GeoPoint,
    pub zoom: u32,
    /// bottom to top
    pub layers: Vec<MapLayer>,
    pub legend: Vec<LegendEntry>,
}

impl MapSpec {
    /// point all layer tile URLs to a tile proxy at `{url_prefix}/{layer_id}/{z}/{x}/{y}`
    pub fn proxy_tiles (&mut self, url_prefix: &str) {
        for layer in &mut self.layers {
            layer.tile_url = format!("{}/{}/{{z}}/{{x}}/{{y}}", url_prefix.trim_end_matches('/'), layer.layer_id);
        }
    }

    pub fn layer (&self, name: &str)->Option<&MapLayer> {
        self.layers.iter().find( |l| l.name == name)
    }
}

/// build the map for `year` with a seasonal mean layer and a mask layer that shows where the seasonal mean
/// is strictly greater than `threshold` within `mask_region`. Unlike the series this uses raw (unscaled)
/// values
pub async fn build_map<E> (engine: &E, config: &EmissionConfig, year: i32, threshold: f64, mask_region: &GeoPolygon)->QueryOutcome<MapSpec>
    where E: GeoEngine + ?Sized
{
    let Some(season) = config.map_season.dates(year) else {
        warn!("no map season {}..{} in {year}", config.map_season.from, config.map_season.to);
        return QueryOutcome::NoData
    };
    info!("building methane map for season {season} with threshold {threshold}");

    let mean_request = LayerRequest {
        dataset: config.dataset.clone(),
        band: Some( config.band.clone()),
        dates: season,
        clip: None,
        source: LayerSource::Mean,
        vis: config.mean_vis.clone(),
    };

    let mask_request = LayerRequest {
        clip: Some( mask_region.clone()),
        source: LayerSource::AboveThreshold(threshold),
        vis: VisParams { min: None, max: None, palette: vec![ config.mask_color.clone() ] },
        ..mean_request.clone()
    };

    let layers = async {
        let mean = engine.renderable_layer( &mean_request).await?;
        let mask = engine.renderable_layer( &mask_request).await?;
        Ok::<_,EngineError>( vec![
            MapLayer::new( MEAN_LAYER_NAME, mean, mean_request.vis.clone()),
            MapLayer::new( MASK_LAYER_NAME, mask, mask_request.vis.clone())
        ])
    };

    match layers.await {
        Ok(layers) => QueryOutcome::Success( MapSpec {
            year,
            threshold,
            season,
            center: config.map_center,
            zoom: config.map_zoom,
            layers,
            legend: vec![ LegendEntry { label: MASK_LAYER_NAME.to_string(), color: config.mask_color.clone() } ],
        }),
        Err(e) => {
            let detail = error_detail(&e);
            warn!("building methane map for {year} failed: {detail}");
            QueryOutcome::RemoteError(detail)
        }
    }
}

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

use std::{env, time::Duration};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Response};
use serde::{Serialize,Deserialize,de::DeserializeOwned};
use serde_json::{json, Value};

use crate::{
    BandValues, GeoEngine, LayerHandle, LayerRequest, LayerSource, RegionMeanQuery, is_valid_layer_id,
    errors::{EngineError, Result, remote_error, unexpected_response, invalid_request},
    expr::{self, Expr}
};

#[derive(Clone,Serialize,Deserialize,Debug)]
pub struct EarthEngineConfig {
    /// the cloud project that is used for quota and billing
    pub project: String,

    /// REST API root (e.g. https://earthengine.googleapis.com/v1)
    pub base_url: String,

    /// explicit OAuth2 access token. Takes precedence over `access_token_env`
    pub access_token: Option<String>,

    /// name of environment variable to read the access token from
    pub access_token_env: String,

    /// optional timeout for each request. There is none by default
    pub timeout: Option<Duration>,
}

impl Default for EarthEngineConfig {
    fn default() -> Self {
        EarthEngineConfig {
            project: "ee-ch4-dashboard".to_string(),
            base_url: "https://earthengine.googleapis.com/v1".to_string(),
            access_token: None,
            access_token_env: "EE_ACCESS_TOKEN".to_string(),
            timeout: None,
        }
    }
}

impl EarthEngineConfig {
    pub fn project_url (&self)->String {
        format!("{}/projects/{}", self.base_url.trim_end_matches('/'), self.project)
    }

    pub fn get_access_token (&self)->Result<String> {
        if let Some(token) = &self.access_token {
            Ok( token.clone() )
        } else {
            env::var( &self.access_token_env).map_err( |_| EngineError::NoAccessToken( format!("{} not set", self.access_token_env)))
        }
    }
}

/// response of a `value:compute` request
#[derive(Deserialize,Debug)]
struct ComputeValueResponse<T> {
    result: T
}

/// response of a `maps` create request
#[derive(Deserialize,Debug)]
struct MapResponse {
    name: String,
}

/// Earth Engine REST error payload
#[derive(Deserialize,Debug)]
struct ErrorResponse {
    error: ErrorStatus
}

#[derive(Deserialize,Debug)]
struct ErrorStatus {
    code: u16,
    message: String,
}

/// a GeoEngine that uses the Google Earth Engine REST API (v1)
pub struct EarthEngine {
    config: EarthEngineConfig,
    access_token: String,
    client: Client,
}

impl EarthEngine {
    pub fn new (config: EarthEngineConfig)->Result<Self> {
        let access_token = config.get_access_token()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok( EarthEngine { config, access_token, client } )
    }

    pub fn config (&self)->&EarthEngineConfig { &self.config }

    /// compute the value of the given expression graph and deserialize it
    pub async fn compute<T> (&self, e: Expr) -> Result<T> where T: DeserializeOwned {
        let url = format!("{}/value:compute", self.config.project_url());
        let body = json!({ "expression": e.to_expression() });

        let response = self.client.post( &url).bearer_auth( &self.access_token).json( &body).send().await?;
        let response = check_response( response).await?;
        let res: ComputeValueResponse<T> = response.json().await?;
        Ok( res.result )
    }

    fn map_tile_url (&self, map_name: &str)->String {
        format!("{}/{}/tiles/{{z}}/{{x}}/{{y}}", self.config.base_url.trim_end_matches('/'), map_name)
    }

    fn map_name (&self, layer_id: &str)->String {
        format!("projects/{}/maps/{}", self.config.project, layer_id)
    }
}

/// turn non-success responses into RemoteErrors, using the Earth Engine error message if there is one
async fn check_response (response: Response)->Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorResponse>( &text) {
            Ok(er) => Err( remote_error( er.error.code, er.error.message)),
            Err(_) => Err( remote_error( status.as_u16(), text))
        }
    }
}

/// the image part of a layer request as an expression graph
pub fn layer_image (request: &LayerRequest)->Expr {
    let collection = expr::filter_date( expr::image_collection( &request.dataset), &request.dates);
    let mut image = expr::mean( collection);
    if let Some(band) = &request.band {
        image = expr::select( image, band);
    }

    match request.source {
        LayerSource::Mean => {
            if let Some(region) = &request.clip {
                image = expr::clip( image, expr::polygon(region));
            }
            image
        }
        LayerSource::AboveThreshold(threshold) => {
            let mut mask = expr::gt( image, threshold);
            if let Some(region) = &request.clip {
                mask = expr::clip( mask, expr::polygon(region));
            }
            // masking the binary image with itself makes all 0 (not above threshold) pixels transparent
            expr::update_mask( mask.clone(), mask)
        }
    }
}

/// the body of a maps create request
pub fn map_request_body (request: &LayerRequest)->Value {
    let vis = &request.vis;
    let mut options = serde_json::Map::new();
    if let (Some(min),Some(max)) = (vis.min, vis.max) {
        options.insert( "ranges".to_string(), json!([ { "min": min, "max": max } ]));
    }
    if !vis.palette.is_empty() {
        options.insert( "paletteColors".to_string(), json!( vis.palette));
    }

    json!({
        "expression": layer_image(request).to_expression(),
        "fileFormat": "AUTO_JPEG_PNG",
        "visualizationOptions": options
    })
}

#[async_trait]
impl GeoEngine for EarthEngine {

    async fn mean_over_region (&self, query: &RegionMeanQuery) -> Result<Option<BandValues>> {
        let collection = expr::filter_date( expr::image_collection( &query.dataset), &query.dates);

        let n_images: u64 = self.compute( expr::collection_size( collection.clone())).await?;
        if n_images == 0 {
            return Ok(None)
        }

        let mut image = expr::mean( collection);
        if let Some(band) = &query.band {
            image = expr::select( image, band);
        }
        let geometry = expr::polygon( &query.region);
        let clipped = expr::clip( image, geometry.clone());

        let n_bands: u64 = self.compute( expr::band_count( clipped.clone())).await?;
        if n_bands == 0 {
            return Ok(None)
        }

        let values: BandValues = self.compute( expr::reduce_region_mean( clipped, geometry, query.scale)).await?;
        Ok( Some(values) )
    }

    async fn renderable_layer (&self, request: &LayerRequest) -> Result<LayerHandle> {
        let url = format!("{}/maps", self.config.project_url());
        let body = map_request_body( request);

        let response = self.client.post( &url).bearer_auth( &self.access_token).json( &body).send().await?;
        let response = check_response( response).await?;
        let map: MapResponse = response.json().await?;

        // map names are "projects/{project}/maps/{id}"
        let id = map.name.rsplit('/').next().unwrap_or_default().to_string();
        if !is_valid_layer_id( &id) {
            return Err( unexpected_response( format!("invalid map name {}", map.name)))
        }

        Ok( LayerHandle { id, upstream_url: self.map_tile_url( &map.name) } )
    }

    async fn tile (&self, layer_id: &str, z: u32, x: u32, y: u32) -> Result<Bytes> {
        if !is_valid_layer_id( layer_id) {
            return Err( invalid_request( format!("invalid layer id {layer_id}")))
        }

        let url = format!("{}/{}/tiles/{}/{}/{}", self.config.base_url.trim_end_matches('/'), self.map_name(layer_id), z, x, y);
        let response = self.client.get( &url).bearer_auth( &self.access_token).send().await?;
        let response = check_response( response).await?;
        Ok( response.bytes().await? )
    }
}

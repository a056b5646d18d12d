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

//! an in-memory [`GeoEngine`] over synthetic images. Each image is a set of (lon,lat) pixels with
//! band values. The engine follows the same processing steps as the remote one (date filter,
//! per-pixel temporal mean, clip, spatial mean) so that clients can be tested without network access.

use std::{collections::{BTreeMap,HashMap,HashSet,VecDeque}, sync::{Mutex, atomic::{AtomicUsize,Ordering}}, time::Duration};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::NaiveDate;
use ch4_common::{geo::{GeoPoint,GeoPolygon}, datetime::DateRange};

use crate::{
    BandValues, GeoEngine, LayerHandle, LayerRequest, RegionMeanQuery,
    errors::{EngineError, Result, remote_error}
};

/// a transparent 1x1 PNG we return for all tiles
pub const STUB_TILE: &[u8] = &[
    0x89,0x50,0x4e,0x47,0x0d,0x0a,0x1a,0x0a, 0x00,0x00,0x00,0x0d,0x49,0x48,0x44,0x52,
    0x00,0x00,0x00,0x01,0x00,0x00,0x00,0x01, 0x08,0x06,0x00,0x00,0x00,0x1f,0x15,0xc4,
    0x89,0x00,0x00,0x00,0x0d,0x49,0x44,0x41, 0x54,0x78,0x9c,0x63,0x00,0x01,0x00,0x00,
    0x05,0x00,0x01,0x0d,0x0a,0x2d,0xb4,0x00, 0x00,0x00,0x00,0x49,0x45,0x4e,0x44,0xae,
    0x42,0x60,0x82
];

#[derive(Debug,Clone,PartialEq)]
pub struct StubPixel {
    pub pos: GeoPoint,
    pub values: BTreeMap<String,f64>,
}

impl StubPixel {
    pub fn new (lon: f64, lat: f64, values: &[(&str,f64)])->Self {
        let values = values.iter().map( |(k,v)| (k.to_string(), *v)).collect();
        StubPixel { pos: GeoPoint::from_lon_lat_degrees(lon,lat), values }
    }
}

#[derive(Debug,Clone,PartialEq)]
pub struct StubImage {
    pub date: NaiveDate,
    pub pixels: Vec<StubPixel>,
}

impl StubImage {
    pub fn new (date: NaiveDate)->Self {
        StubImage { date, pixels: Vec::new() }
    }

    pub fn with_pixel (mut self, lon: f64, lat: f64, values: &[(&str,f64)])->Self {
        self.pixels.push( StubPixel::new( lon, lat, values));
        self
    }
}

/// max number of layers we keep. Older ones are dropped and their tiles become unknown
pub const MAX_STUB_LAYERS: usize = 16;

/// a layer that was created through `renderable_layer`
#[derive(Debug,Clone)]
pub struct StubLayer {
    pub handle: LayerHandle,
    pub request: LayerRequest,
    /// (pixel position, temporal mean) of all pixels that are shown by this layer
    pub pixels: Vec<(GeoPoint,f64)>,
}

#[derive(Default)]
struct StubLayerStore {
    next_id: usize,
    by_id: HashMap<String,StubLayer>,
    order: VecDeque<String>,
}

impl StubLayerStore {
    fn add (&mut self, request: &LayerRequest, pixels: Vec<(GeoPoint,f64)>)->LayerHandle {
        let id = format!("stub-{}", self.next_id);
        self.next_id += 1;

        let handle = LayerHandle { id: id.clone(), upstream_url: format!("stub://layers/{id}/tiles/{{z}}/{{x}}/{{y}}") };
        self.by_id.insert( id.clone(), StubLayer { handle: handle.clone(), request: request.clone(), pixels });
        self.order.push_back( id);

        while self.order.len() > MAX_STUB_LAYERS {
            if let Some(old) = self.order.pop_front() {
                self.by_id.remove( &old);
            }
        }
        handle
    }
}

#[derive(Default)]
pub struct StubEngine {
    images: Vec<StubImage>,
    fail_years: HashSet<i32>,
    fail_layers: bool,
    delays: HashMap<i32,Duration>,

    mean_queries: AtomicUsize,
    tile_requests: AtomicUsize,
    layers: Mutex<StubLayerStore>,
}

impl StubEngine {
    pub fn new ()->Self { Self::default() }

    pub fn with_image (mut self, image: StubImage)->Self {
        self.images.push( image);
        self
    }

    /// mean queries and layer requests for date ranges starting in `year` fail with a remote error
    pub fn with_failing_year (mut self, year: i32)->Self {
        self.fail_years.insert( year);
        self
    }

    /// all layer requests fail with a remote error
    pub fn with_failing_layers (mut self)->Self {
        self.fail_layers = true;
        self
    }

    /// mean queries for `year` are answered after the given delay
    pub fn with_delay (mut self, year: i32, delay: Duration)->Self {
        self.delays.insert( year, delay);
        self
    }

    pub fn mean_query_count (&self)->usize { self.mean_queries.load( Ordering::Relaxed) }
    pub fn tile_request_count (&self)->usize { self.tile_requests.load( Ordering::Relaxed) }

    /// number of currently stored layers (at most MAX_STUB_LAYERS)
    pub fn layer_count (&self)->usize {
        self.layers.lock().map( |store| store.by_id.len()).unwrap_or(0)
    }

    pub fn has_layer (&self, id: &str)->bool {
        self.layers.lock().map( |store| store.by_id.contains_key(id)).unwrap_or(false)
    }

    pub fn layer (&self, id: &str)->Option<StubLayer> {
        self.layers.lock().ok().and_then( |store| store.by_id.get(id).cloned())
    }

    /// the temporal mean values of pixels that are shown by the layer with the given id
    pub fn layer_values (&self, id: &str)->Option<Vec<f64>> {
        self.layer(id).map( |l| l.pixels.iter().map( |(_,v)| *v).collect())
    }

    fn images_within<'a> (&'a self, dates: &'a DateRange)->impl Iterator<Item=&'a StubImage> + 'a {
        self.images.iter().filter( move |img| dates.contains( &img.date))
    }

    /// per-pixel temporal mean of all images within `dates`, optionally restricted to one band
    fn composite (&self, dates: &DateRange, band: Option<&str>)->Vec<StubPixel> {
        let mut acc: Vec<(GeoPoint, BTreeMap<String,(f64,usize)>)> = Vec::new();

        for img in self.images_within( dates) {
            for px in &img.pixels {
                let idx = match acc.iter().position( |(pos,_)| *pos == px.pos) {
                    Some(idx) => idx,
                    None => { acc.push( (px.pos, BTreeMap::new())); acc.len()-1 }
                };
                let sums = &mut acc[idx].1;
                for (name,v) in &px.values {
                    if band.is_none_or( |b| b == name.as_str()) {
                        let e = sums.entry( name.clone()).or_insert( (0.0,0));
                        e.0 += *v;
                        e.1 += 1;
                    }
                }
            }
        }

        acc.into_iter().map( |(pos,sums)| {
            let values = sums.into_iter().map( |(name,(sum,n))| (name, sum / n as f64)).collect();
            StubPixel { pos, values }
        }).collect()
    }

    fn check_failure (&self, dates: &DateRange)->Result<()> {
        if self.fail_years.contains( &dates.year()) {
            Err( remote_error( 500, format!("simulated failure for {}", dates)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl GeoEngine for StubEngine {

    async fn mean_over_region (&self, query: &RegionMeanQuery) -> Result<Option<BandValues>> {
        self.mean_queries.fetch_add( 1, Ordering::Relaxed);

        if let Some(delay) = self.delays.get( &query.dates.year()) {
            tokio::time::sleep( *delay).await;
        }
        self.check_failure( &query.dates)?;

        if self.images_within( &query.dates).next().is_none() {
            return Ok(None)
        }

        let composite = self.composite( &query.dates, query.band.as_deref());
        let bands: HashSet<&String> = composite.iter().flat_map( |px| px.values.keys()).collect();
        if bands.is_empty() {
            return Ok(None)
        }

        let clipped: Vec<&StubPixel> = composite.iter().filter( |px| query.region.contains( &px.pos)).collect();
        let mut result = BandValues::new();
        for band in bands {
            let vs: Vec<f64> = clipped.iter().filter_map( |px| px.values.get(band).copied()).collect();
            let mean = if vs.is_empty() { None } else { Some( vs.iter().sum::<f64>() / vs.len() as f64) };
            result.insert( band.clone(), mean);
        }

        Ok( Some(result) )
    }

    async fn renderable_layer (&self, request: &LayerRequest) -> Result<LayerHandle> {
        if self.fail_layers {
            return Err( remote_error( 500, "simulated layer failure"))
        }
        self.check_failure( &request.dates)?;

        let clip: Option<&GeoPolygon> = request.clip.as_ref();
        let pixels: Vec<(GeoPoint,f64)> = self.composite( &request.dates, request.band.as_deref()).into_iter()
            .filter( |px| clip.is_none_or( |region| region.contains( &px.pos)))
            .filter_map( |px| {
                // a layer without explicit band shows the first one
                let v = px.values.values().next().copied()?;
                if request.source.selects(v) { Some( (px.pos, v)) } else { None }
            })
            .collect();

        let mut store = self.layers.lock().map_err( |_| remote_error( 500, "stub layer store poisoned"))?;
        Ok( store.add( request, pixels) )
    }

    async fn tile (&self, layer_id: &str, _z: u32, _x: u32, _y: u32) -> Result<Bytes> {
        self.tile_requests.fetch_add( 1, Ordering::Relaxed);

        if self.has_layer( layer_id) {
            Ok( Bytes::from_static( STUB_TILE))
        } else {
            Err( EngineError::UnknownLayer( layer_id.to_string()))
        }
    }
}

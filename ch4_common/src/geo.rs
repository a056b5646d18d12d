/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
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

//! geodetic (lon/lat degrees) geometries we need to describe regions of interest.
//! We use the [new type](https://doc.rust-lang.org/rust-by-example/generics/new_types.html) pattern on top of
//! [geo](https://docs.rs/geo/latest/geo/index.html) types so that we can still use its algorithms, and add our
//! own (GeoJSON compatible) serialization.

use std::fmt;
use serde::{Serialize,Deserialize};
use ::geo::{BoundingRect, Contains, Coord, LineString, Point, Polygon};

/* #region GeoPoint ***********************************************************************************************/

/// a wrapper for geo::Point that uses geodetic degrees stored as f64
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
#[serde(from = "LonLat", into = "LonLat")]
pub struct GeoPoint(Point);

impl GeoPoint {
    pub fn from_lon_lat_degrees (lon: f64, lat: f64) -> Self {
        GeoPoint( Point::new( lon, lat))
    }

    pub fn lon (&self)->f64 { self.0.x() }
    pub fn lat (&self)->f64 { self.0.y() }

    pub fn point (&self) -> &Point { &self.0 }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.0.x(),self.0.y())
    }
}

// we accept "lon"|"longitude"|"x" and "lat"|"latitude"|"y" so that we can directly read data serialized by `geo` types
#[derive(Serialize,Deserialize)]
struct LonLat {
    #[serde(alias="longitude", alias="x")] lon: f64,
    #[serde(alias="latitude", alias="y")] lat: f64,
}

impl From<LonLat> for GeoPoint {
    fn from (p: LonLat)->Self { GeoPoint::from_lon_lat_degrees( p.lon, p.lat) }
}

impl From<GeoPoint> for LonLat {
    fn from (p: GeoPoint)->Self { LonLat { lon: p.lon(), lat: p.lat() } }
}

/* #endregion GeoPoint */

/* #region GeoPolygon *********************************************************************************************/

/// a simple (no holes) polygon in geodetic degrees. The exterior ring is always closed
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(try_from = "GeoJsonPolygon", into = "GeoJsonPolygon")]
pub struct GeoPolygon(Polygon);

impl GeoPolygon {
    /// create polygon from (lon,lat) degree vertices. The ring is closed automatically
    pub fn from_lon_lat_degrees (vertices: &[(f64,f64)]) -> Self {
        let coords: Vec<Coord> = vertices.iter().map( |(x,y)| Coord{ x: *x, y: *y }).collect();
        GeoPolygon( Polygon::new( LineString::new(coords), Vec::with_capacity(0)))
    }

    /// axis aligned rectangle given as west,south,east,north degrees
    pub fn from_wsen (west: f64, south: f64, east: f64, north: f64) -> Self {
        GeoPolygon::from_lon_lat_degrees( &[ (west,south), (east,south), (east,north), (west,north) ])
    }

    pub fn polygon (&self)->&Polygon { &self.0 }

    /// the closed exterior ring as [lon,lat] pairs (first == last)
    pub fn exterior_coords (&self)->Vec<[f64;2]> {
        self.0.exterior().coords().map( |c| [c.x, c.y]).collect()
    }

    pub fn contains (&self, p: &GeoPoint)->bool { self.0.contains( p.point()) }

    /// (west,south,east,north) degrees
    pub fn bounds (&self)->Option<[f64;4]> {
        self.0.bounding_rect().map( |r| [r.min().x, r.min().y, r.max().x, r.max().y])
    }
}

/// the GeoJSON geometry representation of a polygon, which is what most web map clients (and Earth Engine) understand
#[derive(Serialize,Deserialize)]
struct GeoJsonPolygon {
    #[serde(rename="type")]
    geometry_type: String,
    coordinates: Vec<Vec<[f64;2]>>
}

impl TryFrom<GeoJsonPolygon> for GeoPolygon {
    type Error = String;

    fn try_from (p: GeoJsonPolygon)->Result<Self,Self::Error> {
        if p.geometry_type != "Polygon" {
            return Err( format!("not a Polygon: {}", p.geometry_type))
        }
        if p.coordinates.len() != 1 {
            return Err( "only polygons without interior rings are supported".to_string())
        }
        let exterior = &p.coordinates[0];
        if exterior.len() < 3 {
            return Err( "polygon needs at least 3 vertices".to_string())
        }
        let vertices: Vec<(f64,f64)> = exterior.iter().map( |c| (c[0],c[1])).collect();
        Ok( GeoPolygon::from_lon_lat_degrees( &vertices) )
    }
}

impl From<GeoPolygon> for GeoJsonPolygon {
    fn from (p: GeoPolygon)->Self {
        GeoJsonPolygon { geometry_type: "Polygon".to_string(), coordinates: vec![ p.exterior_coords() ] }
    }
}

/* #endregion GeoPolygon */

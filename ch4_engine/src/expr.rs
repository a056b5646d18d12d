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

//! builder for Earth Engine expression graphs, which is how computations are serialized in the REST API
//! (see https://developers.google.com/earth-engine/reference/rest/v1/Expression). We only support the
//! subset of value nodes and algorithms we need:
//!
//! ```json
//! { "result": "0",
//!   "values": { "0": { "functionInvocationValue": { "functionName": "Collection.size",
//!                                                   "arguments": { "collection": { ... }}}}}}
//! ```

use serde_json::{json, Map, Value};
use ch4_common::{geo::GeoPolygon, datetime::DateRange};

#[derive(Debug,Clone,PartialEq)]
pub enum Expr {
    Constant(Value),
    Array(Vec<Expr>),
    Call { function: &'static str, args: Vec<(&'static str,Expr)> },
}

impl Expr {
    pub fn constant (v: impl Into<Value>)->Self { Expr::Constant(v.into()) }

    pub fn call (function: &'static str, args: Vec<(&'static str,Expr)>)->Self { Expr::Call{function,args} }

    /// the REST ValueNode representation of this expression
    pub fn to_value_node (&self)->Value {
        match self {
            Expr::Constant(v) => json!({ "constantValue": v }),
            Expr::Array(es) => {
                let values: Vec<Value> = es.iter().map( |e| e.to_value_node()).collect();
                json!({ "arrayValue": { "values": values } })
            }
            Expr::Call{function,args} => {
                let mut arguments = Map::new();
                for (name,e) in args {
                    arguments.insert( name.to_string(), e.to_value_node());
                }
                json!({ "functionInvocationValue": { "functionName": function, "arguments": arguments } })
            }
        }
    }

    /// the top level Expression object with this as the result value
    pub fn to_expression (&self)->Value {
        json!({ "result": "0", "values": { "0": self.to_value_node() } })
    }

    pub fn function_name (&self)->Option<&'static str> {
        if let Expr::Call{function,..} = self { Some(*function) } else { None }
    }
}

//--- the algorithms we use

pub fn image_collection (id: &str)->Expr {
    Expr::call( "ImageCollection.load", vec![ ("id", Expr::constant(id)) ])
}

pub fn date (d: String)->Expr {
    Expr::call( "Date", vec![ ("value", Expr::constant(d)) ])
}

/// the equivalent of the client side `ImageCollection.filterDate(start,end)`
pub fn filter_date (collection: Expr, dates: &DateRange)->Expr {
    let range = Expr::call( "DateRange", vec![
        ("start", date( dates.start_str())),
        ("end", date( dates.end_str()))
    ]);
    let filter = Expr::call( "Filter.dateRangeContains", vec![
        ("leftValue", range),
        ("rightField", Expr::constant("system:time_start"))
    ]);
    Expr::call( "Collection.filter", vec![ ("collection", collection), ("filter", filter) ])
}

pub fn collection_size (collection: Expr)->Expr {
    Expr::call( "Collection.size", vec![ ("collection", collection) ])
}

/// per-pixel temporal mean of all images in the collection
pub fn mean (collection: Expr)->Expr {
    Expr::call( "reduce.mean", vec![ ("collection", collection) ])
}

pub fn select (image: Expr, band: &str)->Expr {
    Expr::call( "Image.select", vec![
        ("input", image),
        ("bandSelectors", Expr::Array( vec![ Expr::constant(band) ]))
    ])
}

pub fn polygon (poly: &GeoPolygon)->Expr {
    Expr::call( "GeometryConstructors.Polygon", vec![
        ("coordinates", Expr::constant( json!([ poly.exterior_coords() ]))),
        ("geodesic", Expr::constant(false))
    ])
}

pub fn clip (image: Expr, geometry: Expr)->Expr {
    Expr::call( "Image.clip", vec![ ("input", image), ("geometry", geometry) ])
}

/// number of bands of an image
pub fn band_count (image: Expr)->Expr {
    let band_names = Expr::call( "Image.bandNames", vec![ ("image", image) ]);
    Expr::call( "List.size", vec![ ("list", band_names) ])
}

pub fn reduce_region_mean (image: Expr, geometry: Expr, scale: f64)->Expr {
    Expr::call( "Image.reduceRegion", vec![
        ("image", image),
        ("reducer", Expr::call( "Reducer.mean", vec![])),
        ("geometry", geometry),
        ("scale", Expr::constant(scale))
    ])
}

pub fn constant_image (value: f64)->Expr {
    Expr::call( "Image.constant", vec![ ("value", Expr::constant(value)) ])
}

/// binary (0/1) image of pixels that are strictly greater than `threshold`
pub fn gt (image: Expr, threshold: f64)->Expr {
    Expr::call( "Image.gt", vec![ ("image1", image), ("image2", constant_image(threshold)) ])
}

pub fn update_mask (image: Expr, mask: Expr)->Expr {
    Expr::call( "Image.updateMask", vec![ ("image", image), ("mask", mask) ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_value_nodes() {
        let e = collection_size( image_collection("COPERNICUS/S5P/OFFL/L3_CH4"));
        let v = e.to_expression();
        println!("{}", serde_json::to_string_pretty(&v).unwrap());

        assert_eq!( v["result"], "0");
        let root = &v["values"]["0"]["functionInvocationValue"];
        assert_eq!( root["functionName"], "Collection.size");
        assert_eq!( root["arguments"]["collection"]["functionInvocationValue"]["arguments"]["id"]["constantValue"],
                    "COPERNICUS/S5P/OFFL/L3_CH4");
    }

    #[test]
    fn test_filter_date() {
        let dates = DateRange::new( NaiveDate::from_ymd_opt(2019,1,1).unwrap(), NaiveDate::from_ymd_opt(2019,12,31).unwrap());
        let v = filter_date( image_collection("x"), &dates).to_value_node();
        let filter = &v["functionInvocationValue"]["arguments"]["filter"]["functionInvocationValue"];
        assert_eq!( filter["functionName"], "Filter.dateRangeContains");
        let range = &filter["arguments"]["leftValue"]["functionInvocationValue"]["arguments"];
        assert_eq!( range["start"]["functionInvocationValue"]["arguments"]["value"]["constantValue"], "2019-01-01");
        assert_eq!( range["end"]["functionInvocationValue"]["arguments"]["value"]["constantValue"], "2019-12-31");
    }

    #[test]
    fn test_array_and_geometry() {
        let v = select( constant_image(1.0), "CH4_column_volume_mixing_ratio_dry_air").to_value_node();
        let sel = &v["functionInvocationValue"]["arguments"]["bandSelectors"]["arrayValue"]["values"][0]["constantValue"];
        assert_eq!( sel, "CH4_column_volume_mixing_ratio_dry_air");

        let poly = GeoPolygon::from_wsen( 68.7, 7.5, 97.5, 35.5);
        let v = polygon(&poly).to_value_node();
        let coords = &v["functionInvocationValue"]["arguments"]["coordinates"]["constantValue"];
        assert_eq!( coords[0][0], json!([68.7,7.5]));
        assert_eq!( coords[0].as_array().unwrap().len(), 5);
    }
}

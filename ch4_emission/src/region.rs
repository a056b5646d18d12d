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

use lazy_static::lazy_static;
use ch4_common::geo::{GeoPoint,GeoPolygon};

lazy_static! {
    /// lon/lat bounding box of India. This is used to clip both the yearly aggregates and the high emission mask
    pub static ref REGION_OF_INTEREST: GeoPolygon = GeoPolygon::from_wsen( 68.7, 7.5, 97.5, 35.5);

    /// default center of the map view
    pub static ref MAP_CENTER: GeoPoint = GeoPoint::from_lon_lat_degrees( 78.9629, 20.5937);
}

pub const MAP_ZOOM: u32 = 4;

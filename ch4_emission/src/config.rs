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
use ch4_common::{geo::GeoPoint, datetime::{DateRange,MonthDay}};
use ch4_engine::VisParams;

use crate::{CH4_DATASET, CH4_BAND, MAP_CENTER, MAP_ZOOM};

/// the (same every year) date window that is used to compute the seasonal mean shown on the map.
/// This is independent of the full calendar year window used for the time series
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
pub struct SeasonWindow {
    pub from: MonthDay,
    pub to: MonthDay,
}

impl SeasonWindow {
    pub fn dates (&self, year: i32)->Option<DateRange> {
        DateRange::within_year( year, self.from, self.to)
    }
}

impl Default for SeasonWindow {
    fn default()->Self {
        SeasonWindow { from: MonthDay::new(6,1), to: MonthDay::new(7,16) }
    }
}

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct EmissionConfig {
    /// image collection id
    pub dataset: String,

    /// the band we extract for the time series and show on the map
    pub band: String,

    /// resolution (meters) of the spatial reduction
    pub scale: f64,

    pub map_season: SeasonWindow,
    pub map_center: GeoPoint,
    pub map_zoom: u32,

    /// how to render the seasonal mean layer (raw units)
    pub mean_vis: VisParams,

    /// color of the high emission mask and its legend entry
    pub mask_color: String,

    /// max number of concurrent yearly queries. 1 means sequential
    pub max_concurrent_queries: usize,
}

impl Default for EmissionConfig {
    fn default()->Self {
        EmissionConfig {
            dataset: CH4_DATASET.to_string(),
            band: CH4_BAND.to_string(),
            scale: 100_000.0,
            map_season: SeasonWindow::default(),
            map_center: *MAP_CENTER,
            map_zoom: MAP_ZOOM,
            mean_vis: VisParams {
                min: Some(1750.0),
                max: Some(1900.0),
                palette: ["black", "blue", "purple", "cyan", "green", "yellow", "red"].iter().map(|c| c.to_string()).collect()
            },
            mask_color: "red".to_string(),
            max_concurrent_queries: 1,
        }
    }
}

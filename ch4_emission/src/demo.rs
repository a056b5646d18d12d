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

//! synthetic methane data that can be used to run the CLI and the dashboard without Earth Engine access

use chrono::NaiveDate;
use ch4_engine::{StubEngine, StubImage};

/// the first and last year with synthetic images
pub const DEMO_YEARS: (i32,i32) = (2019, 2023);

/// a stub engine with monthly images on a 2 deg grid that covers the region of interest (and some
/// of its surroundings). Values grow about 8ppb per year with a seasonal peak in September and higher
/// values towards the north east
pub fn demo_engine (band: &str)->StubEngine {
    let mut engine = StubEngine::new();

    for year in DEMO_YEARS.0..=DEMO_YEARS.1 {
        for month in 1..=12 {
            if let Some(date) = NaiveDate::from_ymd_opt( year, month, 15) {
                engine = engine.with_image( demo_image( date, year, month, band));
            }
        }
    }
    engine
}

fn demo_image (date: NaiveDate, year: i32, month: u32, band: &str)->StubImage {
    let trend = 8.0 * (year - DEMO_YEARS.0) as f64;
    let season = 15.0 * (((month as f64 - 9.0) / 12.0) * std::f64::consts::TAU).cos();

    let mut img = StubImage::new( date);
    for i in 0..16 {
        for j in 0..16 {
            let lon = 66.0 + 2.0 * i as f64;
            let lat = 6.0 + 2.0 * j as f64;
            let gradient = 0.8 * (lon - 66.0) + 1.2 * (lat - 6.0);
            img = img.with_pixel( lon, lat, &[(band, 1790.0 + trend + season + gradient)]);
        }
    }
    img
}

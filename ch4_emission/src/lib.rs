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

//! methane emission queries for a fixed region of interest (India). This crate contains the
//! per-year aggregator, the year range driver that turns aggregates into a time series, the map builder
//! for the seasonal mean and high emission layers, and the chart/parameter types that are shared
//! between the CLI and the dashboard server.
//!
//! All gridded data processing is delegated to a [`ch4_engine::GeoEngine`].

use ch4_build::define_load_config;

mod errors;
pub use errors::*;

pub mod region;
pub use region::{REGION_OF_INTEREST, MAP_CENTER, MAP_ZOOM};

pub mod outcome;
pub use outcome::{QueryOutcome, SkipReason};

pub mod config;
pub use config::{EmissionConfig, SeasonWindow};

pub mod aggregator;
pub use aggregator::{yearly_emission, CHART_SCALE};

pub mod driver;
pub use driver::{YearRange, EmissionSample, SkippedYear, EmissionSeries, emission_series};

pub mod map;
pub use map::{MapSpec, MapLayer, LegendEntry, build_map};

pub mod chart;
pub use chart::ChartSpec;

pub mod params;
pub use params::DashboardParams;

pub mod demo;

define_load_config!{}

/// the Sentinel-5P offline level 3 methane product
pub const CH4_DATASET: &str = "COPERNICUS/S5P/OFFL/L3_CH4";

/// dry air column mixing ratio in ppb
pub const CH4_BAND: &str = "CH4_column_volume_mixing_ratio_dry_air";

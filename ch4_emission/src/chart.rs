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
use crate::{EmissionSeries, EmissionSample, SkippedYear, CH4_BAND};

pub const CHART_TITLE: &str = "Methane Emission Data for India";
pub const NO_DATA_MESSAGE: &str = "No methane emission data available for the selected years and country.";

/// line chart of an emission series. If there are no samples there is no chart, only a `message`
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// every year of the queried range, including the ones without sample
    pub x_ticks: Vec<i32>,
    pub points: Vec<EmissionSample>,
    pub skipped: Vec<SkippedYear>,

    #[serde(skip_serializing_if = "ch4_common::is_none", default)]
    pub message: Option<String>,
}

impl ChartSpec {
    pub fn has_chart (&self)->bool { self.message.is_none() }
}

impl From<&EmissionSeries> for ChartSpec {
    fn from (series: &EmissionSeries)->Self {
        let message = if series.is_empty() { Some( NO_DATA_MESSAGE.to_string()) } else { None };

        ChartSpec {
            title: CHART_TITLE.to_string(),
            x_label: "Year".to_string(),
            y_label: format!("Methane Emission ({CH4_BAND})"),
            x_ticks: series.range.years().collect(),
            points: series.samples.clone(),
            skipped: series.skipped.clone(),
            message
        }
    }
}

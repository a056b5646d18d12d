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

use std::{fmt, ops::RangeInclusive};
use futures::{stream, StreamExt};
use serde::{Serialize,Deserialize};
use ch4_common::{geo::GeoPolygon, info};
use ch4_engine::GeoEngine;

use crate::{EmissionConfig, QueryOutcome, SkipReason, yearly_emission};

/// inclusive year interval. A range with `end < start` is empty
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new (start: i32, end: i32)->Self { YearRange{start,end} }

    pub fn years (&self)->RangeInclusive<i32> { self.start..=self.end }

    pub fn is_empty (&self)->bool { self.end < self.start }

    pub fn len (&self)->usize {
        if self.is_empty() { 0 } else { (self.end - self.start) as usize + 1 }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{}]", self.start, self.end)
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct EmissionSample {
    pub year: i32,
    /// scaled spatial mean
    pub value: f64,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct SkippedYear {
    pub year: i32,
    pub reason: SkipReason,
}

/// the yearly samples of a range, in ascending year order. Years without value are recorded in `skipped`
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct EmissionSeries {
    pub range: YearRange,
    pub samples: Vec<EmissionSample>,
    pub skipped: Vec<SkippedYear>,
}

impl EmissionSeries {
    pub fn is_empty (&self)->bool { self.samples.is_empty() }

    pub fn years (&self)->Vec<i32> { self.samples.iter().map( |s| s.year).collect() }
}

/// query the yearly emission for each year in `range`. Queries run with up to `config.max_concurrent_queries`
/// in flight, results are always collected in year order. There are no retries - a failed year is skipped
pub async fn emission_series<E> (engine: &E, config: &EmissionConfig, range: YearRange, region: &GeoPolygon)->EmissionSeries
    where E: GeoEngine + ?Sized
{
    let max_concurrent = config.max_concurrent_queries.max(1);
    info!("querying methane emission for {range} ({max_concurrent} concurrent)");

    let outcomes: Vec<(i32,QueryOutcome<f64>)> = stream::iter( range.years())
        .map( |year| async move {
            let outcome = yearly_emission( engine, config, year, region).await
                .and_then( |values| values.get( &config.band).copied().flatten());
            (year, outcome)
        })
        .buffered( max_concurrent)
        .collect().await;

    let mut samples = Vec::new();
    let mut skipped = Vec::new();

    for (year,outcome) in outcomes {
        match outcome.into_result() {
            Ok(value) => samples.push( EmissionSample{ year, value }),
            Err(reason) => skipped.push( SkippedYear{ year, reason })
        }
    }

    EmissionSeries { range, samples, skipped }
}

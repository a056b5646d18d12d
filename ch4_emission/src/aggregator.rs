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

use ch4_common::{geo::GeoPolygon, datetime::DateRange, warn, debug};
use ch4_engine::{BandValues, GeoEngine, RegionMeanQuery};

use crate::{QueryOutcome, EmissionConfig};

/// mixing ratio values are scaled by this factor (ppb * 1e-6 * 100) before they are shown in charts
pub const CHART_SCALE: f64 = 0.000001 * 100.0;

/// the spatial mean over `region` of the calendar year mean composite for `year`, scaled by [`CHART_SCALE`].
/// This reduces all bands of the dataset. The result is `NoData` if there are no images within the year or the
/// clipped composite does not have any bands. Engine failures are logged and returned as `RemoteError`.
///
/// Since both temporal and spatial means are linear we can apply the chart scale to the reduced values
/// instead of the image.
pub async fn yearly_emission<E> (engine: &E, config: &EmissionConfig, year: i32, region: &GeoPolygon)->QueryOutcome<BandValues>
    where E: GeoEngine + ?Sized
{
    let Some(dates) = DateRange::calendar_year(year) else {
        warn!("year {year} out of range");
        return QueryOutcome::NoData
    };

    let query = RegionMeanQuery {
        dataset: config.dataset.clone(),
        band: None,
        dates,
        region: region.clone(),
        scale: config.scale,
    };

    let outcome = QueryOutcome::from_engine( engine.mean_over_region( &query).await);
    match &outcome {
        QueryOutcome::RemoteError(detail) => warn!("methane query for {year} failed: {detail}"),
        QueryOutcome::NoData => debug!("no methane data for {year}"),
        QueryOutcome::Success(_) => {}
    }

    outcome.map( |values| {
        values.into_iter().map( |(band,v)| (band, v.map( |v| v * CHART_SCALE))).collect()
    })
}

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

use std::time::Duration;
use chrono::NaiveDate;
use ch4_engine::{StubEngine, StubImage};
use ch4_emission::*;

fn date (y: i32, m: u32, d: u32)->NaiveDate { NaiveDate::from_ymd_opt(y,m,d).unwrap() }

fn image (y: i32, value: f64)->StubImage {
    StubImage::new( date(y,5,1)).with_pixel( 78.9629, 20.5937, &[(CH4_BAND, value)])
}

fn assert_close (a: f64, b: f64) {
    assert!( (a - b).abs() < 1e-9, "{a} != {b}");
}

// run with "cargo test test_single_year -- --nocapture"

#[tokio::test]
async fn test_single_year() {
    let engine = StubEngine::new().with_image( image( 2019, 1800.0));
    let config = EmissionConfig::default();

    let series = emission_series( &engine, &config, YearRange::new(2019,2019), &REGION_OF_INTEREST).await;
    println!("{series:?}");

    assert_eq!( series.years(), vec![2019]);
    assert_close( series.samples[0].value, 0.18);
    assert!( series.skipped.is_empty());
}

#[tokio::test]
async fn test_scaling() {
    let engine = StubEngine::new().with_image( image( 2020, 1876.5));
    let config = EmissionConfig::default();

    let values = yearly_emission( &engine, &config, 2020, &REGION_OF_INTEREST).await.success().unwrap();
    assert_close( values[CH4_BAND].unwrap(), 1876.5 * 0.000001 * 100.0);
}

#[tokio::test]
async fn test_gaps() {
    let engine = StubEngine::new()
        .with_image( image( 2019, 1800.0))
        // nothing for 2020
        .with_image( image( 2021, 1820.0))
        .with_image( image( 2022, 1830.0))
        .with_image( StubImage::new( date(2023,5,1)).with_pixel( 78.0, 20.0, &[("other_band", 1.0)]))
        .with_failing_year(2022);
    let config = EmissionConfig::default();

    let series = emission_series( &engine, &config, YearRange::new(2019,2023), &REGION_OF_INTEREST).await;
    println!("{series:#?}");

    assert_eq!( series.years(), vec![2019, 2021]);
    assert_eq!( engine.mean_query_count(), 5);

    let skipped: Vec<i32> = series.skipped.iter().map( |s| s.year).collect();
    assert_eq!( skipped, vec![2020, 2022, 2023]);
    assert_eq!( series.skipped[0].reason, SkipReason::NoData);
    assert!( matches!( series.skipped[1].reason, SkipReason::RemoteError{..}));
    assert_eq!( series.skipped[2].reason, SkipReason::NoData); // band missing
}

#[tokio::test]
async fn test_no_images_is_no_data() {
    let engine = StubEngine::new().with_image( image( 2019, 1800.0));
    let mut config = EmissionConfig::default();

    for scale in [1000.0, 100_000.0] {
        config.scale = scale;
        let outcome = yearly_emission( &engine, &config, 2018, &REGION_OF_INTEREST).await;
        assert_eq!( outcome, QueryOutcome::NoData);
    }

    let elsewhere = ch4_common::geo::GeoPolygon::from_wsen( -10.0, 40.0, 0.0, 50.0);
    assert_eq!( yearly_emission( &engine, &config, 2018, &elsewhere).await, QueryOutcome::NoData);
}

#[tokio::test]
async fn test_empty_range() {
    let engine = StubEngine::new().with_image( image( 2019, 1800.0));
    let config = EmissionConfig::default();

    let range = YearRange::new(2023,2019);
    assert!( range.is_empty());
    assert_eq!( range.len(), 0);

    let series = emission_series( &engine, &config, range, &REGION_OF_INTEREST).await;
    assert!( series.is_empty());
    assert!( series.skipped.is_empty());
    assert_eq!( engine.mean_query_count(), 0);
}

#[tokio::test]
async fn test_concurrent_order() {
    // earlier years answer later, so unordered collection would reverse the series
    let mut engine = StubEngine::new();
    for (i,year) in (2019..=2023).enumerate() {
        engine = engine
            .with_image( image( year, 1800.0 + i as f64))
            .with_delay( year, Duration::from_millis( 50 - 10 * i as u64));
    }
    let engine = engine.with_failing_year(2021);

    let mut config = EmissionConfig::default();
    let sequential = emission_series( &engine, &config, YearRange::new(2019,2023), &REGION_OF_INTEREST).await;

    config.max_concurrent_queries = 4;
    let concurrent = emission_series( &engine, &config, YearRange::new(2019,2023), &REGION_OF_INTEREST).await;
    println!("{concurrent:?}");

    assert_eq!( sequential, concurrent);
    assert_eq!( concurrent.years(), vec![2019, 2020, 2022, 2023]);
    assert!( concurrent.years().windows(2).all( |w| w[0] < w[1]));
}

#[tokio::test]
async fn test_chart_spec() {
    let engine = StubEngine::new().with_image( image( 2019, 1800.0)).with_image( image( 2021, 1810.0));
    let config = EmissionConfig::default();

    let series = emission_series( &engine, &config, YearRange::new(2019,2022), &REGION_OF_INTEREST).await;
    let chart = ChartSpec::from( &series);
    println!("{}", serde_json::to_string_pretty(&chart).unwrap());

    assert!( chart.has_chart());
    assert_eq!( chart.title, "Methane Emission Data for India");
    assert_eq!( chart.x_label, "Year");
    assert_eq!( chart.y_label, "Methane Emission (CH4_column_volume_mixing_ratio_dry_air)");
    assert_eq!( chart.x_ticks, vec![2019, 2020, 2021, 2022]);
    assert_eq!( chart.points.len(), 2);

    let series = emission_series( &engine, &config, YearRange::new(2000,2001), &REGION_OF_INTEREST).await;
    let chart = ChartSpec::from( &series);
    assert!( !chart.has_chart());
    assert_eq!( chart.message.as_deref(), Some("No methane emission data available for the selected years and country."));
}

#[tokio::test]
async fn test_demo_data() {
    let config = EmissionConfig::default();
    let engine = demo::demo_engine( &config.band);

    let series = emission_series( &engine, &config, YearRange::new(2018,2023), &REGION_OF_INTEREST).await;
    println!("{series:?}");
    assert_eq!( series.years(), vec![2019, 2020, 2021, 2022, 2023]);
    assert!( series.samples.windows(2).all( |w| w[0].value < w[1].value));
}

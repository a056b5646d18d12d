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

use chrono::NaiveDate;
use ch4_engine::{LayerSource, StubEngine, StubImage};
use ch4_emission::{*, map::{MEAN_LAYER_NAME, MASK_LAYER_NAME}};

fn date (y: i32, m: u32, d: u32)->NaiveDate { NaiveDate::from_ymd_opt(y,m,d).unwrap() }

fn engine ()->StubEngine {
    StubEngine::new()
        .with_image( StubImage::new( date(2019,6,20))
            .with_pixel( 75.0, 20.0, &[(CH4_BAND, 1700.0)])
            .with_pixel( 80.0, 20.0, &[(CH4_BAND, 1900.0)])
            .with_pixel( 85.0, 20.0, &[(CH4_BAND, 1850.0)])
            .with_pixel( 110.0, 20.0, &[(CH4_BAND, 1950.0)])) // outside of region
        .with_image( StubImage::new( date(2019,10,1)) // outside of map season
            .with_pixel( 75.0, 20.0, &[(CH4_BAND, 2500.0)]))
}

// run with "cargo test test_map_layers -- --nocapture"

#[tokio::test]
async fn test_map_layers() {
    let engine = engine();
    let config = EmissionConfig::default();

    let map = build_map( &engine, &config, 2019, 1850.0, &REGION_OF_INTEREST).await.success().unwrap();
    println!("{}", serde_json::to_string_pretty(&map).unwrap());

    assert_eq!( map.center.lat(), 20.5937);
    assert_eq!( map.center.lon(), 78.9629);
    assert_eq!( map.zoom, 4);
    assert_eq!( map.season.start_str(), "2019-06-01");
    assert_eq!( map.season.end_str(), "2019-07-16");

    let names: Vec<&str> = map.layers.iter().map( |l| l.name.as_str()).collect();
    assert_eq!( names, vec![MEAN_LAYER_NAME, MASK_LAYER_NAME]);

    let mean = map.layer( MEAN_LAYER_NAME).unwrap();
    assert_eq!( mean.vis.min, Some(1750.0));
    assert_eq!( mean.vis.max, Some(1900.0));
    assert_eq!( mean.vis.palette, vec!["black", "blue", "purple", "cyan", "green", "yellow", "red"]);
    assert_eq!( engine.layer_values( &mean.layer_id).unwrap().len(), 4);

    // strictly greater than threshold, within region of interest, raw units
    let mask = map.layer( MASK_LAYER_NAME).unwrap();
    assert_eq!( mask.vis.palette, vec!["red"]);
    assert_eq!( engine.layer_values( &mask.layer_id).unwrap(), vec![1900.0]);

    let mask_layer = engine.layer( &mask.layer_id).unwrap();
    assert_eq!( mask_layer.request.source, LayerSource::AboveThreshold(1850.0));
    assert_eq!( mask_layer.request.clip.as_ref(), Some(&*REGION_OF_INTEREST));

    assert_eq!( map.legend.len(), 1);
    assert_eq!( map.legend[0].label, "High Methane Emission");
    assert_eq!( map.legend[0].color, "red");
}

#[tokio::test]
async fn test_custom_season() {
    let engine = engine();
    let mut config = EmissionConfig::default();
    config.map_season = SeasonWindow { from: ch4_common::datetime::MonthDay::new(9,1), to: ch4_common::datetime::MonthDay::new(10,31) };

    let map = build_map( &engine, &config, 2019, 1850.0, &REGION_OF_INTEREST).await.success().unwrap();
    let mask = map.layer( MASK_LAYER_NAME).unwrap();
    assert_eq!( engine.layer_values( &mask.layer_id).unwrap(), vec![2500.0]);
}

#[tokio::test]
async fn test_map_remote_error() {
    let engine = engine().with_failing_layers();
    let config = EmissionConfig::default();

    match build_map( &engine, &config, 2019, 1850.0, &REGION_OF_INTEREST).await {
        QueryOutcome::RemoteError(detail) => println!("got expected error: {detail}"),
        other => panic!("unexpected outcome {other:?}")
    }
}

#[tokio::test]
async fn test_proxy_tiles() {
    let engine = engine();
    let config = EmissionConfig::default();

    let mut map = build_map( &engine, &config, 2019, 1850.0, &REGION_OF_INTEREST).await.success().unwrap();
    map.proxy_tiles("/ch4/tiles/");
    for layer in &map.layers {
        assert_eq!( layer.tile_url, format!("/ch4/tiles/{}/{{z}}/{{x}}/{{y}}", layer.layer_id));
    }
}

#[test]
fn test_config_file() {
    let ron = include_str!("../configs/emission.ron");
    let config: EmissionConfig = ron::from_str(ron).unwrap();
    println!("{config:#?}");
    assert_eq!( config, EmissionConfig::default());
}

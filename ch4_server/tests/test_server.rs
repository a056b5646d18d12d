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

use std::sync::Arc;
use axum::{body::Body, http::{Request, StatusCode}, Router};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt; // for oneshot

use ch4_engine::{StubEngine, StubImage};
use ch4_emission::{EmissionConfig, CH4_BAND};
use ch4_server::*;

fn date (y: i32, m: u32, d: u32)->NaiveDate { NaiveDate::from_ymd_opt(y,m,d).unwrap() }

fn stub_engine ()->StubEngine {
    StubEngine::new()
        .with_image( StubImage::new( date(2019,6,20))
            .with_pixel( 75.0, 20.0, &[(CH4_BAND, 1700.0)])
            .with_pixel( 80.0, 20.0, &[(CH4_BAND, 1900.0)])
            .with_pixel( 85.0, 20.0, &[(CH4_BAND, 1850.0)]))
        .with_image( StubImage::new( date(2021,3,1)).with_pixel( 78.0, 20.0, &[(CH4_BAND, 1820.0)]))
        .with_failing_year(2022)
}

fn router (engine: StubEngine)->Router {
    build_router( DashboardState::new( "ch4", Arc::new(engine), EmissionConfig::default()), false)
}

async fn get (router: Router, uri: &str)->(StatusCode, Vec<u8>) {
    let response = router.oneshot( Request::builder().uri(uri).body( Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn get_json (router: Router, uri: &str)->(StatusCode, Value) {
    let (status, bytes) = get( router, uri).await;
    let json: Value = serde_json::from_slice( &bytes).unwrap();
    println!("{uri} -> {status}:\n{}", serde_json::to_string_pretty(&json).unwrap());
    (status, json)
}

// run with "cargo test test_series -- --nocapture"

#[tokio::test]
async fn test_series() {
    let (status, json) = get_json( router( stub_engine()), "/ch4/api/series?start_year=2019&end_year=2023").await;
    assert_eq!( status, StatusCode::OK);

    assert_eq!( json["title"], "Methane Emission Data for India");
    assert_eq!( json["x_ticks"].as_array().unwrap().len(), 5);

    let points = json["points"].as_array().unwrap();
    assert_eq!( points.len(), 2);
    assert_eq!( points[0]["year"], 2019);
    assert!( (points[0]["value"].as_f64().unwrap() - 0.1816666).abs() < 1e-6); // mean of 1700,1900,1850 scaled
    assert_eq!( points[1]["year"], 2021);

    let skipped = json["skipped"].as_array().unwrap();
    assert_eq!( skipped.len(), 3);
    assert_eq!( skipped[1]["year"], 2022);
    assert_eq!( skipped[1]["reason"]["kind"], "remote_error");
    assert!( json.get("message").is_none());
}

#[tokio::test]
async fn test_series_no_data() {
    let (status, json) = get_json( router( stub_engine()), "/ch4/api/series?start_year=2000&end_year=2002").await;
    assert_eq!( status, StatusCode::OK);
    assert_eq!( json["message"], "No methane emission data available for the selected years and country.");
    assert!( json["points"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_params() {
    let (status, json) = get_json( router( stub_engine()), "/ch4/api/series?start_year=2020&end_year=2019").await;
    assert_eq!( status, StatusCode::BAD_REQUEST);
    assert!( json["error"].as_str().unwrap().contains("end_year"));

    let (status, json) = get_json( router( stub_engine()), "/ch4/api/map?year=2019&threshold=2500").await;
    assert_eq!( status, StatusCode::BAD_REQUEST);
    assert!( json["error"].as_str().unwrap().contains("threshold"));

    // not a number at all is rejected by the extractor
    let (status, _) = get( router( stub_engine()), "/ch4/api/map?year=abc").await;
    assert_eq!( status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_endpoints_ignore_unused_params() {
    // a broken year range does not affect the map
    let (status, json) = get_json( router( stub_engine()), "/ch4/api/map?year=2019&threshold=1850&start_year=2023&end_year=2019").await;
    assert_eq!( status, StatusCode::OK);
    assert_eq!( json["layers"].as_array().unwrap().len(), 2);

    // a broken threshold does not affect the series
    let (status, json) = get_json( router( stub_engine()), "/ch4/api/series?start_year=2019&end_year=2019&threshold=5000&year=1900").await;
    assert_eq!( status, StatusCode::OK);
    assert_eq!( json["points"][0]["year"], 2019);
}

#[tokio::test]
async fn test_map_and_tiles() {
    let engine = Arc::new( stub_engine());
    let router = build_router( DashboardState::new( "ch4", engine.clone(), EmissionConfig::default()), false);

    let (status, json) = get_json( router.clone(), "/ch4/api/map?year=2019&threshold=1850").await;
    assert_eq!( status, StatusCode::OK);
    assert_eq!( json["zoom"], 4);
    assert_eq!( json["center"]["lat"], 20.5937);
    assert_eq!( json["legend"][0]["label"], "High Methane Emission");
    assert_eq!( json["legend"][0]["color"], "red");

    let layers = json["layers"].as_array().unwrap();
    assert_eq!( layers.len(), 2);
    assert_eq!( layers[0]["name"], "Methane Emission");
    assert_eq!( layers[1]["name"], "High Methane Emission");

    let mask_id = layers[1]["layer_id"].as_str().unwrap();
    assert_eq!( engine.layer_values( mask_id).unwrap(), vec![1900.0]);

    let tile_url = layers[1]["tile_url"].as_str().unwrap();
    assert_eq!( tile_url, format!("/ch4/tiles/{mask_id}/{{z}}/{{x}}/{{y}}"));

    let uri = tile_url.replace("{z}", "4").replace("{x}", "11").replace("{y}", "7");
    let (status, bytes) = get( router.clone(), &uri).await;
    assert_eq!( status, StatusCode::OK);
    assert_eq!( &bytes[1..4], b"PNG");

    let (status, _) = get( router, "/ch4/tiles/nope/4/11/7").await;
    assert_eq!( status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_map_remote_error() {
    let (status, json) = get_json( router( stub_engine().with_failing_layers()), "/ch4/api/map?year=2019&threshold=1850").await;
    assert_eq!( status, StatusCode::BAD_GATEWAY);
    assert!( json["error"].as_str().unwrap().contains("simulated"));
}

#[tokio::test]
async fn test_document_and_assets() {
    let (status, bytes) = get( router( stub_engine()), "/ch4").await;
    assert_eq!( status, StatusCode::OK);
    let doc = String::from_utf8(bytes).unwrap();
    assert!( doc.contains( r#"<base href="/ch4/">"#));
    assert!( doc.contains( r#"id="threshold" name="threshold" min="1000" max="2000" value="1850""#));
    assert!( doc.contains( "asset/ch4_dashboard.js"));

    let response = router( stub_engine())
        .oneshot( Request::builder().uri("/ch4/asset/ch4_dashboard.js").body( Body::empty()).unwrap()).await.unwrap();
    assert_eq!( response.status(), StatusCode::OK);
    assert_eq!( response.headers()["content-type"], "text/javascript");

    // series and map errors are both listed in the banner
    let script = response.into_body().collect().await.unwrap().to_bytes();
    let script = String::from_utf8( script.to_vec()).unwrap();
    assert!( script.contains( "banner.appendChild(line)"));
    assert!( !script.contains( "banner.textContent = msg"));

    let (status, _) = get( router( stub_engine()), "/ch4/asset/nope.js").await;
    assert_eq!( status, StatusCode::NOT_FOUND);
}

#[test]
fn test_config() {
    let ron = include_str!("../configs/dashboard_server.ron");
    let config: DashboardServerConfig = ron::from_str(ron).unwrap();
    assert_eq!( config, DashboardServerConfig::default());
    assert!( config.check().is_ok());

    let config = DashboardServerConfig { app_name: "a/b".to_string(), ..config };
    assert!( config.check().is_err());
}

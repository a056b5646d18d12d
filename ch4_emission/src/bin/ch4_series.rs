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

use anyhow::Result;
use clap::Parser;
use ch4_engine::{GeoEngine, EarthEngine, EarthEngineConfig};
use ch4_emission::{
    load_config_or_default, emission_series, demo::demo_engine,
    ChartSpec, DashboardParams, EmissionConfig, REGION_OF_INTEREST
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "print the yearly mean methane mixing ratio over India")]
pub struct Args {
    #[arg(short,long, default_value_t = 2019)]
    pub start_year: i32,

    #[arg(short,long, default_value_t = 2023)]
    pub end_year: i32,

    /// max number of concurrent yearly queries (overrides config)
    #[arg(short,long)]
    pub max_concurrent: Option<usize>,

    /// print chart spec as JSON
    #[arg(long)]
    pub json: bool,

    /// use synthetic data instead of Earth Engine
    #[arg(long)]
    pub stub: bool,
}

#[tokio::main]
async fn main()->Result<()> {
    ch4_build::set_bin_context!();
    ch4_common::init_tracing();

    let args = Args::parse();

    let params = DashboardParams { start_year: args.start_year, end_year: args.end_year, ..DashboardParams::default() };
    params.validate_range()?;

    let mut config: EmissionConfig = load_config_or_default("emission.ron")?;
    if let Some(n) = args.max_concurrent {
        config.max_concurrent_queries = n;
    }

    let engine: Box<dyn GeoEngine> = if args.stub {
        Box::new( demo_engine( &config.band))
    } else {
        let ee_config: EarthEngineConfig = ch4_engine::load_config_or_default("earth_engine.ron")?;
        Box::new( EarthEngine::new( ee_config)?)
    };

    let series = emission_series( engine.as_ref(), &config, params.year_range(), &REGION_OF_INTEREST).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty( &ChartSpec::from( &series))?);
    } else if series.is_empty() {
        println!("{}", ch4_emission::chart::NO_DATA_MESSAGE);
    } else {
        println!("year  methane (scaled {})", config.band);
        for s in &series.samples {
            println!("{}  {:.6}", s.year, s.value);
        }
    }

    for skipped in &series.skipped {
        eprintln!("skipped {}: {}", skipped.year, skipped.reason);
    }

    Ok(())
}

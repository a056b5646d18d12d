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

use std::{net::SocketAddr, sync::Arc};
use anyhow::Result;
use clap::Parser;
use ch4_engine::{GeoEngine, EarthEngine, EarthEngineConfig};
use ch4_emission::{EmissionConfig, demo::demo_engine};
use ch4_server::{load_config_or_default, build_router, spawn_server_task, DashboardServerConfig, DashboardState};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "serve the India methane emission dashboard")]
pub struct Args {
    /// address to serve on (overrides config)
    #[arg(short,long)]
    pub addr: Option<SocketAddr>,

    /// serve synthetic data instead of using Earth Engine
    #[arg(long)]
    pub stub: bool,
}

#[tokio::main]
async fn main()->Result<()> {
    ch4_build::set_bin_context!();
    ch4_common::init_tracing();

    let args = Args::parse();

    let mut config: DashboardServerConfig = load_config_or_default("dashboard_server.ron")?;
    if let Some(addr) = args.addr {
        config.sock_addr = addr;
    }
    config.check()?;

    let emission_config: EmissionConfig = ch4_emission::load_config_or_default("emission.ron")?;

    let engine: Arc<dyn GeoEngine> = if args.stub || config.use_stub_engine {
        Arc::new( demo_engine( &emission_config.band))
    } else {
        let ee_config: EarthEngineConfig = ch4_engine::load_config_or_default("earth_engine.ron")?;
        Arc::new( EarthEngine::new( ee_config)?)
    };

    let state = DashboardState::new( &config.app_name, engine, emission_config);
    let router = build_router( state, config.trace_requests);

    println!("serving http://{}/{}", config.sock_addr, config.app_name);
    spawn_server_task( &config, router).await??;

    Ok(())
}

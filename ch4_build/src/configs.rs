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

use std::path::PathBuf;
use crate::{BinContext, find_resource_file};

pub const CONFIGS: &'static str = "configs";

pub fn find_config_file (ctx: &Option<&BinContext>, resource_crate: &str, filename: &str) -> Option<PathBuf> {
    find_resource_file( CONFIGS, ctx, resource_crate, filename)
}

/// runtime (crate) part of config management
/// this is the macro that needs to be expanded at the top of crates (lib.rs) that define configs.
/// Config users call the defined `load_config(..)` function to instantiate config structs
#[macro_export]
macro_rules! define_load_config {
    () => {
        mod configs {
            use serde::Deserialize;

            /// load config using ch4_build - based lookup mechanism
            pub fn load_config<C> (filename: &str) -> $crate::Result<C> where C: for <'a> Deserialize<'a> {
                let bin_ctx = $crate::BIN_CONTEXT.get();
                let resource_crate = env!("CARGO_PKG_NAME");

                if let Some(path) = $crate::find_config_file( &bin_ctx, resource_crate, filename) {
                    let data = $crate::file_contents_as_bytes(&path)?;
                    Ok( $crate::ron::de::from_bytes( data.as_slice())? )
                } else {
                    Err( $crate::resource_not_found(filename) )
                }
            }

            /// load config if we find it, fall back to `C::default()` if there is no such file.
            /// Note that other errors (e.g. a malformed config file) are still reported
            pub fn load_config_or_default<C> (filename: &str) -> $crate::Result<C> where C: for <'a> Deserialize<'a> + Default {
                match load_config::<C>( filename) {
                    Err($crate::Ch4BuildError::ResourceNotFoundError(_)) => Ok( C::default() ),
                    other => other
                }
            }
        }
        pub use configs::*; // make load_config() visible at the crate level
    }
}

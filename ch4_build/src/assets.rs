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
use crate::{BinContext, find_resource_file, extension};

pub const ASSETS: &'static str = "assets";

pub fn find_asset_file (ctx: &Option<&BinContext>, resource_crate: &str, filename: &str) -> Option<PathBuf> {
    find_resource_file( ASSETS, ctx, resource_crate, filename)
}

/// what we need to know to serve an asset
#[derive(Debug,Clone,PartialEq)]
pub struct ContentSpec {
    pub mime_type: String,
    pub encoding: Option<&'static str>,
}

/// content type is deduced from the filename of the asset. We don't store compressed assets (yet)
pub fn get_content_spec (pathname: &str)->ContentSpec {
    let mime_type = match extension(pathname) {
        Some("js") => "text/javascript".to_string(), // mime_guess still says application/javascript
        _ => mime_guess::from_path(pathname).first_or_octet_stream().essence_str().to_string()
    };
    ContentSpec { mime_type, encoding: None }
}

/// runtime part of asset management
/// this is the macro that needs to be expanded at the top of crates (lib.rs) that define assets.
/// The listed files are compiled into the crate from its `assets/` dir. File system resources
/// (see crate doc for lookup order) take precedence so that assets can be modified without re-compilation.
/// Use like
/// ```ignore
/// define_load_asset!{ "my_app.js", "my_app.css" }
/// ...
/// let bytes = load_asset("my_app.js")?;
/// ```
#[macro_export]
macro_rules! define_load_asset {
    ( $( $file:literal ),* ) => {
        mod assets {
            use std::{collections::HashMap,sync::Mutex};
            use $crate::lazy_static::lazy_static;
            use $crate::bytes::Bytes;

            lazy_static! {
                static ref EMBEDDED_ASSETS: HashMap<&'static str, &'static [u8]> = {
                    let mut map: HashMap<&'static str, &'static [u8]> = HashMap::new();
                    $(
                        map.insert( $file, include_bytes!( concat!( env!("CARGO_MANIFEST_DIR"), "/assets/", $file)));
                    )*
                    map
                };

                // fs assets we have previously looked up (if CH4_RELOAD_ASSETS is not set)
                static ref CACHED_FS_ASSETS: Mutex<HashMap<String, Option<Bytes>>> = Mutex::new(HashMap::new());
            }

            pub fn load_asset (filename: &str) -> $crate::Result<Bytes> {
                let reload = $crate::is_env_enabled("CH4_RELOAD_ASSETS");
                let mut fs_checked = false;

                if !reload {
                    if let Ok(cache) = CACHED_FS_ASSETS.lock() {
                        if let Some(maybe_data) = cache.get(filename) {
                            if let Some(data) = maybe_data {
                                return Ok( data.clone() );
                            } else { // we didn't find it before, don't check again
                                fs_checked = true;
                            }
                        }
                    }
                }

                if !fs_checked {
                    let bin_ctx = $crate::BIN_CONTEXT.get();
                    let resource_crate = env!("CARGO_PKG_NAME");
                    let maybe_bytes = match $crate::find_asset_file( &bin_ctx, resource_crate, filename) {
                        Some(path) => Some( Bytes::from( $crate::file_contents_as_bytes(&path)?)),
                        None => None
                    };

                    if !reload {
                        if let Ok(mut cache) = CACHED_FS_ASSETS.lock() {
                            cache.insert( filename.to_string(), maybe_bytes.clone());
                        }
                    }

                    if let Some(bytes) = maybe_bytes {
                        return Ok(bytes)
                    }
                }

                if let Some(data) = EMBEDDED_ASSETS.get( filename) {
                    Ok( Bytes::from_static(data) )
                } else {
                    Err( $crate::resource_not_found(filename) )
                }
            }
        }
        pub use assets::*;
    }
}

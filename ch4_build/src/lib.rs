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

//! runtime resource lookup for ch4 crates. Resources are either RON config files (see [`define_load_config`])
//! or served assets (see [`define_load_asset`]). Both are looked up in the file system first, which allows
//! to override them without re-compilation. Assets can also be compiled into the crate that defines them.
//!
//! Lookup order for a resource `<file>` of crate `<crate>` in resource dir `<rdir>` ("configs" or "assets"):
//!
//!   1. `$CH4_HOME/<rdir>/[<bin_crate>/<bin_name>/]<crate>/<file>`
//!   2. `<workspace-parent>/<rdir>/[<bin_crate>/<bin_name>/]<crate>/<file>`
//!   3. `$HOME/.ch4/<rdir>/[<bin_crate>/<bin_name>/]<crate>/<file>`
//!   4. `<workspace>/<crate>/<rdir>/<file>` (the in-repo default)

use std::{env, path::{Path,PathBuf}, sync::OnceLock};

// re-exports for our macros so that client crates don't need these dependencies
pub use lazy_static;
pub use bytes;
pub use ron;

mod assets;
pub use assets::*;

mod configs;
pub use configs::*;

mod utils;
pub use utils::*;

mod errors;
pub use errors::*;

/* #region bin globals *******************************************************************/

#[derive(Debug)]
pub struct BinContext {
    pub bin_name: String,
    pub bin_crate: String,
}

impl BinContext {
    /// returns false if the context was already set
    pub fn set (bin_name: &str, bin_crate: &str)->bool {
        BIN_CONTEXT.set( BinContext{ bin_name: bin_name.to_string(), bin_crate: bin_crate.to_string() }).is_ok()
    }
}

pub static BIN_CONTEXT: OnceLock<BinContext> = OnceLock::new();

/// this has to be called (once) from the bin source
#[macro_export]
macro_rules! set_bin_context {
    () => {
        {
            // note that env! looks up the value at compile time
            ch4_build::BinContext::set( env!("CARGO_BIN_NAME"), env!("CARGO_PKG_NAME"));
        }
    }
}

/// this is mostly for tests and tools that have an explicit config path
pub fn load_config_path<C,P> (path: P) -> Result<C> where C: for <'a> serde::Deserialize<'a>, P: AsRef<Path> {
    let data = file_contents_as_bytes(path.as_ref())?;
    Ok( ron::de::from_bytes( data.as_slice())? )
}

/* #endregion bin globals */

/* #region resource lookup ***************************************************************/

/// locate a resource file and return its PathBuf
pub fn find_resource_file (resource_dir: &str, ctx: &Option<&BinContext>, resource_crate: &str, filename: &str) -> Option<PathBuf> {
    // check an explicit CH4_HOME first
    if let Ok(ch4_home) = env::var("CH4_HOME") {
        let mut path = Path::new( ch4_home.as_str()).to_path_buf();
        if find_external_resource( &mut path, resource_dir, ctx, resource_crate, filename) { return Some(path) }
    }

    // try the parent of the workspace dir next - this is the first dir outside the source repo
    if let Some(mut path) = get_workspace_parent() {
        if find_external_resource( &mut path, resource_dir, ctx, resource_crate, filename) { return Some(path) }
    }

    // then an implicit ~/.ch4/
    if let Ok(usr_home) = env::var("HOME") {
        let mut path = Path::new(usr_home.as_str()).to_path_buf();
        path.push(".ch4");
        if find_external_resource( &mut path, resource_dir, ctx, resource_crate, filename) { return Some(path) }
    }

    // finally the resource within the repo
    if let Some(mut path) = get_workspace_dir() {
        if find_internal_resource( &mut path, resource_dir, ctx, resource_crate, filename) { return Some(path) }
    }

    None
}

fn find_external_resource (path: &mut PathBuf, resource_dir: &str, bin_ctx: &Option<&BinContext>, resource_crate: &str, filename: &str)->bool {
    // bin specific override first
    if let Some(ctx) = bin_ctx {
        let bin_crate = ctx.bin_crate.as_str();
        let bin_name = ctx.bin_name.as_str();
        if push_if_file( path, &[resource_dir, bin_crate, bin_name, resource_crate, filename]) { return true }
    }

    push_if_file( path, &[resource_dir, resource_crate, filename])
}

fn find_internal_resource (path: &mut PathBuf, resource_dir: &str, bin_ctx: &Option<&BinContext>, resource_crate: &str, filename: &str)->bool {
    if let Some(ctx) = bin_ctx {
        let bin_crate = ctx.bin_crate.as_str();
        let bin_name = ctx.bin_name.as_str();
        if push_if_file( path, &[bin_crate, resource_dir, bin_name, resource_crate, filename]) { return true }
    }

    push_if_file( path, &[resource_crate, resource_dir, filename])
}

/* #endregion resource lookup */

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

use std::{fs, path::{Path,PathBuf}, env};
use crate::errors::Result;

pub fn file_contents_as_bytes (path: impl AsRef<Path>) -> Result<Vec<u8>> {
    Ok( fs::read( path)? )
}

/// append `components` to `path` if that names an existing file. Leaves `path` unchanged otherwise
pub fn push_if_file (path: &mut PathBuf, components: &[&str])->bool {
    let candidate: PathBuf = components.iter().fold( path.clone(), |p,c| p.join(c));
    if candidate.is_file() {
        *path = candidate;
        true
    } else {
        false
    }
}

/// the top of the chain of directories above the current one that all have a Cargo.toml
pub fn get_workspace_dir()->Option<PathBuf> {
    let mut dir = env::current_dir().ok()?;
    while let Some(parent) = dir.parent().filter( |p| p.join("Cargo.toml").is_file()) {
        dir = parent.to_path_buf();
    }
    Some(dir)
}

pub fn get_workspace_parent()->Option<PathBuf> {
    get_workspace_dir().and_then( |p| p.parent().map( Path::to_path_buf))
}

pub fn is_env_enabled (key: &'static str)->bool {
    env::var(key).is_ok_and( |v| matches!( v.as_str(), "1" | "true" | "on"))
}

/// the non-empty part after the last '.'
pub fn extension (path: &str)->Option<&str> {
    path.rsplit_once('.').map( |(_,ext)| ext).filter( |ext| !ext.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        assert_eq!( extension("ch4_dashboard.js"), Some("js"));
        assert_eq!( extension("a.b.css"), Some("css"));
        assert_eq!( extension("trailing."), None);
        assert_eq!( extension("none"), None);
    }

    #[test]
    fn test_push_if_file() {
        let mut path = PathBuf::from( env!("CARGO_MANIFEST_DIR"));
        let dir = path.clone();

        assert!( !push_if_file( &mut path, &["src", "no_such_file.rs"]));
        assert_eq!( path, dir);

        assert!( push_if_file( &mut path, &["src", "utils.rs"]));
        assert_eq!( path, dir.join("src").join("utils.rs"));
    }
}

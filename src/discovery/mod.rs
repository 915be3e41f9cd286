//! Input discovery and project configuration.
//!
//! Finds the tile sheets to process and the optional `tpadder.yaml`
//! manifest that supplies project defaults.
//!
//! # Example
//!
//! ```ignore
//! use tpadder::discovery::{collect_inputs, find_manifest};
//!
//! let (manifest, _) = find_manifest(None, Path::new("."))?;
//! let sheets = collect_inputs(&[PathBuf::from("art/")], &manifest);
//! ```

mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::{Result, TpError};

pub use manifest::Manifest;
pub use scanner::{collect_inputs, is_png, scan_directory};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "tpadder.yaml";

/// Load the project manifest.
///
/// An explicit path must exist. Otherwise `tpadder.yaml` is looked up in
/// `dir`, and a default manifest is used when there is none. Returns the
/// manifest and the file it came from, if any.
pub fn find_manifest(explicit: Option<&Path>, dir: &Path) -> Result<(Manifest, Option<PathBuf>)> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(TpError::Io {
                path: path.to_path_buf(),
                message: "manifest not found".to_string(),
            });
        }
        return Ok((Manifest::load(path)?, Some(path.to_path_buf())));
    }

    let path = dir.join(MANIFEST_FILENAME);
    if path.exists() {
        Ok((Manifest::load(&path)?, Some(path)))
    } else {
        Ok((Manifest::default(), None))
    }
}

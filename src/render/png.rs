//! PNG input and output for tile sheets.
//!
//! Decoding insists on a per-pixel alpha channel; encoding always writes
//! PNG regardless of the file extension.

use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};

use crate::error::{Result, TpError};

/// Suffix added to the file stem of the highlighted output.
pub const HIGHLIGHT_SUFFIX: &str = "_Highlighted";

/// Load a tile sheet as 8-bit RGBA.
///
/// Fails if the file is missing, cannot be decoded, or has no alpha channel.
pub fn load_raster(path: &Path) -> Result<RgbaImage> {
    if !path.exists() {
        return Err(TpError::Decode {
            path: path.to_path_buf(),
            message: "file not found".to_string(),
            help: None,
        });
    }

    let img = image::open(path).map_err(|e| TpError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
        help: Some("Ensure it is a valid PNG file with transparency".to_string()),
    })?;

    if !img.color().has_alpha() {
        return Err(TpError::Decode {
            path: path.to_path_buf(),
            message: format!("image has no alpha channel ({:?})", img.color()),
            help: Some("Re-export the sheet as RGBA so gutters can be transparent".to_string()),
        });
    }

    Ok(img.to_rgba8())
}

/// Write a raster to `path` as PNG.
///
/// Parent directories are not created; a missing directory is an error.
pub fn write_png(raster: &RgbaImage, path: &Path) -> Result<()> {
    if raster.width() == 0 || raster.height() == 0 {
        return Err(TpError::Encode {
            path: path.to_path_buf(),
            message: format!(
                "cannot encode an empty {}x{} image",
                raster.width(),
                raster.height()
            ),
        });
    }

    raster
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| TpError::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Path of the highlighted output for a padded output at `path`.
///
/// `tiles.png` becomes `tiles_Highlighted.png`. A path with no extension
/// gets the suffix appended to its file name.
pub fn highlighted_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = match path.extension() {
        Some(ext) => format!("{}{}.{}", stem, HIGHLIGHT_SUFFIX, ext.to_string_lossy()),
        None => format!("{}{}", stem, HIGHLIGHT_SUFFIX),
    };

    path.with_file_name(name)
}

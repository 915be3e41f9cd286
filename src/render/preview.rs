//! Preview thumbnails.
//!
//! Lays the original, padded and highlighted sheets side by side on a grey
//! backdrop so the gutters are visible at a glance.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::types::Colour;

/// Space around and between preview panels, in pixels.
pub const PANEL_MARGIN: u32 = 8;

/// Default longest side of a preview panel.
pub const DEFAULT_PREVIEW_SIZE: u32 = 256;

/// Shrink a raster so its longest side is at most `max_side`.
///
/// Uses nearest-neighbour sampling to keep pixel art crisp. Rasters that
/// already fit, and any raster when `max_side` is 0, are returned as-is.
pub fn thumbnail(raster: &RgbaImage, max_side: u32) -> RgbaImage {
    let (width, height) = raster.dimensions();
    let longest = width.max(height);

    if max_side == 0 || longest <= max_side {
        return raster.clone();
    }

    let scale = max_side as f64 / longest as f64;
    let new_width = ((width as f64 * scale).round() as u32).max(1);
    let new_height = ((height as f64 * scale).round() as u32).max(1);

    imageops::resize(raster, new_width, new_height, FilterType::Nearest)
}

/// Compose thumbnails of `panels` left to right on a grey strip.
///
/// Panels are alpha-composited, so transparent gutters show the backdrop.
pub fn preview_strip(panels: &[&RgbaImage], max_side: u32) -> RgbaImage {
    let thumbs: Vec<RgbaImage> = panels.iter().map(|p| thumbnail(p, max_side)).collect();

    let width = PANEL_MARGIN + thumbs.iter().map(|t| t.width() + PANEL_MARGIN).sum::<u32>();
    let height = thumbs.iter().map(|t| t.height()).max().unwrap_or(0) + 2 * PANEL_MARGIN;

    let mut strip = RgbaImage::from_pixel(width, height, Colour::GREY.into());

    let mut x = PANEL_MARGIN;
    for thumb in &thumbs {
        imageops::overlay(&mut strip, thumb, x as i64, PANEL_MARGIN as i64);
        x += thumb.width() + PANEL_MARGIN;
    }

    strip
}

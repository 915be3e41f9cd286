//! Gutter insertion.
//!
//! Cuts a tile sheet into whole blocks and re-emits them on a transparent
//! canvas with a fixed gap between neighbours, so filtered sampling of one
//! tile never reads its neighbour's pixels.

use image::{imageops, RgbaImage};

use crate::error::Result;
use crate::types::{BlockGrid, PadConfig};

/// Pad a tile sheet with transparent gutters between blocks.
///
/// Blocks are copied verbatim, alpha included, with no blending. Pixels past
/// the last whole block on either axis are not copied; the output still
/// reserves their extent as transparent space. A source smaller than one
/// block yields a fully transparent raster (see [`BlockGrid::padded_size`]).
///
/// The only error is an invalid configuration.
pub fn pad(source: &RgbaImage, config: &PadConfig) -> Result<RgbaImage> {
    let grid = BlockGrid::new(source.width(), source.height(), config)?;
    let (width, height) = grid.padded_size()?;

    // ImageBuffer::new zero-fills, so every gutter starts as (0, 0, 0, 0)
    let mut padded = RgbaImage::new(width, height);
    let size = grid.block_size;

    for (bx, by) in grid.blocks() {
        let (sx, sy) = grid.source_origin(bx, by);
        let (dx, dy) = grid.padded_origin(bx, by);

        let block = imageops::crop_imm(source, sx, sy, size, size).to_image();
        imageops::replace(&mut padded, &block, dx as i64, dy as i64);
    }

    Ok(padded)
}

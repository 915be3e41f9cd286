//! Block grid geometry for tile sheets.
//!
//! A tile sheet is cut into `block_size` x `block_size` blocks starting at
//! the top-left corner. Pixels past the last full block in either direction
//! belong to no block and are never copied.

use crate::error::{Result, TpError};

use super::Colour;

/// Default tile edge length in pixels.
pub const DEFAULT_BLOCK_SIZE: u32 = 16;

/// Default gutter width in pixels.
pub const DEFAULT_GUTTER: u32 = 2;

/// Block size and gutter width for one padding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadConfig {
    pub block_size: u32,
    pub gutter: u32,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            gutter: DEFAULT_GUTTER,
        }
    }
}

impl PadConfig {
    /// Create a validated configuration.
    pub fn new(block_size: u32, gutter: u32) -> Result<Self> {
        let config = Self { block_size, gutter };
        config.validate()?;
        Ok(config)
    }

    /// Check that the block size is usable.
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(TpError::InvalidConfig {
                message: "block size must be greater than zero".to_string(),
                help: Some("Tile sheets usually use 8, 16 or 32 pixel blocks".to_string()),
            });
        }
        Ok(())
    }
}

/// Everything a caller chooses per run: grid geometry, highlight colour and
/// whether the highlighted variant is produced at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadOptions {
    pub config: PadConfig,
    pub colour: Colour,
    pub highlight: bool,
}

impl Default for PadOptions {
    fn default() -> Self {
        Self {
            config: PadConfig::default(),
            colour: Colour::WHITE,
            highlight: false,
        }
    }
}

/// The grid of whole blocks found in a raster of a given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGrid {
    pub width: u32,
    pub height: u32,
    pub block_size: u32,
    pub gutter: u32,
    /// Whole blocks across the raster.
    pub blocks_per_row: u32,
    /// Whole blocks down the raster.
    pub blocks_per_column: u32,
}

impl BlockGrid {
    /// Compute the grid for a `width` x `height` raster.
    pub fn new(width: u32, height: u32, config: &PadConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            width,
            height,
            block_size: config.block_size,
            gutter: config.gutter,
            blocks_per_row: width / config.block_size,
            blocks_per_column: height / config.block_size,
        })
    }

    /// Total number of whole blocks.
    pub fn block_count(&self) -> u64 {
        self.blocks_per_row as u64 * self.blocks_per_column as u64
    }

    /// Number of pixels at the right and bottom edges that fall outside
    /// every block.
    pub fn remainder(&self) -> (u32, u32) {
        (self.width % self.block_size, self.height % self.block_size)
    }

    /// Size of the padded output.
    ///
    /// Each axis is `extent + (blocks - 1) * gutter`. With zero blocks on an
    /// axis the term is negative; a negative total clamps to zero.
    pub fn padded_size(&self) -> Result<(u32, u32)> {
        Ok((
            padded_extent(self.width, self.blocks_per_row, self.gutter)?,
            padded_extent(self.height, self.blocks_per_column, self.gutter)?,
        ))
    }

    /// Top-left source pixel of block `(bx, by)`.
    pub fn source_origin(&self, bx: u32, by: u32) -> (u32, u32) {
        (bx * self.block_size, by * self.block_size)
    }

    /// Top-left output pixel of block `(bx, by)`.
    pub fn padded_origin(&self, bx: u32, by: u32) -> (u32, u32) {
        let stride = self.block_size.saturating_add(self.gutter);
        (bx * stride, by * stride)
    }

    /// Block coordinates in row-major order (top row first, left to right).
    pub fn blocks(&self) -> impl Iterator<Item = (u32, u32)> {
        let (cols, rows) = (self.blocks_per_row, self.blocks_per_column);
        (0..rows).flat_map(move |by| (0..cols).map(move |bx| (bx, by)))
    }

    /// Whether output pixel `(x, y)` lies inside a copied block.
    ///
    /// Anything else in the padded output is gutter or trailing remainder.
    pub fn is_block_pixel(&self, x: u32, y: u32) -> bool {
        let stride = self.block_size.saturating_add(self.gutter);
        let (bx, by) = (x / stride, y / stride);
        bx < self.blocks_per_row
            && by < self.blocks_per_column
            && x % stride < self.block_size
            && y % stride < self.block_size
    }
}

fn padded_extent(extent: u32, blocks: u32, gutter: u32) -> Result<u32> {
    let size = extent as i64 + (blocks as i64 - 1) * gutter as i64;
    u32::try_from(size.max(0)).map_err(|_| TpError::InvalidConfig {
        message: format!(
            "padded size {} exceeds the maximum image dimension",
            size
        ),
        help: Some("Use a smaller gutter".to_string()),
    })
}

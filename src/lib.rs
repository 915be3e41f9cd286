//! tpadder - Tile sheet gutter padding
//!
//! A library for separating the tiles of a sheet with transparent gutters,
//! so filtered sampling never bleeds one tile into the next, and for
//! deriving matching highlight outlines.

pub mod batch;
pub mod cli;
pub mod discovery;
pub mod error;
pub mod output;
pub mod render;
pub mod session;
pub mod types;

pub use batch::{process_sheet, run_batch, BatchItem, BatchReport, Job};
pub use discovery::{collect_inputs, find_manifest, Manifest};
pub use error::{Result, TpError};
pub use render::{
    find_edges, highlighted_and_padded, highlighted_path, load_raster, pad, preview_strip,
    recolor_edges, thumbnail, write_png,
};
pub use session::{LoadedSheet, SavedPaths, Session};
pub use types::{BlockGrid, Colour, PadConfig, PadOptions};

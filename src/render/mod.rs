//! Raster transforms and image I/O.
//!
//! `tiler` and `outline` are the pure transform core; `png` is the codec
//! boundary where all I/O errors originate; `preview` builds thumbnails.

mod outline;
mod png;
mod preview;
mod tiler;

pub use outline::{find_edges, highlighted_and_padded, recolor_edges, EDGE_ALPHA};
pub use png::{highlighted_path, load_raster, write_png, HIGHLIGHT_SUFFIX};
pub use preview::{preview_strip, thumbnail, DEFAULT_PREVIEW_SIZE, PANEL_MARGIN};
pub use tiler::pad;

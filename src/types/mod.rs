//! Core value types: colours and block grid geometry.

mod colour;
mod grid;

pub use colour::Colour;
pub use grid::{BlockGrid, PadConfig, PadOptions, DEFAULT_BLOCK_SIZE, DEFAULT_GUTTER};

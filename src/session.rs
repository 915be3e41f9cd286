//! Loaded tile sheets and the current selection.
//!
//! A front end (the `preview` command, or any interactive viewer) keeps one
//! `Session`: every sheet it has opened, with its padded and highlighted
//! variants, plus which sheet is current. The transforms themselves stay
//! stateless; the session only caches their outputs.

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::error::Result;
use crate::render::{highlighted_and_padded, highlighted_path, load_raster, pad, write_png};
use crate::types::{Colour, PadOptions};

/// A sheet with both derived variants.
#[derive(Debug, Clone)]
pub struct LoadedSheet {
    /// Display name (the file stem).
    pub name: String,
    pub path: PathBuf,
    pub original: RgbaImage,
    pub padded: RgbaImage,
    pub highlighted: RgbaImage,
}

/// Files written by [`Session::save_current`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPaths {
    pub padded: PathBuf,
    pub highlighted: Option<PathBuf>,
}

/// Application state for browsing a set of tile sheets.
#[derive(Debug, Clone, Default)]
pub struct Session {
    sheets: Vec<LoadedSheet>,
    index: usize,
    options: PadOptions,
}

impl Session {
    pub fn new(options: PadOptions) -> Self {
        Self {
            sheets: Vec::new(),
            index: 0,
            options,
        }
    }

    pub fn options(&self) -> &PadOptions {
        &self.options
    }

    pub fn sheets(&self) -> &[LoadedSheet] {
        &self.sheets
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Position of the current sheet, if any are loaded.
    pub fn index(&self) -> Option<usize> {
        (!self.sheets.is_empty()).then_some(self.index)
    }

    /// Decode a sheet, derive both variants and make it current.
    ///
    /// On error the session is left exactly as it was.
    pub fn load(&mut self, path: &Path) -> Result<&LoadedSheet> {
        let original = load_raster(path)?;
        let padded = pad(&original, &self.options.config)?;
        let highlighted =
            highlighted_and_padded(&original, self.options.colour, &self.options.config)?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sheet".to_string());

        self.sheets.push(LoadedSheet {
            name,
            path: path.to_path_buf(),
            original,
            padded,
            highlighted,
        });
        self.index = self.sheets.len() - 1;

        Ok(&self.sheets[self.index])
    }

    pub fn current(&self) -> Option<&LoadedSheet> {
        self.sheets.get(self.index)
    }

    /// Move to the next sheet, staying on the last one at the end.
    pub fn select_next(&mut self) -> Option<&LoadedSheet> {
        if self.index + 1 < self.sheets.len() {
            self.index += 1;
        }
        self.current()
    }

    /// Move to the previous sheet, staying on the first one at the start.
    pub fn select_previous(&mut self) -> Option<&LoadedSheet> {
        self.index = self.index.saturating_sub(1);
        self.current()
    }

    /// Change the highlight colour and rebuild every highlighted variant.
    pub fn set_highlight_colour(&mut self, colour: Colour) -> Result<()> {
        let config = self.options.config;
        for sheet in &mut self.sheets {
            sheet.highlighted = highlighted_and_padded(&sheet.original, colour, &config)?;
        }
        self.options.colour = colour;
        Ok(())
    }

    /// Save the current sheet's padded variant at exactly `path`, and the
    /// highlighted variant next to it when asked.
    ///
    /// Returns `Ok(None)` when nothing is loaded.
    pub fn save_current(&self, path: &Path, with_highlight: bool) -> Result<Option<SavedPaths>> {
        let Some(sheet) = self.current() else {
            return Ok(None);
        };

        write_png(&sheet.padded, path)?;

        let highlighted = if with_highlight {
            let target = highlighted_path(path);
            write_png(&sheet.highlighted, &target)?;
            Some(target)
        } else {
            None
        };

        Ok(Some(SavedPaths {
            padded: path.to_path_buf(),
            highlighted,
        }))
    }
}

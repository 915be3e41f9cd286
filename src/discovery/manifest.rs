//! Project manifest (tpadder.yaml) parsing.
//!
//! The manifest holds per-project defaults for the pad settings and output
//! location. Every field is optional; command-line flags take precedence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TpError};
use crate::types::{Colour, PadConfig, PadOptions};

/// Project manifest loaded from tpadder.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Output directory for padded sheets.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Tile edge length in pixels.
    pub block_size: Option<u32>,

    /// Gutter width in pixels.
    pub gutter: Option<u32>,

    /// Also write the `_Highlighted` variant.
    pub highlight: Option<bool>,

    /// Highlight colour, as hex or a colour name.
    pub highlight_colour: Option<String>,

    /// Patterns to exclude when scanning directories.
    pub excludes: Vec<String>,
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            output: default_output(),
            block_size: None,
            gutter: None,
            highlight: None,
            highlight_colour: None,
            excludes: vec![],
        }
    }
}

impl Manifest {
    /// Load manifest from a tpadder.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TpError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| TpError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check tpadder.yaml syntax".to_string()),
        })
    }

    /// Resolve pad options from the manifest, falling back to built-in
    /// defaults for anything it leaves out.
    pub fn pad_options(&self) -> Result<PadOptions> {
        let defaults = PadOptions::default();

        let colour = match &self.highlight_colour {
            Some(s) => Colour::parse(s)?,
            None => defaults.colour,
        };

        let config = PadConfig::new(
            self.block_size.unwrap_or(defaults.config.block_size),
            self.gutter.unwrap_or(defaults.config.gutter),
        )?;

        Ok(PadOptions {
            config,
            colour,
            highlight: self.highlight.unwrap_or(defaults.highlight),
        })
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.excludes
            .iter()
            .any(|pattern| Self::matches_pattern(&path_str, pattern))
    }

    /// Simple glob pattern matching.
    fn matches_pattern(path: &str, pattern: &str) -> bool {
        if let Some(suffix) = pattern.strip_prefix("**/") {
            // **/dir/* matches anything inside dir anywhere in the path
            if let Some(dir) = suffix.strip_suffix("/*") {
                return path.starts_with(&format!("{}/", dir))
                    || path.contains(&format!("/{}/", dir));
            }
            return path.contains(suffix);
        }

        if let Some(suffix) = pattern.strip_prefix('*') {
            if !pattern.contains('/') {
                return path.ends_with(suffix);
            }
        }

        if let Some(prefix) = pattern.strip_suffix("/*") {
            return path.starts_with(&format!("{}/", prefix))
                || path.contains(&format!("/{}/", prefix));
        }

        path.contains(pattern)
    }
}

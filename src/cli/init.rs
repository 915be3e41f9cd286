//! Init command implementation.
//!
//! Writes a `tpadder.yaml` manifest holding the default pad settings.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::discovery::{scan_directory, Manifest, MANIFEST_FILENAME};
use crate::error::{Result, TpError};
use crate::output::{display_path, plural, Printer};
use crate::render::HIGHLIGHT_SUFFIX;
use crate::types::{Colour, DEFAULT_BLOCK_SIZE, DEFAULT_GUTTER};

use super::preview::PREVIEW_SUFFIX;

/// Initialize a tpadder project by generating a tpadder.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing tpadder.yaml
    #[arg(long)]
    pub force: bool,
}

/// Manifest text with every setting spelled out at its default.
fn default_manifest_yaml() -> String {
    let mut yaml = String::new();
    yaml.push_str("output: dist\n");
    yaml.push_str(&format!("block_size: {}\n", DEFAULT_BLOCK_SIZE));
    yaml.push_str(&format!("gutter: {}\n", DEFAULT_GUTTER));
    yaml.push_str("highlight: false\n");
    yaml.push_str(&format!("highlight_colour: \"{}\"\n", Colour::WHITE));
    yaml.push_str("excludes:\n");
    yaml.push_str("  - \"dist/*\"\n");
    yaml.push_str(&format!("  - \"*{}.png\"\n", HIGHLIGHT_SUFFIX));
    yaml.push_str(&format!("  - \"*{}.png\"\n", PREVIEW_SUFFIX));
    yaml
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    // Check for existing manifest
    if manifest_path.exists() && !args.force {
        return Err(TpError::Batch {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let yaml = default_manifest_yaml();
    let manifest = Manifest::parse(&yaml)?;

    printer.status("Scanning", &display_path(&args.path));
    let sheets = scan_directory(&args.path, &manifest);

    fs::write(&manifest_path, &yaml).map_err(|e| TpError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    printer.success(
        "Created",
        &format!(
            "{} ({} found)",
            MANIFEST_FILENAME,
            plural(sheets.len(), "sheet", "sheets")
        ),
    );

    Ok(())
}

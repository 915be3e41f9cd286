//! Preview command implementation.
//!
//! Loads sheets into a session and writes one preview strip per sheet
//! showing the original, padded and highlighted versions.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::{collect_inputs, find_manifest};
use crate::error::{Result, TpError};
use crate::output::{display_path, plural, Printer};
use crate::render::{preview_strip, write_png, DEFAULT_PREVIEW_SIZE};
use crate::session::Session;

use super::SettingsArgs;

/// Suffix added to the file stem of preview images.
pub const PREVIEW_SUFFIX: &str = "_Preview";

/// Render original, padded and highlighted sheets side by side
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Tile sheets to preview (PNG files or directories)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output directory [default: manifest output, or dist]
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Longest side of each preview panel in pixels (0 = full size)
    #[arg(long, default_value_t = DEFAULT_PREVIEW_SIZE)]
    pub max_size: u32,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

pub fn run(args: PreviewArgs, printer: &Printer) -> Result<()> {
    let (manifest, _) = find_manifest(args.settings.config.as_deref(), Path::new("."))?;
    let options = args.settings.resolve(&manifest)?;

    let inputs = collect_inputs(&args.inputs, &manifest);
    if inputs.is_empty() {
        return Err(TpError::Batch {
            message: "No tile sheets found".to_string(),
            help: Some("Pass PNG files or directories that contain them".to_string()),
        });
    }

    let mut session = Session::new(options);
    let mut failed = 0;

    for input in &inputs {
        match session.load(input) {
            Ok(sheet) => printer.status(
                "Loaded",
                &format!(
                    "{} ({}x{} -> {}x{})",
                    display_path(input),
                    sheet.original.width(),
                    sheet.original.height(),
                    sheet.padded.width(),
                    sheet.padded.height()
                ),
            ),
            Err(e) => {
                printer.error("Failed", &e.to_string());
                failed += 1;
            }
        }
    }

    let dir = args.output.unwrap_or_else(|| manifest.output.clone());
    if !session.is_empty() && !dir.exists() {
        fs::create_dir_all(&dir).map_err(|e| TpError::Io {
            path: dir.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    for sheet in session.sheets() {
        let strip = preview_strip(
            &[&sheet.original, &sheet.padded, &sheet.highlighted],
            args.max_size,
        );
        let target = dir.join(format!("{}{}.png", sheet.name, PREVIEW_SUFFIX));

        match write_png(&strip, &target) {
            Ok(()) => printer.detail("Wrote", &display_path(&target)),
            Err(e) => {
                printer.error("Failed", &e.to_string());
                failed += 1;
            }
        }
    }

    let total = inputs.len();
    if failed == 0 {
        printer.success("Finished", &format!("previewed {}", plural(total, "sheet", "sheets")));
        Ok(())
    } else {
        Err(TpError::Batch {
            message: format!("{} of {} failed", failed, plural(total, "sheet", "sheets")),
            help: None,
        })
    }
}

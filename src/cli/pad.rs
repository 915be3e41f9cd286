//! Pad command implementation.
//!
//! Pads every input sheet and writes the results, optionally with a
//! highlighted variant beside each one.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::batch::{run_batch, Job};
use crate::discovery::{collect_inputs, find_manifest, is_png, Manifest};
use crate::error::{Result, TpError};
use crate::output::{display_path, plural, Printer};

use super::SettingsArgs;

/// Pad tile sheets with transparent gutters
#[derive(Args, Debug)]
pub struct PadArgs {
    /// Tile sheets to pad (PNG files or directories)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output file for a single sheet, or output directory [default: dist]
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Print a JSON report of every sheet to stdout
    #[arg(long)]
    pub json: bool,
}

/// Where padded sheets are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// A single sheet saved at exactly this path.
    File(PathBuf),
    /// Each sheet saved as `<dir>/<stem>.png`.
    Directory(PathBuf),
}

impl Destination {
    /// A `.png` output with exactly one input names a file; anything else
    /// is a directory, falling back to the manifest's output directory.
    pub fn resolve(inputs: &[PathBuf], output: Option<&Path>, manifest: &Manifest) -> Self {
        match output {
            Some(path) if inputs.len() == 1 && is_png(path) => Self::File(path.to_path_buf()),
            Some(path) => Self::Directory(path.to_path_buf()),
            None => Self::Directory(manifest.output.clone()),
        }
    }

    /// Pair every input with its output path.
    pub fn jobs(&self, inputs: &[PathBuf]) -> Vec<Job> {
        inputs
            .iter()
            .map(|source| {
                let output = match self {
                    Self::File(path) => path.clone(),
                    Self::Directory(dir) => {
                        let stem = source
                            .file_stem()
                            .map(|s| s.to_string_lossy().into_owned())
                            .unwrap_or_else(|| "sheet".to_string());
                        dir.join(format!("{}.png", stem))
                    }
                };
                Job {
                    source: source.clone(),
                    output,
                }
            })
            .collect()
    }
}

pub fn run(args: PadArgs, printer: &Printer) -> Result<()> {
    let (manifest, manifest_path) = find_manifest(args.settings.config.as_deref(), Path::new("."))?;
    if let Some(path) = &manifest_path {
        printer.detail("Manifest", &display_path(path));
    }

    let options = args.settings.resolve(&manifest)?;
    if printer.is_verbose() {
        let mut settings = format!(
            "{}px blocks, {}px gutter",
            options.config.block_size, options.config.gutter
        );
        if options.highlight {
            settings.push_str(&format!(", highlight {}", options.colour));
        }
        printer.detail("Settings", &settings);
    }

    let inputs = collect_inputs(&args.inputs, &manifest);
    if inputs.is_empty() {
        return Err(TpError::Batch {
            message: "No tile sheets found".to_string(),
            help: Some("Pass PNG files or directories that contain them".to_string()),
        });
    }

    let destination = Destination::resolve(&inputs, args.output.as_deref(), &manifest);

    // Create output directory if needed
    if let Destination::Directory(dir) = &destination {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| TpError::Io {
                path: dir.clone(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }
    }

    let jobs = destination.jobs(&inputs);
    let report = run_batch(&jobs, &options, printer);

    if args.json {
        println!("{}", report.to_json()?);
    }

    if report.is_success() {
        printer.success(
            "Finished",
            &format!("padded {}", plural(report.total, "sheet", "sheets")),
        );
        Ok(())
    } else {
        printer.warning(
            "Finished",
            &format!("padded {} of {} sheets", report.succeeded, report.total),
        );
        Err(TpError::Batch {
            message: format!(
                "{} of {} failed",
                report.failed(),
                plural(report.total, "sheet", "sheets")
            ),
            help: Some("Earlier messages name each failing sheet".to_string()),
        })
    }
}

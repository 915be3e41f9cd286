//! Batch processing of many tile sheets.
//!
//! Each sheet is decoded, padded and written independently. A failure is
//! recorded against its own item and the batch moves on, so the caller can
//! report "N of M" instead of stopping at the first bad file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Result, TpError};
use crate::output::{display_path, plural, Printer};
use crate::render::{highlighted_and_padded, highlighted_path, load_raster, pad, write_png};
use crate::types::{BlockGrid, PadOptions};

/// One sheet to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub source: PathBuf,
    /// Where the padded sheet goes; the highlighted variant sits beside it.
    pub output: PathBuf,
}

/// Outcome of one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchItem {
    pub source: PathBuf,
    pub output: PathBuf,
    pub highlighted: Option<PathBuf>,
    pub error: Option<String>,
}

impl BatchItem {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of a whole batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub total: usize,
    pub succeeded: usize,
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    pub fn failed(&self) -> usize {
        self.total - self.succeeded
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    fn push(&mut self, item: BatchItem) {
        self.total += 1;
        if item.is_success() {
            self.succeeded += 1;
        }
        self.items.push(item);
    }

    /// Serialize the report as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| TpError::Batch {
            message: format!("Failed to serialize batch report: {}", e),
            help: None,
        })
    }
}

/// Pad one sheet and write it out.
///
/// Returns the highlighted output path when one was written.
pub fn process_sheet(job: &Job, options: &PadOptions, printer: &Printer) -> Result<Option<PathBuf>> {
    let source = load_raster(&job.source)?;
    let display = display_path(&job.source);

    let grid = BlockGrid::new(source.width(), source.height(), &options.config)?;
    let (rx, ry) = grid.remainder();
    if grid.block_count() == 0 {
        printer.warning(
            "Warning",
            &format!(
                "{} is smaller than one {}px block; output has no tiles",
                display, grid.block_size
            ),
        );
    } else if rx > 0 || ry > 0 {
        printer.warning(
            "Warning",
            &format!(
                "{} is not a multiple of {}px; dropping {} trailing columns and {} trailing rows",
                display, grid.block_size, rx, ry
            ),
        );
    }

    let padded = pad(&source, &options.config)?;
    printer.status(
        "Padding",
        &format!(
            "{} ({}x{} -> {}x{}, {})",
            display,
            source.width(),
            source.height(),
            padded.width(),
            padded.height(),
            plural(grid.block_count() as usize, "block", "blocks")
        ),
    );
    write_png(&padded, &job.output)?;
    printer.detail("Wrote", &display_path(&job.output));

    if !options.highlight {
        return Ok(None);
    }

    let highlighted = highlighted_and_padded(&source, options.colour, &options.config)?;
    let target = highlighted_path(&job.output);
    write_png(&highlighted, &target)?;
    printer.detail("Wrote", &format!("{} ({})", display_path(&target), options.colour));

    Ok(Some(target))
}

/// Absolute form of a path that may not exist yet.
fn resolved(path: &Path) -> PathBuf {
    if let Ok(path) = path.canonicalize() {
        return path;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            parent
                .canonicalize()
                .map(|dir| dir.join(name))
                .unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

/// Tracks every file a batch reads and writes.
///
/// A job may not write over any sheet in the batch, nor over a file an
/// earlier job already wrote.
struct OutputClaims {
    sources: HashSet<PathBuf>,
    written: HashSet<PathBuf>,
}

impl OutputClaims {
    fn new(jobs: &[Job]) -> Self {
        Self {
            sources: jobs.iter().map(|job| resolved(&job.source)).collect(),
            written: HashSet::new(),
        }
    }

    fn claim(&mut self, job: &Job, options: &PadOptions) -> Result<()> {
        let mut targets = vec![job.output.clone()];
        if options.highlight {
            targets.push(highlighted_path(&job.output));
        }
        let resolved_targets: Vec<PathBuf> = targets.iter().map(|t| resolved(t)).collect();

        for (target, path) in targets.iter().zip(&resolved_targets) {
            if self.sources.contains(path) {
                return Err(TpError::Conflict {
                    path: target.clone(),
                    message: "it is one of the input sheets".to_string(),
                    help: Some("Choose an output directory outside the inputs".to_string()),
                });
            }
            if self.written.contains(path) {
                return Err(TpError::Conflict {
                    path: target.clone(),
                    message: "an earlier sheet in this batch was written there".to_string(),
                    help: Some("Rename one of the sheets that share this file name".to_string()),
                });
            }
        }

        self.written.extend(resolved_targets);
        Ok(())
    }
}

/// Run every job, recording each outcome.
///
/// Jobs whose output would replace an input sheet or another job's output
/// fail without writing anything.
pub fn run_batch(jobs: &[Job], options: &PadOptions, printer: &Printer) -> BatchReport {
    let mut report = BatchReport::default();
    let mut claims = OutputClaims::new(jobs);

    for job in jobs {
        let outcome = claims
            .claim(job, options)
            .and_then(|()| process_sheet(job, options, printer));
        let item = match outcome {
            Ok(highlighted) => BatchItem {
                source: job.source.clone(),
                output: job.output.clone(),
                highlighted,
                error: None,
            },
            Err(e) => {
                printer.error("Failed", &e.to_string());
                BatchItem {
                    source: job.source.clone(),
                    output: job.output.clone(),
                    highlighted: None,
                    error: Some(e.to_string()),
                }
            }
        };
        report.push(item);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Colour;
    use image::{Rgba, RgbaImage};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn red_sheet(path: &std::path::Path, width: u32, height: u32) {
        RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_process_sheet_writes_padded() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("tiles.png");
        red_sheet(&source, 32, 32);

        let job = Job {
            source,
            output: dir.path().join("out.png"),
        };
        let highlighted = process_sheet(&job, &PadOptions::default(), &Printer::new()).unwrap();

        assert!(highlighted.is_none());
        let out = image::open(&job.output).unwrap().to_rgba8();
        assert_eq!(out.dimensions(), (34, 34));
        assert!(!dir.path().join("out_Highlighted.png").exists());
    }

    #[test]
    fn test_process_sheet_writes_highlighted() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("tiles.png");
        red_sheet(&source, 32, 16);

        let options = PadOptions {
            highlight: true,
            colour: Colour::rgb(0, 255, 0),
            ..Default::default()
        };
        let job = Job {
            source,
            output: dir.path().join("out.png"),
        };
        let highlighted = process_sheet(&job, &options, &Printer::new()).unwrap();

        let expected = dir.path().join("out_Highlighted.png");
        assert_eq!(highlighted, Some(expected.clone()));
        let img = image::open(&expected).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (34, 16));
        assert_eq!(img.get_pixel(0, 0).0, [0, 255, 0, 255]);
    }

    #[test]
    fn test_batch_continues_after_failure() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.png");
        red_sheet(&good, 16, 16);

        let jobs = vec![
            Job {
                source: dir.path().join("missing.png"),
                output: dir.path().join("missing-out.png"),
            },
            Job {
                source: good,
                output: dir.path().join("good-out.png"),
            },
        ];

        let report = run_batch(&jobs, &PadOptions::default(), &Printer::new());

        assert_eq!(report.total, 2);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_success());
        assert!(report.items[0].error.is_some());
        assert!(report.items[1].is_success());
        assert!(dir.path().join("good-out.png").exists());
    }

    #[test]
    fn test_batch_encode_failure_is_per_item() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        red_sheet(&a, 16, 16);
        red_sheet(&b, 16, 16);

        let jobs = vec![
            Job {
                source: a,
                output: dir.path().join("no-such-dir").join("a.png"),
            },
            Job {
                source: b,
                output: dir.path().join("b-out.png"),
            },
        ];

        let report = run_batch(&jobs, &PadOptions::default(), &Printer::new());
        assert_eq!(report.succeeded, 1);
        assert!(report.items[0]
            .error
            .as_deref()
            .unwrap()
            .starts_with("Unable to save"));
    }

    #[test]
    fn test_process_sheet_smaller_than_one_block() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("crumb.png");
        red_sheet(&source, 10, 12);

        let job = Job {
            source,
            output: dir.path().join("crumb-out.png"),
        };
        process_sheet(&job, &PadOptions::default(), &Printer::new()).unwrap();

        // No tiles, but the canvas itself is not empty
        let img = image::open(&job.output).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (8, 10));
        assert!(img.pixels().all(|px| px[3] == 0));
    }

    #[test]
    fn test_batch_never_overwrites_a_source() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("tiles.png");
        red_sheet(&source, 32, 32);

        let jobs = vec![Job {
            source: source.clone(),
            output: source.clone(),
        }];
        let report = run_batch(&jobs, &PadOptions::default(), &Printer::new());

        assert_eq!(report.succeeded, 0);
        assert!(report.items[0]
            .error
            .as_deref()
            .unwrap()
            .starts_with("Refusing to write"));
        let kept = image::open(&source).unwrap().to_rgba8();
        assert_eq!(kept.dimensions(), (32, 32));
    }

    #[test]
    fn test_batch_output_clobbering_a_later_source_is_refused() {
        let dir = tempdir().unwrap();
        let art = dir.path().join("art");
        std::fs::create_dir_all(&art).unwrap();
        let first = dir.path().join("grass.png");
        let second = art.join("grass.png");
        red_sheet(&first, 32, 32);
        red_sheet(&second, 16, 16);

        let jobs = vec![
            Job {
                source: first,
                output: second.clone(),
            },
            Job {
                source: second.clone(),
                output: dir.path().join("grass-out.png"),
            },
        ];
        let report = run_batch(&jobs, &PadOptions::default(), &Printer::new());

        assert_eq!(report.succeeded, 1);
        assert!(report.items[0].error.is_some());
        assert!(report.items[1].is_success());
        let kept = image::open(&second).unwrap().to_rgba8();
        assert_eq!(kept.dimensions(), (16, 16));
    }

    #[test]
    fn test_batch_shared_output_fails_second_job() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        red_sheet(&a, 32, 32);
        red_sheet(&b, 16, 16);
        let output = dir.path().join("out.png");

        let jobs = vec![
            Job {
                source: a,
                output: output.clone(),
            },
            Job {
                source: b,
                output: output.clone(),
            },
        ];
        let report = run_batch(&jobs, &PadOptions::default(), &Printer::new());

        assert_eq!(report.succeeded, 1);
        assert!(report.items[0].is_success());
        assert!(report.items[1]
            .error
            .as_deref()
            .unwrap()
            .contains("an earlier sheet in this batch"));
        // The first sheet's result survives
        let img = image::open(&output).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (34, 34));
    }

    #[test]
    fn test_batch_highlight_may_not_replace_a_source() {
        let dir = tempdir().unwrap();
        let tiles = dir.path().join("tiles.png");
        let outline = dir.path().join("out_Highlighted.png");
        red_sheet(&tiles, 16, 16);
        red_sheet(&outline, 16, 16);

        let options = PadOptions {
            highlight: true,
            ..Default::default()
        };
        let jobs = vec![
            Job {
                source: tiles,
                output: dir.path().join("out.png"),
            },
            Job {
                source: outline,
                output: dir.path().join("other.png"),
            },
        ];
        let report = run_batch(&jobs, &options, &Printer::new());

        assert!(report.items[0].error.is_some());
        assert!(!dir.path().join("out.png").exists());
        assert!(report.items[1].is_success());
    }

    #[test]
    fn test_report_json() {
        let mut report = BatchReport::default();
        report.push(BatchItem {
            source: PathBuf::from("art/grass.png"),
            output: PathBuf::from("dist/grass.png"),
            highlighted: Some(PathBuf::from("dist/grass_Highlighted.png")),
            error: None,
        });
        report.push(BatchItem {
            source: PathBuf::from("art/broken.png"),
            output: PathBuf::from("dist/broken.png"),
            highlighted: None,
            error: Some("Unable to load art/broken.png: file not found".to_string()),
        });

        insta::assert_json_snapshot!(report, @r###"
        {
          "total": 2,
          "succeeded": 1,
          "items": [
            {
              "source": "art/grass.png",
              "output": "dist/grass.png",
              "highlighted": "dist/grass_Highlighted.png",
              "error": null
            },
            {
              "source": "art/broken.png",
              "output": "dist/broken.png",
              "highlighted": null,
              "error": "Unable to load art/broken.png: file not found"
            }
          ]
        }
        "###);
    }
}

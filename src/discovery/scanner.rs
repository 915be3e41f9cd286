//! File system scanner for tile sheet inputs.
//!
//! Expands command-line inputs into PNG files: files are taken as given,
//! directories are walked recursively.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::manifest::Manifest;

/// Check whether a path looks like a PNG file (case-insensitive extension).
pub fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

/// Scan a directory for PNG files, sorted by path.
pub fn scan_directory(root: &Path, manifest: &Manifest) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_png(p) && !manifest.is_excluded(p.strip_prefix(root).unwrap_or(p)))
        .collect();

    found.sort();
    found
}

/// Expand input paths into the list of sheets to process.
///
/// Explicit files are kept in the order given, even without a `.png`
/// extension or when they match an exclude pattern, so the decoder can
/// report on them. Paths that do not exist are kept as well; they fail
/// later as decode errors for that item alone.
pub fn collect_inputs(paths: &[PathBuf], manifest: &Manifest) -> Vec<PathBuf> {
    let mut inputs = Vec::new();

    for path in paths {
        if path.is_dir() {
            inputs.extend(scan_directory(path, manifest));
        } else {
            inputs.push(path.clone());
        }
    }

    inputs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_png() {
        assert!(is_png(Path::new("tiles.png")));
        assert!(is_png(Path::new("TILES.PNG")));
        assert!(!is_png(Path::new("tiles.jpg")));
        assert!(!is_png(Path::new("tiles")));
    }

    #[test]
    fn test_scan_directory_recursive_and_sorted() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.png"), b"").unwrap();
        fs::write(dir.path().join("a.png"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::write(dir.path().join("nested/c.PNG"), b"").unwrap();

        let found = scan_directory(dir.path(), &Manifest::default());

        assert_eq!(
            found,
            vec![
                dir.path().join("a.png"),
                dir.path().join("b.png"),
                dir.path().join("nested/c.PNG"),
            ]
        );
    }

    #[test]
    fn test_scan_directory_honours_excludes() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("tiles.png"), b"").unwrap();
        fs::write(dir.path().join("tiles_Highlighted.png"), b"").unwrap();

        let manifest = Manifest {
            excludes: vec!["*_Highlighted.png".to_string()],
            ..Default::default()
        };

        assert_eq!(
            scan_directory(dir.path(), &manifest),
            vec![dir.path().join("tiles.png")]
        );
    }

    #[test]
    fn test_collect_inputs_keeps_explicit_files() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sheets")).unwrap();
        fs::write(dir.path().join("sheets/x.png"), b"").unwrap();

        let missing = dir.path().join("missing.png");
        let inputs = collect_inputs(
            &[missing.clone(), dir.path().join("sheets")],
            &Manifest::default(),
        );

        assert_eq!(inputs, vec![missing, dir.path().join("sheets/x.png")]);
    }
}

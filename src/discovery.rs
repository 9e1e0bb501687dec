//! Discovery Module
//!
//! Expands command-line inputs into the ordered list of component files:
//! files are taken as given, directories are scanned recursively for `.html`.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const COMPONENT_EXTENSION: &str = "html";

/// Recursively find all component files in a directory, sorted by path.
pub fn find_component_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == COMPONENT_EXTENSION) {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// Expands `args` in order, dropping repeated paths. Explicit file
/// arguments are kept whatever their extension.
pub fn collect_inputs<P: AsRef<Path>>(args: &[P]) -> io::Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut inputs = Vec::new();

    for arg in args {
        let arg = arg.as_ref();
        let metadata = std::fs::metadata(arg)
            .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", arg.display(), e)))?;

        let found = if metadata.is_dir() {
            find_component_files(arg)?
        } else {
            vec![arg.to_path_buf()]
        };

        for path in found {
            if seen.insert(path.clone()) {
                inputs.push(path);
            }
        }
    }

    Ok(inputs)
}

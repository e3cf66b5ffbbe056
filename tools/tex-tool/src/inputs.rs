//! Input collection

use std::path::PathBuf;

use tex_common::is_sidecar_path;
use walkdir::WalkDir;

/// Expand command-line paths into the list of files to convert
///
/// Directories are walked recursively in file-name order. UV sidecars are
/// never inputs of their own, they travel with their image.
pub fn collect_inputs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut inputs = Vec::new();

    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let file = entry.path();
                if entry.file_type().is_file() && !is_sidecar_path(file) {
                    inputs.push(file.to_path_buf());
                }
            }
        } else if is_sidecar_path(path) {
            tracing::debug!("Ignoring sidecar {:?}", path);
        } else {
            // Missing files are passed through and reported by the converter
            inputs.push(path.clone());
        }
    }

    inputs
}

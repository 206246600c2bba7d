//! Output directory housekeeping.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extensions of files this crate produces.
pub const GENERATED_EXTENSIONS: &[&str] = &["docx", "pdf"];

/// Files directly inside `dir` with the given extension (case-insensitive),
/// sorted by name.
pub fn files_with_extension(dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if has_extension(&path, extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Create `dir` if needed. With `clean`, previously generated documents in
/// it are removed first; other files are left alone.
///
/// Returns the number of files removed.
pub fn prepare_output_dir(dir: &Path, clean: bool) -> io::Result<usize> {
    fs::create_dir_all(dir)?;
    if !clean {
        return Ok(0);
    }

    let mut removed = 0;
    for extension in GENERATED_EXTENSIONS {
        for path in files_with_extension(dir, extension)? {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }
    if removed > 0 {
        tracing::info!(dir = %dir.display(), removed, "cleared previous output");
    }
    Ok(removed)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

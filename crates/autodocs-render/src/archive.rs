//! Bundling output files into a single zip.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::ArchiveError;
use crate::workdir::files_with_extension;

/// Default archive name for converted PDFs.
pub const DEFAULT_ARCHIVE_NAME: &str = "Completed_Docs.zip";

/// Zip every `extension` file directly inside `dir` into `dest`.
///
/// Entries are stored flat under their file names, in name order. Returns
/// the files added.
pub fn write_archive(dir: &Path, extension: &str, dest: &Path) -> Result<Vec<PathBuf>, ArchiveError> {
    let files = files_with_extension(dir, extension)?;
    write_archive_files(&files, dest)
}

/// Zip exactly `files` into `dest`, flat and in file name order.
pub fn write_archive_files(files: &[PathBuf], dest: &Path) -> Result<Vec<PathBuf>, ArchiveError> {
    let mut files = files.to_vec();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    files.dedup();

    let out = File::create(dest).map_err(|source| ArchiveError::Create {
        path: dest.to_path_buf(),
        source,
    })?;

    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(out);
    for path in &files {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        writer.start_file(name, options)?;
        let mut input = File::open(path)?;
        io::copy(&mut input, &mut writer)?;
    }
    writer.finish()?;

    tracing::info!(archive = %dest.display(), entries = files.len(), "archive written");
    Ok(files)
}

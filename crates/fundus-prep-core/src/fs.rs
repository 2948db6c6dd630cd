//! Directory listing, extension filters and copy-through.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Extensions accepted by the cropping stage.
pub const CROP_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".bmp", ".tif", ".tiff"];

/// Extensions accepted by the augmentation stage.
///
/// Differs from [`CROP_EXTENSIONS`]: `.gif` is accepted here, `.tif` is not.
pub const AUGMENT_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".bmp", ".gif", ".tiff"];

/// Case-insensitive suffix match of `filename` against `extensions`.
pub fn has_supported_extension(filename: &str, extensions: &[&str]) -> bool {
    let lower = filename.to_ascii_lowercase();
    extensions.iter().any(|ext| lower.ends_with(ext))
}

/// Split a filename into stem and extension, keeping the extension's dot.
///
/// Leading dots belong to the stem, so `.hidden` has no extension.
pub fn split_extension(filename: &str) -> (&str, &str) {
    let trimmed = filename.trim_start_matches('.');
    let lead = filename.len() - trimmed.len();
    match trimmed.rfind('.') {
        Some(pos) => filename.split_at(lead + pos),
        None => (filename, ""),
    }
}

/// Names of the regular files in `dir`, sorted.
///
/// Symlinks count as the file they point to. Subdirectories, dangling links
/// and entries whose names are not valid UTF-8 are left out.
pub fn list_files(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        match fs::metadata(entry.path()) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => continue,
            Err(err) => {
                debug!("Skipping unreadable entry {:?}: {}", entry.file_name(), err);
                continue;
            }
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => debug!("Skipping non UTF-8 file name: {:?}", raw),
        }
    }
    names.sort();
    Ok(names)
}

/// Copy `src` into `dir` under its own file name, keeping its permissions
/// and modification time.
///
/// Fails without touching either file when the destination is the source
/// itself, e.g. when `dir` is the directory `src` lives in.
pub fn copy_into(src: &Path, dir: &Path) -> io::Result<PathBuf> {
    let name = src
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "source has no file name"))?;
    let dest = dir.join(name);
    if is_same_file(src, &dest)? {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("'{}' and '{}' are the same file", src.display(), dest.display()),
        ));
    }

    fs::copy(src, &dest)?;
    if let Err(err) = copy_modified_time(src, &dest) {
        debug!("Could not keep modification time of {}: {}", dest.display(), err);
    }
    Ok(dest)
}

fn copy_modified_time(src: &Path, dest: &Path) -> io::Result<()> {
    let modified = fs::metadata(src)?.modified()?;
    fs::File::open(dest)?.set_modified(modified)
}

fn is_same_file(a: &Path, b: &Path) -> io::Result<bool> {
    if !b.exists() {
        return Ok(false);
    }
    Ok(fs::canonicalize(a)? == fs::canonicalize(b)?)
}

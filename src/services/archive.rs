use crate::error::{MalpediaError, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve an archive entry name below `dest`. `..` may only climb back
/// out of directories the entry itself descended into.
pub fn safe_entry_path(dest: &Path, name: &str) -> Result<PathBuf> {
    let mut parts: Vec<&str> = Vec::new();
    for part in name.split(['/', '\\']) {
        match part {
            "" | "." => {}
            ".." => {
                if parts.pop().is_none() {
                    return Err(MalpediaError::IllegalPath(
                        dest.join(name).display().to_string(),
                    ));
                }
            }
            p if p.contains(':') => {
                return Err(MalpediaError::IllegalPath(
                    dest.join(name).display().to_string(),
                ))
            }
            p => parts.push(p),
        }
    }
    Ok(parts.iter().fold(dest.to_path_buf(), |acc, p| acc.join(p)))
}

/// Extract `src` into `dest`. Every entry name is checked before anything
/// is written; returns the written file paths relative to `dest`.
pub fn unzip(src: &Path, dest: &Path) -> Result<Vec<String>> {
    let mut archive = zip::ZipArchive::new(File::open(src)?)?;
    debug!("extracting {} ({} entries)", src.display(), archive.len());

    for name in archive.file_names() {
        safe_entry_path(dest, name)?;
    }

    fs::create_dir_all(dest)?;
    let mut written = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let path = safe_entry_path(dest, entry.name())?;
        if entry.is_dir() {
            fs::create_dir_all(&path)?;
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&path)?;
        io::copy(&mut entry, &mut out)?;
        written.push(
            path.strip_prefix(dest)
                .unwrap_or(&path)
                .display()
                .to_string(),
        );
    }
    Ok(written)
}

//! Atomic file writes with a fixed permission mode.
//!
//! All writes follow this pattern:
//! 1. Write content to `.{filename}.tmp` in the destination directory
//! 2. Set the permission mode and sync the file to disk
//! 3. Rename it over the destination
//!
//! The destination directory must already exist. On failure the temporary
//! file is removed and the destination is left untouched.

use crate::error::{Result, WrapperError};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Mode of every rendered file: owner read/write, group and other read.
pub const OUTPUT_MODE: u32 = 0o644;

/// Atomically write bytes to `path` with permission `mode`.
///
/// The mode is applied explicitly after creation, so the process umask does
/// not narrow it. On non-Unix platforms the mode is ignored.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8], mode: u32) -> Result<()> {
    let path = path.as_ref();
    let temp_path = generate_temp_path(path)?;

    write_and_sync(&temp_path, content, mode)?;
    atomic_replace(&temp_path, path)?;

    Ok(())
}

/// Generate a temporary file path in the same directory as the target.
fn generate_temp_path(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            WrapperError::io(
                "write output",
                target,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
            )
        })?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8], mode: u32) -> Result<()> {
    let mut file = create(path, mode)
        .map_err(|e| WrapperError::io("create temporary file", path, e))?;

    let result = file
        .write_all(content)
        .and_then(|()| set_mode(&file, mode))
        .and_then(|()| file.sync_all());

    if let Err(e) = result {
        let _ = fs::remove_file(path);
        return Err(WrapperError::io("write temporary file", path, e));
    }

    Ok(())
}

#[cfg(unix)]
fn create(path: &Path, mode: u32) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode)
        .open(path)
}

#[cfg(not(unix))]
fn create(path: &Path, _mode: u32) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

#[cfg(unix)]
fn set_mode(file: &File, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_file: &File, _mode: u32) -> std::io::Result<()> {
    Ok(())
}

/// Rename `source` over `target`, replacing any existing file.
fn atomic_replace(source: &Path, target: &Path) -> Result<()> {
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        WrapperError::io("replace output", target, e)
    })?;

    // Persist the directory entry as well
    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

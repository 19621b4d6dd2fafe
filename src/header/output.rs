// Atomic header write
//
// The text goes to a temp file next to the destination and is renamed over
// it, so a failed run never leaves a truncated header behind.

use crate::error::EmitError;
use std::fs::Permissions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Mode for headers that did not exist before (tempfile creates 0600)
#[cfg(unix)]
const NEW_HEADER_MODE: u32 = 0o644;

/// Replace `path` with `contents`, creating missing parent directories.
///
/// An existing header keeps its permissions. Directories created here are
/// removed again if the write fails.
pub fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), EmitError> {
    let write_error = |error| EmitError::OutputWrite {
        path: path.to_path_buf(),
        error,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let created = CreatedDirs::create(parent).map_err(write_error)?;

    let mut file = NamedTempFile::new_in(parent).map_err(write_error)?;
    file.write_all(contents).map_err(write_error)?;
    if let Some(permissions) = target_permissions(path).map_err(write_error)? {
        file.as_file().set_permissions(permissions).map_err(write_error)?;
    }
    file.as_file().sync_all().map_err(write_error)?;

    // The temp file is removed on drop if persisting fails
    file.persist(path).map_err(|e| write_error(e.error))?;
    created.keep();

    log::debug!("Wrote {} bytes to {:?}", contents.len(), path);
    Ok(())
}

/// Permissions the written header should end up with, if they differ from the temp file's
fn target_permissions(path: &Path) -> io::Result<Option<Permissions>> {
    match std::fs::metadata(path) {
        Ok(metadata) => Ok(Some(metadata.permissions())),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(new_header_permissions()),
        Err(error) => Err(error),
    }
}

#[cfg(unix)]
fn new_header_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(NEW_HEADER_MODE))
}

#[cfg(not(unix))]
fn new_header_permissions() -> Option<Permissions> {
    None
}

/// Directories created for an output path, removed on drop unless kept
struct CreatedDirs {
    /// Deepest first
    dirs: Vec<PathBuf>,
}

impl CreatedDirs {
    fn create(dir: &Path) -> io::Result<Self> {
        let dirs: Vec<PathBuf> = dir
            .ancestors()
            .take_while(|ancestor| !ancestor.as_os_str().is_empty() && !ancestor.exists())
            .map(Path::to_path_buf)
            .collect();

        let created = Self { dirs };
        std::fs::create_dir_all(dir)?;
        Ok(created)
    }

    fn keep(mut self) {
        self.dirs.clear();
    }
}

impl Drop for CreatedDirs {
    fn drop(&mut self) {
        for dir in &self.dirs {
            // Only empty directories go; anything else stops the cleanup
            if std::fs::remove_dir(dir).is_err() {
                break;
            }
        }
    }
}

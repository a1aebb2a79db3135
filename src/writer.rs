//! Writing rendered output to disk.
//!
//! [`write_atomic`] stages the bytes in a temporary file next to the target
//! and renames it into place, so readers of the target only ever see the old
//! contents or the complete new contents. The replacement keeps the mode of
//! the file it replaces; a new file gets the usual umask-filtered default.

use std::io::Write;
use std::path::Path;

use tempfile::Builder;
use tracing::debug;

use crate::error::{ReduceError, Result};

/// Replace the file at `path` with `bytes`.
///
/// # Errors
///
/// Returns [`ReduceError::Output`] if the directory of `path` does not exist
/// or is not writable, or if the rename fails.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let output_error = |source| ReduceError::Output {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let existing = std::fs::metadata(path).ok().map(|meta| meta.permissions());

    let mut staged = staging_builder(existing.is_some())
        .tempfile_in(dir)
        .map_err(output_error)?;
    if let Some(permissions) = existing {
        staged
            .as_file()
            .set_permissions(permissions)
            .map_err(output_error)?;
    }
    staged.write_all(bytes).map_err(output_error)?;
    staged.as_file().sync_all().map_err(output_error)?;
    debug!(staged = %staged.path().display(), target = %path.display(), "renaming staged output");
    staged.persist(path).map_err(|e| output_error(e.error))?;
    Ok(())
}

#[cfg(unix)]
fn staging_builder(replacing: bool) -> Builder<'static, 'static> {
    use std::os::unix::fs::PermissionsExt;

    let mut builder = Builder::new();
    if !replacing {
        // staged files are 0600 otherwise
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    builder
}

#[cfg(not(unix))]
fn staging_builder(_replacing: bool) -> Builder<'static, 'static> {
    Builder::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_atomic(&path, b"[]").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"[]");
    }

    #[test]
    fn test_write_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "old contents that are longer").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_write_leaves_no_staging_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_atomic(&path, b"[]").unwrap();
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_replace_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        for mode in [0o644, 0o640] {
            std::fs::write(&path, "old").unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).unwrap();

            write_atomic(&path, b"new").unwrap();

            let actual = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
            assert_eq!(actual, mode);
            assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_uses_default_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_atomic(&path, b"[]").unwrap();

        // 0o666 filtered by the process umask, which never adds bits
        let actual = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(actual & !0o666, 0);
        assert!(actual & 0o600 == 0o600);
    }

    #[test]
    fn test_missing_directory_is_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");
        let err = write_atomic(&path, b"[]").unwrap_err();
        assert!(matches!(err, ReduceError::Output { .. }));
        assert!(err.to_string().contains("out.json"));
    }
}

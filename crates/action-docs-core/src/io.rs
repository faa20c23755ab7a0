use crate::error::{DocsError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Read a whole document into memory. A missing file is `NotFound`, not a
/// raw I/O error, so callers can skip it.
pub fn read_document(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(DocsError::NotFound(path.to_path_buf()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Atomically write `data` to `path` using a tempfile in the same directory.
///
/// The full content is flushed before the rename, so readers see either the
/// old document or the new one. The tempfile is removed if any step fails.
///
/// An existing document keeps its permissions, and a symlinked document is
/// written through to its target; the link itself is left in place.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let existing = path.exists();
    let target = if existing {
        std::fs::canonicalize(path)?
    } else {
        path.to_path_buf()
    };

    let dir = target.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    if existing {
        let permissions = std::fs::metadata(&target)?.permissions();
        tmp.as_file().set_permissions(permissions)?;
    }
    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(())
}

/// Persist `updated` only when it differs from `original`. Returns true if the
/// file was written.
pub fn write_if_changed(path: &Path, original: &str, updated: &str) -> Result<bool> {
    if original == updated {
        return Ok(false);
    }
    atomic_write(path, updated.as_bytes())?;
    Ok(true)
}

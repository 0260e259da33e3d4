//! Filesystem utilities.

use helmsift_types::Result;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::fs;

/// Expand a leading tilde to the home directory.
pub fn expand_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();

    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }

    path.to_path_buf()
}

/// Read entire file as string (slurp).
pub fn slurp(path: impl AsRef<Path>) -> Result<String> {
    fs::read_to_string(path).map_err(Into::into)
}

/// Read a file's bytes, treating a missing file as `None`.
pub fn read_if_exists(path: impl AsRef<Path>) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Replace a file's contents atomically.
///
/// The bytes go to a temporary file in the destination directory which is
/// then renamed over `path`, so readers never observe a half-written file.
/// Missing parent directories are created.
pub fn write_atomic(path: impl AsRef<Path>, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;

    let mut temp = tempfile::NamedTempFile::new_in(&dir)?;
    temp.write_all(contents)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_if_exists_missing() {
        let dir = TempDir::new().unwrap();
        assert_eq!(read_if_exists(dir.path().join("nope.yaml")).unwrap(), None);
    }

    #[test]
    fn test_write_atomic_creates_parents_and_replaces() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("k8s").join("out.yaml");

        write_atomic(&target, b"first").unwrap();
        assert_eq!(slurp(&target).unwrap(), "first");

        write_atomic(&target, b"second").unwrap();
        assert_eq!(read_if_exists(&target).unwrap(), Some(b"second".to_vec()));

        let leftovers = fs::read_dir(target.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_expand_path_without_tilde() {
        assert_eq!(expand_path("bin/helm"), PathBuf::from("bin/helm"));
    }
}

//! Idempotent output writing.
//!
//! The output file is only touched when its content would change, so file
//! watchers downstream don't see a modification on every run.

use helmsift_core::util::{read_if_exists, write_atomic};
use helmsift_types::Result;
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// What happened to the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// New content was written (file created or replaced)
    Written,
    /// Existing content was byte-for-byte identical; nothing was written
    Unchanged,
}

impl WriteOutcome {
    /// Whether the file was written.
    pub fn was_written(&self) -> bool {
        matches!(self, WriteOutcome::Written)
    }
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteOutcome::Written => write!(f, "written"),
            WriteOutcome::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// Hex-encoded SHA-256 of `bytes`.
pub fn digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Write `content` to `path` unless the file already holds exactly that.
pub fn write_if_changed(path: impl AsRef<Path>, content: &str) -> Result<WriteOutcome> {
    let path = path.as_ref();
    let new = content.as_bytes();

    match read_if_exists(path)? {
        Some(existing) if existing == new => {
            debug!("{} up to date (sha256 {})", path.display(), digest(new));
            return Ok(WriteOutcome::Unchanged);
        }
        Some(existing) => {
            debug!(
                "{} changed: sha256 {} -> {}",
                path.display(),
                digest(&existing),
                digest(new)
            );
        }
        None => {
            debug!("{} does not exist yet (sha256 {})", path.display(), digest(new));
        }
    }

    write_atomic(path, new)?;
    Ok(WriteOutcome::Written)
}

//! All-or-nothing file writes for exported cards.
//!
//! Bytes land in a hidden sibling temp file which is renamed over the target,
//! so a failed export never leaves a truncated PNG behind.

use std::io::{self, Write};
use std::path::Path;

use tempfile::Builder;

/// Write `bytes` to `path`, replacing any existing file.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut staged = Builder::new()
        .prefix(".limitless-card-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    staged.write_all(bytes)?;
    staged.as_file().sync_all()?;
    // The temp file is removed when `persist` fails and hands it back.
    staged.persist(path).map_err(|failed| failed.error)?;

    #[cfg(unix)]
    if let Err(err) = std::fs::File::open(dir).and_then(|handle| handle.sync_all()) {
        tracing::debug!(dir = %dir.display(), %err, "Directory sync after export failed");
    }
    Ok(())
}

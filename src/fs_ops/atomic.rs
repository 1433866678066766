//! Atomic rename helper.
//! - On Windows, removes an existing destination first (RenameFile doesn't overwrite).
//! - On Unix, best-effort fsync of the destination directory after rename.

use std::fs;
use std::io;
use std::path::Path;

use super::helpers::io_error_with_help_io;

pub fn try_atomic_move(src: &Path, dst: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        if let Err(e) = fs::remove_file(dst) {
            if e.kind() != io::ErrorKind::NotFound {
                return Err(io_error_with_help_io("remove existing destination", dst)(e));
            }
        }
    }

    fs::rename(src, dst).map_err(io_error_with_help_io("rename into place", dst))?;

    // Ignore fsync errors; the rename itself already succeeded.
    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        let _ = super::util::fsync_dir(parent);
    }

    Ok(())
}

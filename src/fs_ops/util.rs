#[cfg(unix)]
use std::fs::File;
#[cfg(unix)]
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Internal transient names start with this prefix.
pub(crate) const TEMP_PREFIX: &str = ".blueprints.";

pub(crate) fn unique_temp_path(dst_dir: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let thread = format!("{:?}", std::thread::current().id())
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();
    let tmp_name = format!("{TEMP_PREFIX}{pid}.{thread}.{nanos}.tmp");
    dst_dir.join(tmp_name)
}

#[cfg(unix)]
pub(super) fn fsync_dir(dir: &Path) -> io::Result<()> {
    let f = File::open(dir)?;
    f.sync_all()
}

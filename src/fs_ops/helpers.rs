//! I/O error enrichment.
//!
//! Small adapters that add the operation, the path and a platform-aware hint to
//! an `io::Error`, for use with `map_err` in both `io::Result` and
//! `anyhow::Result` code paths:
//!
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create dir", dir))?;
//!   File::open(p).map_err(io_error_with_help_io("open file", p))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

fn hint_for_os_code(code: i32) -> Option<&'static str> {
    #[cfg(unix)]
    {
        match code {
            libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
            libc::ENOENT => Some("path not found; check the folder and file name"),
            libc::EEXIST => Some("already exists"),
            libc::ENOSPC => Some("insufficient space on device"),
            libc::EROFS => Some("read-only filesystem; cannot write here"),
            libc::EXDEV => Some("cross-filesystem; rename not possible"),
            libc::EISDIR => Some("is a directory; expected a file"),
            libc::ENOTDIR => Some("a path component is a file, not a folder"),
            libc::ENAMETOOLONG => Some("file name or path too long; shorten the destination name"),
            libc::EMFILE | libc::ENFILE => Some("too many open files"),
            _ => None,
        }
    }
    #[cfg(windows)]
    {
        match code {
            5 => Some("access denied; check permissions"),
            2 | 3 => Some("path not found; check the folder and file name"),
            32 => Some("sharing violation; file is in use"),
            80 => Some("already exists"),
            112 => Some("insufficient disk space"),
            206 => Some("file name or path too long; shorten the destination name"),
            _ => None,
        }
    }
}

fn hint_for_kind(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; check the folder and file name"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => Some("timed out; the operation may succeed on retry"),
        _ => None,
    }
}

/// Format `op 'path': error` plus a hint and, when present, the raw OS code.
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    let hint = match e.raw_os_error() {
        Some(code) => hint_for_os_code(code),
        None => hint_for_kind(e.kind()),
    };
    if let Some(h) = hint {
        msg.push_str(" (");
        msg.push_str(h);
        msg.push(')');
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

/// Adapter for anyhow::Result code.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}

/// Adapter for io::Result code: enriches the message and keeps the original
/// `ErrorKind` so callers can still classify the failure.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), build_message(op, path, &e))
}

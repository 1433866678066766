use std::io;
use std::path::Path;

use blueprints::fs_ops::{io_error_with_help, io_error_with_help_io};

#[test]
fn notfound_fallback_hint_includes_path() {
    let p = Path::new("/nonexistent/exports/daily.csv");
    let f = io_error_with_help("open", p);
    let err = f(io::Error::from(io::ErrorKind::NotFound));
    let msg = format!("{}", err);
    assert!(msg.contains("open"));
    assert!(msg.contains(p.to_string_lossy().as_ref()));
    assert!(msg.contains("path not found"));
}

#[cfg(unix)]
#[test]
fn enospc_hint_present() {
    let p = Path::new("/tmp/Archive.zip");
    let f = io_error_with_help("create archive", p);
    let err = f(io::Error::from_raw_os_error(libc::ENOSPC));
    let msg = format!("{}", err);
    assert!(msg.contains("insufficient space"), "msg was: {}", msg);
    assert!(msg.contains("os code"), "should include os code in message");
}

#[cfg(unix)]
#[test]
fn name_too_long_hint_mentions_destination() {
    let p = Path::new("/tmp");
    let f = io_error_with_help("write", p);
    let msg = format!("{}", f(io::Error::from_raw_os_error(libc::ENAMETOOLONG)));
    assert!(msg.contains("shorten the destination name"), "msg was: {}", msg);
}

#[test]
fn io_adapter_preserves_kind() {
    let p = Path::new("/tmp/out_1.csv");
    let f = io_error_with_help_io("create", p);
    let wrapped = f(io::Error::from(io::ErrorKind::AlreadyExists));
    assert_eq!(wrapped.kind(), io::ErrorKind::AlreadyExists);
    assert!(format!("{}", wrapped).contains("already exists"));
}

//! Streaming write into a destination file.
//!
//! The body is streamed into a temp file created next to the destination
//! (`create_new`, never clobbers), fsynced, then renamed over the destination.
//! A reader that fails half-way leaves the destination untouched.

use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use super::atomic::try_atomic_move;
use super::helpers::io_error_with_help_io;
use super::util::unique_temp_path;

const BUF_SIZE: usize = 1024 * 1024;

/// Stream `reader` into `dest`, returning the number of bytes written.
pub fn write_atomically(reader: &mut dyn Read, dest: &Path) -> io::Result<u64> {
    let dest_dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dest_dir)
        .map_err(io_error_with_help_io("create destination directory", dest_dir))?;

    let tmp_path = unique_temp_path(dest_dir);
    let written = copy_into_new(reader, &tmp_path)
        .map_err(io_error_with_help_io("copy to temporary file", &tmp_path));
    let bytes = match written {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
    };

    if let Err(e) = try_atomic_move(&tmp_path, dest) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(bytes)
}

fn copy_into_new(reader: &mut dyn Read, path: &Path) -> io::Result<u64> {
    let file = OpenOptions::new().write(true).create_new(true).open(path)?;
    let mut writer = BufWriter::with_capacity(BUF_SIZE, file);
    let bytes = io::copy(reader, &mut writer)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    struct Failing;

    impl Read for Failing {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("connection reset"))
        }
    }

    #[test]
    fn writes_and_creates_parents() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("a/b/out.csv");
        let n = write_atomically(&mut Cursor::new(b"id\n1\n".to_vec()), &dest).unwrap();
        assert_eq!(n, 5);
        assert_eq!(fs::read(&dest).unwrap(), b"id\n1\n");
    }

    #[test]
    fn overwrites_existing_destination() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("out.csv");
        fs::write(&dest, b"old").unwrap();
        write_atomically(&mut Cursor::new(b"new".to_vec()), &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"new");
    }

    #[test]
    fn failed_read_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("out.csv");
        let err = write_atomically(&mut Failing, &dest).unwrap_err();
        assert!(err.to_string().contains("copy to temporary file"));
        assert!(!dest.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

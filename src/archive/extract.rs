use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};
use zip::ZipArchive;

use crate::fs_ops::io_error_with_help;

use super::Compression;

/// Extract `archive_path` into `target_dir`, creating it when missing.
/// Entries that would land outside `target_dir` abort the extraction.
/// Returns the number of entries extracted.
pub fn decompress(archive_path: &Path, target_dir: &Path, compression: Compression) -> Result<usize> {
    let file = File::open(archive_path).map_err(io_error_with_help("open archive", archive_path))?;
    fs::create_dir_all(target_dir).map_err(io_error_with_help("create extraction folder", target_dir))?;

    let count = match compression {
        Compression::Zip => extract_zip(file, archive_path, target_dir)?,
        Compression::Tar => extract_tar(BufReader::new(file), archive_path, target_dir)?,
        Compression::TarGz => extract_tar(GzDecoder::new(BufReader::new(file)), archive_path, target_dir)?,
    };
    info!(archive = %archive_path.display(), target = %target_dir.display(), entries = count, "Archive extracted");
    Ok(count)
}

fn extract_zip(file: File, archive_path: &Path, target: &Path) -> Result<usize> {
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("read zip archive '{}'", archive_path.display()))?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .with_context(|| format!("read entry {index} of '{}'", archive_path.display()))?;
        let destination = target.join(sanitize_entry_path(entry.name())?);

        if entry.is_dir() {
            fs::create_dir_all(&destination).map_err(io_error_with_help("create directory", &destination))?;
            continue;
        }
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(io_error_with_help("create directory", parent))?;
        }
        let mut output = File::create(&destination).map_err(io_error_with_help("create file", &destination))?;
        io::copy(&mut entry, &mut output).map_err(io_error_with_help("extract entry", &destination))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&destination, fs::Permissions::from_mode(mode & 0o777))
                .map_err(io_error_with_help("set permissions", &destination))?;
        }
        debug!(entry = %destination.display(), "Extracted zip entry");
    }
    Ok(archive.len())
}

fn extract_tar<R: Read>(reader: R, archive_path: &Path, target: &Path) -> Result<usize> {
    let mut archive = tar::Archive::new(reader);
    let mut count = 0;
    for entry in archive
        .entries()
        .with_context(|| format!("read tar archive '{}'", archive_path.display()))?
    {
        let mut entry = entry.with_context(|| format!("read entry of '{}'", archive_path.display()))?;
        let name = entry.path()?.display().to_string();
        if !entry.unpack_in(target).with_context(|| format!("extract '{name}'"))? {
            bail!("Refusing archive entry outside the target folder: '{name}'");
        }
        debug!(entry = %name, "Extracted tar entry");
        count += 1;
    }
    Ok(count)
}

/// Relative path of a zip entry; absolute names and `..` segments are rejected.
fn sanitize_entry_path(entry: &str) -> Result<PathBuf> {
    let path = Path::new(entry);
    if path.is_absolute() || entry.starts_with('/') || entry.starts_with('\\') {
        bail!("Refusing absolute archive entry: '{entry}'");
    }
    let mut sanitized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(segment) => sanitized.push(segment),
            Component::CurDir => {}
            _ => bail!("Refusing archive entry with invalid segment: '{entry}'"),
        }
    }
    Ok(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn sanitize_rejects_escapes() {
        assert!(sanitize_entry_path("../evil.txt").is_err());
        assert!(sanitize_entry_path("/etc/passwd").is_err());
        assert!(sanitize_entry_path("a/../../b").is_err());
        assert_eq!(sanitize_entry_path("./a/b.csv").unwrap(), PathBuf::from("a/b.csv"));
    }

    #[test]
    fn zip_with_parent_segment_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let archive = temp.path().join("bad.zip");
        let mut zip = zip::ZipWriter::new(File::create(&archive).unwrap());
        zip.start_file("../escape.txt", zip::write::FileOptions::default()).unwrap();
        zip.write_all(b"x").unwrap();
        zip.finish().unwrap();

        let target = temp.path().join("out");
        let err = decompress(&archive, &target, Compression::Zip).unwrap_err();
        assert!(err.to_string().contains("invalid segment"));
        assert!(!temp.path().join("escape.txt").exists());
    }
}

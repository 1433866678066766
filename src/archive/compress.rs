use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::fs_ops::{io_error_with_help, try_atomic_move, unique_temp_path};
use crate::shutdown;
use crate::source::{Candidate, Source};

use super::Compression;

/// Write every candidate into a new archive at `archive_path`, replacing any
/// existing file. Returns the number of entries written; an empty candidate
/// list still produces a valid (empty) archive.
///
/// The archive is built in a temp file next to `archive_path` and renamed
/// into place, so a failed run leaves a previous archive untouched. A
/// candidate that is the archive itself is skipped.
pub fn compress(
    source: &dyn Source,
    candidates: &[Candidate],
    archive_path: &Path,
    compression: Compression,
) -> Result<usize> {
    let dir = archive_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(io_error_with_help("create archive folder", dir))?;

    let entries: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| {
            let is_self = c.local_path() == Some(archive_path);
            if is_self {
                warn!(entry = %c.name(), "Skipping the archive being written");
            }
            !is_self
        })
        .collect();

    let tmp_path = unique_temp_path(dir);
    if let Err(e) = build_into(source, &entries, &tmp_path, compression) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    if let Err(e) = try_atomic_move(&tmp_path, archive_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    info!(archive = %archive_path.display(), entries = entries.len(), %compression, "Archive written");
    Ok(entries.len())
}

fn build_into(source: &dyn Source, entries: &[&Candidate], tmp_path: &Path, compression: Compression) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(tmp_path)
        .map_err(io_error_with_help("create archive", tmp_path))?;
    let writer = BufWriter::new(file);

    let writer = match compression {
        Compression::Zip => write_zip(source, entries, writer)?,
        Compression::Tar => write_tar(source, entries, writer)?,
        Compression::TarGz => {
            let encoder = GzEncoder::new(writer, flate2::Compression::default());
            write_tar(source, entries, encoder)?
                .finish()
                .map_err(io_error_with_help("finish gzip stream", tmp_path))?
        }
    };
    let file = writer
        .into_inner()
        .map_err(|e| io_error_with_help("flush archive", tmp_path)(e.into_error()))?;
    file.sync_all().map_err(io_error_with_help("sync archive", tmp_path))?;
    Ok(())
}

fn write_zip(source: &dyn Source, candidates: &[&Candidate], writer: BufWriter<File>) -> Result<BufWriter<File>> {
    let mut zip = ZipWriter::new(writer);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    for &candidate in candidates {
        check_interrupt()?;
        zip.start_file(candidate.name(), options)
            .with_context(|| format!("start zip entry '{}'", candidate.name()))?;
        let mut reader = source.open(candidate)?;
        let bytes = io::copy(&mut reader, &mut zip)
            .with_context(|| format!("write zip entry '{}'", candidate.name()))?;
        debug!(entry = %candidate.name(), bytes, "Added zip entry");
    }
    zip.finish().context("finish zip archive")
}

fn write_tar<W: Write>(source: &dyn Source, candidates: &[&Candidate], writer: W) -> Result<W> {
    let mut builder = tar::Builder::new(writer);
    for &candidate in candidates {
        check_interrupt()?;
        match candidate.local_path() {
            Some(path) => builder
                .append_path_with_name(path, candidate.name())
                .with_context(|| format!("add tar entry '{}'", candidate.name()))?,
            None => {
                // tar headers need the size up front
                let mut body = Vec::new();
                source
                    .open(candidate)?
                    .read_to_end(&mut body)
                    .with_context(|| format!("read '{}'", candidate.name()))?;
                let mut header = tar::Header::new_gnu();
                header.set_size(body.len() as u64);
                header.set_mode(0o644);
                builder
                    .append_data(&mut header, candidate.name(), body.as_slice())
                    .with_context(|| format!("add tar entry '{}'", candidate.name()))?;
            }
        }
        debug!(entry = %candidate.name(), "Added tar entry");
    }
    builder.into_inner().context("finish tar archive")
}

fn check_interrupt() -> Result<()> {
    if shutdown::is_requested() {
        return Err(crate::errors::BlueprintError::Interrupted.into());
    }
    Ok(())
}

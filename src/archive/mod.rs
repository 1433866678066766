//! Compress and decompress blueprints.
//!
//! `compress` bundles every planned candidate into one archive named
//! `{destination}.{extension}`; `decompress` extracts one archive into a
//! folder. Entry names are the candidates' names relative to the source root.

mod compress;
mod extract;

pub use compress::compress;
pub use extract::decompress;

use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

use crate::naming::{join, normalize_folder, strip_archive_extension, ResolvedDestination};

/// Archive name used when no destination file name is given.
pub const DEFAULT_ARCHIVE_NAME: &str = "Archive";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Compression {
    #[value(name = "zip")]
    Zip,
    #[value(name = "tar")]
    Tar,
    #[value(name = "tar.gz")]
    TarGz,
}

impl Compression {
    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Compression::Zip => "zip",
            Compression::Tar => "tar",
            Compression::TarGz => "tar.gz",
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Compression {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zip" => Ok(Compression::Zip),
            "tar" => Ok(Compression::Tar),
            "tar.gz" | "tgz" => Ok(Compression::TarGz),
            _ => Err(format!("unsupported compression: '{s}'")),
        }
    }
}

/// Where `compress` writes: `{folder}/{name}.{ext}`, `name` defaulting to `Archive`.
pub fn archive_destination(
    folder: &str,
    file_name: Option<&str>,
    compression: Compression,
) -> ResolvedDestination {
    let name = file_name
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_ARCHIVE_NAME);
    ResolvedDestination::new(join(
        &normalize_folder(folder),
        &format!("{name}.{}", compression.extension()),
    ))
}

/// Folder `decompress` extracts into; defaults to the archive's base name
/// without its compression extension.
pub fn extraction_destination(
    folder: &str,
    file_name: Option<&str>,
    archive_name: &str,
    compression: Compression,
) -> ResolvedDestination {
    let name = match file_name.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => name.to_string(),
        None => strip_archive_extension(archive_name, compression.extension()),
    };
    ResolvedDestination::new(join(&normalize_folder(folder), &name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_name_defaults_to_archive() {
        assert_eq!(archive_destination("", None, Compression::Zip).as_str(), "Archive.zip");
        assert_eq!(
            archive_destination("/out/", Some("daily"), Compression::TarGz).as_str(),
            "out/daily.tar.gz"
        );
    }

    #[test]
    fn extraction_folder_strips_extension() {
        assert_eq!(
            extraction_destination("", None, "drops/batch.tar.gz", Compression::TarGz).as_str(),
            "batch"
        );
        assert_eq!(
            extraction_destination("x", Some("here"), "batch.zip", Compression::Zip).as_str(),
            "x/here"
        );
    }

    #[test]
    fn parses_cli_spellings() {
        assert_eq!("tar.gz".parse::<Compression>(), Ok(Compression::TarGz));
        assert_eq!("ZIP".parse::<Compression>(), Ok(Compression::Zip));
        assert!("tar.bz2".parse::<Compression>().is_err());
    }
}

use assert_fs::prelude::*;
use std::fs;

use blueprints::archive::{archive_destination, compress, decompress, extraction_destination, Compression};
use blueprints::{plan, DestinationSpec, LocalSource, MatchPolicy, TransferRequest};

fn fixture() -> assert_fs::TempDir {
    let src = assert_fs::TempDir::new().unwrap();
    src.child("data/a.csv").write_str("alpha\n").unwrap();
    src.child("data/sub/b.csv").write_str("beta\n").unwrap();
    src.child("data/skip.log").write_str("log\n").unwrap();
    src
}

fn roundtrip(compression: Compression) {
    let src = fixture();
    let out = assert_fs::TempDir::new().unwrap();
    let source = LocalSource::new(src.path());
    let request = TransferRequest::new(MatchPolicy::Pattern, "data", r"\.csv$", DestinationSpec::default());
    let candidates: Vec<_> = plan(&source, &request)
        .unwrap()
        .items
        .into_iter()
        .map(|i| i.candidate)
        .collect();

    let archive_key = archive_destination("bundles", None, compression);
    let archive_path = archive_key.to_path(out.path()).unwrap();
    assert_eq!(compress(&source, &candidates, &archive_path, compression).unwrap(), 2);
    assert!(archive_path.is_file());

    let target_key = extraction_destination("", None, archive_key.as_str(), compression);
    assert_eq!(target_key.as_str(), "Archive");
    let target = target_key.to_path(out.path()).unwrap();
    let entries = decompress(&archive_path, &target, compression).unwrap();
    assert!(entries >= 2);

    assert_eq!(fs::read_to_string(target.join("data/a.csv")).unwrap(), "alpha\n");
    assert_eq!(fs::read_to_string(target.join("data/sub/b.csv")).unwrap(), "beta\n");
    assert!(!target.join("data/skip.log").exists());
}

#[test]
fn zip_roundtrip() {
    roundtrip(Compression::Zip);
}

#[test]
fn tar_roundtrip() {
    roundtrip(Compression::Tar);
}

#[test]
fn tar_gz_roundtrip() {
    roundtrip(Compression::TarGz);
}

#[test]
fn missing_archive_reports_path() {
    let out = assert_fs::TempDir::new().unwrap();
    let missing = out.path().join("nope.zip");
    let err = decompress(&missing, &out.path().join("x"), Compression::Zip).unwrap_err();
    assert!(err.to_string().contains("nope.zip"));
}

use assert_fs::prelude::*;
use std::process::Command;

fn blueprints(home: &std::path::Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("blueprints"));
    cmd.env_remove("BLUEPRINTS_CONFIG")
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .current_dir(home);
    cmd
}

#[test]
fn compress_then_decompress_with_default_names() {
    let work = assert_fs::TempDir::new().unwrap();
    work.child("logs/app.log").write_str("line\n").unwrap();
    work.child("logs/db.log").write_str("row\n").unwrap();
    work.child("logs/keep.txt").write_str("k").unwrap();

    let out = blueprints(work.path())
        .args([
            "compress",
            "--compression",
            "tar.gz",
            "--source-file-name-match-type",
            "regex_match",
            "--source-file-name",
            r"\.log$",
            "--destination-folder-name",
            "bundles",
        ])
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("2 file(s) found"));
    assert!(work.path().join("bundles/Archive.tar.gz").is_file());

    let out = blueprints(work.path())
        .args([
            "decompress",
            "--compression",
            "tar.gz",
            "--source-folder-name",
            "bundles",
            "--source-file-name",
            "Archive.tar.gz",
            "--destination-folder-name",
            "restored",
        ])
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    work.child("restored/Archive/logs/app.log").assert("line\n");
    work.child("restored/Archive/logs/db.log").assert("row\n");
    assert!(!work.path().join("restored/Archive/logs/keep.txt").exists());
}

#[test]
fn exact_compress_uses_explicit_name() {
    let work = assert_fs::TempDir::new().unwrap();
    work.child("report.csv").write_str("r").unwrap();
    let out = blueprints(work.path())
        .args([
            "compress",
            "--compression",
            "zip",
            "--source-file-name-match-type",
            "exact_match",
            "--source-file-name",
            "report.csv",
            "--destination-file-name",
            "monthly",
        ])
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(work.path().join("monthly.zip").is_file());
}

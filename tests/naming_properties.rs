use std::collections::HashSet;

use blueprints::{join, normalize_folder, resolve_destination_name, resolve_full_destination, DestinationSpec};

#[test]
fn folder_normalization() {
    assert_eq!(normalize_folder(""), "");
    assert_eq!(normalize_folder("/a//b/"), "a/b");
    assert_eq!(normalize_folder("a/./b/../c"), "a/c");
    assert_eq!(normalize_folder("a/.."), ".");
}

#[test]
fn joining_folder_and_file() {
    assert_eq!(join("", "f.csv"), "f.csv");
    assert_eq!(join("a/b", "f.csv"), "a/b/f.csv");
    assert_eq!(join("/bucket", "f.csv"), "/bucket/f.csv");
}

#[test]
fn destination_name_rules() {
    assert_eq!(resolve_destination_name(None, "dir/report.csv", None), "report.csv");
    assert_eq!(resolve_destination_name(Some("out.csv"), "dir/report.csv", None), "out.csv");
    assert_eq!(resolve_destination_name(Some("out.csv"), "dir/report.csv", Some(3)), "out_3.csv");
    assert_eq!(resolve_destination_name(Some("out"), "dir/report.csv", Some(2)), "out_2");
    assert_eq!(resolve_destination_name(Some("a.tar.gz"), "x", Some(1)), "a_1.tar.gz");
}

#[test]
fn exact_without_name_uses_base_name_under_folder() {
    assert_eq!(resolve_full_destination("", None, "reports/q1.csv", None), "q1.csv");
    assert_eq!(resolve_full_destination("/archive/", None, "reports/q1.csv", None), "archive/q1.csv");
}

#[test]
fn numbered_destinations_are_pairwise_distinct() {
    for name in ["out.csv", "out", "a.tar.gz", ".hidden", "x."] {
        let spec = DestinationSpec::new("dest", Some(name));
        let resolved: Vec<_> = (1..=50)
            .map(|i| spec.resolve(&format!("src/file_{i}.csv"), Some(i)))
            .collect();
        let unique: HashSet<_> = resolved.iter().collect();
        assert_eq!(unique.len(), resolved.len(), "collision for explicit name {name}");
    }
}

#[test]
fn blank_explicit_name_counts_as_absent() {
    let spec = DestinationSpec::new("", Some("  "));
    assert_eq!(spec.file_name(), None);
    assert_eq!(spec.resolve("in/a.csv", Some(1)).as_str(), "a.csv");
}

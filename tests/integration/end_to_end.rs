//! End-to-end snapshot runs over real directories

use super::test_utils::{embeds, Fixture};
use resgen::header::DEFAULT_HEADER;
use resgen::serializer::rust_source::GENERATED_MARKER;
use resgen::SnapshotError;

fn mixed_fixture() -> Fixture {
    let fixture = Fixture::new();
    fixture
        .file("data/a.txt", "alpha")
        .file("data/b.go", "package data")
        .file("data/sub/.vfsignore", "")
        .file("data/sub/c.txt", "hidden")
        .file("data/kustomization.yaml", "resources: []");
    fixture
}

#[test]
fn test_default_run_embeds_only_plain_files() {
    let fixture = mixed_fixture();
    let report = fixture.run(&["data"]).unwrap();

    let artifact = fixture.read_artifact();
    assert!(embeds(&artifact, "/a.txt"));
    assert!(!embeds(&artifact, "/b.go"));
    assert!(!embeds(&artifact, "/sub"));
    assert!(!embeds(&artifact, "/sub/c.txt"));
    assert!(!embeds(&artifact, "/kustomization.yaml"));
    assert!(artifact.contains("contents: b\"alpha\","));

    assert_eq!(report.files, 1);
    assert_eq!(report.bytes, 5);
    assert_eq!(report.exclusions, vec!["/sub"]);
    assert_eq!(report.identifier, "out");
    assert_eq!(report.artifact, fixture.artifact());
}

#[test]
fn test_artifact_starts_with_header_then_generated_code() {
    let fixture = mixed_fixture();
    fixture.run(&["data"]).unwrap();

    let artifact = fixture.read_artifact();
    assert!(artifact.starts_with(DEFAULT_HEADER));
    assert!(artifact[DEFAULT_HEADER.len()..].starts_with(GENERATED_MARKER));
    assert!(artifact.contains("pub const NAMESPACE: &str = \"out\";"));
}

#[test]
fn test_modification_times_are_zeroed() {
    let fixture = mixed_fixture();
    fixture.run(&["data"]).unwrap();

    let artifact = fixture.read_artifact();
    for line in artifact.lines().filter(|l| l.trim_start().starts_with("mod_time:")) {
        assert_eq!(line.trim(), "mod_time: 0,");
    }
}

#[test]
fn test_report_digest_matches_artifact() {
    let fixture = mixed_fixture();
    let report = fixture.run(&["data"]).unwrap();

    let bytes = std::fs::read(fixture.artifact()).unwrap();
    assert_eq!(report.digest, blake3::hash(&bytes).to_hex().to_string());
}

#[test]
fn test_custom_header_from_config() {
    let fixture = mixed_fixture();
    let mut config = resgen::config::ResgenConfig::default();
    config.output.header = Some("// custom header\n\n".to_string());

    fixture.run_with(&config, &["data"]).unwrap();
    assert!(fixture
        .read_artifact()
        .starts_with("// custom header\n\n// Code generated"));
}

#[test]
fn test_missing_target_writes_nothing() {
    let fixture = Fixture::new();
    let err = fixture.run(&["data"]).unwrap_err();
    assert!(matches!(err, SnapshotError::MissingPath(_)));
    assert!(!fixture.artifact().exists());
}

#[test]
fn test_target_that_is_a_file_is_rejected() {
    let fixture = Fixture::new();
    fixture.file("data", "not a directory");
    let err = fixture.run(&["data"]).unwrap_err();
    assert!(matches!(err, SnapshotError::NotADirectory(_)));
    assert!(!fixture.artifact().exists());
}

#[test]
fn test_missing_dest_is_rejected() {
    let fixture = Fixture::new();
    fixture.file("data/a.txt", "a");
    let mut request = fixture.request(&["data"]);
    request.dest = fixture.root().join("absent");

    let config = resgen::config::ResgenConfig::default();
    let driver =
        resgen::SnapshotDriver::new(&config, resgen::serializer::RustSourceSerializer::new());
    assert!(matches!(
        driver.run(&request),
        Err(SnapshotError::MissingPath(_))
    ));
}

#[test]
fn test_empty_target_produces_root_only() {
    let fixture = Fixture::new();
    fixture.dir("data");
    let report = fixture.run(&["data"]).unwrap();

    assert_eq!(report.files, 0);
    assert_eq!(report.dirs, 1);
    assert!(embeds(&fixture.read_artifact(), "/"));
}

#[cfg(unix)]
#[test]
fn test_backslash_in_file_name_is_embedded() {
    let fixture = Fixture::new();
    fixture.file("data/a.txt", "alpha").file("data/we\\ird.txt", "odd");
    let report = fixture.run(&["data"]).unwrap();

    assert_eq!(report.files, 2);
    let artifact = fixture.read_artifact();
    assert!(embeds(&artifact, "/a.txt"));
    assert!(embeds(&artifact, "/we\\ird.txt"));
    assert!(artifact.contains("contents: b\"odd\","));
}

#[cfg(unix)]
#[test]
fn test_non_utf8_file_name_is_rejected_with_its_path() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let fixture = Fixture::new();
    fixture.file("data/a.txt", "alpha");
    let bad = fixture
        .root()
        .join("data")
        .join(OsStr::from_bytes(b"bad\xff.txt"));
    if std::fs::write(&bad, "x").is_err() {
        // Filesystem refuses non UTF-8 names.
        return;
    }

    let err = fixture.run(&["data"]).unwrap_err();
    match err {
        SnapshotError::InvalidFileName(path) => assert_eq!(path, bad),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!fixture.artifact().exists());
}

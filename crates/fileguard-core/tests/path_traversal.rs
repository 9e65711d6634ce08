//! Path traversal (zip slip) integration tests.
//!
//! Each hostile name is fed to the extractor as a single entry and the
//! filesystem around the destination is inspected afterwards.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use fileguard_core::ArchiveExtractor;
use fileguard_core::extract_zip;
use fileguard_core::formats::MemoryEntrySource;
use fileguard_core::test_utils::ZipTestBuilder;
use fileguard_core::test_utils::write_archive;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn extract_single(out: &Path, name: &str) -> bool {
    let mut source = MemoryEntrySource::new().with_file(name, b"payload".to_vec());
    ArchiveExtractor::default().extract(&mut source, out).is_success()
}

#[test]
fn test_parent_traversal_rejected() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("r1/r2/r3");
    fs::create_dir_all(&root).unwrap();
    let out = root.join("out");

    let malicious = [
        "../evil.txt",
        "../../evil.txt",
        "foo/../../evil.txt",
        "foo/../../../evil.txt",
        "./../evil.txt",
    ];

    for name in malicious {
        assert!(!extract_single(&out, name), "name should be rejected: {name}");
    }
    assert!(!root.join("evil.txt").exists());
    assert!(!temp.path().join("r1/r2/evil.txt").exists());
    assert!(!temp.path().join("r1/evil.txt").exists());
}

#[test]
fn test_sibling_with_shared_prefix_rejected() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");

    assert!(!extract_single(&out, "../out-evil/file.txt"));
    assert!(!temp.path().join("out-evil").exists());
}

#[test]
fn test_absolute_name_stays_inside() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");

    assert!(extract_single(&out, "/nested/abs.txt"));
    assert_eq!(fs::read(out.join("nested/abs.txt")).unwrap(), b"payload");
}

#[test]
fn test_safe_names_allowed() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");

    for name in ["README.md", "src/main.rs", "foo/bar/baz.txt", "docs/../guide.md"] {
        assert!(extract_single(&out, name), "name should be allowed: {name}");
    }
    assert!(out.join("guide.md").is_file());
}

#[test]
#[cfg(unix)]
fn test_symlinked_directory_escape_rejected() {
    let temp = TempDir::new().unwrap();
    let outside = temp.path().join("outside");
    let out = temp.path().join("out");
    fs::create_dir(&outside).unwrap();
    fs::create_dir(&out).unwrap();
    std::os::unix::fs::symlink(&outside, out.join("link")).unwrap();

    assert!(!extract_single(&out, "link/planted.txt"));
    assert!(!outside.join("planted.txt").exists());
}

#[test]
fn test_zip_slip_archive() {
    let temp = TempDir::new().unwrap();
    let work = temp.path().join("work");
    fs::create_dir(&work).unwrap();
    let zip = ZipTestBuilder::new()
        .add_file("../evil.sh", b"#!/bin/sh")
        .build();
    let zip_path = write_archive(temp.path(), "slip.zip", &zip);

    assert!(!extract_zip(Some(&zip_path), &work.join("out")));
    assert!(!work.join("evil.sh").exists());
}

#[test]
#[cfg(unix)]
fn test_symlink_behind_missing_component_rejected() {
    let temp = TempDir::new().unwrap();
    let outside = temp.path().join("outside");
    let out = temp.path().join("out");
    fs::create_dir(&outside).unwrap();
    fs::create_dir(&out).unwrap();
    std::os::unix::fs::symlink(&outside, out.join("link")).unwrap();

    assert!(!extract_single(&out, "missing/../link/planted.txt"));
    assert!(!outside.join("planted.txt").exists());
    assert!(!out.join("missing").exists());
}

#[test]
#[cfg(unix)]
fn test_dangling_symlink_target_rejected() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    fs::create_dir(&out).unwrap();
    std::os::unix::fs::symlink(temp.path().join("created.txt"), out.join("dangling")).unwrap();

    assert!(!extract_single(&out, "dangling"));
    assert!(!temp.path().join("created.txt").exists());
}

use std::fs;
use std::path::{Path, PathBuf};

use vdataset::policy::Policy;
use vdataset::{unmount, ErrorKind, ScanOptions, VDataset};

use crate::helpers::{recording_api, TestRoot};

/// `data/` with nested repositories and unique file names.
fn data_folder(tr: &TestRoot) -> PathBuf {
    tr.write("data/repo1/repo1.1/a.txt", b"a");
    tr.write("data/repo1/b.wav", b"b");
    tr.write("data/repo2/c.txt", b"c");
    tr.write("data/top.wav", b"t");
    fs::canonicalize(tr.join("data")).unwrap()
}

fn links_under(dir: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for e in fs::read_dir(dir).unwrap() {
        let p = e.unwrap().path();
        let ft = fs::symlink_metadata(&p).unwrap().file_type();
        if ft.is_dir() {
            out.extend(links_under(&p));
        } else {
            assert!(ft.is_symlink(), "{p:?} should be a symlink");
            out.push(p);
        }
    }
    out.sort();
    out
}

#[test]
fn flat_scan_links_every_file_at_the_root() {
    let tr = TestRoot::new();
    let data = data_folder(&tr);
    let root = VDataset::default()
        .mount_from_location(&data, &ScanOptions::default(), Some(tr.prefix().as_path()))
        .unwrap();

    let links = links_under(&root);
    assert_eq!(links.len(), 4);
    for l in &links {
        assert_eq!(l.parent(), Some(root.as_path()));
        assert!(fs::canonicalize(l).unwrap().starts_with(&data));
    }
    assert!(unmount(&root, true).unwrap().removed());
}

#[test]
fn keep_structure_mirrors_subdirectories() {
    let tr = TestRoot::new();
    let data = data_folder(&tr);
    let opts = ScanOptions::default().keep_structure(true);
    let root = VDataset::default()
        .mount_from_location(&data, &opts, Some(tr.prefix().as_path()))
        .unwrap();

    assert!(root.join("repo1/repo1.1").is_dir());
    assert!(root.join("repo2").is_dir());
    assert_eq!(
        fs::read_link(root.join("repo1/repo1.1/a.txt")).unwrap(),
        data.join("repo1/repo1.1/a.txt")
    );
    assert_eq!(fs::read_link(root.join("top.wav")).unwrap(), data.join("top.wav"));
    assert_eq!(links_under(&root).len(), 4);
    assert!(unmount(&root, true).unwrap().removed());
}

#[test]
fn patterns_filter_files() {
    let tr = TestRoot::new();
    let data = data_folder(&tr);
    let (api, facts, _audit) = recording_api(Policy::default());
    let opts = ScanOptions::default().with_patterns(["*.wav"]);
    let root = api
        .mount_from_location(&data, &opts, Some(tr.prefix().as_path()))
        .unwrap();

    let mut names: Vec<String> = links_under(&root)
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, ["b.wav", "top.wav"]);

    let scans = facts.stage("scan");
    assert_eq!(scans.len(), 1);
    assert_eq!(scans[0].1["file_count"], 2);
}

#[test]
fn missing_location_is_invalid() {
    let tr = TestRoot::new();
    let err = VDataset::default()
        .mount_from_location(tr.join("fake/folder"), &ScanOptions::default(), None)
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidLocation);
}

#[test]
fn aliased_subdirectory_is_not_scanned_twice() {
    let tr = TestRoot::new();
    tr.write("data/real/a.txt", b"a");
    let data = fs::canonicalize(tr.join("data")).unwrap();
    std::os::unix::fs::symlink(data.join("real"), data.join("alias")).unwrap();

    let root = VDataset::default()
        .mount_from_location(&data, &ScanOptions::default(), Some(tr.prefix().as_path()))
        .unwrap();
    let links = links_under(&root);
    assert_eq!(links, [root.join("a.txt")]);
    assert_eq!(fs::read_link(&links[0]).unwrap(), data.join("real/a.txt"));
    assert!(unmount(&root, true).unwrap().removed());
}

#[test]
fn symlink_loop_is_not_followed() {
    let tr = TestRoot::new();
    tr.write("data/one.txt", b"1");
    let data = fs::canonicalize(tr.join("data")).unwrap();
    std::os::unix::fs::symlink(&data, data.join("loop")).unwrap();

    let (api, facts, _audit) = recording_api(Policy::default());
    let opts = ScanOptions::default().keep_structure(true);
    let root = api
        .mount_from_location(&data, &opts, Some(tr.prefix().as_path()))
        .unwrap();
    assert_eq!(links_under(&root), [root.join("one.txt")]);
    assert_eq!(facts.stage("scan")[0].1["file_count"], 1);
    assert!(unmount(&root, true).unwrap().removed());
}

#[test]
fn symlinked_files_are_collected() {
    let tr = TestRoot::new();
    let outside = fs::canonicalize(tr.write("elsewhere/b.txt", b"b")).unwrap();
    tr.write("data/a.txt", b"a");
    let data = fs::canonicalize(tr.join("data")).unwrap();
    std::os::unix::fs::symlink(&outside, data.join("b.txt")).unwrap();

    let root = VDataset::default()
        .mount_from_location(&data, &ScanOptions::default(), Some(tr.prefix().as_path()))
        .unwrap();
    assert_eq!(links_under(&root).len(), 2);
    assert!(unmount(&root, true).unwrap().removed());
}

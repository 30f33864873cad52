use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use vdataset::policy::Policy;
use vdataset::{mount, unmount, MountInput, VDataset};

use crate::helpers::{recording_api, TestRoot};

fn links_in(dir: &Path) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| fs::symlink_metadata(p).unwrap().file_type().is_symlink())
        .collect();
    out.sort();
    out
}

#[test]
fn flat_list_links_every_file() {
    let tr = TestRoot::new();
    let files = tr.files(19);
    let prefix = tr.prefix();

    let root = mount(&MountInput::from(files.clone()), Some(prefix.as_path())).unwrap();
    assert!(root.starts_with(&prefix));
    assert!(root
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("vdataset-"));

    let sources: HashSet<PathBuf> = files.iter().cloned().collect();
    let links = links_in(&root);
    assert_eq!(links.len(), 19);
    for l in &links {
        let target = fs::read_link(l).unwrap();
        assert!(target.is_absolute());
        assert!(sources.contains(&fs::canonicalize(l).unwrap()), "{l:?} -> {target:?}");
    }

    let report = unmount(&root, true).unwrap();
    assert!(report.removed());
    assert!(!root.exists());
    assert!(files.iter().all(|f| f.is_file()));
}

#[test]
fn nested_mapping_builds_directories() {
    let tr = TestRoot::new();
    let f = tr.files(19);
    let input = MountInput::mapping([
        ("dir1", MountInput::from(f[..4].to_vec())),
        ("dir2", MountInput::from(f[4..9].to_vec())),
        (
            "dir3",
            MountInput::mapping([
                ("subDir1", MountInput::from(f[9..15].to_vec())),
                ("subDir2", MountInput::from(&f[18])),
            ]),
        ),
        ("dir4", MountInput::from(f[15..18].to_vec())),
    ]);

    let root = mount(&input, Some(tr.prefix().as_path())).unwrap();
    assert_eq!(links_in(&root.join("dir1")).len(), 4);
    assert_eq!(links_in(&root.join("dir2")).len(), 5);
    assert_eq!(links_in(&root.join("dir3/subDir1")).len(), 6);
    assert_eq!(links_in(&root.join("dir4")).len(), 3);
    assert!(links_in(&root.join("dir3")).is_empty());

    let single = root.join("dir3/subDir2/file19.txt");
    assert_eq!(fs::canonicalize(&single).unwrap(), f[18]);
    for l in links_in(&root.join("dir1")) {
        assert!(f[..4].contains(&fs::canonicalize(l).unwrap()));
    }

    assert!(unmount(&root, true).unwrap().removed());
}

#[test]
fn small_tree_matches_expected_layout() {
    let tr = TestRoot::new();
    let f = tr.files(3);
    let input = MountInput::mapping([
        ("a", MountInput::from(vec![&f[0], &f[1]])),
        ("b", MountInput::mapping([("c", &f[2])])),
    ]);
    let root = mount(&input, Some(tr.prefix().as_path())).unwrap();
    assert_eq!(fs::read_link(root.join("a/file1.txt")).unwrap(), f[0]);
    assert_eq!(fs::read_link(root.join("a/file2.txt")).unwrap(), f[1]);
    assert_eq!(fs::read_link(root.join("b/c/file3.txt")).unwrap(), f[2]);
}

#[test]
fn policy_prefix_is_used_without_an_argument() {
    let tr = TestRoot::new();
    let files = tr.files(2);
    let api = VDataset::default().with_policy(Policy::default().with_tmp_prefix(tr.prefix()));
    let root = api.mount(&MountInput::from(files)).unwrap();
    assert_eq!(root.parent(), Some(tr.prefix().as_path()));
    assert_eq!(tr.mounts(), vec![root]);
}

#[test]
fn missing_sources_become_dangling_links() {
    let tr = TestRoot::new();
    let ghost = fs::canonicalize(tr.path()).unwrap().join("ghost/none.txt");
    let root = mount(&MountInput::from(vec![&ghost]), Some(tr.prefix().as_path())).unwrap();
    let link = root.join("none.txt");
    assert_eq!(fs::read_link(&link).unwrap(), ghost);
    assert!(!link.exists());
    assert!(unmount(&root, true).unwrap().removed());
}

#[test]
fn relative_sources_are_made_absolute() {
    let tr = TestRoot::new();
    let files = tr.files(1);
    let cwd = std::env::current_dir().unwrap();
    let rel = pathdiff(&files[0], &cwd);
    let root = mount(&MountInput::from(vec![rel]), Some(tr.prefix().as_path())).unwrap();
    assert_eq!(fs::read_link(root.join("file1.txt")).unwrap(), files[0]);
}

#[test]
fn relative_prefix_is_made_absolute() {
    let tr = TestRoot::new();
    let files = tr.files(2);
    let cwd = std::env::current_dir().unwrap();
    let prefix = fs::canonicalize(tr.prefix()).unwrap();
    let rel = pathdiff(&prefix, &cwd);
    assert!(rel.is_relative());

    let root = mount(&MountInput::from(files), Some(rel.as_path())).unwrap();
    assert!(root.is_absolute());
    assert_eq!(fs::canonicalize(&root).unwrap().parent(), Some(prefix.as_path()));
    assert_eq!(links_in(&root).len(), 2);
    assert!(unmount(&root, true).unwrap().removed());
}

#[test]
fn empty_input_mounts_an_empty_root() {
    let tr = TestRoot::new();
    let (api, facts, audit) = recording_api(Policy::default());
    let root = api
        .mount_in(&MountInput::Sequence(Vec::new()), Some(tr.prefix().as_path()))
        .unwrap();
    assert!(root.is_dir());
    assert_eq!(fs::read_dir(&root).unwrap().count(), 0);
    assert_eq!(facts.stage("mount.result")[0].1["link_count"], 0);
    assert!(audit.at(log::Level::Warn).iter().any(|m| m.contains("nothing to link")));
    assert!(unmount(&root, true).unwrap().removed());
}

// `path` relative to `base`, climbing with `..` as needed.
fn pathdiff(path: &Path, base: &Path) -> PathBuf {
    let base = fs::canonicalize(base).unwrap();
    let common = base
        .ancestors()
        .find(|a| path.starts_with(a))
        .unwrap()
        .to_path_buf();
    let ups = base.strip_prefix(&common).unwrap().components().count();
    let mut out = PathBuf::new();
    for _ in 0..ups {
        out.push("..");
    }
    out.join(path.strip_prefix(&common).unwrap())
}

#[test]
fn mount_result_fact_is_deterministic() {
    let tr = TestRoot::new();
    let files = tr.files(5);
    let (api, facts, _audit) = recording_api(Policy::default().with_tmp_prefix(tr.prefix()));

    let input = MountInput::from(files);
    let a = api.mount(&input).unwrap();
    let b = api.mount(&input).unwrap();
    assert_ne!(a, b);

    let results = facts.stage("mount.result");
    assert_eq!(results.len(), 2);
    for (decision, fields) in &results {
        assert_eq!(decision, "success");
        assert_eq!(fields["link_count"], 5);
        assert_eq!(fields["schema_version"], 1);
    }
    assert_eq!(results[0].1["mount_id"], results[1].1["mount_id"]);
    assert_eq!(results[0].1["path"], a.display().to_string());
}

#[test]
fn redacted_facts_are_stable() {
    let tr = TestRoot::new();
    let files = tr.files(3);
    let policy = Policy::default()
        .with_tmp_prefix(tr.prefix())
        .with_redacted_facts();
    let (api, facts, _audit) = recording_api(policy);
    api.mount(&MountInput::from(files)).unwrap();

    let results = facts.stage("mount.result");
    assert_eq!(results[0].1["ts"], vdataset::logging::TS_ZERO);
    assert!(results[0].1.get("duration_ms").is_none());
}

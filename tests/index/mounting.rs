use std::fs;
use std::path::{Path, PathBuf};

use vdataset::{unmount, ErrorKind, VDataset};

use crate::helpers::TestRoot;

fn write_index(tr: &TestRoot, name: &str, files: &[PathBuf]) -> PathBuf {
    let list = |r: std::ops::Range<usize>| -> Vec<String> {
        files[r].iter().map(|f| f.display().to_string()).collect()
    };
    let value = serde_json::json!({
        "files": list(0..5),
        "other": {
            "sub": list(5..7),
            "single": files[7].display().to_string(),
        },
    });
    let body = if name.ends_with(".json") {
        serde_json::to_string_pretty(&value).unwrap()
    } else {
        serde_yaml::to_string(&value).unwrap()
    };
    tr.write(&format!("idx/{name}"), body.as_bytes())
}

fn link_count(dir: &Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}

#[test]
fn whole_index_is_mounted() {
    let tr = TestRoot::new();
    let files = tr.files(8);
    for name in ["index.json", "index.yaml"] {
        let index = write_index(&tr, name, &files);
        let root = VDataset::default()
            .mount_from_index_file(&index, None, Some(tr.prefix().as_path()))
            .unwrap();
        assert_eq!(link_count(&root.join("files")), 5);
        assert_eq!(link_count(&root.join("other/sub")), 2);
        assert_eq!(
            fs::read_link(root.join("other/single/file8.txt")).unwrap(),
            files[7]
        );
        assert!(unmount(&root, true).unwrap().removed());
    }
}

#[test]
fn dotted_key_selects_a_subtree() {
    let tr = TestRoot::new();
    let files = tr.files(8);
    let index = write_index(&tr, "index.json", &files);
    let root = VDataset::default()
        .mount_from_index_file(&index, Some("other.sub"), Some(tr.prefix().as_path()))
        .unwrap();
    let mut names: Vec<String> = fs::read_dir(&root)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, ["file6.txt", "file7.txt"]);
}

#[test]
fn index_errors_create_nothing() {
    let tr = TestRoot::new();
    let files = tr.files(8);
    let index = write_index(&tr, "index.json", &files);
    let api = VDataset::default();
    let prefix = tr.prefix();

    let err = api
        .mount_from_index_file(&index, Some("other.bad"), Some(prefix.as_path()))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::KeyNotFound);
    assert!(err.msg.contains("other.bad"));

    // a single path at the selected key is not a mount description
    let err = api
        .mount_from_index_file(&index, Some("other.single"), Some(prefix.as_path()))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidInput);

    let err = api
        .mount_from_index_file(tr.join("idx/missing.json"), None, Some(prefix.as_path()))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidLocation);

    let numbers = tr.write("idx/numbers.json", br#"{"files": [1, 2]}"#);
    let err = api
        .mount_from_index_file(&numbers, None, Some(prefix.as_path()))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidInput);

    assert!(tr.mounts().is_empty());
}

#[test]
fn yaml_without_parser_mounts_nothing() {
    let tr = TestRoot::new();
    let files = tr.files(8);
    let index = write_index(&tr, "index.yaml", &files);
    let root = VDataset::default()
        .without_yaml()
        .mount_from_index_file(&index, None, Some(tr.prefix().as_path()))
        .unwrap();
    assert_eq!(link_count(&root), 0);
    assert!(unmount(&root, true).unwrap().removed());
}

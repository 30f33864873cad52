use std::fs;

use vdataset::policy::Policy;
use vdataset::{mount, unmount, ErrorKind, MountInput, TeardownMode, UnmountOutcome, VDataset};

use crate::helpers::{recording_api, TestRoot};

#[test]
fn missing_location_is_not_mounted() {
    let tr = TestRoot::new();
    let gone = tr.join("mnt/vdataset-gone");
    let (api, facts, _audit) = recording_api(Policy::default());
    let report = api.unmount(&gone, TeardownMode::Safe).unwrap();
    assert_eq!(report.outcome, UnmountOutcome::NotFound);
    assert_eq!(report.summary(), format!("{} was not mounted", gone.display()));

    let results = facts.stage("unmount.result");
    assert_eq!(results[0].0, "success");
    assert_eq!(results[0].1["outcome"], "not_found");
}

#[test]
fn strict_teardown_rejects_missing_location() {
    let tr = TestRoot::new();
    let api = VDataset::default().with_policy(Policy::default().strict_teardown());
    let err = api
        .unmount(tr.join("mnt/vdataset-gone"), TeardownMode::Safe)
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidLocation);
}

#[test]
fn files_are_not_mount_locations() {
    let tr = TestRoot::new();
    let files = tr.files(1);
    for safe in [true, false] {
        let err = unmount(&files[0], safe).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidLocation);
        assert!(files[0].is_file());
    }
}

#[test]
fn symlink_to_a_mount_is_not_followed() {
    let tr = TestRoot::new();
    let files = tr.files(2);
    let root = mount(&MountInput::from(files), Some(tr.prefix().as_path())).unwrap();
    let alias = tr.join("alias");
    std::os::unix::fs::symlink(&root, &alias).unwrap();

    for safe in [true, false] {
        let err = unmount(&alias, safe).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidLocation);
    }
    assert!(root.is_dir());
    assert_eq!(fs::read_dir(&root).unwrap().count(), 2);
    assert!(unmount(&root, true).unwrap().removed());
}

use std::fs;

use vdataset::{mount, unmount, MountInput};

use crate::helpers::TestRoot;

#[test]
fn unsafe_unmount_always_deletes() {
    let tr = TestRoot::new();
    let files = tr.files(19);

    let root = mount(&MountInput::from(files.clone()), Some(tr.prefix().as_path())).unwrap();
    assert!(unmount(&root, false).unwrap().removed());
    assert!(!root.exists());

    let root = mount(&MountInput::from(files.clone()), Some(tr.prefix().as_path())).unwrap();
    fs::write(root.join("annoying_file.txt"), b"").unwrap();
    fs::create_dir(root.join("extra")).unwrap();
    fs::write(root.join("extra/more.txt"), b"").unwrap();
    assert!(unmount(&root, false).unwrap().removed());
    assert!(!root.exists());

    assert!(files.iter().all(|f| f.is_file()));
}

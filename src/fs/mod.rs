pub mod link;
pub mod meta;
pub mod root;
pub mod teardown;

pub use link::{create_link, open_dir_nofollow};
pub use meta::{kind_of, resolve_source, NodeKind};
pub use root::{check_prefix, create_mount_root};
pub use teardown::{find_foreign_entries, remove_link_tree};

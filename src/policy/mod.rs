//! Mount and teardown configuration.
//!
//! Consumers construct a [`Policy`](crate::policy::Policy) with
//! `Policy::default()` and adjust it through the `with_*` helpers or by
//! setting fields directly before building a [`VDataset`](crate::VDataset).

pub mod config;
pub mod types;

pub use config::Policy;
pub use types::{CollisionPolicy, MissingRootPolicy, MountPolicy, TeardownPolicy};

//! Persistence of named search-form snapshots.

pub mod store;

pub use store::*;

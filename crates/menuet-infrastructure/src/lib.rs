//! Infrastructure for Menuet: durable file-backed storage and platform
//! path resolution. The core crate only sees the [`Storage`] trait.
//!
//! [`Storage`]: menuet_core::storage::Storage

pub mod file_storage;
pub mod paths;

pub use crate::file_storage::FileStorage;
pub use crate::paths::MenuetPaths;

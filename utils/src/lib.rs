//! Filesystem helpers shared by the fsgen crates.
//!
//! - **`atomic_write`**: Crash-safe file persistence (temp + rename)
//! - **`fs`**: Recursive directory creation and tolerant removal of stale files

pub mod atomic_write;
pub mod fs;

pub use atomic_write::{
    AtomicWriteOptions, FileSyncPolicy, ParentDirSyncPolicy, atomic_write_with_options,
};
pub use fs::{ensure_dir, remove_if_exists};

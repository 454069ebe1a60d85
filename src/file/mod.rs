//! File I/O for record collections.
//!
//! This module loads JSON or XML record files from disk, saves collections
//! back with atomic writes and optional backups, and seeds a working file from
//! a template when the working file is missing or broken.

pub mod bootstrap;
pub mod format;
pub mod loader;
pub mod saver;

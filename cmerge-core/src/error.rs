//! Merge error types
//!
//! Unified error type for the whole pipeline. Recoverable conditions
//! (duplicate or cyclic includes, a missing paired implementation file)
//! are absorbed inside the resolver and never surface here.

use crate::scanner::ScanError;
use cmerge_vfs::VfsError;
use std::path::PathBuf;
use thiserror::Error;

/// cmerge error type
#[derive(Error, Debug)]
pub enum MergeError {
    /// A file that should be readable could not be read
    #[error("Failed to read '{}': {}", path.display(), source)]
    Read { path: PathBuf, source: VfsError },

    /// The output sink could not be written
    #[error("Failed to write '{}': {}", path.display(), source)]
    Write { path: PathBuf, source: VfsError },

    /// A path without a usable basename or directory
    #[error("Invalid path '{}': {}", path.display(), reason)]
    InvalidPath { path: PathBuf, reason: String },

    /// A directive with a missing closing quote or terminating newline
    #[error("Malformed include in '{}': {}", path.display(), source)]
    MalformedInclude { path: PathBuf, source: ScanError },

    /// The include graph recursed past the configured depth limit
    #[error("Include depth limit ({}) exceeded at '{}'", limit, path.display())]
    DepthExceeded { path: PathBuf, limit: usize },
}

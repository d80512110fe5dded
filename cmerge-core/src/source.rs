//! Source file store
//!
//! Loads a file's raw bytes through the VFS and exposes them alongside the
//! file's basename and canonicalized directory. Identity is
//! (name, directory), never contents.

use crate::error::MergeError;
use cmerge_vfs::VirtualFileSystem;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Identity of a physical file: basename plus canonicalized directory.
///
/// Two files are the same iff both fields match exactly; directories are
/// canonicalized at load time so files reached via different relative
/// paths compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileId {
    pub name: String,
    pub dir: PathBuf,
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dir.join(&self.name).display())
    }
}

/// An immutable source file held in memory.
#[derive(Debug)]
pub struct SourceFile {
    name: String,
    dir: PathBuf,
    contents: Vec<u8>,
}

impl SourceFile {
    /// Load a file through the VFS.
    ///
    /// The containing directory is canonicalized so the resulting identity
    /// is stable regardless of how the path was spelled.
    pub fn load(vfs: &dyn VirtualFileSystem, path: &Path) -> Result<Arc<Self>, MergeError> {
        debug!(target: "cmerge::resolver", path = %path.display(), "reading file contents");

        let contents = vfs.read_file(path).map_err(|e| MergeError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| MergeError::InvalidPath {
                path: path.to_path_buf(),
                reason: "missing file name".to_string(),
            })?;

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let dir = vfs.canonicalize(parent).map_err(|e| MergeError::Read {
            path: parent.to_path_buf(),
            source: e,
        })?;

        Ok(Arc::new(Self {
            name,
            dir,
            contents,
        }))
    }

    /// Basename, e.g. "foo.h" or "foo.c"
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonicalized containing directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Raw file contents
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// The file's identity for visited-set bookkeeping
    pub fn id(&self) -> FileId {
        FileId {
            name: self.name.clone(),
            dir: self.dir.clone(),
        }
    }

    /// Full path (directory joined with basename)
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }

    /// Whether this file is a header (`*.h`)
    pub fn is_header(&self) -> bool {
        self.name.ends_with(".h")
    }

    /// Path of the paired implementation file for a header: same
    /// directory, basename with the final 'h' changed to 'c'. None for
    /// non-headers.
    pub fn paired_source_path(&self) -> Option<PathBuf> {
        if !self.is_header() {
            return None;
        }
        let mut paired = self.name.clone();
        paired.pop();
        paired.push('c');
        Some(self.dir.join(paired))
    }
}

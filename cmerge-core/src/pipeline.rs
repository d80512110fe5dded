//! Merge pipeline
//!
//! Orchestrates one run: load the root file, resolve it into a span
//! sequence, assemble the spans, and write the result through the VFS.

use crate::error::MergeError;
use crate::resolver::Resolver;
use crate::source::SourceFile;
use crate::span::assemble;
use cmerge_config::MergeConfig;
use cmerge_vfs::VirtualFileSystem;
use std::path::Path;
use tracing::info;

/// Summary of a completed merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeStats {
    /// Distinct physical files inlined into the output
    pub files_merged: usize,
    /// Spans emitted
    pub span_count: usize,
    /// Size of the merged output
    pub bytes_written: usize,
}

/// Merge the tree rooted at `entry` and return the merged bytes.
///
/// This is the library/test surface; it performs no output I/O.
pub fn merge_to_vec(
    vfs: &dyn VirtualFileSystem,
    entry: &Path,
    config: &MergeConfig,
) -> Result<(Vec<u8>, MergeStats), MergeError> {
    let root = SourceFile::load(vfs, entry)?;

    let mut resolver = Resolver::new(vfs, config);
    resolver.resolve(root)?;

    let files_merged = resolver.visited_count();
    let spans = resolver.into_spans();
    let span_count = spans.len();
    let merged = assemble(&spans);

    let stats = MergeStats {
        files_merged,
        span_count,
        bytes_written: merged.len(),
    };
    Ok((merged, stats))
}

/// Merge the tree rooted at `entry` into `output`.
///
/// The output is either complete or not written: any error aborts before
/// the write happens.
pub fn merge_file(
    vfs: &dyn VirtualFileSystem,
    entry: &Path,
    output: &Path,
    config: &MergeConfig,
) -> Result<MergeStats, MergeError> {
    let (merged, stats) = merge_to_vec(vfs, entry, config)?;

    info!(
        target: "cmerge::emitter",
        output = %output.display(),
        bytes = stats.bytes_written,
        "writing output"
    );
    vfs.write_file(output, &merged).map_err(|e| MergeError::Write {
        path: output.to_path_buf(),
        source: e,
    })?;

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmerge_vfs::MemoryFileSystem;

    #[test]
    fn test_merge_file_writes_output() {
        let fs = MemoryFileSystem::with_files([
            ("/main.c".to_string(), b"int main(){}\n".to_vec()),
        ]);
        let stats = merge_file(
            &fs,
            Path::new("/main.c"),
            Path::new("/out.c"),
            &MergeConfig::default(),
        )
        .unwrap();

        assert_eq!(stats.files_merged, 1);
        assert_eq!(stats.span_count, 1);
        assert_eq!(stats.bytes_written, 13);
        assert_eq!(fs.read_file(Path::new("/out.c")).unwrap(), b"int main(){}\n");
    }

    #[test]
    fn test_failed_merge_leaves_no_output() {
        let fs = MemoryFileSystem::with_files([
            ("/main.c".to_string(), b"#include \"gone.h\"\n".to_vec()),
        ]);
        let result = merge_file(
            &fs,
            Path::new("/main.c"),
            Path::new("/out.c"),
            &MergeConfig::default(),
        );

        assert!(result.is_err());
        assert!(!fs.exists(Path::new("/out.c")));
    }

    #[test]
    fn test_missing_entry_is_read_error() {
        let fs = MemoryFileSystem::new();
        let err = merge_to_vec(&fs, Path::new("/main.c"), &MergeConfig::default()).unwrap_err();
        assert!(matches!(err, MergeError::Read { .. }));
    }
}

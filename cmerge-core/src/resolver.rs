//! Include resolver
//!
//! The recursive engine: scans a file for quoted includes, recursively
//! descends into targets that have not been merged yet (and their paired
//! implementation files), and records spans of the file's own text between
//! the directives. Resolution order is output order: depth-first,
//! pre-order on first encounter.
//!
//! All state is owned by the resolver - the visited set and span
//! accumulator are plain fields, and include paths resolve by explicit
//! directory composition, so the resolver is reentrant and testable in
//! isolation.

use crate::error::MergeError;
use crate::scanner::scan_includes;
use crate::source::{FileId, SourceFile};
use crate::span::Span;
use cmerge_config::MergeConfig;
use cmerge_vfs::VirtualFileSystem;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Resolves one root file into an ordered span sequence.
pub struct Resolver<'a> {
    vfs: &'a dyn VirtualFileSystem,
    config: &'a MergeConfig,
    /// Files already fully resolved into the output, keyed by identity.
    /// Grows monotonically; never shrinks during a run.
    visited: HashSet<FileId>,
    spans: Vec<Span>,
}

impl<'a> Resolver<'a> {
    pub fn new(vfs: &'a dyn VirtualFileSystem, config: &'a MergeConfig) -> Self {
        Self {
            vfs,
            config,
            visited: HashSet::new(),
            spans: Vec::new(),
        }
    }

    /// Resolve `file`, appending its spans (and those of everything it
    /// transitively includes) to the accumulator.
    pub fn resolve(&mut self, file: Arc<SourceFile>) -> Result<(), MergeError> {
        self.resolve_at(file, 0)
    }

    /// Number of distinct files merged so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Consume the resolver, yielding the ordered span sequence
    pub fn into_spans(self) -> Vec<Span> {
        self.spans
    }

    fn resolve_at(&mut self, file: Arc<SourceFile>, depth: usize) -> Result<(), MergeError> {
        if depth > self.config.limits.max_include_depth {
            return Err(MergeError::DepthExceeded {
                path: file.path(),
                limit: self.config.limits.max_include_depth,
            });
        }

        // Mark before recursing: a file can never re-enter itself even if
        // the filesystem graph is cyclic.
        self.visited.insert(file.id());
        debug!(target: "cmerge::resolver", file = %file.id(), depth, "resolving");

        let includes = scan_includes(file.contents(), self.config.scan).map_err(|e| {
            MergeError::MalformedInclude {
                path: file.path(),
                source: e,
            }
        })?;

        let mut cursor = 0usize;
        for directive in includes {
            // The file's own text since the previous directive
            self.spans.push(Span::new(file.clone(), cursor, directive.start));

            let target_path = file.dir().join(&directive.target);
            let target = SourceFile::load(self.vfs, &target_path)?;

            if self.visited.contains(&target.id()) {
                debug!(
                    target: "cmerge::resolver",
                    file = %target.id(),
                    "already merged, skipping"
                );
                cursor = directive.stop;
                continue;
            }

            self.resolve_at(target.clone(), depth + 1)?;

            if target.is_header() {
                self.resolve_paired_source(&target, depth)?;
            }

            cursor = directive.stop;
        }

        // Trailing text after the last directive (or the whole file)
        self.spans.push(Span::new(file.clone(), cursor, file.len()));

        Ok(())
    }

    /// Resolve the implementation file paired with `header`, if one
    /// exists alongside it and has not been merged yet. A missing paired
    /// file is not an error.
    fn resolve_paired_source(
        &mut self,
        header: &SourceFile,
        depth: usize,
    ) -> Result<(), MergeError> {
        let Some(path) = header.paired_source_path() else {
            return Ok(());
        };

        if !self.vfs.is_file(&path) {
            debug!(
                target: "cmerge::resolver",
                path = %path.display(),
                "no paired implementation file, skipping"
            );
            return Ok(());
        }

        let source = SourceFile::load(self.vfs, &path)?;
        if self.visited.contains(&source.id()) {
            debug!(
                target: "cmerge::resolver",
                file = %source.id(),
                "paired implementation already merged, skipping"
            );
            return Ok(());
        }

        self.resolve_at(source, depth + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::assemble;
    use cmerge_vfs::MemoryFileSystem;
    use std::path::Path;

    fn fs_with(files: &[(&str, &str)]) -> MemoryFileSystem {
        MemoryFileSystem::with_files(
            files
                .iter()
                .map(|(p, c)| (p.to_string(), c.as_bytes().to_vec())),
        )
    }

    fn resolve(files: &[(&str, &str)], entry: &str) -> Vec<Span> {
        let fs = fs_with(files);
        let config = MergeConfig::default();
        let mut resolver = Resolver::new(&fs, &config);
        let root = SourceFile::load(&fs, Path::new(entry)).unwrap();
        resolver.resolve(root).unwrap();
        resolver.into_spans()
    }

    #[test]
    fn test_file_without_includes_is_one_full_span() {
        let spans = resolve(&[("/main.c", "int main(){}\n")], "/main.c");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start(), 0);
        assert_eq!(spans[0].stop(), 13);
    }

    #[test]
    fn test_spans_partition_each_file() {
        let spans = resolve(
            &[
                ("/main.c", "int a;\n#include \"x.h\"\nint b;\n"),
                ("/x.h", "int x;\n"),
            ],
            "/main.c",
        );
        // main pre-text, x.h whole, main post-text
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].file().name(), "main.c");
        assert_eq!(spans[1].file().name(), "x.h");
        assert_eq!(spans[2].file().name(), "main.c");
        // The two main.c spans abut at the directive boundary
        assert_eq!(spans[0].stop(), 7);
        assert_eq!(spans[2].start(), 23);
        assert_eq!(spans[2].stop(), 30);
    }

    #[test]
    fn test_duplicate_include_contributes_once() {
        let merged = assemble(&resolve(
            &[
                ("/main.c", "#include \"x.h\"\n#include \"x.h\"\n"),
                ("/x.h", "int x;\n"),
            ],
            "/main.c",
        ));
        assert_eq!(merged, b"int x;\n");
    }

    #[test]
    fn test_self_include_terminates() {
        let merged = assemble(&resolve(
            &[("/a.h", "top\n#include \"a.h\"\nbottom\n")],
            "/a.h",
        ));
        assert_eq!(merged, b"top\nbottom\n");
    }

    #[test]
    fn test_depth_limit() {
        let fs = fs_with(&[
            ("/a.c", "#include \"b.c\"\n"),
            ("/b.c", "#include \"c.c\"\n"),
            ("/c.c", "int x;\n"),
        ]);
        let config = MergeConfig {
            limits: cmerge_config::LimitConfig {
                max_include_depth: 1,
            },
            ..Default::default()
        };
        let mut resolver = Resolver::new(&fs, &config);
        let root = SourceFile::load(&fs, Path::new("/a.c")).unwrap();
        let err = resolver.resolve(root).unwrap_err();
        assert!(matches!(err, MergeError::DepthExceeded { limit: 1, .. }));
    }

    #[test]
    fn test_missing_include_target_is_fatal() {
        let fs = fs_with(&[("/main.c", "#include \"gone.h\"\n")]);
        let config = MergeConfig::default();
        let mut resolver = Resolver::new(&fs, &config);
        let root = SourceFile::load(&fs, Path::new("/main.c")).unwrap();
        let err = resolver.resolve(root).unwrap_err();
        assert!(matches!(err, MergeError::Read { .. }));
    }

    #[test]
    fn test_malformed_include_names_offending_file() {
        let fs = fs_with(&[
            ("/main.c", "#include \"bad.h\"\n"),
            ("/bad.h", "#include \"oops"),
        ]);
        let config = MergeConfig::default();
        let mut resolver = Resolver::new(&fs, &config);
        let root = SourceFile::load(&fs, Path::new("/main.c")).unwrap();
        let err = resolver.resolve(root).unwrap_err();
        match err {
            MergeError::MalformedInclude { path, .. } => {
                assert_eq!(path, Path::new("/bad.h"));
            }
            other => panic!("expected MalformedInclude, got: {other}"),
        }
    }

    #[test]
    fn test_visited_count() {
        let fs = fs_with(&[
            ("/main.c", "#include \"x.h\"\n"),
            ("/x.h", "int x;\n"),
            ("/x.c", "int x = 1;\n"),
        ]);
        let config = MergeConfig::default();
        let mut resolver = Resolver::new(&fs, &config);
        let root = SourceFile::load(&fs, Path::new("/main.c")).unwrap();
        resolver.resolve(root).unwrap();
        // main.c, x.h, and the paired x.c
        assert_eq!(resolver.visited_count(), 3);
    }
}

//! cmerge core - include scanning, resolution, and span assembly
//!
//! Flattens a C-style source tree rooted at a single file into one
//! self-contained buffer by textually inlining quoted `#include "..."`
//! directives. Each included header also pulls in its paired
//! implementation file (same basename, `.c` extension) when one exists
//! alongside it, and every physical file is inlined at most once per run.
//!
//! The pipeline is: [`source::SourceFile`] loads raw bytes through the
//! VFS, [`scanner::scan_includes`] finds directives, [`resolver::Resolver`]
//! recursively turns the include graph into an ordered [`span::Span`]
//! sequence, and [`span::assemble`] splices the referenced byte ranges
//! into the final output.

pub mod error;
pub mod pipeline;
pub mod resolver;
pub mod scanner;
pub mod source;
pub mod span;

pub use error::MergeError;
pub use pipeline::{merge_file, merge_to_vec, MergeStats};
pub use resolver::Resolver;
pub use scanner::{scan_includes, IncludeDirective, ScanError};
pub use source::{FileId, SourceFile};
pub use span::{assemble, write_spans, Span};

// Re-export the configuration vocabulary for downstream convenience
pub use cmerge_config::{LimitConfig, MergeConfig, ScanMode};

//! Output spans
//!
//! A span is a half-open byte range into one file's contents designated
//! for verbatim copy to the output. The ordered span sequence produced by
//! the resolver, concatenated, is the entire program output.

use crate::source::SourceFile;
use std::io;
use std::sync::Arc;
use tracing::debug;

/// A half-open byte range `[start, stop)` of one file's contents.
///
/// Invariant: `start <= stop <= file.len()`.
#[derive(Debug, Clone)]
pub struct Span {
    file: Arc<SourceFile>,
    start: usize,
    stop: usize,
}

impl Span {
    pub fn new(file: Arc<SourceFile>, start: usize, stop: usize) -> Self {
        debug_assert!(start <= stop && stop <= file.len());
        Self { file, start, stop }
    }

    pub fn file(&self) -> &SourceFile {
        &self.file
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn stop(&self) -> usize {
        self.stop
    }

    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    /// The referenced bytes, to be copied verbatim
    pub fn bytes(&self) -> &[u8] {
        &self.file.contents()[self.start..self.stop]
    }
}

/// Concatenate the span sequence into one buffer, no separators.
pub fn assemble(spans: &[Span]) -> Vec<u8> {
    let total: usize = spans.iter().map(Span::len).sum();
    let mut merged = Vec::with_capacity(total);
    for span in spans {
        debug!(
            target: "cmerge::emitter",
            file = %span.file().name(),
            start = span.start(),
            stop = span.stop(),
            "emitting span"
        );
        merged.extend_from_slice(span.bytes());
    }
    merged
}

/// Stream the span sequence into a sink, no separators.
pub fn write_spans<W: io::Write>(spans: &[Span], sink: &mut W) -> io::Result<()> {
    for span in spans {
        debug!(
            target: "cmerge::emitter",
            file = %span.file().name(),
            start = span.start(),
            stop = span.stop(),
            "emitting span"
        );
        sink.write_all(span.bytes())?;
    }
    Ok(())
}

//! cmerge Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It serves as the shared configuration vocabulary across all cmerge crates.

/// How strictly the include scanner matches `#include "..."` directives.
///
/// The reference behavior skips spaces and tabs even in the middle of the
/// `#include` token, so `# in clude "x"` matches. `Strict` only permits
/// whitespace before the `#` and between `#include` and the opening quote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Reference-compatible: whitespace is transparent anywhere mid-token
    #[default]
    Lenient,
    /// Whitespace only allowed as indentation and before the opening quote
    Strict,
}

/// Configuration for resolution limits
#[derive(Debug, Clone)]
pub struct LimitConfig {
    /// Maximum include recursion depth
    pub max_include_depth: usize,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            max_include_depth: 256,
        }
    }
}

/// Configuration consumed by the merge pipeline
#[derive(Debug, Clone, Default)]
pub struct MergeConfig {
    /// Directive matching mode
    pub scan: ScanMode,
    /// Resolution limits
    pub limits: LimitConfig,
}

/// Log verbosity levels, ordered from least to most verbose
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Logging configuration with optional per-phase overrides
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub global: LogLevel,
    pub scanner: Option<LogLevel>,
    pub resolver: Option<LogLevel>,
    pub emitter: Option<LogLevel>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            global: LogLevel::Info,
            scanner: None,
            resolver: None,
            emitter: None,
        }
    }
}

/// Execution phase enum for phase-specific configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Scanner,
    Resolver,
    Emitter,
}

impl Phase {
    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Scanner => "scanner",
            Phase::Resolver => "resolver",
            Phase::Emitter => "emitter",
        }
    }

    /// Get the log target name for this phase
    pub fn target(&self) -> String {
        format!("cmerge::{}", self.as_str())
    }
}

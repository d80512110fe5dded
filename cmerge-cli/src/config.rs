//! CLI configuration
//!
//! Optional JSON project file plus the mapping from the shared logging
//! vocabulary onto tracing levels.

use cmerge_config::{LogLevel, LoggingConfig};
use std::path::Path;
use tracing::Level;

/// Optional project file (`cmerge.json`) structure
#[derive(Debug, Default, serde::Deserialize)]
pub struct ProjectConfig {
    /// Require strict `#include "..."` directive syntax
    pub strict: Option<bool>,
    /// Log level: "silent", "error", "warn", "info", "debug", "trace"
    pub log_level: Option<String>,
}

/// Read and parse a project config file
pub fn read_project_config(path: &Path) -> Result<ProjectConfig, String> {
    if !path.exists() {
        return Err(format!("config file '{}' not found", path.display()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;

    serde_json::from_str(&content)
        .map_err(|e| format!("failed to parse '{}': {}", path.display(), e))
}

/// Parse a log level string
pub fn parse_log_level(s: &str) -> Option<LogLevel> {
    match s.to_lowercase().as_str() {
        "silent" => Some(LogLevel::Error), // silent = only errors
        "error" => Some(LogLevel::Error),
        "warn" => Some(LogLevel::Warn),
        "info" => Some(LogLevel::Info),
        "debug" => Some(LogLevel::Debug),
        "trace" => Some(LogLevel::Trace),
        _ => None,
    }
}

fn to_tracing(level: LogLevel) -> Level {
    match level {
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    }
}

/// CLI log configuration, resolved to tracing levels
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub global: Level,
    pub scanner: Option<Level>,
    pub resolver: Option<Level>,
    pub emitter: Option<Level>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::from_logging(&LoggingConfig::default())
    }
}

impl LogConfig {
    /// Resolve the shared logging vocabulary to tracing levels
    pub fn from_logging(logging: &LoggingConfig) -> Self {
        Self {
            global: to_tracing(logging.global),
            scanner: logging.scanner.map(to_tracing),
            resolver: logging.resolver.map(to_tracing),
            emitter: logging.emitter.map(to_tracing),
        }
    }

    /// Get log level for a specific target
    pub fn level_for(&self, target: &str) -> Level {
        match target {
            "cmerge::scanner" => self.scanner.unwrap_or(self.global),
            "cmerge::resolver" => self.resolver.unwrap_or(self.global),
            "cmerge::emitter" => self.emitter.unwrap_or(self.global),
            _ => self.global,
        }
    }
}

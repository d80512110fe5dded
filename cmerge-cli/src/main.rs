//! cmerge CLI - Command line interface
//!
//! Merges multiple C files into one translation unit by inlining quoted
//! `#include "..."` directives and the headers' paired implementation
//! files.

use clap::Parser;
use std::path::PathBuf;
use std::process;

mod config;
mod logging;

use crate::config::{parse_log_level, read_project_config, LogConfig, ProjectConfig};
use crate::logging::LogFormat;
use cmerge_config::{LimitConfig, LoggingConfig, MergeConfig, ScanMode};
use cmerge_core::merge_file;
use cmerge_vfs::NativeFileSystem;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "cmerge",
    about = "Merges multiple C files into one",
    version = "0.1.0"
)]
struct Cli {
    /// A C file with a main() to merge #include's into
    #[arg(value_name = "MAIN")]
    main_file: PathBuf,

    /// The output filename to put all of the merged files into
    #[arg(value_name = "OUT")]
    output: PathBuf,

    /// Require strict `#include "..."` directive syntax
    #[arg(long)]
    strict: bool,

    /// Log level: silent, error, warn, info, debug, trace
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Optional JSON project config supplying defaults for the options
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    // Project config file, if requested
    let project = match &cli.config {
        Some(path) => match read_project_config(path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => ProjectConfig::default(),
    };

    // Explicit flags win over the project file
    let level_str = cli.log_level.as_deref().or(project.log_level.as_deref());
    let mut logging_config = LoggingConfig::default();
    if let Some(s) = level_str {
        match parse_log_level(s) {
            Some(level) => logging_config.global = level,
            None => {
                eprintln!("Error: unknown log level '{}'", s);
                process::exit(1);
            }
        }
    }
    logging::init(&LogConfig::from_logging(&logging_config), cli.log_format);

    let strict = cli.strict || project.strict.unwrap_or(false);
    let merge_config = MergeConfig {
        scan: if strict {
            ScanMode::Strict
        } else {
            ScanMode::Lenient
        },
        limits: LimitConfig::default(),
    };

    let fs = NativeFileSystem::new();
    match merge_file(&fs, &cli.main_file, &cli.output, &merge_config) {
        Ok(stats) => {
            info!(
                target: "cmerge::cli",
                files = stats.files_merged,
                spans = stats.span_count,
                bytes = stats.bytes_written,
                "merge finished"
            );
            println!(
                "Merged {} files into {} ({} bytes)",
                stats.files_merged,
                cli.output.display(),
                stats.bytes_written
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

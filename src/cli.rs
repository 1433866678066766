//! CLI definition and parsing.
//! Defines Args (global flags plus one subcommand per blueprint) and provides parse().
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - Unset flags leave config-file values in place.

use clap::{Args as ClapArgs, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::archive::Compression;
use crate::config::types::{Config, LogLevel};
use crate::matching::MatchPolicy;
use crate::naming::DestinationSpec;
use crate::transfer::TransferRequest;

/// Source-file discovery, matching and destination naming for data-movement blueprints.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Copy, compress and decompress files matched by name or pattern"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        global = true,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Also append logs to this file.
    #[arg(long, global = true, value_hint = ValueHint::FilePath, help = "Append logs to this file")]
    pub log_file: Option<PathBuf>,

    /// Worker threads for multi-file transfers.
    #[arg(short = 'j', long, global = true, help = "Worker threads for multi-file transfers")]
    pub jobs: Option<usize>,

    /// Attempts per file before giving up on transient errors.
    #[arg(long, global = true, help = "Attempts per file before giving up on transient errors")]
    pub max_attempts: Option<u32>,

    /// Dry-run: resolve and report but do not write.
    #[arg(
        long,
        global = true,
        help = "Show what would be done, but do not write any files"
    )]
    pub dry_run: bool,

    /// Print where the config file is looked up and the effective settings, then exit.
    #[arg(
        long,
        global = true,
        help = "Print the config file location and effective settings, then exit"
    )]
    pub print_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Copy matched files from the source root to the destination root.
    Copy {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        destination: DestinationArgs,
    },
    /// Bundle matched files into a single archive.
    Compress {
        #[arg(long, value_enum)]
        compression: Compression,
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        destination: DestinationArgs,
    },
    /// Extract one archive into a folder.
    Decompress {
        #[arg(long, value_enum)]
        compression: Compression,
        #[arg(long)]
        source_file_name: String,
        #[arg(long, default_value = "")]
        source_folder_name: String,
        /// Folder the source names are relative to.
        #[arg(long, value_hint = ValueHint::DirPath)]
        source_root: Option<PathBuf>,
        #[command(flatten)]
        destination: DestinationArgs,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SourceArgs {
    /// How --source-file-name is interpreted.
    #[arg(long, value_enum)]
    pub source_file_name_match_type: MatchPolicy,
    /// Literal file name, or a regular expression matched against base names.
    #[arg(long)]
    pub source_file_name: String,
    #[arg(long, default_value = "")]
    pub source_folder_name: String,
    /// Folder the source names are relative to (default: current directory).
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub source_root: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DestinationArgs {
    #[arg(long)]
    pub destination_file_name: Option<String>,
    #[arg(long, default_value = "")]
    pub destination_folder_name: String,
    /// Folder destinations are written under (default: current directory).
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub destination_root: Option<PathBuf>,
}

impl SourceArgs {
    /// Transfer request for these source flags and `destination`.
    pub fn request(&self, destination: DestinationSpec) -> TransferRequest {
        TransferRequest::new(
            self.source_file_name_match_type,
            &self.source_folder_name,
            &self.source_file_name,
            destination,
        )
    }
}

impl DestinationArgs {
    pub fn spec(&self) -> DestinationSpec {
        DestinationSpec::new(&self.destination_folder_name, self.destination_file_name.as_deref())
    }
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(path) = &self.log_file {
            cfg.log_file = Some(path.clone());
        }
        if let Some(jobs) = self.jobs {
            cfg.jobs = jobs;
        }
        if let Some(n) = self.max_attempts {
            cfg.retry.max_attempts = n;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

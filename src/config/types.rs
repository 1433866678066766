//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use quick_xml::escape::escape;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::retry::RetrySettings;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration shared by every blueprint.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Worker threads for multi-file transfers
    pub jobs: usize,
    /// Retry policy for single transfers
    pub retry: RetrySettings,
    /// If true, resolve and report but do not write anything
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Normal,
            log_file: None,
            jobs: 1,
            retry: RetrySettings::default(),
            dry_run: false,
        }
    }
}

impl Config {
    /// Render the effective settings as XML, in the same shape `xml` reads.
    pub fn to_xml(&self) -> String {
        let log_file = self
            .log_file
            .as_ref()
            .map(|p| escape(p.display().to_string()).into_owned())
            .unwrap_or_default();
        format!(
            "<config>\n  <log_level>{}</log_level>\n  <log_file>{}</log_file>\n  <jobs>{}</jobs>\n  <max_attempts>{}</max_attempts>\n  <initial_backoff_ms>{}</initial_backoff_ms>\n  <max_backoff_ms>{}</max_backoff_ms>\n</config>\n",
            self.log_level,
            log_file,
            self.jobs,
            self.retry.max_attempts,
            self.retry.initial_backoff_ms,
            self.retry.max_backoff_ms,
        )
    }
}

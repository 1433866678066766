//! Config validation: numeric ranges and log-file safety.

use anyhow::{bail, Result};
use tracing::debug;

use super::paths::path_has_symlink_ancestor;
use super::types::Config;
use super::MAX_JOBS;

impl Config {
    /// Reject values no blueprint can run with.
    pub fn validate(&self) -> Result<()> {
        if self.jobs == 0 || self.jobs > MAX_JOBS {
            bail!("jobs must be between 1 and {MAX_JOBS}, got {}", self.jobs);
        }
        if self.retry.max_attempts == 0 {
            bail!("max_attempts must be at least 1");
        }
        if self.retry.initial_backoff_ms > self.retry.max_backoff_ms {
            bail!(
                "initial_backoff_ms ({}) must not exceed max_backoff_ms ({})",
                self.retry.initial_backoff_ms,
                self.retry.max_backoff_ms
            );
        }
        if let Some(log) = &self.log_file {
            if log.is_dir() {
                bail!("log_file '{}' is a directory", log.display());
            }
            if path_has_symlink_ancestor(log)? {
                bail!("log_file '{}' has a symlinked ancestor", log.display());
            }
        }
        debug!(jobs = self.jobs, max_attempts = self.retry.max_attempts, "Config validated");
        Ok(())
    }
}

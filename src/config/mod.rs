//! Configuration: types, default paths, XML loading and validation.
//!
//! The config file is optional and only ever read. Values are layered as
//! CLI flag > config file > built-in default; the merged `Config` is passed
//! explicitly to every component.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor, CONFIG_ENV_VAR};
pub use types::{Config, LogLevel};
pub use xml::{load_config, load_config_from_xml_path};

/// Upper bound for `jobs`; more workers than this only adds contention.
pub const MAX_JOBS: usize = 64;

//! Core library for `blueprints`.
//!
//! Single-purpose data-movement blueprints share one piece of logic: find the
//! source file(s) by literal name or pattern, decide the destination name for
//! each, and move every item independently. This crate holds that logic plus
//! the local-filesystem endpoints the `blueprints` binary runs against.
//!
//! ```no_run
//! use blueprints::{DestinationSpec, LocalSink, LocalSource, MatchPolicy, TransferOptions, TransferRequest};
//!
//! let source = LocalSource::new("/data/in");
//! let sink = LocalSink::new("/data/out");
//! let request = TransferRequest::new(
//!     MatchPolicy::Pattern,
//!     "reports",
//!     r"\.csv$",
//!     DestinationSpec::new("daily", Some("report.csv")),
//! );
//! let plan = blueprints::plan(&source, &request)?;
//! let report = blueprints::execute(&plan, &source, &sink, &TransferOptions::default())?;
//! println!("{} copied, {} failed", report.succeeded.len(), report.failed.len());
//! # Ok::<(), blueprints::BlueprintError>(())
//! ```

pub mod archive;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod matching;
pub mod naming;
pub mod output;
pub mod retry;
pub mod shutdown;
pub mod source;
pub mod transfer;

pub use config::{
    default_config_path, default_log_path, load_config, path_has_symlink_ancestor, Config,
    LogLevel, CONFIG_ENV_VAR,
};
pub use errors::BlueprintError;
pub use matching::{compile_pattern, filter_by_pattern, MatchPolicy};
pub use naming::{
    base_name, join, normalize_folder, resolve_destination_name, resolve_full_destination,
    DestinationSpec, ResolvedDestination,
};
pub use retry::{retry_with_backoff, RetrySettings};
pub use source::{collect_all_pages, Candidate, LocalSource, MemoryStore, Page, PagedListing, Source};
pub use transfer::{
    execute, plan, LocalSink, Sink, TransferOptions, TransferPlan, TransferReport, TransferRequest,
};

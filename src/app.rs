//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler, and
//! runs the selected blueprint.

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};

use blueprints::archive::{self, archive_destination, extraction_destination, Compression};
use blueprints::cli::{Args, Command, DestinationArgs, SourceArgs};
use blueprints::output as out;
use blueprints::transfer::{self, LocalSink, TransferOptions, TransferReport};
use blueprints::{
    default_config_path, join, load_config, normalize_folder, shutdown, BlueprintError, Config,
    LocalSource, Source, CONFIG_ENV_VAR,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Build config: file first, then CLI overrides.
    let loaded = load_config()?;
    let (mut cfg, cfg_path) = match loaded {
        Some((cfg, path)) => (cfg, Some(path)),
        None => (Config::default(), None),
    };
    args.apply_overrides(&mut cfg);

    // Handle --print-config before logging init
    if args.print_config {
        print_config(cfg_path.as_deref(), &cfg);
        return Ok(());
    }
    cfg.validate()?;

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; finishing the current file and stopping...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })
        .context("install signal handler")?;
    }

    if let Some(path) = &cfg_path {
        debug!(config = %path.display(), "Loaded config file");
    }
    debug!(?args, "Starting blueprints");

    let result = dispatch(&args.command, &cfg);
    if let Err(e) = &result {
        log_failure(e);
    }

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }
    result
}

fn dispatch(command: &Command, cfg: &Config) -> Result<()> {
    match command {
        Command::Copy {
            source,
            destination,
        } => run_copy(source, destination, cfg),
        Command::Compress {
            compression,
            source,
            destination,
        } => run_compress(*compression, source, destination, cfg),
        Command::Decompress {
            compression,
            source_file_name,
            source_folder_name,
            source_root,
            destination,
        } => run_decompress(
            *compression,
            source_file_name,
            source_folder_name,
            source_root.as_deref(),
            destination,
            cfg,
        ),
    }
}

fn root_or_cwd(root: Option<&Path>) -> Result<PathBuf> {
    match root {
        Some(p) => Ok(p.to_path_buf()),
        None => env::current_dir().context("determine current directory"),
    }
}

fn run_copy(source_args: &SourceArgs, dest_args: &DestinationArgs, cfg: &Config) -> Result<()> {
    let source = LocalSource::new(root_or_cwd(source_args.source_root.as_deref())?);
    let sink = LocalSink::new(root_or_cwd(dest_args.destination_root.as_deref())?);
    let request = source_args.request(dest_args.spec());

    let plan = transfer::plan(&source, &request)?;
    if plan.is_empty() {
        warn!(pattern = %request.source_file_name, "No files matched");
        out::print_warn(&format!(
            "No files matched '{}' in '{}'",
            request.source_file_name,
            normalize_folder(&request.source_folder)
        ));
        return Ok(());
    }

    let options = TransferOptions {
        jobs: cfg.jobs,
        dry_run: cfg.dry_run,
        retry: cfg.retry.clone(),
    };
    let report = transfer::execute(&plan, &source, &sink, &options)?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &TransferReport) {
    let verb = if report.dry_run { "Would copy" } else { "Copied" };
    for outcome in &report.succeeded {
        out::print_user(&format!("{verb} '{}' -> '{}'", outcome.source, outcome.destination));
    }
    for failure in &report.failed {
        out::print_error(&format!("Failed '{}': {}", failure.source, failure.error));
    }
    if report.is_complete() {
        out::print_success(&format!("{} file(s) processed", report.succeeded.len()));
    } else {
        out::print_warn(&format!(
            "{} of {} file(s) failed; see the log for details",
            report.failed.len(),
            report.total()
        ));
    }
}

fn run_compress(
    compression: Compression,
    source_args: &SourceArgs,
    dest_args: &DestinationArgs,
    cfg: &Config,
) -> Result<()> {
    let source = LocalSource::new(root_or_cwd(source_args.source_root.as_deref())?);
    let dest_root = root_or_cwd(dest_args.destination_root.as_deref())?;
    let request = source_args.request(dest_args.spec());

    let plan = transfer::plan(&source, &request)?;
    let candidates: Vec<_> = plan.items.into_iter().map(|i| i.candidate).collect();
    let archive_key = archive_destination(
        &dest_args.destination_folder_name,
        dest_args.destination_file_name.as_deref(),
        compression,
    );
    let archive_path = archive_key.to_path(&dest_root)?;
    out::print_info(&format!(
        "{} file(s) found. Preparing to compress with {compression}...",
        candidates.len()
    ));

    if cfg.dry_run {
        for c in &candidates {
            out::print_user(&format!("Would add '{}' to '{}'", c.name(), archive_key));
        }
        return Ok(());
    }
    archive::compress(&source, &candidates, &archive_path, compression)?;
    out::print_success(&format!("Wrote '{archive_key}'"));
    Ok(())
}

fn run_decompress(
    compression: Compression,
    source_file_name: &str,
    source_folder_name: &str,
    source_root: Option<&Path>,
    dest_args: &DestinationArgs,
    cfg: &Config,
) -> Result<()> {
    let source = LocalSource::new(root_or_cwd(source_root)?);
    let dest_root = root_or_cwd(dest_args.destination_root.as_deref())?;

    let name = join(&normalize_folder(source_folder_name), source_file_name);
    let candidate = source.lookup(&name)?;
    let archive_path = candidate
        .local_path()
        .ok_or_else(|| BlueprintError::NotFound {
            location: name.clone(),
        })?
        .to_path_buf();

    let target_key = extraction_destination(
        &dest_args.destination_folder_name,
        dest_args.destination_file_name.as_deref(),
        candidate.name(),
        compression,
    );
    let target = target_key.to_path(&dest_root)?;

    if cfg.dry_run {
        out::print_user(&format!("Would extract '{}' -> '{}'", candidate.name(), target_key));
        return Ok(());
    }
    let entries = archive::decompress(&archive_path, &target, compression)?;
    info!(source = %source.describe(), archive = %candidate.name(), entries, "Decompressed");
    out::print_success(&format!("Extracted {entries} entries from '{}' into '{target_key}'", candidate.name()));
    Ok(())
}

/// Structured error event for fatal failures.
fn log_failure(e: &anyhow::Error) {
    match e.downcast_ref::<BlueprintError>() {
        Some(be) => error!(code = be.code(), kind = be.kind(), error = %be, "Blueprint failed"),
        None => error!(error = %format!("{e:#}"), "Blueprint failed"),
    }
}

fn print_config(loaded_from: Option<&Path>, cfg: &Config) {
    if let Ok(p) = env::var(CONFIG_ENV_VAR) {
        out::print_info(&format!("Using {CONFIG_ENV_VAR} (explicit):\n  {p}\n"));
    } else {
        match default_config_path() {
            Some(p) => out::print_info(&format!("Default config path:\n  {}\n", p.display())),
            None => out::print_warn("Could not determine a default config path"),
        }
    }
    match loaded_from {
        Some(p) => out::print_info(&format!("Loaded settings from {}", p.display())),
        None => out::print_info("No config file found; using built-in defaults"),
    }
    out::print_user(&cfg.to_xml());
}

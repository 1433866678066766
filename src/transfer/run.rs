//! Executing a plan.
//!
//! Exact plans are all-or-nothing: the single item's error is returned.
//! Pattern plans isolate failures per item; each failure is logged, recorded in
//! the report, and the remaining items still run. Report order always follows
//! plan order, including when items run on the worker pool.

use rayon::prelude::*;
use tracing::{error, info, warn};

use crate::errors::BlueprintError;
use crate::matching::MatchPolicy;
use crate::naming::ResolvedDestination;
use crate::retry::{retry_with_backoff, RetrySettings};
use crate::shutdown;
use crate::source::Source;

use super::plan::{PlannedTransfer, TransferPlan};
use super::sink::Sink;

#[derive(Debug, Clone, PartialEq)]
pub struct TransferOptions {
    /// Worker threads for multi-item plans; 1 runs sequentially.
    pub jobs: usize,
    /// Resolve and report without writing anything.
    pub dry_run: bool,
    pub retry: RetrySettings,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            jobs: 1,
            dry_run: false,
            retry: RetrySettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    pub source: String,
    pub destination: ResolvedDestination,
    /// Bytes written; zero for dry runs.
    pub bytes: u64,
}

#[derive(Debug)]
pub struct TransferFailure {
    pub source: String,
    pub destination: ResolvedDestination,
    pub error: BlueprintError,
}

#[derive(Debug, Default)]
pub struct TransferReport {
    pub succeeded: Vec<TransferOutcome>,
    pub failed: Vec<TransferFailure>,
    pub dry_run: bool,
}

impl TransferReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn bytes(&self) -> u64 {
        self.succeeded.iter().map(|o| o.bytes).sum()
    }
}

/// Run every item of `plan` from `source` into `sink`.
pub fn execute(
    plan: &TransferPlan,
    source: &dyn Source,
    sink: &dyn Sink,
    options: &TransferOptions,
) -> Result<TransferReport, BlueprintError> {
    info!(
        source = %source.describe(),
        sink = %sink.describe(),
        items = plan.len(),
        policy = %plan.policy,
        dry_run = options.dry_run,
        "Starting transfer"
    );

    let results: Vec<Result<u64, BlueprintError>> = match plan.policy {
        MatchPolicy::Exact => {
            let mut results = Vec::with_capacity(plan.len());
            for item in &plan.items {
                // fatal: no isolation for a literal single-item request
                results.push(Ok(transfer_one(item, source, sink, options)?));
            }
            results
        }
        MatchPolicy::Pattern if options.jobs > 1 && plan.len() > 1 => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(options.jobs)
                .build()
                .map_err(|e| BlueprintError::InvalidInput {
                    field: "jobs",
                    reason: e.to_string(),
                })?;
            pool.install(|| {
                plan.items
                    .par_iter()
                    .map(|item| transfer_one(item, source, sink, options))
                    .collect()
            })
        }
        MatchPolicy::Pattern => plan
            .items
            .iter()
            .map(|item| transfer_one(item, source, sink, options))
            .collect(),
    };

    let mut report = TransferReport {
        dry_run: options.dry_run,
        ..TransferReport::default()
    };
    for (item, result) in plan.items.iter().zip(results) {
        match result {
            Ok(bytes) => report.succeeded.push(TransferOutcome {
                source: item.candidate.name().to_string(),
                destination: item.destination.clone(),
                bytes,
            }),
            Err(e) => {
                error!(
                    src = %item.candidate.name(),
                    dest = %item.destination,
                    code = e.code(),
                    kind = e.kind(),
                    error = %e,
                    "Transfer failed; skipping"
                );
                report.failed.push(TransferFailure {
                    source: item.candidate.name().to_string(),
                    destination: item.destination.clone(),
                    error: e,
                });
            }
        }
    }

    if report.is_complete() {
        info!(transferred = report.succeeded.len(), bytes = report.bytes(), "Transfer finished");
    } else {
        warn!(
            transferred = report.succeeded.len(),
            failed = report.failed.len(),
            "Transfer finished with failures"
        );
    }
    Ok(report)
}

fn transfer_one(
    item: &PlannedTransfer,
    source: &dyn Source,
    sink: &dyn Sink,
    options: &TransferOptions,
) -> Result<u64, BlueprintError> {
    if shutdown::is_requested() {
        return Err(BlueprintError::Interrupted);
    }
    if options.dry_run {
        info!(src = %item.candidate.name(), dest = %item.destination, "Dry run: would transfer");
        return Ok(0);
    }

    let bytes = retry_with_backoff(
        &options.retry,
        |e: &BlueprintError| e.is_retryable(),
        |_attempt| {
            let mut reader = source.open(&item.candidate)?;
            sink.write(&mut *reader, &item.destination)
        },
    )?;
    info!(src = %item.candidate.name(), dest = %item.destination, bytes, "Transferred");
    Ok(bytes)
}

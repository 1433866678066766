//! Planning and executing transfers between a `Source` and a `Sink`.

mod plan;
mod run;
mod sink;

pub use plan::{plan, PlannedTransfer, TransferPlan, TransferRequest};
pub use run::{execute, TransferFailure, TransferOptions, TransferOutcome, TransferReport};
pub use sink::{LocalSink, Sink};

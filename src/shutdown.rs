//! Process-wide stop flag, set from the Ctrl-C handler.
//!
//! Transfers check it between items: the file in flight finishes (or fails) on
//! its own, every later item is reported as interrupted.
//! Relaxed ordering is enough for a one-way flag.

use std::sync::atomic::{AtomicBool, Ordering};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Request a cooperative shutdown (idempotent, signal-safe).
#[inline]
pub fn request() {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

#[inline]
pub fn is_requested() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

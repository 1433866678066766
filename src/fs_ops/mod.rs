//! Filesystem helpers shared by the local sink and the archive blueprints.

mod atomic;
mod helpers;
mod stream;
mod util;

pub use atomic::try_atomic_move;
pub use helpers::{io_error_with_help, io_error_with_help_io};
pub use stream::write_atomically;
pub(crate) use util::{unique_temp_path, TEMP_PREFIX};

//! Name resolution: which name each matched item is written to.

mod destination;
mod folder;

pub use destination::{
    resolve_destination_name, resolve_full_destination, strip_archive_extension, DestinationSpec,
    ResolvedDestination,
};
pub use folder::{base_name, join, normalize_folder, path_under_root, SEPARATOR};

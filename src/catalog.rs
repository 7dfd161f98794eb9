//! The track catalog: a directory tree scanned from a root path, plus the
//! flattened, pre-order list of its track leaves used for selection.

mod model;
mod scan;

pub use model::*;

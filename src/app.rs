//! Application module: exposes the app context used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the catalog, the
//! selection cursor and the display state derived from playback.

mod model;

pub use model::*;

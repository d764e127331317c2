// Library crate: the layout engine plus the harness and command protocol
// used by the `furnish` binary and integration tests.

pub mod catalog;
pub mod command;
pub mod error;
pub mod fixtures;
pub mod harness;
pub mod ids;
pub mod loader;
pub mod placement;
pub mod settings;
pub mod state;
pub mod transform;
pub mod units;
pub mod views;

pub use error::{LayoutError, LoadError, Result};
pub use settings::EngineSettings;
pub use state::{LayoutSession, Snapshot, UpdateKind, ViewKind};

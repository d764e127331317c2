pub mod history;
pub mod selection;
pub mod session;

pub use history::History;
pub use selection::SelectionState;
pub use session::{LayoutSession, Snapshot, UpdateKind, ViewKind};

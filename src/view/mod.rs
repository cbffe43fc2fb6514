pub mod embed;
pub mod state;

pub use embed::EmbedLifecycle;
pub use state::{ViewMode, ViewState};

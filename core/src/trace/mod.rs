pub mod loader;
pub mod naming;

pub use loader::TraceLoader;
pub use naming::{common_prefix, display_names};

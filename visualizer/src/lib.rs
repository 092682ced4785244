//! Interactive dual-axis chart of per-trace delays and reference jitter.
//!
//! Delay series share the left axis, the reference jitter gets its own right
//! axis, and a combined legend toggles each line's visibility.

mod app;
pub mod chart;
pub mod format;
pub mod legend;
pub mod model;
pub mod scale;
pub mod settings;

pub use app::{render, DisplayError, Message};
pub use model::{LineId, PlotModel};
pub use settings::PlotSettings;

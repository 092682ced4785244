use serde::{Deserialize, Serialize};

/// Presentation knobs for the delay chart window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    pub window_width: f32,
    pub window_height: f32,
    /// Upper bound on tick marks per axis.
    pub max_ticks: usize,
    /// Legend opacity of hidden lines.
    pub dimmed_alpha: f32,
    pub dark_theme: bool,
    /// Markers are skipped for lines with more visible points than this.
    pub marker_limit: usize,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            window_width: 1000.0,
            window_height: 800.0,
            max_ticks: 20,
            dimmed_alpha: 0.3,
            dark_theme: true,
            marker_limit: 4000,
        }
    }
}

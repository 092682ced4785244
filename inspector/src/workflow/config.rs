use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use visualizer::PlotSettings;

/// Run configuration; every field may be omitted from the YAML file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// Position of the reference trace among the supplied files.
    pub reference: usize,
    /// Percentage of leading samples left out of the statistics as warm-up.
    pub skip_first: f64,
    pub plot: PlotSettings,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            reference: 0,
            skip_first: 10.0,
            plot: PlotSettings::default(),
        }
    }
}

impl InspectorConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading inspector config {}", path_ref.display()))?;
        let config: InspectorConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing inspector config {}", path_ref.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Applies command-line values on top of the loaded configuration.
    pub fn with_overrides(
        mut self,
        reference: Option<usize>,
        skip_first: Option<f64>,
    ) -> anyhow::Result<Self> {
        if let Some(reference) = reference {
            self.reference = reference;
        }
        if let Some(skip_first) = skip_first {
            self.skip_first = skip_first;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=100.0).contains(&self.skip_first) {
            bail!(
                "skip_first must be a percentage between 0 and 100, got {}",
                self.skip_first
            );
        }
        Ok(())
    }
}

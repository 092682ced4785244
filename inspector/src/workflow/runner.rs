use crate::workflow::config::InspectorConfig;
use anyhow::Context;
use delaycore::math::StatsHelper;
use delaycore::prelude::{DelayAnalysis, DelaySummary, TraceSet};
use delaycore::{DelayComputer, TraceLoader};
use log::info;
use serde::Serialize;
use std::path::Path;
use visualizer::format::EngFormatter;

#[derive(Debug)]
pub struct WorkflowResult {
    pub prefix: String,
    pub analysis: DelayAnalysis,
    pub summary: SummaryReport,
}

/// Statistics printed by `--summary` and logged on every run.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub reference: String,
    pub samples: usize,
    pub skip_first: f64,
    pub delays: Vec<DelaySummary>,
    pub jitter: Option<DelaySummary>,
}

impl SummaryReport {
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("serializing summary report")
    }
}

#[derive(Clone)]
pub struct Runner {
    config: InspectorConfig,
}

impl Runner {
    pub fn new(config: InspectorConfig) -> Self {
        Self { config }
    }

    pub fn execute<P: AsRef<Path>>(&self, paths: &[P]) -> anyhow::Result<WorkflowResult> {
        let TraceSet { prefix, traces } = TraceLoader::new()
            .load_set(paths)
            .context("loading trace files")?;

        let analysis = DelayComputer::new()
            .compute(&traces, self.config.reference)
            .context("computing delays against the reference trace")?;

        let reference = &traces[self.config.reference];
        let delays: Vec<DelaySummary> = traces
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != self.config.reference)
            .filter_map(|(_, trace)| {
                StatsHelper::delay_summary(reference, trace, self.config.skip_first)
            })
            .collect();
        let jitter = StatsHelper::jitter_summary(&analysis.jitter, self.config.skip_first);

        let summary = SummaryReport {
            reference: analysis.reference_name.clone(),
            samples: analysis.sample_count(),
            skip_first: self.config.skip_first,
            delays,
            jitter,
        };
        log_summary(&summary);

        Ok(WorkflowResult {
            prefix,
            analysis,
            summary,
        })
    }
}

fn log_summary(summary: &SummaryReport) {
    let ns = EngFormatter::nanoseconds();
    let describe = |entry: &DelaySummary| {
        format!(
            "Min {} Max {} 50% {} 90% {} 99% {} 99.9% {} ({} samples, {} missing)",
            ns.format(entry.min as f64),
            ns.format(entry.max as f64),
            ns.format(entry.p50 as f64),
            ns.format(entry.p90 as f64),
            ns.format(entry.p99 as f64),
            ns.format(entry.p999 as f64),
            entry.samples,
            entry.missing
        )
    };

    info!(
        "{} samples relative to {}, first {}% excluded from statistics",
        summary.samples, summary.reference, summary.skip_first
    );
    for entry in &summary.delays {
        info!("delay {}: {}", entry.label, describe(entry));
    }
    if let Some(jitter) = &summary.jitter {
        info!("jitter {}: {}", jitter.label, describe(jitter));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_trace(dir: &TempDir, name: &str, samples: &[i64]) -> PathBuf {
        let path = dir.path().join(name);
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        fs::write(&path, bytes).unwrap();
        path
    }

    fn unskipped() -> InspectorConfig {
        InspectorConfig {
            skip_first: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn runner_executes_workflow() {
        let dir = TempDir::new().unwrap();
        let paths = vec![
            write_trace(&dir, "bench-Pub.ns", &[100, 200, 300, 400]),
            write_trace(&dir, "bench-Sub0.ns", &[100, 0, 305, 405]),
        ];

        let result = Runner::new(unskipped()).execute(&paths).unwrap();
        assert!(result.prefix.ends_with("bench-"));
        assert_eq!(result.analysis.reference_name, "Pub.ns");
        assert_eq!(result.analysis.delays[0].values.to_vec(), vec![0, 0, 5, 5]);
        assert_eq!(result.summary.delays[0].missing, 1);
        assert_eq!(result.summary.delays[0].max, 5);
        assert_eq!(result.summary.jitter.as_ref().unwrap().p50, 100);
    }

    #[test]
    fn runner_rejects_unequal_traces() {
        let dir = TempDir::new().unwrap();
        let paths = vec![
            write_trace(&dir, "a.ns", &[1, 2, 3]),
            write_trace(&dir, "b.ns", &[1, 2]),
        ];
        let err = Runner::new(unskipped()).execute(&paths).unwrap_err();
        assert!(format!("{:#}", err).contains("has 2 samples"));
    }

    #[test]
    fn summary_report_serializes_to_json() {
        let dir = TempDir::new().unwrap();
        let paths = vec![
            write_trace(&dir, "x-Pub.ns", &[10, 20, 30]),
            write_trace(&dir, "x-Sub.ns", &[11, 22, 33]),
        ];
        let result = Runner::new(unskipped()).execute(&paths).unwrap();
        let json = result.summary.to_json().unwrap();
        assert!(json.contains("\"reference\": \"Pub.ns\""));
        assert!(json.contains("\"label\": \"Sub.ns\""));
    }
}

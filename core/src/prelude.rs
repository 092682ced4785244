use ndarray::Array1;
use serde::Serialize;
use std::io;
use std::path::PathBuf;

/// Width in bytes of one timestamp sample on disk.
pub const SAMPLE_WIDTH: usize = std::mem::size_of::<i64>();

/// One ordered sequence of timestamp samples read from a single capture file.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub name: String,
    pub path: PathBuf,
    pub samples: Array1<i64>,
}

impl Trace {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, samples: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            samples: Array1::from(samples),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at `index`, or `None` when the capture did not report there.
    ///
    /// A raw value of zero is the on-disk marker for a missing sample.
    pub fn reported(&self, index: usize) -> Option<i64> {
        match self.samples.get(index) {
            Some(&0) | None => None,
            Some(&value) => Some(value),
        }
    }

    /// Number of samples carrying the missing-sample marker.
    pub fn gap_count(&self) -> usize {
        self.samples.iter().filter(|&&value| value == 0).count()
    }
}

/// Loaded traces together with the path prefix stripped from their names.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceSet {
    pub prefix: String,
    pub traces: Vec<Trace>,
}

/// Per-sample delay of one comparison trace against the reference.
#[derive(Debug, Clone, PartialEq)]
pub struct DelaySeries {
    pub label: String,
    pub values: Array1<i64>,
    pub missing: usize,
}

/// Sample-to-sample spacing of the reference trace.
#[derive(Debug, Clone, PartialEq)]
pub struct JitterSeries {
    pub label: String,
    pub values: Array1<i64>,
}

/// Output of the delay computation for a whole trace set.
#[derive(Debug, Clone, PartialEq)]
pub struct DelayAnalysis {
    pub sample_index: Array1<usize>,
    pub reference_name: String,
    pub delays: Vec<DelaySeries>,
    pub jitter: JitterSeries,
}

impl DelayAnalysis {
    pub fn sample_count(&self) -> usize {
        self.sample_index.len()
    }
}

/// Distribution summary of one delay or jitter series, in raw timestamp units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DelaySummary {
    pub label: String,
    pub samples: usize,
    pub missing: usize,
    pub min: i64,
    pub max: i64,
    pub p50: i64,
    pub p90: i64,
    pub p99: i64,
    pub p999: i64,
}

/// Common error type for loading and analysing traces.
#[derive(thiserror::Error, Debug)]
pub enum InspectError {
    #[error("no trace files supplied")]
    NoTraces,
    #[error("failed to read trace {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(
        "trace {} holds {bytes} bytes, not a whole number of {width}-byte samples",
        path.display()
    )]
    Format {
        path: PathBuf,
        bytes: usize,
        width: usize,
    },
    #[error("trace {name} has {found} samples but reference {reference} has {expected}")]
    ShapeMismatch {
        name: String,
        reference: String,
        expected: usize,
        found: usize,
    },
    #[error("reference index {index} is out of range for {count} traces")]
    InvalidReference { index: usize, count: usize },
}

pub type InspectResult<T> = Result<T, InspectError>;

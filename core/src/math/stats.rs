use crate::prelude::{DelaySummary, JitterSeries, Trace};

pub struct StatsHelper;

impl StatsHelper {
    /// Number of leading samples dropped when skipping `percent` of `len` as warm-up.
    pub fn skip_count(len: usize, percent: f64) -> usize {
        let fraction = (percent / 100.0).clamp(0.0, 1.0);
        ((len as f64 * fraction) as usize).min(len)
    }

    /// Value at `floor((n - 1) * p)` of an ascending slice.
    pub fn percentile(sorted: &[i64], p: f64) -> Option<i64> {
        if sorted.is_empty() {
            return None;
        }
        let index = ((sorted.len() - 1) as f64 * p.clamp(0.0, 1.0)) as usize;
        sorted.get(index).copied()
    }

    /// Summarizes `values`; `None` when there is nothing to summarize.
    pub fn summarize(label: &str, mut values: Vec<i64>, missing: usize) -> Option<DelaySummary> {
        values.sort_unstable();
        let pick = |p: f64| Self::percentile(&values, p);

        Some(DelaySummary {
            label: label.to_string(),
            samples: values.len(),
            missing,
            min: *values.first()?,
            max: *values.last()?,
            p50: pick(0.50)?,
            p90: pick(0.90)?,
            p99: pick(0.99)?,
            p999: pick(0.999)?,
        })
    }

    /// Delay distribution of `comparison` against `reference`, ignoring missing samples.
    pub fn delay_summary(
        reference: &Trace,
        comparison: &Trace,
        skip_percent: f64,
    ) -> Option<DelaySummary> {
        let len = reference.len().min(comparison.len());
        let skip = Self::skip_count(len, skip_percent);

        let mut missing = 0;
        let mut values = Vec::with_capacity(len - skip);
        for idx in skip..len {
            match comparison.reported(idx) {
                Some(sample) => values.push(sample.wrapping_sub(reference.samples[idx])),
                None => missing += 1,
            }
        }

        Self::summarize(&comparison.name, values, missing)
    }

    /// Spacing distribution of the reference trace; the zero pad at index 0 is excluded.
    pub fn jitter_summary(jitter: &JitterSeries, skip_percent: f64) -> Option<DelaySummary> {
        let skip = Self::skip_count(jitter.values.len(), skip_percent).max(1);
        let values = jitter.values.iter().skip(skip).copied().collect();
        Self::summarize(&jitter.label, values, 0)
    }
}

use crate::prelude::{DelayAnalysis, DelaySeries, InspectError, InspectResult, JitterSeries, Trace};
use crate::telemetry::log::LogManager;
use ndarray::{s, Array1, Zip};

/// Aligns traces by sample index and derives delay and jitter series.
pub struct DelayComputer {
    logger: LogManager,
}

impl DelayComputer {
    pub fn new() -> Self {
        Self {
            logger: LogManager::new("delay"),
        }
    }

    /// Computes one delay series per non-reference trace plus the reference jitter.
    ///
    /// Every trace must hold as many samples as the reference; a mismatch is
    /// reported instead of truncating.
    pub fn compute(
        &self,
        traces: &[Trace],
        reference_index: usize,
    ) -> InspectResult<DelayAnalysis> {
        if traces.is_empty() {
            return Err(InspectError::NoTraces);
        }
        let reference = traces
            .get(reference_index)
            .ok_or(InspectError::InvalidReference {
                index: reference_index,
                count: traces.len(),
            })?;

        if let Some(mismatch) = traces.iter().find(|trace| trace.len() != reference.len()) {
            return Err(InspectError::ShapeMismatch {
                name: mismatch.name.clone(),
                reference: reference.name.clone(),
                expected: reference.len(),
                found: mismatch.len(),
            });
        }

        let delays: Vec<DelaySeries> = traces
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != reference_index)
            .map(|(_, comparison)| delay_series(reference, comparison))
            .collect();
        let jitter = jitter_series(reference);

        self.logger.record(&format!(
            "{} delay series over {} samples relative to {}",
            delays.len(),
            reference.len(),
            reference.name
        ));

        Ok(DelayAnalysis {
            sample_index: Array1::from_iter(0..reference.len()),
            reference_name: reference.name.clone(),
            delays,
            jitter,
        })
    }
}

impl Default for DelayComputer {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-sample `comparison - reference`, forced to zero where the comparison has no sample.
///
/// Both traces must have the same length.
pub fn delay_series(reference: &Trace, comparison: &Trace) -> DelaySeries {
    let values = Zip::from(&comparison.samples)
        .and(&reference.samples)
        .map_collect(|&sample, &base| {
            if sample == 0 {
                0
            } else {
                sample.wrapping_sub(base)
            }
        });

    DelaySeries {
        label: comparison.name.clone(),
        values,
        missing: comparison.gap_count(),
    }
}

/// First difference of the reference trace, padded with zero at index 0.
pub fn jitter_series(reference: &Trace) -> JitterSeries {
    let samples = &reference.samples;
    let mut values = Array1::<i64>::zeros(samples.len());
    if samples.len() > 1 {
        Zip::from(values.slice_mut(s![1..]))
            .and(samples.slice(s![1..]))
            .and(samples.slice(s![..-1]))
            .for_each(|delta, &current, &previous| *delta = current.wrapping_sub(previous));
    }

    JitterSeries {
        label: reference.name.clone(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(name: &str, samples: Vec<i64>) -> Trace {
        Trace::new(name, format!("/run/{name}"), samples)
    }

    #[test]
    fn missing_comparison_sample_yields_zero_delay() {
        let traces = vec![
            trace("pub", vec![100, 200, 300, 400]),
            trace("sub", vec![100, 0, 305, 405]),
        ];
        let analysis = DelayComputer::new().compute(&traces, 0).unwrap();

        assert_eq!(analysis.delays.len(), 1);
        assert_eq!(analysis.delays[0].label, "sub");
        assert_eq!(analysis.delays[0].values.to_vec(), vec![0, 0, 5, 5]);
        assert_eq!(analysis.delays[0].missing, 1);
        assert_eq!(analysis.sample_index.to_vec(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn jitter_is_padded_first_difference() {
        let reference = trace("pub", vec![1000, 1010, 1025, 1040]);
        let jitter = jitter_series(&reference);
        assert_eq!(jitter.values.to_vec(), vec![0, 10, 15, 15]);
        assert_eq!(jitter.label, "pub");
    }

    #[test]
    fn delay_matches_difference_wherever_reported() {
        let reference = trace("pub", vec![5, -7, 40, 41, 1 << 40, 9]);
        let comparison = trace("sub", vec![6, 0, -3, 41, (1 << 40) + 12, 0]);
        let series = delay_series(&reference, &comparison);

        for idx in 0..reference.len() {
            let expected = match comparison.reported(idx) {
                Some(sample) => sample - reference.samples[idx],
                None => 0,
            };
            assert_eq!(series.values[idx], expected, "index {idx}");
        }
    }

    #[test]
    fn silent_comparison_trace_is_all_zero() {
        let reference = trace("pub", vec![17, 99, 12345, -4]);
        let comparison = trace("sub", vec![0; 4]);
        let series = delay_series(&reference, &comparison);
        assert!(series.values.iter().all(|&value| value == 0));
        assert_eq!(series.missing, 4);
    }

    #[test]
    fn recomputation_is_identical() {
        let traces = vec![
            trace("a", vec![10, 20, 31, 45]),
            trace("b", vec![12, 0, 33, 50]),
            trace("c", vec![0, 25, 36, 44]),
        ];
        let computer = DelayComputer::new();
        let first = computer.compute(&traces, 0).unwrap();
        let second = computer.compute(&traces, 0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn single_trace_yields_jitter_only() {
        let traces = vec![trace("pub", vec![1, 3, 6])];
        let analysis = DelayComputer::new().compute(&traces, 0).unwrap();
        assert!(analysis.delays.is_empty());
        assert_eq!(analysis.jitter.values.to_vec(), vec![0, 2, 3]);
    }

    #[test]
    fn unequal_lengths_are_rejected() {
        let traces = vec![trace("pub", vec![1, 2, 3]), trace("sub", vec![1, 2])];
        let err = DelayComputer::new().compute(&traces, 0).unwrap_err();
        assert!(matches!(
            err,
            InspectError::ShapeMismatch {
                expected: 3,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn alternate_reference_keeps_remaining_order() {
        let traces = vec![
            trace("a", vec![10, 20]),
            trace("b", vec![15, 24]),
            trace("c", vec![11, 0]),
        ];
        let analysis = DelayComputer::new().compute(&traces, 1).unwrap();
        assert_eq!(analysis.reference_name, "b");
        let labels: Vec<_> = analysis.delays.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "c"]);
        assert_eq!(analysis.delays[0].values.to_vec(), vec![-5, -4]);
        assert_eq!(analysis.delays[1].values.to_vec(), vec![-4, 0]);
    }

    #[test]
    fn reference_index_must_exist() {
        let traces = vec![trace("a", vec![1])];
        assert!(matches!(
            DelayComputer::new().compute(&traces, 3),
            Err(InspectError::InvalidReference { index: 3, count: 1 })
        ));
    }

    #[test]
    fn empty_traces_produce_empty_series() {
        let traces = vec![trace("a", vec![]), trace("b", vec![])];
        let analysis = DelayComputer::new().compute(&traces, 0).unwrap();
        assert_eq!(analysis.sample_count(), 0);
        assert!(analysis.jitter.values.is_empty());
    }
}

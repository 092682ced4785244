use crate::prelude::{InspectError, InspectResult, Trace, TraceSet, SAMPLE_WIDTH};
use crate::telemetry::log::LogManager;
use crate::trace::naming::display_names;
use std::fs;
use std::path::Path;

/// Reads flat little-endian `i64` capture files into named traces.
pub struct TraceLoader {
    logger: LogManager,
}

impl TraceLoader {
    pub fn new() -> Self {
        Self {
            logger: LogManager::new("loader"),
        }
    }

    /// Loads one trace per path, preserving input order.
    ///
    /// Each trace is named after its path with the prefix common to all paths
    /// removed.
    pub fn load<P: AsRef<Path>>(&self, paths: &[P]) -> InspectResult<Vec<Trace>> {
        self.load_set(paths).map(|set| set.traces)
    }

    /// Like [`TraceLoader::load`], also keeping the stripped common prefix.
    pub fn load_set<P: AsRef<Path>>(&self, paths: &[P]) -> InspectResult<TraceSet> {
        if paths.is_empty() {
            return Err(InspectError::NoTraces);
        }

        let (prefix, names) = display_names(paths);
        self.logger.detail(&format!(
            "loading {} traces with common prefix {:?}",
            paths.len(),
            prefix
        ));

        let mut traces = Vec::with_capacity(paths.len());
        for (path, name) in paths.iter().zip(names) {
            let path = path.as_ref();
            let samples = read_samples(path)?;
            let trace = Trace::new(name, path, samples);

            self.logger.detail(&format!(
                "{} -> {} samples",
                path.display(),
                trace.len()
            ));
            let gaps = trace.gap_count();
            if gaps > 0 {
                self.logger.caution(&format!(
                    "{} reports no timestamp for {} of {} samples",
                    trace.name,
                    gaps,
                    trace.len()
                ));
            }
            traces.push(trace);
        }

        Ok(TraceSet { prefix, traces })
    }
}

impl Default for TraceLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn read_samples(path: &Path) -> InspectResult<Vec<i64>> {
    let bytes = fs::read(path).map_err(|source| InspectError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_samples(&bytes).ok_or_else(|| InspectError::Format {
        path: path.to_path_buf(),
        bytes: bytes.len(),
        width: SAMPLE_WIDTH,
    })
}

/// Decodes a buffer of packed little-endian `i64` samples.
///
/// Returns `None` when the buffer ends with a partial record.
pub fn decode_samples(bytes: &[u8]) -> Option<Vec<i64>> {
    let chunks = bytes.chunks_exact(SAMPLE_WIDTH);
    if !chunks.remainder().is_empty() {
        return None;
    }
    Some(
        chunks
            .map(|chunk| {
                let mut raw = [0u8; SAMPLE_WIDTH];
                raw.copy_from_slice(chunk);
                i64::from_le_bytes(raw)
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_trace(dir: &TempDir, name: &str, samples: &[i64]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        for sample in samples {
            file.write_all(&sample.to_le_bytes()).unwrap();
        }
        path
    }

    #[test]
    fn loader_reads_traces_in_order_with_short_names() {
        let dir = TempDir::new().unwrap();
        let reference = write_trace(&dir, "Perf-Pub.ns", &[100, 200, 300]);
        let subscriber = write_trace(&dir, "Perf-Sub0.ns", &[110, 0, 305]);

        let traces = TraceLoader::new().load(&[reference, subscriber]).unwrap();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].name, "Pub.ns");
        assert_eq!(traces[1].name, "Sub0.ns");
        assert_eq!(traces[1].samples.to_vec(), vec![110, 0, 305]);
    }

    #[test]
    fn trace_set_keeps_stripped_prefix() {
        let dir = TempDir::new().unwrap();
        let reference = write_trace(&dir, "Perf-Pub.ns", &[1]);
        let subscriber = write_trace(&dir, "Perf-Sub0.ns", &[2]);

        let set = TraceLoader::new().load_set(&[reference, subscriber]).unwrap();
        assert!(set.prefix.ends_with("Perf-"));
        assert!(set.prefix.starts_with(&*dir.path().to_string_lossy()));
        assert_eq!(set.traces[0].name, "Pub.ns");
    }

    #[test]
    fn loader_rejects_partial_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.ns");
        fs::write(&path, [0u8; 12]).unwrap();

        let err = TraceLoader::new().load(&[path]).unwrap_err();
        assert!(matches!(err, InspectError::Format { bytes: 12, width: 8, .. }));
    }

    #[test]
    fn loader_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = TraceLoader::new()
            .load(&[dir.path().join("absent.ns")])
            .unwrap_err();
        assert!(matches!(err, InspectError::Io { .. }));
    }

    #[test]
    fn loader_requires_at_least_one_path() {
        let paths: [&str; 0] = [];
        assert!(matches!(
            TraceLoader::new().load(&paths),
            Err(InspectError::NoTraces)
        ));
    }

    #[test]
    fn empty_file_is_an_empty_trace() {
        assert_eq!(decode_samples(&[]), Some(Vec::new()));
        assert_eq!(decode_samples(&(-5i64).to_le_bytes()), Some(vec![-5]));
    }
}

//! Core trace handling for the multi-trace timestamp delay inspector.
//!
//! Traces are flat binary captures of `i64` timestamps taken at different
//! observation points. The loader turns them into named [`Trace`]s, the delay
//! computer aligns them by sample index against a reference trace, and the
//! stats helpers condense each resulting series into percentiles.

pub mod math;
pub mod prelude;
pub mod processing;
pub mod telemetry;
pub mod trace;

pub use prelude::{
    DelayAnalysis, DelaySeries, DelaySummary, InspectError, InspectResult, JitterSeries, Trace,
    TraceSet,
};
pub use processing::DelayComputer;
pub use trace::TraceLoader;

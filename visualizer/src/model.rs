use crate::scale::{AxisRange, YAxis};
use delaycore::prelude::DelayAnalysis;
use iced::Color;
use ndarray::Array1;

const CATEGORY_PALETTE: [[u8; 3]; 10] = [
    [0x1f, 0x77, 0xb4],
    [0xff, 0x7f, 0x0e],
    [0x2c, 0xa0, 0x2c],
    [0xd6, 0x27, 0x28],
    [0x94, 0x67, 0xbd],
    [0x8c, 0x56, 0x4b],
    [0xe3, 0x77, 0xc2],
    [0x7f, 0x7f, 0x7f],
    [0xbc, 0xbd, 0x22],
    [0x17, 0xbe, 0xcf],
];

pub fn delay_axis_color() -> Color {
    Color::from_rgb8(0x69, 0xb3, 0xa2)
}

pub fn jitter_axis_color() -> Color {
    Color::from_rgb8(0x33, 0x99, 0xe6)
}

fn palette_color(slot: usize) -> Color {
    let [r, g, b] = CATEGORY_PALETTE[slot % CATEGORY_PALETTE.len()];
    Color::from_rgb8(r, g, b)
}

/// Stable identifier of a rendered line, assigned in construction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: f32,
    pub dashed: bool,
    pub marker: Option<f32>,
}

impl LineStyle {
    /// Thin dashed line with dot markers, used for delay series.
    pub fn delay(slot: usize) -> Self {
        Self {
            color: palette_color(slot),
            width: 0.5,
            dashed: true,
            marker: Some(1.5),
        }
    }

    /// Solid line without markers, used for the reference jitter.
    pub fn jitter() -> Self {
        Self {
            color: jitter_axis_color(),
            width: 1.0,
            dashed: false,
            marker: None,
        }
    }
}

/// One series bound to an axis, as drawn on the chart.
#[derive(Debug, Clone)]
pub struct PlotLine {
    pub id: LineId,
    pub label: String,
    pub axis: YAxis,
    pub style: LineStyle,
    pub values: Array1<i64>,
}

/// Everything the chart needs to draw one analysis.
#[derive(Debug, Clone)]
pub struct PlotModel {
    pub prefix: String,
    pub reference_name: String,
    pub sample_count: usize,
    pub lines: Vec<PlotLine>,
    pub index_range: AxisRange,
    pub delay_range: AxisRange,
    pub jitter_range: AxisRange,
}

impl PlotModel {
    /// Builds delay lines first, in trace order, then the jitter line.
    pub fn new(analysis: DelayAnalysis, prefix: impl Into<String>) -> Self {
        let sample_count = analysis.sample_count();
        let mut lines: Vec<PlotLine> = analysis
            .delays
            .into_iter()
            .enumerate()
            .map(|(slot, series)| PlotLine {
                id: LineId(slot),
                label: series.label,
                axis: YAxis::Delay,
                style: LineStyle::delay(slot),
                values: series.values,
            })
            .collect();

        let delay_range = AxisRange::padded(
            lines
                .iter()
                .flat_map(|line| line.values.iter().copied()),
        );
        let jitter_range = AxisRange::padded(analysis.jitter.values.iter().copied());

        lines.push(PlotLine {
            id: LineId(lines.len()),
            label: analysis.jitter.label,
            axis: YAxis::Jitter,
            style: LineStyle::jitter(),
            values: analysis.jitter.values,
        });

        Self {
            prefix: prefix.into(),
            reference_name: analysis.reference_name,
            sample_count,
            lines,
            index_range: AxisRange::samples(sample_count),
            delay_range,
            jitter_range,
        }
    }

    pub fn line(&self, id: LineId) -> Option<&PlotLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    pub fn window_title(&self) -> String {
        format!("Signals delays relative to {}", self.reference_name)
    }

    /// Common prefix followed by the reference and comparison names.
    pub fn chart_title(&self) -> String {
        let names: Vec<&str> = std::iter::once(self.reference_name.as_str())
            .chain(
                self.lines
                    .iter()
                    .filter(|line| line.axis == YAxis::Delay)
                    .map(|line| line.label.as_str()),
            )
            .collect();
        format!("{}{}", self.prefix, names.join(","))
    }

    pub fn delay_axis_label(&self) -> String {
        format!("signals delay relative to {} (ns)", self.reference_name)
    }

    pub fn jitter_axis_label(&self) -> String {
        format!(
            "{} timestamp delay from the previous sample (ns)",
            self.reference_name
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use delaycore::prelude::Trace;
    use delaycore::DelayComputer;

    pub(crate) fn sample_model() -> PlotModel {
        let traces = vec![
            Trace::new("Pub.ns", "/run/Perf-Pub.ns", vec![100, 200, 300, 400]),
            Trace::new("Sub0.ns", "/run/Perf-Sub0.ns", vec![100, 0, 305, 405]),
            Trace::new("Sub1.ns", "/run/Perf-Sub1.ns", vec![120, 230, 330, 420]),
        ];
        let analysis = DelayComputer::new().compute(&traces, 0).unwrap();
        PlotModel::new(analysis, "/run/Perf-")
    }

    #[test]
    fn lines_are_delays_then_jitter() {
        let model = sample_model();
        let axes: Vec<YAxis> = model.lines.iter().map(|line| line.axis).collect();
        assert_eq!(axes, vec![YAxis::Delay, YAxis::Delay, YAxis::Jitter]);
        assert_eq!(model.lines[2].id, LineId(2));
        assert_eq!(model.lines[2].label, "Pub.ns");
        assert!(model.lines[0].style.dashed);
        assert!(!model.lines[2].style.dashed);
    }

    #[test]
    fn titles_embed_prefix_and_names() {
        let model = sample_model();
        assert_eq!(model.chart_title(), "/run/Perf-Pub.ns,Sub0.ns,Sub1.ns");
        assert_eq!(model.window_title(), "Signals delays relative to Pub.ns");
    }

    #[test]
    fn extreme_delays_scale_without_overflow() {
        const EXA: i64 = 1_000_000_000_000_000_000;
        let traces = vec![
            Trace::new("pub", "/run/pub", vec![-4 * EXA, 4 * EXA]),
            Trace::new("sub", "/run/sub", vec![EXA, -EXA]),
        ];
        let analysis = DelayComputer::new().compute(&traces, 0).unwrap();
        let model = PlotModel::new(analysis, "/run/");

        assert!(model.delay_range.min < -4.9e18);
        assert!(model.delay_range.max > 4.9e18);
        assert!(model.jitter_range.max > 7.9e18);
    }

    #[test]
    fn axis_ranges_cover_their_series() {
        let model = sample_model();
        assert!(model.delay_range.min <= 0.0 && model.delay_range.max >= 30.0);
        assert!(model.jitter_range.min <= 0.0 && model.jitter_range.max >= 100.0);
        assert_eq!(model.index_range, AxisRange::new(0.0, 3.0));
    }
}

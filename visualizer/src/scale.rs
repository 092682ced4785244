use iced::{Point, Rectangle};
use std::fmt;

/// Closed value interval mapped onto one plot axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        if max > min {
            Self { min, max }
        } else {
            Self {
                min: min - 1.0,
                max: min + 1.0,
            }
        }
    }

    /// Range covering every value with 5% headroom on both sides.
    pub fn padded<I: IntoIterator<Item = i64>>(values: I) -> Self {
        let bounds = values
            .into_iter()
            .fold(None, |acc: Option<(i64, i64)>, value| match acc {
                Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
                None => Some((value, value)),
            });

        match bounds {
            Some((lo, hi)) if hi > lo => {
                let pad = (hi as f64 - lo as f64) * 0.05;
                Self::new(lo as f64 - pad, hi as f64 + pad)
            }
            Some((value, _)) => Self::new(value as f64, value as f64),
            None => Self::new(0.0, 1.0),
        }
    }

    /// Sample-index range for `count` samples.
    pub fn samples(count: usize) -> Self {
        Self::new(0.0, count.saturating_sub(1).max(1) as f64)
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Position of `value` inside the range, 0.0 at `min` and 1.0 at `max`.
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }

    pub fn denormalize(&self, fraction: f64) -> f64 {
        self.min + fraction * self.span()
    }
}

/// Tick positions on whole-number steps of 1, 2, 2.5 or 5 × 10ᵏ.
pub fn nice_ticks(range: AxisRange, max_ticks: usize) -> Vec<f64> {
    let max_ticks = max_ticks.max(2);
    let raw_step = range.span() / max_ticks as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|factor| factor * magnitude)
        .find(|candidate| *candidate >= raw_step)
        .unwrap_or(10.0 * magnitude)
        .max(1.0)
        .round();

    let mut ticks = Vec::new();
    let mut tick = (range.min / step).ceil() * step;
    while tick <= range.max && ticks.len() <= max_ticks {
        ticks.push(tick);
        tick += step;
    }
    ticks
}

/// Reduces a series to at most two points per pixel column.
///
/// Each column keeps its minimum and maximum sample, in index order, so
/// spikes survive. Short series are returned whole.
pub fn decimate(values: &[i64], columns: usize) -> Vec<(usize, i64)> {
    if columns == 0 || values.len() <= columns * 2 {
        return values.iter().copied().enumerate().collect();
    }

    let bucket = values.len().div_ceil(columns);
    let mut points = Vec::with_capacity(columns * 2);
    for (chunk_idx, chunk) in values.chunks(bucket).enumerate() {
        let offset = chunk_idx * bucket;
        let mut low = 0;
        let mut high = 0;
        for (idx, value) in chunk.iter().enumerate() {
            if *value < chunk[low] {
                low = idx;
            }
            if *value > chunk[high] {
                high = idx;
            }
        }
        let (first, second) = if low <= high { (low, high) } else { (high, low) };
        points.push((offset + first, chunk[first]));
        if second != first {
            points.push((offset + second, chunk[second]));
        }
    }
    points
}

/// Which of the two vertical scales a line is drawn against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YAxis {
    Delay,
    Jitter,
}

/// Pixel mapping between the plot rectangle and the sample/value axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub area: Rectangle,
    pub index: AxisRange,
    pub delay: AxisRange,
    pub jitter: AxisRange,
    /// Number of samples actually plotted; readouts never point past the last one.
    pub sample_count: usize,
}

impl Viewport {
    pub fn axis(&self, axis: YAxis) -> AxisRange {
        match axis {
            YAxis::Delay => self.delay,
            YAxis::Jitter => self.jitter,
        }
    }

    pub fn to_screen(&self, axis: YAxis, index: f64, value: f64) -> Point {
        let x = self.area.x + self.index.normalize(index) as f32 * self.area.width;
        let y = self.area.y + self.area.height
            - self.axis(axis).normalize(value) as f32 * self.area.height;
        Point::new(x, y)
    }

    pub fn x_of(&self, index: f64) -> f32 {
        self.to_screen(YAxis::Delay, index, self.delay.min).x
    }

    pub fn y_of(&self, axis: YAxis, value: f64) -> f32 {
        self.to_screen(axis, self.index.min, value).y
    }

    /// Sample index and delay value under `position`, if it lies inside the plot.
    pub fn readout(&self, position: Point) -> Option<Readout> {
        if self.sample_count == 0 || !self.area.contains(position) {
            return None;
        }
        let x_fraction = ((position.x - self.area.x) / self.area.width) as f64;
        let y_fraction =
            ((self.area.y + self.area.height - position.y) / self.area.height) as f64;

        let index = (self.index.denormalize(x_fraction).round().max(0.0) as usize)
            .min(self.sample_count - 1);
        let delay = self.delay.denormalize(y_fraction).round() as i64;
        Some(Readout { index, delay })
    }
}

/// Pointer position expressed in sample index and delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readout {
    pub index: usize,
    pub delay: i64,
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} delay: {}ns", self.index, self.delay)
    }
}

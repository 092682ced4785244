const SI_PREFIXES: [(i32, &str); 17] = [
    (-24, "y"),
    (-21, "z"),
    (-18, "a"),
    (-15, "f"),
    (-12, "p"),
    (-9, "n"),
    (-6, "µ"),
    (-3, "m"),
    (0, ""),
    (3, "k"),
    (6, "M"),
    (9, "G"),
    (12, "T"),
    (15, "P"),
    (18, "E"),
    (21, "Z"),
    (24, "Y"),
];

const MIN_EXPONENT: i32 = -24;
const MAX_EXPONENT: i32 = 24;

/// Formats magnitudes with an SI prefix chosen in steps of 10³.
///
/// `base_exponent` states the scale of the raw input, e.g. `-9` for values
/// counted in nanoseconds, so `1500` renders as `1.5µs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngFormatter {
    unit: String,
    base_exponent: i32,
}

impl EngFormatter {
    pub fn new(unit: impl Into<String>, base_exponent: i32) -> Self {
        Self {
            unit: unit.into(),
            base_exponent,
        }
    }

    /// Formatter for raw timestamps counted in nanoseconds.
    pub fn nanoseconds() -> Self {
        Self::new("s", -9)
    }

    /// Unit-less formatter used for sample counts.
    pub fn count() -> Self {
        Self::new("", 0)
    }

    pub fn format(&self, value: f64) -> String {
        if value == 0.0 || !value.is_finite() {
            return format!("0{}{}", prefix_for(self.base_exponent), self.unit);
        }

        let sign = if value < 0.0 { "-" } else { "" };
        let magnitude = value.abs();

        let natural = (magnitude.log10() / 3.0).floor() as i32 * 3;
        let mut exponent = (self.base_exponent + natural).clamp(MIN_EXPONENT, MAX_EXPONENT);
        let mut mantissa = magnitude / 10f64.powi(exponent - self.base_exponent);
        mantissa = (mantissa * 1000.0).round() / 1000.0;
        if mantissa >= 1000.0 && exponent < MAX_EXPONENT {
            mantissa /= 1000.0;
            exponent += 3;
        }

        format!(
            "{}{}{}{}",
            sign,
            trim_mantissa(mantissa),
            prefix_for(exponent),
            self.unit
        )
    }
}

fn prefix_for(exponent: i32) -> &'static str {
    SI_PREFIXES
        .iter()
        .find(|(candidate, _)| *candidate == exponent)
        .map(|(_, prefix)| *prefix)
        .unwrap_or("")
}

fn trim_mantissa(mantissa: f64) -> String {
    let text = format!("{:.3}", mantissa);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nanoseconds_scale_through_prefixes() {
        let ns = EngFormatter::nanoseconds();
        assert_eq!(ns.format(0.0), "0ns");
        assert_eq!(ns.format(250.0), "250ns");
        assert_eq!(ns.format(1500.0), "1.5µs");
        assert_eq!(ns.format(-42_000_000.0), "-42ms");
        assert_eq!(ns.format(2_000_000_000.0), "2s");
    }

    #[test]
    fn rounding_promotes_to_next_prefix() {
        assert_eq!(EngFormatter::nanoseconds().format(999_999.9), "1ms");
    }

    #[test]
    fn counts_have_no_unit() {
        let count = EngFormatter::count();
        assert_eq!(count.format(12.0), "12");
        assert_eq!(count.format(1500.0), "1.5k");
        assert_eq!(count.format(3_000_000.0), "3M");
    }

    #[test]
    fn fractions_keep_three_decimals() {
        assert_eq!(EngFormatter::nanoseconds().format(0.5), "500ps");
        assert_eq!(EngFormatter::count().format(1234.5678), "1.235k");
    }
}

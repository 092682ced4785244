use crate::model::{LineId, PlotLine};
use std::collections::BTreeMap;

/// Clickable legend label dispatching to exactly one line.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub line: LineId,
}

/// Visibility flag per line; the chart re-reads it on every redraw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibilityTable {
    states: BTreeMap<LineId, bool>,
}

impl VisibilityTable {
    pub fn insert(&mut self, id: LineId) {
        self.states.insert(id, true);
    }

    pub fn is_visible(&self, id: LineId) -> bool {
        self.states.get(&id).copied().unwrap_or(false)
    }

    /// Flips the line's flag and returns the new state, `None` for unknown lines.
    pub fn toggle(&mut self, id: LineId) -> Option<bool> {
        let visible = self.states.get_mut(&id)?;
        *visible = !*visible;
        Some(*visible)
    }

    pub fn visible_count(&self) -> usize {
        self.states.values().filter(|visible| **visible).count()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Combined legend over both axes.
#[derive(Debug, Clone)]
pub struct Legend {
    entries: Vec<LegendEntry>,
    visibility: VisibilityTable,
    dimmed_alpha: f32,
}

impl Legend {
    pub fn new(lines: &[PlotLine], dimmed_alpha: f32) -> Self {
        let mut visibility = VisibilityTable::default();
        let entries = lines
            .iter()
            .map(|line| {
                visibility.insert(line.id);
                LegendEntry {
                    label: line.label.clone(),
                    line: line.id,
                }
            })
            .collect();

        Self {
            entries,
            visibility,
            dimmed_alpha: dimmed_alpha.clamp(0.0, 1.0),
        }
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn visibility(&self) -> &VisibilityTable {
        &self.visibility
    }

    pub fn toggle(&mut self, id: LineId) -> Option<bool> {
        self.visibility.toggle(id)
    }

    pub fn is_visible(&self, id: LineId) -> bool {
        self.visibility.is_visible(id)
    }

    /// Glyph opacity for an entry: full when shown, dimmed when hidden.
    pub fn opacity(&self, id: LineId) -> f32 {
        if self.is_visible(id) {
            1.0
        } else {
            self.dimmed_alpha
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::sample_model;

    #[test]
    fn one_entry_per_line_in_order() {
        let model = sample_model();
        let legend = Legend::new(&model.lines, 0.3);
        let labels: Vec<_> = legend.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Sub0.ns", "Sub1.ns", "Pub.ns"]);
        assert_eq!(legend.visibility().visible_count(), 3);
    }

    #[test]
    fn toggle_twice_restores_visibility() {
        let model = sample_model();
        let mut legend = Legend::new(&model.lines, 0.3);

        assert_eq!(legend.toggle(LineId(1)), Some(false));
        assert!(!legend.is_visible(LineId(1)));
        assert_eq!(legend.opacity(LineId(1)), 0.3);
        assert!(legend.is_visible(LineId(0)));

        assert_eq!(legend.toggle(LineId(1)), Some(true));
        assert!(legend.is_visible(LineId(1)));
        assert_eq!(legend.opacity(LineId(1)), 1.0);
    }

    #[test]
    fn unknown_line_is_ignored() {
        let mut table = VisibilityTable::default();
        table.insert(LineId(0));
        assert_eq!(table.toggle(LineId(9)), None);
        assert_eq!(table.len(), 1);
        assert!(!table.is_visible(LineId(9)));
    }
}

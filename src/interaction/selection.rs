use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::PointId;
use crate::render::{Color, PointStyle};

/// How a click spreads across markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Only the clicked marker toggles.
    #[default]
    SinglePoint,
    /// Every marker in the clicked bucket toggles, across all datasets.
    LockStep,
}

impl SelectionMode {
    #[must_use]
    pub fn from_single_hover_highlight(single_hover_highlight: bool) -> Self {
        if single_hover_highlight {
            Self::SinglePoint
        } else {
            Self::LockStep
        }
    }

    /// Key shared by every marker that toggles together with `id`.
    #[must_use]
    pub fn group_key(self, id: PointId) -> ToggleGroup {
        match self {
            Self::SinglePoint => ToggleGroup::Point(id),
            Self::LockStep => ToggleGroup::Bucket(id.bucket),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleGroup {
    Point(PointId),
    Bucket(usize),
}

impl ToggleGroup {
    #[must_use]
    pub fn contains(self, id: PointId) -> bool {
        match self {
            Self::Point(point) => point == id,
            Self::Bucket(bucket) => id.bucket == bucket,
        }
    }
}

/// Stroke override applied while a marker is selected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionHighlight {
    pub stroke: Color,
    pub stroke_width: f64,
}

impl SelectionHighlight {
    #[must_use]
    pub fn apply(self, base: PointStyle) -> PointStyle {
        PointStyle {
            fill: base.fill,
            stroke: self.stroke,
            stroke_width: self.stroke_width,
        }
    }
}

/// Pre-selection style kept so deselection restores it verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionRecord {
    pub prior_style: PointStyle,
}

/// Selected markers keyed by identity, in selection order.
///
/// Outlives render passes; only explicit clearing empties it.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    records: IndexMap<PointId, SelectionRecord>,
}

impl SelectionState {
    #[must_use]
    pub fn is_selected(&self, id: PointId) -> bool {
        self.records.contains_key(&id)
    }

    #[must_use]
    pub fn record(&self, id: PointId) -> Option<SelectionRecord> {
        self.records.get(&id).copied()
    }

    /// Snapshots `current` and returns the highlighted style to display.
    ///
    /// Selecting an already selected marker keeps its original snapshot.
    pub fn select(
        &mut self,
        id: PointId,
        current: PointStyle,
        highlight: SelectionHighlight,
    ) -> PointStyle {
        let record = self
            .records
            .entry(id)
            .or_insert(SelectionRecord {
                prior_style: current,
            });
        highlight.apply(record.prior_style)
    }

    /// Removes the record and returns the style to restore.
    pub fn deselect(&mut self, id: PointId) -> Option<PointStyle> {
        self.records
            .shift_remove(&id)
            .map(|record| record.prior_style)
    }

    /// Replaces the snapshot after a render pass re-resolved the base style.
    pub fn refresh_prior(&mut self, id: PointId, prior_style: PointStyle) {
        if let Some(record) = self.records.get_mut(&id) {
            record.prior_style = prior_style;
        }
    }

    pub fn selected_ids(&self) -> impl Iterator<Item = PointId> + '_ {
        self.records.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops every record and returns them for restoring.
    pub fn drain(&mut self) -> Vec<(PointId, SelectionRecord)> {
        self.records.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{SelectionHighlight, SelectionMode, SelectionState, ToggleGroup};
    use crate::core::PointId;
    use crate::render::{Color, PointStyle};

    fn base_style() -> PointStyle {
        PointStyle {
            fill: Color::rgba8(29, 198, 108, 0.2),
            stroke: Color::rgba8(29, 198, 108, 1.0),
            stroke_width: 1.0,
        }
    }

    #[test]
    fn select_twice_keeps_first_snapshot() {
        let highlight = SelectionHighlight {
            stroke: Color::WHITE,
            stroke_width: 2.0,
        };
        let mut state = SelectionState::default();
        let id = PointId::new(0, 1, 0);

        let highlighted = state.select(id, base_style(), highlight);
        let again = state.select(id, highlighted, highlight);
        assert_eq!(highlighted, again);
        assert_eq!(state.deselect(id), Some(base_style()));
        assert!(state.is_empty());
    }

    #[test]
    fn lock_step_groups_by_bucket() {
        let group = SelectionMode::LockStep.group_key(PointId::new(0, 2, 0));
        assert_eq!(group, ToggleGroup::Bucket(2));
        assert!(group.contains(PointId::new(1, 2, 3)));
        assert!(!group.contains(PointId::new(0, 3, 0)));

        let single = SelectionMode::SinglePoint.group_key(PointId::new(0, 2, 0));
        assert!(!single.contains(PointId::new(1, 2, 0)));
    }
}

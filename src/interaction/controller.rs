use std::collections::HashSet;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use tracing::{debug, trace};

use crate::core::{PlotRect, PointId};
use crate::error::{ChartError, ChartResult};
use crate::render::{MarkerAttributes, PointMarker, RenderFrame, TooltipPrimitive};

use super::selection::{SelectionHighlight, SelectionMode, SelectionState};
use super::tooltip::{TooltipPlacement, TooltipSize, TooltipStyle, resolve_tooltip_placement};
use super::{HoverState, PointerEvent};

/// Payload handed to the host click callback.
#[derive(Debug, Clone, PartialEq)]
pub struct PointClick {
    pub event: PointerEvent,
    pub dataset: usize,
    pub bucket: usize,
    pub point: PointId,
    /// Selection state of the clicked marker after the toggle.
    pub selected: bool,
    pub attributes: MarkerAttributes,
}

/// What a pointer event changed in an already drawn frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenePatch {
    /// Markers whose style moved, with the style now drawn.
    pub changed_markers: Vec<PointMarker>,
    pub tooltip_changed: bool,
}

impl ScenePatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changed_markers.is_empty() && !self.tooltip_changed
    }
}

impl PointClick {
    #[must_use]
    pub fn index_pair(&self) -> (usize, usize) {
        (self.dataset, self.bucket)
    }
}

/// Pointer state machine over the markers of the last rendered scene.
///
/// Hover and selection are independent: hover only moves the tooltip,
/// selection swaps marker strokes and survives re-renders.
#[derive(Debug, Clone)]
pub struct InteractionController {
    markers: IndexMap<PointId, PointMarker>,
    plot: PlotRect,
    mode: SelectionMode,
    highlight: SelectionHighlight,
    tooltip_style: TooltipStyle,
    selection: SelectionState,
    hover: HoverState,
}

impl InteractionController {
    #[must_use]
    pub fn new(
        mode: SelectionMode,
        highlight: SelectionHighlight,
        tooltip_style: TooltipStyle,
    ) -> Self {
        Self {
            markers: IndexMap::new(),
            plot: PlotRect::default(),
            mode,
            highlight,
            tooltip_style,
            selection: SelectionState::default(),
            hover: HoverState::default(),
        }
    }

    pub fn configure(
        &mut self,
        mode: SelectionMode,
        highlight: SelectionHighlight,
        tooltip_style: TooltipStyle,
    ) {
        self.mode = mode;
        self.highlight = highlight;
        self.tooltip_style = tooltip_style;
    }

    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    #[must_use]
    pub fn plot(&self) -> PlotRect {
        self.plot
    }

    /// Adopts the markers of a freshly built frame.
    ///
    /// Markers that are still selected get their snapshot refreshed to the
    /// newly resolved style and the highlight written back into `frame`. A
    /// tooltip whose marker survived is re-anchored and drawn into `frame`.
    pub fn adopt_frame(&mut self, plot: PlotRect, frame: &mut RenderFrame) {
        self.plot = plot;
        self.markers.clear();
        let highlight = self.highlight;
        for marker in frame.markers_mut() {
            if self.selection.is_selected(marker.id) {
                self.selection.refresh_prior(marker.id, marker.style);
                marker.style = highlight.apply(marker.style);
            }
            self.markers.insert(marker.id, marker.clone());
        }

        if let Some(hovered) = self.hover.hovered {
            let padding = self.tooltip_style.padding;
            let replaced = self.markers.get(&hovered).and_then(|marker| {
                let size = self.hover.tooltip?.size();
                resolve_tooltip_placement(marker.cx, marker.cy, size, plot, padding).ok()
            });
            match replaced {
                Some(placement) => self.hover.tooltip = Some(placement),
                None => {
                    trace!(point = %hovered, "hovered marker left the scene");
                    self.hover = HoverState::default();
                }
            }
        }
        frame.tooltip = self.tooltip_overlay();
        debug!(
            markers = self.markers.len(),
            selected = self.selection.len(),
            "interaction scene replaced"
        );
    }

    pub fn markers(&self) -> impl Iterator<Item = &PointMarker> {
        self.markers.values()
    }

    #[must_use]
    pub fn marker(&self, id: PointId) -> Option<&PointMarker> {
        self.markers.get(&id)
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_selected(&self, id: PointId) -> bool {
        self.selection.is_selected(id)
    }

    #[must_use]
    pub fn selected_ids(&self) -> Vec<PointId> {
        self.selection.selected_ids().collect()
    }

    #[must_use]
    pub fn hover_state(&self) -> HoverState {
        self.hover
    }

    /// Tooltip draw command for the current hover, if any.
    #[must_use]
    pub fn tooltip_overlay(&self) -> Option<TooltipPrimitive> {
        let placement = self.hover.tooltip?;
        let marker = self.markers.get(&self.hover.hovered?)?;
        Some(
            self.tooltip_style
                .primitive(&placement, marker.attributes.tooltip.clone()),
        )
    }

    /// Brings an already drawn frame in line with the current selection and
    /// hover without touching its geometry.
    pub fn patch_frame(&self, frame: &mut RenderFrame) -> ScenePatch {
        let mut patch = ScenePatch::default();
        for drawn in frame.markers_mut() {
            let Some(marker) = self.markers.get(&drawn.id) else {
                continue;
            };
            if drawn.style != marker.style {
                drawn.style = marker.style;
                patch.changed_markers.push(drawn.clone());
            }
        }
        let tooltip = self.tooltip_overlay();
        if frame.tooltip != tooltip {
            frame.tooltip = tooltip;
            patch.tooltip_changed = true;
        }
        patch
    }

    /// Nearest marker whose circle contains `(x, y)`; ties go to scene order.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<PointId> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        self.markers
            .values()
            .filter(|marker| marker.contains(x, y))
            .min_by_key(|marker| OrderedFloat(marker.distance_sq(x, y)))
            .map(|marker| marker.id)
    }

    pub fn pointer_enter(
        &mut self,
        id: PointId,
        content: TooltipSize,
    ) -> ChartResult<TooltipPlacement> {
        let marker = self.require_marker(id)?;
        let placement = resolve_tooltip_placement(
            marker.cx,
            marker.cy,
            content,
            self.plot,
            self.tooltip_style.padding,
        )?;
        trace!(point = %id, side = ?placement.side, "pointer enter");
        self.hover = HoverState {
            hovered: Some(id),
            tooltip: Some(placement),
        };
        Ok(placement)
    }

    pub fn pointer_leave(&mut self) {
        if let Some(id) = self.hover.hovered {
            trace!(point = %id, "pointer leave");
        }
        self.hover = HoverState::default();
    }

    /// Drives enter/leave from a raw pointer position.
    pub fn pointer_move(&mut self, x: f64, y: f64, content: TooltipSize) -> ChartResult<HoverState> {
        match self.hit_test(x, y) {
            Some(id) => {
                self.pointer_enter(id, content)?;
            }
            None => self.pointer_leave(),
        }
        Ok(self.hover)
    }

    /// Toggles the clicked marker (or its bucket group) and returns the
    /// callback payload.
    pub fn click(&mut self, id: PointId, event: PointerEvent) -> ChartResult<PointClick> {
        self.require_marker(id)?;
        self.toggle_group(id);
        self.click_payload(id, event)
    }

    /// Toggles every marker through the click transition.
    ///
    /// Each toggle group flips once; every marker still yields a payload so
    /// the host callback sees one call per marker.
    pub fn select_all(&mut self) -> Vec<PointClick> {
        let ids: Vec<PointId> = self.markers.keys().copied().collect();
        let mut toggled = HashSet::new();
        let mut clicks = Vec::with_capacity(ids.len());
        for id in ids {
            if toggled.insert(self.mode.group_key(id)) {
                self.toggle_group(id);
            }
            let Some(marker) = self.markers.get(&id) else {
                continue;
            };
            let event = PointerEvent::synthetic(marker.cx, marker.cy);
            if let Ok(click) = self.click_payload(id, event) {
                clicks.push(click);
            }
        }
        debug!(markers = clicks.len(), "select all applied");
        clicks
    }

    /// Deselects everything and restores the snapshots of markers in scene.
    pub fn clear_selection(&mut self) {
        for (id, record) in self.selection.drain() {
            if let Some(marker) = self.markers.get_mut(&id) {
                marker.style = record.prior_style;
            }
        }
    }

    fn toggle_group(&mut self, id: PointId) {
        let target = !self.selection.is_selected(id);
        let group = self.mode.group_key(id);
        let members: Vec<PointId> = self
            .markers
            .keys()
            .copied()
            .filter(|member| group.contains(*member))
            .collect();
        trace!(point = %id, members = members.len(), target, "toggle selection");
        for member in members {
            self.set_selected(member, target);
        }
    }

    fn set_selected(&mut self, id: PointId, selected: bool) {
        let Some(marker) = self.markers.get_mut(&id) else {
            return;
        };
        match (selected, self.selection.is_selected(id)) {
            (true, false) => {
                marker.style = self.selection.select(id, marker.style, self.highlight);
            }
            (false, true) => {
                if let Some(prior) = self.selection.deselect(id) {
                    marker.style = prior;
                }
            }
            _ => {}
        }
    }

    fn click_payload(&self, id: PointId, event: PointerEvent) -> ChartResult<PointClick> {
        let marker = self.require_marker(id)?;
        Ok(PointClick {
            event,
            dataset: id.dataset,
            bucket: id.bucket,
            point: id,
            selected: self.selection.is_selected(id),
            attributes: marker.attributes.clone(),
        })
    }

    fn require_marker(&self, id: PointId) -> ChartResult<&PointMarker> {
        self.markers.get(&id).ok_or(ChartError::UnknownPoint {
            dataset: id.dataset,
            bucket: id.bucket,
            sub: id.sub,
        })
    }
}

use tracing::trace;

use crate::core::PointId;
use crate::error::ChartResult;
use crate::interaction::{
    HoverState, PointClick, PointerEvent, SelectionMode, TooltipPlacement, TooltipSize,
};
use crate::render::{PointMarker, Renderer};

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn selection_mode(&self) -> SelectionMode {
        self.scene.controller.borrow().mode()
    }

    /// Markers of the last render pass, in scene order.
    #[must_use]
    pub fn markers(&self) -> Vec<PointMarker> {
        self.scene.controller.borrow().markers().cloned().collect()
    }

    #[must_use]
    pub fn marker(&self, id: PointId) -> Option<PointMarker> {
        self.scene.controller.borrow().marker(id).cloned()
    }

    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<PointId> {
        self.scene.controller.borrow().hit_test(x, y)
    }

    #[must_use]
    pub fn hover_state(&self) -> HoverState {
        self.scene.controller.borrow().hover_state()
    }

    #[must_use]
    pub fn is_selected(&self, id: PointId) -> bool {
        self.scene.controller.borrow().is_selected(id)
    }

    /// Selected points in selection order.
    #[must_use]
    pub fn selected_points(&self) -> Vec<PointId> {
        self.scene.controller.borrow().selected_ids()
    }

    /// Shows the tooltip for `id`, given its measured content size.
    pub fn pointer_enter(
        &mut self,
        id: PointId,
        content: TooltipSize,
    ) -> ChartResult<TooltipPlacement> {
        let placement = self.scene.controller_mut()?.pointer_enter(id, content)?;
        self.scene.repaint()?;
        Ok(placement)
    }

    /// Handles pointer movement, entering or leaving markers as needed.
    pub fn pointer_move(&mut self, x: f64, y: f64, content: TooltipSize) -> ChartResult<HoverState> {
        let hover = self.scene.controller_mut()?.pointer_move(x, y, content)?;
        self.scene.repaint()?;
        Ok(hover)
    }

    /// Hides the tooltip.
    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        self.scene.controller_mut()?.pointer_leave();
        self.scene.repaint()
    }

    /// Toggles selection for `id`, repaints the drawn markers and notifies
    /// the click callback.
    pub fn click(&mut self, id: PointId, event: PointerEvent) -> ChartResult<PointClick> {
        let click = self.scene.controller_mut()?.click(id, event)?;
        self.scene.repaint()?;
        self.scene.notify(std::slice::from_ref(&click));
        Ok(click)
    }

    /// Clicks the marker under `(x, y)`, if any.
    pub fn click_at(&mut self, x: f64, y: f64) -> ChartResult<Option<PointClick>> {
        match self.hit_test(x, y) {
            Some(id) => self.click(id, PointerEvent::at(x, y)).map(Some),
            None => {
                trace!(x, y, "click missed every marker");
                Ok(None)
            }
        }
    }

    /// Runs the select-all transition and returns how many clicks it produced.
    pub fn select_all(&mut self) -> usize {
        self.scene.select_all()
    }

    pub fn clear_selection(&mut self) -> ChartResult<()> {
        self.scene.controller_mut()?.clear_selection();
        self.scene.repaint()
    }

    pub fn set_on_point_click<F>(&mut self, callback: F)
    where
        F: FnMut(&PointClick) + 'static,
    {
        *self.scene.on_point_click.borrow_mut() = Some(Box::new(callback));
    }

    pub fn clear_on_point_click(&mut self) {
        *self.scene.on_point_click.borrow_mut() = None;
    }
}

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{ChartData, ChartLayout, OuterSize, compute_layout};
use crate::error::{ChartError, ChartResult};
use crate::extensions::Subscription;
use crate::interaction::{InteractionController, PointClick};
use crate::render::{RenderFrame, Renderer};

use super::render_frame_builder::{PointClassResolver, build_render_frame};
use super::validation::validate_chart_options;
use super::ChartOptions;

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Host callback invoked for every marker click, manual or broadcast.
pub type PointClickCallback = Box<dyn FnMut(&PointClick)>;

/// Result of a render request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RenderOutcome {
    Rendered {
        outer: OuterSize,
        markers: usize,
        segments: usize,
    },
    /// The surface is not attached yet; nothing was laid out or drawn.
    Deferred,
}

/// Drawing surface plus the frame it shows, kept for incremental repaints.
pub(super) struct Surface<R> {
    pub(super) renderer: R,
    pub(super) frame: Option<RenderFrame>,
}

/// Interaction state shared with the select-all broadcast listener.
///
/// The listener only holds a weak handle, so a dropped chart never receives
/// a toggle.
pub(super) struct SceneHandle<R> {
    pub(super) controller: RefCell<InteractionController>,
    pub(super) on_point_click: RefCell<Option<PointClickCallback>>,
    pub(super) surface: RefCell<Surface<R>>,
}

impl<R: Renderer> SceneHandle<R> {
    pub(super) fn notify(&self, clicks: &[PointClick]) {
        let Ok(mut callback) = self.on_point_click.try_borrow_mut() else {
            warn!(clicks = clicks.len(), "point click callback re-entered; skipped");
            return;
        };
        if let Some(callback) = callback.as_mut() {
            for click in clicks {
                callback(click);
            }
        }
    }

    pub(super) fn select_all(&self) -> usize {
        let clicks = match self.controller.try_borrow_mut() {
            Ok(mut controller) => controller.select_all(),
            Err(_) => {
                warn!("select all re-entered while the scene was busy; skipped");
                return 0;
            }
        };
        if let Err(err) = self.repaint() {
            warn!(error = %err, "select all repaint failed");
        }
        self.notify(&clicks);
        clicks.len()
    }

    /// Pushes selection and hover changes into the drawn frame.
    ///
    /// Only marker styles and the tooltip change; layout is never recomputed.
    /// Nothing is drawn before the first render pass.
    pub(super) fn repaint(&self) -> ChartResult<()> {
        let mut surface = self.surface_mut()?;
        let Surface { renderer, frame } = &mut *surface;
        let Some(frame) = frame.as_mut() else {
            return Ok(());
        };
        let patch = self
            .controller
            .try_borrow()
            .map_err(|_| ChartError::InvalidData("interaction scene is busy".to_owned()))?
            .patch_frame(frame);
        if patch.is_empty() {
            return Ok(());
        }
        trace!(
            markers = patch.changed_markers.len(),
            tooltip = patch.tooltip_changed,
            "repainting drawn frame"
        );
        renderer.repaint(frame, &patch.changed_markers)
    }

    pub(super) fn controller_mut(&self) -> ChartResult<RefMut<'_, InteractionController>> {
        self.controller
            .try_borrow_mut()
            .map_err(|_| ChartError::InvalidData("interaction scene is busy".to_owned()))
    }

    pub(super) fn surface_mut(&self) -> ChartResult<RefMut<'_, Surface<R>>> {
        self.surface
            .try_borrow_mut()
            .map_err(|_| ChartError::InvalidData("drawing surface is busy".to_owned()))
    }
}

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the options and data of one chart, runs the layout and
/// geometry passes, and routes pointer events to the interaction scene.
pub struct ChartEngine<R: Renderer> {
    pub(super) chart_id: String,
    pub(super) options: ChartOptions,
    pub(super) data: ChartData,
    pub(super) layout: Option<ChartLayout>,
    pub(super) scene: Rc<SceneHandle<R>>,
    pub(super) class_resolver: Option<Box<PointClassResolver>>,
    pub(super) select_all_subscription: Option<Subscription>,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(renderer: R, chart_id: impl Into<String>, options: ChartOptions) -> ChartResult<Self> {
        validate_chart_options(&options)?;
        let controller = InteractionController::new(
            options.selection_mode(),
            options.selection_highlight(),
            options.tooltip_style(),
        );
        let chart_id = chart_id.into();
        debug!(chart_id = %chart_id, "chart engine created");
        Ok(Self {
            chart_id,
            options,
            data: ChartData::default(),
            layout: None,
            scene: Rc::new(SceneHandle {
                controller: RefCell::new(controller),
                on_point_click: RefCell::new(None),
                surface: RefCell::new(Surface {
                    renderer,
                    frame: None,
                }),
            }),
            class_resolver: None,
            select_all_subscription: None,
        })
    }

    #[must_use]
    pub fn chart_id(&self) -> &str {
        &self.chart_id
    }

    #[must_use]
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// Replaces the options; takes effect on the next render.
    pub fn set_options(&mut self, options: ChartOptions) -> ChartResult<()> {
        validate_chart_options(&options)?;
        self.scene.controller_mut()?.configure(
            options.selection_mode(),
            options.selection_highlight(),
            options.tooltip_style(),
        );
        self.options = options;
        Ok(())
    }

    #[must_use]
    pub fn data(&self) -> &ChartData {
        &self.data
    }

    /// Replaces the chart data; takes effect on the next render.
    pub fn set_data(&mut self, data: ChartData) {
        debug!(
            labels = data.labels.len(),
            datasets = data.datasets.len(),
            "chart data replaced"
        );
        self.data = data;
    }

    /// Layout of the last completed render pass.
    #[must_use]
    pub fn layout(&self) -> Option<ChartLayout> {
        self.layout
    }

    /// Registers the resolver that derives a marker class from its tags.
    pub fn set_point_class_resolver<F>(&mut self, resolver: F)
    where
        F: Fn(&serde_json::Value) -> Option<String> + 'static,
    {
        self.class_resolver = Some(Box::new(resolver));
    }

    pub fn clear_point_class_resolver(&mut self) {
        self.class_resolver = None;
    }

    /// Runs one full layout and draw pass.
    ///
    /// A detached surface defers the pass without touching any state.
    pub fn render(&mut self) -> ChartResult<RenderOutcome> {
        let mut surface = self.scene.surface_mut()?;
        let Some(viewport) = surface.renderer.client_size() else {
            debug!(chart_id = %self.chart_id, "surface not attached; render deferred");
            return Ok(RenderOutcome::Deferred);
        };

        let layout = compute_layout(&self.options.padding, viewport);
        surface.renderer.resize_outer(layout.outer)?;

        let frame = self.build_frame(&layout)?;
        surface.renderer.render(&frame)?;
        let outcome = store_frame(&mut surface, &layout, frame);
        self.layout = Some(layout);
        debug!(chart_id = %self.chart_id, ?outcome, "render pass complete");
        Ok(outcome)
    }

    /// Renders the frame into an external cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<RenderOutcome>
    where
        R: CairoContextRenderer,
    {
        let mut surface = self.scene.surface_mut()?;
        let Some(viewport) = surface.renderer.client_size() else {
            return Ok(RenderOutcome::Deferred);
        };
        let layout = compute_layout(&self.options.padding, viewport);
        let frame = self.build_frame(&layout)?;
        surface.renderer.render_on_cairo_context(context, &frame)?;
        let outcome = store_frame(&mut surface, &layout, frame);
        self.layout = Some(layout);
        Ok(outcome)
    }

    fn build_frame(&self, layout: &ChartLayout) -> ChartResult<RenderFrame> {
        let mut frame = build_render_frame(
            &self.options,
            &self.data,
            layout,
            self.class_resolver.as_deref(),
        );
        self.scene
            .controller_mut()?
            .adopt_frame(layout.plot, &mut frame);
        Ok(frame)
    }

    /// Frame currently shown on the surface, including repaints.
    #[must_use]
    pub fn drawn_frame(&self) -> Option<Ref<'_, RenderFrame>> {
        Ref::filter_map(self.scene.surface.borrow(), |surface| surface.frame.as_ref()).ok()
    }

    #[must_use]
    pub fn renderer(&self) -> Ref<'_, R> {
        Ref::map(self.scene.surface.borrow(), |surface| &surface.renderer)
    }

    pub fn renderer_mut(&mut self) -> RefMut<'_, R> {
        RefMut::map(self.scene.surface.borrow_mut(), |surface| &mut surface.renderer)
    }

    /// Consumes the engine; any select-all subscription is torn down.
    pub fn into_renderer(mut self) -> ChartResult<R> {
        self.unmount();
        let scene = Rc::try_unwrap(self.scene).map_err(|_| {
            ChartError::InvalidData("interaction scene is still shared".to_owned())
        })?;
        Ok(scene.surface.into_inner().renderer)
    }
}

fn store_frame<R>(
    surface: &mut Surface<R>,
    layout: &ChartLayout,
    frame: RenderFrame,
) -> RenderOutcome {
    let outcome = RenderOutcome::Rendered {
        outer: layout.outer,
        markers: frame.marker_count(),
        segments: frame.segment_count(),
    };
    surface.frame = Some(frame);
    outcome
}

mod frame;
mod marker;
mod null_renderer;
mod primitives;

pub use frame::{DatasetLayer, LabelBox, RenderFrame};
pub use marker::{MarkerAttributes, PointMarker, PointStyle};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, LineStrokeStyle, RectPrimitive, TextHAlign,
    TextPrimitive, TooltipPrimitive,
};

use crate::core::{OuterSize, Viewport};
use crate::error::ChartResult;

/// Contract implemented by the host drawing surface.
///
/// Backends receive a fully materialized `RenderFrame` so drawing code stays
/// isolated from layout and interaction logic.
pub trait Renderer {
    /// Intrinsic client size, or `None` while the surface is not attached.
    fn client_size(&self) -> Option<Viewport>;

    /// Receives the padded outer size computed by the layout pass.
    fn resize_outer(&mut self, size: OuterSize) -> ChartResult<()> {
        let _ = size;
        Ok(())
    }

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;

    /// Redraws `frame` after a pointer event changed marker styles or the
    /// tooltip. `changed` lists the markers whose style moved.
    ///
    /// Layout is not recomputed for a repaint. Backends that cannot patch in
    /// place fall back to a full draw of the already built frame.
    fn repaint(&mut self, frame: &RenderFrame, changed: &[PointMarker]) -> ChartResult<()> {
        let _ = changed;
        self.render(frame)
    }
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};

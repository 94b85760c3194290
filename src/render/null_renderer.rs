use crate::core::{OuterSize, Viewport};
use crate::error::ChartResult;
use crate::render::{PointMarker, RenderFrame, Renderer};

/// Headless surface used by tests and tooling.
///
/// It validates every frame and keeps the last one so callers can inspect the
/// emitted geometry. Full draws and incremental repaints are counted
/// separately. A renderer without a client size behaves like a surface that
/// is not attached yet.
#[derive(Debug, Default)]
pub struct NullRenderer {
    client_size: Option<Viewport>,
    pub last_outer_size: Option<OuterSize>,
    pub last_frame: Option<RenderFrame>,
    pub render_count: usize,
    pub repaint_count: usize,
    /// Markers whose style changed in the last repaint.
    pub last_repainted: Vec<PointMarker>,
}

impl NullRenderer {
    #[must_use]
    pub fn attached(width: u32, height: u32) -> Self {
        Self {
            client_size: Some(Viewport::new(width, height)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, viewport: Viewport) {
        self.client_size = Some(viewport);
    }

    pub fn detach(&mut self) {
        self.client_size = None;
    }
}

impl Renderer for NullRenderer {
    fn client_size(&self) -> Option<Viewport> {
        self.client_size
    }

    fn resize_outer(&mut self, size: OuterSize) -> ChartResult<()> {
        self.last_outer_size = Some(size);
        Ok(())
    }

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_frame = Some(frame.clone());
        self.render_count += 1;
        Ok(())
    }

    fn repaint(&mut self, frame: &RenderFrame, changed: &[PointMarker]) -> ChartResult<()> {
        frame.validate()?;
        self.last_frame = Some(frame.clone());
        self.last_repainted = changed.to_vec();
        self.repaint_count += 1;
        Ok(())
    }
}

use cairo::{Context, Format, ImageSurface, Operator};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::core::{OuterSize, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, LineStrokeStyle, RectPrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive, TooltipPrimitive,
};

const TOOLTIP_POINTER_PX: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Renderers that can draw into an external Cairo context (for example a
/// toolkit draw callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango renderer backend.
///
/// The client size is fixed at construction; the image surface grows to the
/// padded outer size reported by each layout pass.
#[derive(Debug)]
pub struct CairoRenderer {
    client_size: Viewport,
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: u32, height: u32) -> ChartResult<Self> {
        if width == 0 || height == 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }
        let surface = create_surface(f64::from(width), f64::from(height))?;
        Ok(Self {
            client_size: Viewport::new(width, height),
            surface,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        context.set_operator(Operator::Clear);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        context.set_operator(Operator::Over);

        let mut stats = CairoRenderStats::default();

        for rect in &frame.rects {
            draw_rect(context, *rect)?;
            stats.rects_drawn += 1;
        }
        for line in &frame.lines {
            draw_line(context, *line)?;
            stats.lines_drawn += 1;
        }
        for text in &frame.texts {
            draw_text(context, text);
            stats.texts_drawn += 1;
        }
        for label_box in &frame.label_boxes {
            draw_rect(context, label_box.rect)?;
            draw_text(context, &label_box.text);
            stats.rects_drawn += 1;
            stats.texts_drawn += 1;
        }
        for layer in &frame.datasets {
            for segment in &layer.segments {
                draw_line(context, *segment)?;
                stats.lines_drawn += 1;
            }
            for backdrop in &layer.backdrops {
                draw_circle(context, *backdrop)?;
                stats.circles_drawn += 1;
            }
            for marker in &layer.markers {
                draw_circle(context, marker.circle())?;
                stats.circles_drawn += 1;
            }
        }
        if let Some(tooltip) = &frame.tooltip {
            draw_tooltip(context, tooltip)?;
            stats.rects_drawn += 1;
            if tooltip.text.is_some() {
                stats.texts_drawn += 1;
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn client_size(&self) -> Option<Viewport> {
        Some(self.client_size)
    }

    fn resize_outer(&mut self, size: OuterSize) -> ChartResult<()> {
        let width = size.width.ceil();
        let height = size.height.ceil();
        if f64::from(self.surface.width()) != width || f64::from(self.surface.height()) != height
        {
            self.surface = create_surface(width, height)?;
        }
        Ok(())
    }

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn create_surface(width: f64, height: f64) -> ChartResult<ImageSurface> {
    ImageSurface::create(Format::ARgb32, width.max(1.0) as i32, height.max(1.0) as i32)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn draw_line(context: &Context, line: LinePrimitive) -> ChartResult<()> {
    if line.stroke_width <= 0.0 {
        return Ok(());
    }
    match line.stroke_style {
        LineStrokeStyle::Solid => context.set_dash(&[], 0.0),
        LineStrokeStyle::Dashed(dash) => context.set_dash(&[dash], 0.0),
    }
    apply_color(context, line.color);
    context.set_line_width(line.stroke_width);
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    let result = context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke line", err));
    context.set_dash(&[], 0.0);
    result
}

fn draw_rect(context: &Context, rect: RectPrimitive) -> ChartResult<()> {
    append_rect_path(context, rect);
    apply_color(context, rect.fill_color);
    if rect.border_width > 0.0 {
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        apply_color(context, rect.border_color);
        context.set_line_width(rect.border_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke rectangle border", err))
    } else {
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))
    }
}

fn draw_circle(context: &Context, circle: CirclePrimitive) -> ChartResult<()> {
    context.new_sub_path();
    context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
    apply_color(context, circle.fill_color);
    if circle.stroke_width > 0.0 {
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill circle", err))?;
        apply_color(context, circle.stroke_color);
        context.set_line_width(circle.stroke_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke circle", err))
    } else {
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill circle", err))
    }
}

fn draw_text(context: &Context, text: &TextPrimitive) {
    let layout = pangocairo::functions::create_layout(context);
    let font_description = FontDescription::from_string(&format!("Sans {}", text.font_size_px));
    layout.set_font_description(Some(&font_description));
    layout.set_width((text.width * f64::from(pango::SCALE)) as i32);
    layout.set_alignment(match text.h_align {
        TextHAlign::Left => pango::Alignment::Left,
        TextHAlign::Center => pango::Alignment::Center,
        TextHAlign::Right => pango::Alignment::Right,
    });
    if text.letter_spacing_px > 0.0 {
        let attributes = pango::AttrList::new();
        attributes.insert(pango::AttrInt::new_letter_spacing(
            (text.letter_spacing_px * f64::from(pango::SCALE)) as i32,
        ));
        layout.set_attributes(Some(&attributes));
    }
    layout.set_text(&text.text);

    apply_color(context, text.color);
    context.move_to(text.x, text.y);
    pangocairo::functions::show_layout(context, &layout);
}

fn draw_tooltip(context: &Context, tooltip: &TooltipPrimitive) -> ChartResult<()> {
    let rect = RectPrimitive::new(
        tooltip.x,
        tooltip.y,
        tooltip.width,
        tooltip.height,
        tooltip.fill_color,
    )
    .with_border(tooltip.border_color, 1.0)
    .with_corner_radius(4.0);
    draw_rect(context, rect)?;

    // Pointer triangle on the edge facing the anchor.
    let (base_y, tip_y) = if tooltip.pointer_flipped {
        (tooltip.y, tooltip.y - TOOLTIP_POINTER_PX)
    } else {
        let bottom = tooltip.y + tooltip.height;
        (bottom, bottom + TOOLTIP_POINTER_PX)
    };
    context.move_to(tooltip.anchor_x - TOOLTIP_POINTER_PX, base_y);
    context.line_to(tooltip.anchor_x, tip_y);
    context.line_to(tooltip.anchor_x + TOOLTIP_POINTER_PX, base_y);
    context.close_path();
    apply_color(context, tooltip.fill_color);
    context
        .fill()
        .map_err(|err| map_backend_error("failed to fill tooltip pointer", err))?;

    if let Some(text) = &tooltip.text {
        draw_text(
            context,
            &TextPrimitive::new(
                text.as_str(),
                tooltip.x,
                tooltip.y,
                tooltip.width,
                tooltip.height,
                tooltip.font_size_px,
                tooltip.text_color,
            ),
        );
    }
    Ok(())
}

fn append_rect_path(context: &Context, rect: RectPrimitive) {
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}

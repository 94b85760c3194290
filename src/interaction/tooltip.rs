use serde::{Deserialize, Serialize};

use crate::core::PlotRect;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, TooltipPrimitive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TooltipSide {
    Above,
    Below,
}

/// Measured size of the tooltip content box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TooltipSize {
    pub width: f64,
    pub height: f64,
}

impl TooltipSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Where the tooltip box goes for one hover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipPlacement {
    pub anchor_x: f64,
    pub anchor_y: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub side: TooltipSide,
    /// Pointer decoration faces up toward the anchor (tooltip below it).
    pub pointer_flipped: bool,
}

impl TooltipPlacement {
    #[must_use]
    pub fn size(&self) -> TooltipSize {
        TooltipSize::new(self.width, self.height)
    }
}

/// Look of the hover tooltip box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipStyle {
    pub padding: f64,
    pub background_color: Color,
    pub border_color: Color,
    pub text_color: Color,
    pub font_size_px: f64,
}

impl TooltipStyle {
    /// Draw command for a placed tooltip showing `text`.
    #[must_use]
    pub fn primitive(&self, placement: &TooltipPlacement, text: Option<String>) -> TooltipPrimitive {
        TooltipPrimitive {
            x: placement.x,
            y: placement.y,
            width: placement.width,
            height: placement.height,
            anchor_x: placement.anchor_x,
            anchor_y: placement.anchor_y,
            pointer_flipped: placement.pointer_flipped,
            text,
            fill_color: self.background_color,
            border_color: self.border_color,
            text_color: self.text_color,
            font_size_px: self.font_size_px,
        }
    }
}

/// Places a tooltip above or below its anchor.
///
/// Anchors in the top half of the plot get the tooltip below, offset by half
/// the content height plus padding. Other anchors get it above, lifted by
/// twice the content height plus twice the padding to clear the pointer
/// decoration. The box is centered on the anchor and never clamped.
pub fn resolve_tooltip_placement(
    anchor_x: f64,
    anchor_y: f64,
    content: TooltipSize,
    plot: PlotRect,
    padding: f64,
) -> ChartResult<TooltipPlacement> {
    for (name, value) in [
        ("anchor x", anchor_x),
        ("anchor y", anchor_y),
        ("tooltip width", content.width),
        ("tooltip height", content.height),
        ("tooltip padding", padding),
    ] {
        if !value.is_finite() {
            return Err(ChartError::InvalidData(format!("{name} must be finite")));
        }
    }
    if content.width < 0.0 || content.height < 0.0 {
        return Err(ChartError::InvalidData(
            "tooltip size must be >= 0".to_owned(),
        ));
    }

    let distance_to_top = anchor_y - plot.y;
    let distance_to_bottom = plot.bottom() - anchor_y;
    let side = if distance_to_top < distance_to_bottom {
        TooltipSide::Below
    } else {
        TooltipSide::Above
    };

    let y = match side {
        TooltipSide::Below => anchor_y + content.height * 0.5 + padding,
        TooltipSide::Above => anchor_y - (content.height * 2.0 + padding * 2.0),
    };

    Ok(TooltipPlacement {
        anchor_x,
        anchor_y,
        x: anchor_x - content.width * 0.5,
        y,
        width: content.width,
        height: content.height,
        side,
        pointer_flipped: side == TooltipSide::Below,
    })
}

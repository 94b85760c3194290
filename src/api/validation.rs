use crate::error::{ChartError, ChartResult};

use super::ChartOptions;

/// Rejects option values that would produce invalid geometry.
///
/// Padding is never rejected here; it is normalized by the layout pass.
pub fn validate_chart_options(options: &ChartOptions) -> ChartResult<()> {
    let graph = &options.graph;
    let point = &graph.point;
    let indicators = &options.indicators;

    non_negative("graph.borderWidth", graph.border_width)?;
    non_negative("graph.point.strokeWidth", point.stroke_width)?;
    non_negative("graph.point.selected.strokeWidth", point.selected.stroke_width)?;
    non_negative("graph.path.borderWidth", graph.path.border_width)?;
    non_negative("indicators.borderWidth", indicators.border_width)?;
    non_negative("indicators.letterSpacing", indicators.letter_spacing)?;
    non_negative("tooltip.padding", options.tooltip.padding)?;

    if !point.radius.is_finite() || point.radius <= 0.0 {
        return Err(ChartError::InvalidOption {
            option: "graph.point.radius",
            reason: format!("must be finite and > 0, got {}", point.radius),
        });
    }
    if !indicators.font_size.is_finite() || indicators.font_size <= 0.0 {
        return Err(ChartError::InvalidOption {
            option: "indicators.fontSize",
            reason: format!("must be finite and > 0, got {}", indicators.font_size),
        });
    }
    if !options.tooltip.font_size.is_finite() || options.tooltip.font_size <= 0.0 {
        return Err(ChartError::InvalidOption {
            option: "tooltip.fontSize",
            reason: format!("must be finite and > 0, got {}", options.tooltip.font_size),
        });
    }

    for (option, color) in [
        ("backgroundColor", options.background_color),
        ("labels.textColor", options.labels.text_color),
        ("graph.borderColor", graph.border_color),
        ("graph.backgroundColor", graph.background_color),
        ("graph.point.pointColor", point.point_color),
        ("graph.point.strokeColor", point.stroke_color),
        ("graph.point.selected.strokeColor", point.selected.stroke_color),
        ("graph.path.borderColor", graph.path.border_color),
        ("indicators.borderColor", indicators.border_color),
        ("indicators.backgroundColor", indicators.background_color),
        ("indicators.fontColor", indicators.font_color),
        ("tooltip.backgroundColor", options.tooltip.background_color),
        ("tooltip.borderColor", options.tooltip.border_color),
        ("tooltip.fontColor", options.tooltip.font_color),
    ] {
        color.validate().map_err(|err| ChartError::InvalidOption {
            option,
            reason: err.to_string(),
        })?;
    }

    Ok(())
}

fn non_negative(option: &'static str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ChartError::InvalidOption {
            option,
            reason: format!("must be finite and >= 0, got {value}"),
        });
    }
    Ok(())
}

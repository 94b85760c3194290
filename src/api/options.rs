use serde::{Deserialize, Serialize};

use crate::core::{LabelKind, Padding};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{SelectionHighlight, SelectionMode, TooltipStyle};
use crate::render::Color;

/// Recognized chart options.
///
/// Every field has a documented default, so a partial JSON object merges
/// field-by-field over the defaults at any depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    #[serde(default = "default_background_color")]
    pub background_color: Color,
    #[serde(default)]
    pub padding: Padding,
    #[serde(default)]
    pub labels: LabelOptions,
    #[serde(default)]
    pub graph: GraphOptions,
    #[serde(default)]
    pub indicators: IndicatorOptions,
    #[serde(default)]
    pub tooltip: TooltipOptions,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            background_color: default_background_color(),
            padding: Padding::default(),
            labels: LabelOptions::default(),
            graph: GraphOptions::default(),
            indicators: IndicatorOptions::default(),
            tooltip: TooltipOptions::default(),
        }
    }
}

impl ChartOptions {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::Serialization(format!("failed to parse chart options: {e}")))
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::Serialization(format!("failed to serialize chart options: {e}"))
        })
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Formats every label as a date with a dayjs-style token string.
    #[must_use]
    pub fn with_date_labels(mut self, format: impl Into<String>) -> Self {
        self.labels.kind = LabelKind::Date;
        self.labels.format = format.into();
        self
    }

    #[must_use]
    pub fn with_single_hover_highlight(mut self, enabled: bool) -> Self {
        self.graph.point.single_hover_highlight = enabled;
        self
    }

    #[must_use]
    pub fn with_backdrop_point(mut self, enabled: bool) -> Self {
        self.graph.point.backdrop_point = enabled;
        self
    }

    /// Tag keys published in each marker's JSON attribute bundle.
    #[must_use]
    pub fn with_data_attributes(
        mut self,
        keys: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.graph.point.data_attributes = keys.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_tooltip_padding(mut self, padding: f64) -> Self {
        self.tooltip.padding = padding;
        self
    }

    #[must_use]
    pub fn selection_mode(&self) -> SelectionMode {
        SelectionMode::from_single_hover_highlight(self.graph.point.single_hover_highlight)
    }

    #[must_use]
    pub fn selection_highlight(&self) -> SelectionHighlight {
        SelectionHighlight {
            stroke: self.graph.point.selected.stroke_color,
            stroke_width: self.graph.point.selected.stroke_width,
        }
    }

    #[must_use]
    pub fn tooltip_style(&self) -> TooltipStyle {
        let tooltip = &self.tooltip;
        TooltipStyle {
            padding: tooltip.padding,
            background_color: tooltip.background_color,
            border_color: tooltip.border_color,
            text_color: tooltip.font_color,
            font_size_px: tooltip.font_size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelOptions {
    /// `date` formats every label; `raw` only formats labels marked as dates.
    #[serde(rename = "type", default)]
    pub kind: LabelKind,
    #[serde(default)]
    pub format: String,
    #[serde(default = "default_label_text_color")]
    pub text_color: Color,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            kind: LabelKind::Raw,
            format: String::new(),
            text_color: default_label_text_color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphOptions {
    #[serde(default = "default_true")]
    pub border: bool,
    #[serde(default = "default_graph_border_width")]
    pub border_width: f64,
    #[serde(default = "default_graph_border_color")]
    pub border_color: Color,
    #[serde(default = "default_graph_background_color")]
    pub background_color: Color,
    #[serde(default)]
    pub point: PointOptions,
    #[serde(default)]
    pub path: PathOptions,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            border: true,
            border_width: default_graph_border_width(),
            border_color: default_graph_border_color(),
            background_color: default_graph_background_color(),
            point: PointOptions::default(),
            path: PathOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOptions {
    #[serde(default)]
    pub backdrop_point: bool,
    #[serde(default = "default_point_color")]
    pub point_color: Color,
    #[serde(default = "default_point_color")]
    pub stroke_color: Color,
    #[serde(default = "default_point_stroke_width")]
    pub stroke_width: f64,
    #[serde(default = "default_point_radius")]
    pub radius: f64,
    /// `true` toggles only the clicked marker; `false` toggles its bucket
    /// across every dataset.
    #[serde(default = "default_true")]
    pub single_hover_highlight: bool,
    #[serde(default)]
    pub selected: SelectedPointOptions,
    #[serde(default)]
    pub data_attributes: Vec<String>,
}

impl Default for PointOptions {
    fn default() -> Self {
        Self {
            backdrop_point: false,
            point_color: default_point_color(),
            stroke_color: default_point_color(),
            stroke_width: default_point_stroke_width(),
            radius: default_point_radius(),
            single_hover_highlight: true,
            selected: SelectedPointOptions::default(),
            data_attributes: Vec::new(),
        }
    }
}

/// Highlight applied to selected markers.
///
/// `point_color` is carried for completeness; selection only swaps strokes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedPointOptions {
    #[serde(default = "default_selected_point_color")]
    pub point_color: Color,
    #[serde(default = "default_selected_stroke_color")]
    pub stroke_color: Color,
    #[serde(default = "default_selected_stroke_width")]
    pub stroke_width: f64,
}

impl Default for SelectedPointOptions {
    fn default() -> Self {
        Self {
            point_color: default_selected_point_color(),
            stroke_color: default_selected_stroke_color(),
            stroke_width: default_selected_stroke_width(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathOptions {
    #[serde(default = "default_path_color")]
    pub border_color: Color,
    #[serde(default = "default_path_width")]
    pub border_width: f64,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            border_color: default_path_color(),
            border_width: default_path_width(),
        }
    }
}

/// Style of indicator pills, label boxes and threshold lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorOptions {
    #[serde(default = "default_indicator_border_width")]
    pub border_width: f64,
    #[serde(default = "default_path_color")]
    pub border_color: Color,
    #[serde(default = "default_graph_background_color")]
    pub background_color: Color,
    #[serde(default = "default_indicator_font_size")]
    pub font_size: f64,
    #[serde(default = "default_indicator_letter_spacing")]
    pub letter_spacing: f64,
    #[serde(default = "default_indicator_font_color")]
    pub font_color: Color,
}

impl Default for IndicatorOptions {
    fn default() -> Self {
        Self {
            border_width: default_indicator_border_width(),
            border_color: default_path_color(),
            background_color: default_graph_background_color(),
            font_size: default_indicator_font_size(),
            letter_spacing: default_indicator_letter_spacing(),
            font_color: default_indicator_font_color(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipOptions {
    /// Gap between the anchor marker and the tooltip box, in pixels.
    #[serde(default = "default_tooltip_padding")]
    pub padding: f64,
    #[serde(default = "default_graph_background_color")]
    pub background_color: Color,
    #[serde(default = "default_path_color")]
    pub border_color: Color,
    #[serde(default = "default_indicator_font_color")]
    pub font_color: Color,
    #[serde(default = "default_tooltip_font_size")]
    pub font_size: f64,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            padding: default_tooltip_padding(),
            background_color: default_graph_background_color(),
            border_color: default_path_color(),
            font_color: default_indicator_font_color(),
            font_size: default_tooltip_font_size(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_background_color() -> Color {
    Color::rgba8(38, 55, 76, 1.0)
}

fn default_label_text_color() -> Color {
    Color::rgba8(141, 171, 196, 1.0)
}

fn default_graph_border_width() -> f64 {
    1.0
}

fn default_graph_border_color() -> Color {
    Color::rgba8(63, 83, 110, 1.0)
}

fn default_graph_background_color() -> Color {
    Color::rgba8(33, 47, 64, 1.0)
}

fn default_point_color() -> Color {
    Color::rgba8(33, 47, 64, 1.0)
}

fn default_point_stroke_width() -> f64 {
    1.0
}

fn default_point_radius() -> f64 {
    5.0
}

fn default_selected_point_color() -> Color {
    Color::TRANSPARENT
}

fn default_selected_stroke_color() -> Color {
    Color::WHITE
}

fn default_selected_stroke_width() -> f64 {
    2.0
}

fn default_path_color() -> Color {
    Color::rgba8(141, 171, 196, 1.0)
}

fn default_path_width() -> f64 {
    2.0
}

fn default_indicator_border_width() -> f64 {
    1.0
}

fn default_indicator_font_size() -> f64 {
    9.0
}

fn default_indicator_letter_spacing() -> f64 {
    0.5
}

fn default_indicator_font_color() -> Color {
    Color::WHITE
}

fn default_tooltip_padding() -> f64 {
    4.0
}

fn default_tooltip_font_size() -> f64 {
    12.0
}

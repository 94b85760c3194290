use serde::{Deserialize, Serialize};

use crate::core::OuterSize;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, LinePrimitive, PointMarker, RectPrimitive, TextPrimitive, TooltipPrimitive,
};

/// Rounded label pill under one bucket, drawn above the bucket dividers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelBox {
    pub rect: RectPrimitive,
    pub text: TextPrimitive,
}

/// Path and markers of one dataset, drawn above the decorations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetLayer {
    pub dataset_index: usize,
    pub segments: Vec<LinePrimitive>,
    pub backdrops: Vec<CirclePrimitive>,
    pub markers: Vec<PointMarker>,
}

impl DatasetLayer {
    #[must_use]
    pub fn new(dataset_index: usize) -> Self {
        Self {
            dataset_index,
            segments: Vec::new(),
            backdrops: Vec::new(),
            markers: Vec::new(),
        }
    }
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Draw order: rects, lines, texts, label boxes, then dataset layers in
/// dataset order. The hover tooltip, when present, goes on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub outer: OuterSize,
    pub rects: Vec<RectPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
    #[serde(default)]
    pub label_boxes: Vec<LabelBox>,
    pub datasets: Vec<DatasetLayer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<TooltipPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(outer: OuterSize) -> Self {
        Self {
            outer,
            rects: Vec::new(),
            lines: Vec::new(),
            texts: Vec::new(),
            label_boxes: Vec::new(),
            datasets: Vec::new(),
            tooltip: None,
        }
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_label_box(mut self, label_box: LabelBox) -> Self {
        self.label_boxes.push(label_box);
        self
    }

    pub fn markers(&self) -> impl Iterator<Item = &PointMarker> {
        self.datasets.iter().flat_map(|layer| layer.markers.iter())
    }

    pub fn markers_mut(&mut self) -> impl Iterator<Item = &mut PointMarker> {
        self.datasets
            .iter_mut()
            .flat_map(|layer| layer.markers.iter_mut())
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.datasets.iter().map(|layer| layer.markers.len()).sum()
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.datasets.iter().map(|layer| layer.segments.len()).sum()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.outer.width.is_finite()
            || !self.outer.height.is_finite()
            || self.outer.width < 0.0
            || self.outer.height < 0.0
        {
            return Err(ChartError::InvalidData(format!(
                "outer size must be finite and >= 0: {}x{}",
                self.outer.width, self.outer.height
            )));
        }

        for rect in &self.rects {
            rect.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        for label_box in &self.label_boxes {
            label_box.rect.validate()?;
            label_box.text.validate()?;
        }
        for layer in &self.datasets {
            for segment in &layer.segments {
                segment.validate()?;
            }
            for backdrop in &layer.backdrops {
                backdrop.validate()?;
            }
            for marker in &layer.markers {
                marker.validate()?;
            }
        }
        if let Some(tooltip) = &self.tooltip {
            tooltip.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
            && self.lines.is_empty()
            && self.texts.is_empty()
            && self.label_boxes.is_empty()
            && self.tooltip.is_none()
            && self.datasets.iter().all(|layer| {
                layer.segments.is_empty() && layer.markers.is_empty()
            })
    }
}

use serde::{Deserialize, Serialize};

use crate::core::PointId;
use crate::error::ChartResult;
use crate::render::{CirclePrimitive, Color};

/// Visual attributes of a point marker that selection may change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointStyle {
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f64,
}

/// Host-readable attributes published on a marker element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerAttributes {
    /// `data-index`: `"dataset,bucket,sub"`.
    pub data_index: String,
    /// `data-value`: the raw reading.
    pub data_value: f64,
    /// `data-tooltip`: pre-rendered tooltip markup.
    pub tooltip: Option<String>,
    /// JSON object of the configured auxiliary tags; absent tags are `null`.
    pub data: String,
    pub class_name: Option<String>,
}

/// One interactive point in the rendered scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointMarker {
    pub id: PointId,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    /// Current visual style, including any selection highlight.
    pub style: PointStyle,
    pub attributes: MarkerAttributes,
}

impl PointMarker {
    #[must_use]
    pub fn circle(&self) -> CirclePrimitive {
        CirclePrimitive {
            cx: self.cx,
            cy: self.cy,
            radius: self.radius,
            fill_color: self.style.fill,
            stroke_color: self.style.stroke,
            stroke_width: self.style.stroke_width,
        }
    }

    /// Whether `(x, y)` falls inside the marker circle.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.distance_sq(x, y) <= self.radius * self.radius
    }

    #[must_use]
    pub fn distance_sq(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.cx;
        let dy = y - self.cy;
        dx * dx + dy * dy
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.circle().validate()
    }
}

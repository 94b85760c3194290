use serde::{Deserialize, Serialize};

use crate::core::{MappedPoint, PointId};

/// Straight path segment between two consecutive points of one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub from: PointId,
    pub to: PointId,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Connects mapped points in order, across bucket boundaries.
///
/// No smoothing and no extrapolation: a single point yields no segment.
#[must_use]
pub fn project_path_segments(points: &[MappedPoint]) -> Vec<LineSegment> {
    if points.len() < 2 {
        return Vec::new();
    }

    points
        .windows(2)
        .map(|pair| LineSegment {
            from: pair[0].id,
            to: pair[1].id,
            x1: pair[0].x,
            y1: pair[0].y,
            x2: pair[1].x,
            y2: pair[1].y,
        })
        .collect()
}

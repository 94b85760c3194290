use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Bucket, PlotRect};
use crate::error::ChartError;

/// Horizontal lead-in before the first sub-point of a bucket.
pub const SUB_POINT_LEAD_IN_PX: f64 = 15.0;

/// Identity of one rendered point: dataset, bucket (label slot) and sub-point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId {
    pub dataset: usize,
    pub bucket: usize,
    pub sub: usize,
}

impl PointId {
    #[must_use]
    pub const fn new(dataset: usize, bucket: usize, sub: usize) -> Self {
        Self {
            dataset,
            bucket,
            sub,
        }
    }

    /// `(dataset, bucket)` pair handed to click callbacks.
    #[must_use]
    pub fn index_pair(self) -> (usize, usize) {
        (self.dataset, self.bucket)
    }

    /// Value published as the marker's `data-index` attribute.
    #[must_use]
    pub fn data_index(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.dataset, self.bucket, self.sub)
    }
}

impl FromStr for PointId {
    type Err = ChartError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut parts = input.split(',').map(|part| part.trim().parse::<usize>());
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(Ok(dataset)), Some(Ok(bucket)), sub, None) => {
                let sub = match sub {
                    Some(Ok(sub)) => sub,
                    None => 0,
                    Some(Err(_)) => {
                        return Err(ChartError::InvalidData(format!(
                            "invalid data-index `{input}`"
                        )));
                    }
                };
                Ok(Self::new(dataset, bucket, sub))
            }
            _ => Err(ChartError::InvalidData(format!(
                "invalid data-index `{input}`"
            ))),
        }
    }
}

/// Maps bucket indices and reading values into plot pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketAxis {
    plot: PlotRect,
    bucket_count: usize,
    bucket_width: f64,
}

impl BucketAxis {
    #[must_use]
    pub fn new(plot: PlotRect, bucket_count: usize) -> Self {
        let bucket_width = if bucket_count == 0 {
            0.0
        } else {
            plot.width / bucket_count as f64
        };
        Self {
            plot,
            bucket_count,
            bucket_width,
        }
    }

    #[must_use]
    pub fn plot(self) -> PlotRect {
        self.plot
    }

    #[must_use]
    pub fn bucket_count(self) -> usize {
        self.bucket_count
    }

    #[must_use]
    pub fn bucket_width(self) -> f64 {
        self.bucket_width
    }

    #[must_use]
    pub fn bucket_left(self, bucket: usize) -> f64 {
        self.plot.x + self.bucket_width * bucket as f64
    }

    /// X of sub-point `sub` among `count` readings in `bucket`.
    #[must_use]
    pub fn sub_point_x(self, bucket: usize, sub: usize, count: usize) -> f64 {
        let spacing = if count == 0 {
            0.0
        } else {
            (self.bucket_width - SUB_POINT_LEAD_IN_PX).max(0.0) / count as f64
        };
        self.bucket_left(bucket) + SUB_POINT_LEAD_IN_PX + spacing * sub as f64
    }

    /// Y for a reading; the origin sits on the plot bottom and values grow upward.
    #[must_use]
    pub fn value_to_y(self, value: f64) -> f64 {
        self.plot.height - value + self.plot.y
    }

    #[must_use]
    pub fn y_to_value(self, y: f64) -> f64 {
        self.plot.height + self.plot.y - y
    }

    /// Bucket whose column contains `x`, if any.
    #[must_use]
    pub fn bucket_at_x(self, x: f64) -> Option<usize> {
        if self.bucket_count == 0 || self.bucket_width <= 0.0 || !x.is_finite() {
            return None;
        }
        let offset = x - self.plot.x;
        if offset < 0.0 || offset >= self.plot.width {
            return None;
        }
        let bucket = (offset / self.bucket_width).floor() as usize;
        Some(bucket.min(self.bucket_count - 1))
    }
}

/// Pixel position of one reading. Recomputed every pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MappedPoint {
    pub id: PointId,
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// Maps one dataset's buckets into points ordered by label, then sub-point.
///
/// Empty buckets emit nothing and buckets past the label count are ignored;
/// bucket placement depends only on the bucket index. Non-finite readings are
/// skipped without shifting their siblings.
#[must_use]
pub fn map_dataset_points(axis: BucketAxis, dataset: usize, data: &[Bucket]) -> Vec<MappedPoint> {
    let mut points = Vec::new();
    for (bucket, readings) in data.iter().enumerate().take(axis.bucket_count()) {
        let values = readings.values();
        for (sub, value) in values.iter().copied().enumerate() {
            if !value.is_finite() {
                trace!(dataset, bucket, sub, "skipping non-finite reading");
                continue;
            }
            points.push(MappedPoint {
                id: PointId::new(dataset, bucket, sub),
                x: axis.sub_point_x(bucket, sub, values.len()),
                y: axis.value_to_y(value),
                value,
            });
        }
    }
    points
}

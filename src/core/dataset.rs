use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::types::decimal_to_f64;
use crate::error::ChartResult;
use crate::render::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelKind {
    Date,
    #[default]
    Raw,
}

/// One category slot on the shared x-axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LabelRepr")]
pub struct Label {
    pub value: String,
    pub kind: LabelKind,
}

impl Label {
    #[must_use]
    pub fn raw(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: LabelKind::Raw,
        }
    }

    #[must_use]
    pub fn date(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: LabelKind::Date,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LabelRepr {
    Bare(String),
    Full {
        value: String,
        #[serde(default)]
        kind: LabelKind,
    },
}

impl From<LabelRepr> for Label {
    fn from(repr: LabelRepr) -> Self {
        match repr {
            LabelRepr::Bare(value) => Self::raw(value),
            LabelRepr::Full { value, kind } => Self { value, kind },
        }
    }
}

/// Readings that fall into one label slot.
///
/// Serializes as `null`, a number, or an array of numbers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bucket {
    Many(SmallVec<[f64; 4]>),
    One(f64),
    #[default]
    Empty,
}

impl Bucket {
    #[must_use]
    pub fn many(values: impl IntoIterator<Item = f64>) -> Self {
        Self::Many(values.into_iter().collect())
    }

    pub fn from_decimals(values: &[Decimal]) -> ChartResult<Self> {
        let mut readings = SmallVec::with_capacity(values.len());
        for value in values {
            readings.push(decimal_to_f64(*value, "reading")?);
        }
        Ok(Self::Many(readings))
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        match self {
            Self::Many(values) => values.as_slice(),
            Self::One(value) => std::slice::from_ref(value),
            Self::Empty => &[],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    #[must_use]
    pub fn value(&self, sub: usize) -> Option<f64> {
        self.values().get(sub).copied()
    }
}

impl From<f64> for Bucket {
    fn from(value: f64) -> Self {
        Self::One(value)
    }
}

/// Per-bucket entry of a per-point field: one value for the whole bucket or
/// one optional value per sub-point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BucketOverride<T> {
    PerPoint(Vec<Option<T>>),
    Bucket(T),
}

/// A dataset field that may be set once, per bucket, or per sub-point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointValue<T> {
    // Arrays must match `PerBucket` before `Layered` gets a chance to read
    // them as a two-element struct sequence.
    PerBucket(Vec<Option<BucketOverride<T>>>),
    /// Dataset-wide default plus per-bucket overrides.
    Layered {
        default: Option<T>,
        buckets: Vec<Option<BucketOverride<T>>>,
    },
    Uniform(T),
}

impl<T> PointValue<T> {
    #[must_use]
    pub fn per_bucket(values: impl IntoIterator<Item = T>) -> Self {
        Self::PerBucket(
            values
                .into_iter()
                .map(|value| Some(BucketOverride::Bucket(value)))
                .collect(),
        )
    }

    #[must_use]
    pub fn per_point(buckets: impl IntoIterator<Item = Vec<Option<T>>>) -> Self {
        Self::PerBucket(
            buckets
                .into_iter()
                .map(|values| Some(BucketOverride::PerPoint(values)))
                .collect(),
        )
    }

    fn bucket_entry(&self, bucket: usize) -> Option<&BucketOverride<T>> {
        let buckets = match self {
            Self::Layered { buckets, .. } | Self::PerBucket(buckets) => buckets,
            Self::Uniform(_) => return None,
        };
        buckets.get(bucket)?.as_ref()
    }

    /// Value set for exactly this sub-point.
    #[must_use]
    pub fn point(&self, bucket: usize, sub: usize) -> Option<&T> {
        match self.bucket_entry(bucket)? {
            BucketOverride::PerPoint(values) => values.get(sub)?.as_ref(),
            BucketOverride::Bucket(_) => None,
        }
    }

    /// Value set for the whole bucket.
    #[must_use]
    pub fn bucket(&self, bucket: usize) -> Option<&T> {
        match self.bucket_entry(bucket)? {
            BucketOverride::Bucket(value) => Some(value),
            BucketOverride::PerPoint(_) => None,
        }
    }

    /// Dataset-wide value.
    #[must_use]
    pub fn dataset(&self) -> Option<&T> {
        match self {
            Self::Uniform(value) => Some(value),
            Self::Layered { default, .. } => default.as_ref(),
            Self::PerBucket(_) => None,
        }
    }
}

impl<T> From<T> for PointValue<T> {
    fn from(value: T) -> Self {
        Self::Uniform(value)
    }
}

/// One series of readings aligned with the chart labels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub data: Vec<Bucket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_color: Option<PointValue<Color>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<PointValue<Color>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<PointValue<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<PointValue<String>>,
    /// Auxiliary tags (alert id, record id, ...) exposed on each marker.
    #[serde(default, alias = "auxiliary", skip_serializing_if = "IndexMap::is_empty")]
    pub tags: IndexMap<String, PointValue<serde_json::Value>>,
}

impl Dataset {
    #[must_use]
    pub fn new(data: impl IntoIterator<Item = Bucket>) -> Self {
        Self {
            data: data.into_iter().collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(values.into_iter().map(Bucket::One))
    }

    #[must_use]
    pub fn with_point_color(mut self, value: impl Into<PointValue<Color>>) -> Self {
        self.point_color = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_stroke_color(mut self, value: impl Into<PointValue<Color>>) -> Self {
        self.stroke_color = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_stroke_width(mut self, value: impl Into<PointValue<f64>>) -> Self {
        self.stroke_width = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, value: impl Into<PointValue<String>>) -> Self {
        self.tooltip = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_tag(
        mut self,
        key: impl Into<String>,
        value: impl Into<PointValue<serde_json::Value>>,
    ) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.data.iter().map(Bucket::len).sum()
    }
}

/// Immutable input to one render pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
    #[serde(default)]
    pub indicators: Vec<f64>,
    #[serde(default)]
    pub label_box: Vec<Option<String>>,
    /// Markup used for points whose dataset resolves no tooltip of its own.
    #[serde(default, alias = "tooltip", skip_serializing_if = "Option::is_none")]
    pub tooltip_template: Option<String>,
}

impl ChartData {
    #[must_use]
    pub fn new(labels: impl IntoIterator<Item = Label>) -> Self {
        Self {
            labels: labels.into_iter().collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.datasets.push(dataset);
        self
    }

    #[must_use]
    pub fn with_indicators(mut self, indicators: impl IntoIterator<Item = f64>) -> Self {
        self.indicators = indicators.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_label_box(mut self, boxes: impl IntoIterator<Item = Option<String>>) -> Self {
        self.label_box = boxes.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_tooltip_template(mut self, template: impl Into<String>) -> Self {
        self.tooltip_template = Some(template.into());
        self
    }

    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.labels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{Bucket, ChartData, LabelKind, PointValue};

    #[test]
    fn host_json_shape_deserializes() {
        let data: ChartData = serde_json::from_str(
            r##"{
                "labels": ["2020-09-15T00:00:00-05:00", {"value": "x", "kind": "date"}],
                "labelBox": ["HD", null],
                "indicators": [130, 80],
                "datasets": [{
                    "data": [[190, 142], null, 120],
                    "pointColor": [["#ff0000", null], null, "#00ff00"],
                    "strokeWidth": 1,
                    "tags": {"alertId": [[null, 17]]}
                }]
            }"##,
        )
        .expect("valid chart data");

        assert_eq!(data.labels[0].kind, LabelKind::Raw);
        assert_eq!(data.labels[1].kind, LabelKind::Date);
        let dataset = &data.datasets[0];
        assert_eq!(dataset.data[0].values(), &[190.0, 142.0]);
        assert_eq!(dataset.data[1], Bucket::Empty);
        assert_eq!(dataset.data[2], Bucket::One(120.0));
        assert_eq!(dataset.point_count(), 3);

        let colors = dataset.point_color.as_ref().expect("point colors");
        assert!(colors.point(0, 0).is_some());
        assert!(colors.point(0, 1).is_none());
        assert!(colors.bucket(2).is_some());
        assert_eq!(
            dataset.stroke_width,
            Some(PointValue::Uniform(1.0)),
            "scalar becomes dataset-wide value"
        );
        let alert = dataset.tags.get("alertId").expect("alert tag");
        assert_eq!(alert.point(0, 1), Some(&serde_json::json!(17)));
    }

    #[test]
    fn two_bucket_tag_arrays_stay_per_bucket() {
        let tags: PointValue<serde_json::Value> =
            serde_json::from_str("[[null, 17], [1]]").expect("tag array");

        assert!(matches!(tags, PointValue::PerBucket(_)));
        assert_eq!(tags.dataset(), None);
        assert_eq!(tags.point(0, 1), Some(&serde_json::json!(17)));
        assert_eq!(tags.point(1, 0), Some(&serde_json::json!(1)));
    }
}

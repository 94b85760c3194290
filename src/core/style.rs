use serde::{Deserialize, Serialize};

use crate::core::PointValue;

/// Level of the style cascade that supplied a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleSource {
    Point,
    Bucket,
    Dataset,
    Default,
}

/// Resolves a per-point field: sub-point, then bucket, then dataset, then `fallback`.
pub fn cascade<'a, T>(
    value: Option<&'a PointValue<T>>,
    bucket: usize,
    sub: usize,
    fallback: &'a T,
) -> (&'a T, StyleSource) {
    let Some(value) = value else {
        return (fallback, StyleSource::Default);
    };
    if let Some(resolved) = value.point(bucket, sub) {
        return (resolved, StyleSource::Point);
    }
    if let Some(resolved) = value.bucket(bucket) {
        return (resolved, StyleSource::Bucket);
    }
    if let Some(resolved) = value.dataset() {
        return (resolved, StyleSource::Dataset);
    }
    (fallback, StyleSource::Default)
}

/// Like [`cascade`] without an engine default.
pub fn cascade_optional<T>(value: Option<&PointValue<T>>, bucket: usize, sub: usize) -> Option<&T> {
    let value = value?;
    value
        .point(bucket, sub)
        .or_else(|| value.bucket(bucket))
        .or_else(|| value.dataset())
}

#[cfg(test)]
mod tests {
    use super::{StyleSource, cascade, cascade_optional};
    use crate::core::{BucketOverride, PointValue};

    #[test]
    fn layered_value_walks_every_level() {
        let value = PointValue::Layered {
            default: Some(3.0),
            buckets: vec![
                Some(BucketOverride::PerPoint(vec![Some(1.0), None])),
                Some(BucketOverride::Bucket(2.0)),
                None,
            ],
        };
        let fallback = 9.0;

        assert_eq!(cascade(Some(&value), 0, 0, &fallback), (&1.0, StyleSource::Point));
        assert_eq!(cascade(Some(&value), 0, 1, &fallback), (&3.0, StyleSource::Dataset));
        assert_eq!(cascade(Some(&value), 1, 4, &fallback), (&2.0, StyleSource::Bucket));
        assert_eq!(cascade(Some(&value), 2, 0, &fallback), (&3.0, StyleSource::Dataset));
        assert_eq!(cascade(None, 2, 0, &fallback), (&9.0, StyleSource::Default));
    }

    #[test]
    fn per_bucket_value_without_entry_falls_to_default() {
        let value = PointValue::per_bucket([5.0]);
        assert_eq!(cascade(Some(&value), 3, 0, &0.5), (&0.5, StyleSource::Default));
        assert_eq!(cascade_optional(Some(&value), 3, 0), None);
    }
}

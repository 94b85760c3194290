pub mod dataset;
pub mod layout;
pub mod line_series;
pub mod mapping;
pub mod padding;
pub mod style;
pub mod types;

pub use dataset::{Bucket, BucketOverride, ChartData, Dataset, Label, LabelKind, PointValue};
pub use layout::{ChartLayout, OuterSize, PlotRect, compute_layout};
pub use line_series::{LineSegment, project_path_segments};
pub use mapping::{BucketAxis, MappedPoint, PointId, SUB_POINT_LEAD_IN_PX, map_dataset_points};
pub use padding::{Insets, Padding};
pub use style::{StyleSource, cascade, cascade_optional};
pub use types::{Viewport, decimal_to_f64};

mod engine;
mod interaction_controller;
mod label_formatter;
mod options;
mod render_frame_builder;
mod select_all_channel;
mod snapshot;
mod tooltip_template;
mod validation;

pub use engine::{ChartEngine, PointClickCallback, RenderOutcome};
pub use label_formatter::{format_date_label, format_label, parse_label_datetime};
pub use options::{
    ChartOptions, GraphOptions, IndicatorOptions, LabelOptions, PathOptions, PointOptions,
    SelectedPointOptions, TooltipOptions,
};
pub use render_frame_builder::{PointClassResolver, build_render_frame, resolve_point_style};
pub use select_all_channel::select_all_topic;
pub use snapshot::{ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot, EngineSnapshotJsonContractV1};
pub use tooltip_template::render_tooltip_template;
pub use validation::validate_chart_options;

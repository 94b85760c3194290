use serde_json::{Map, Value};
use tracing::debug;

use crate::core::{
    BucketAxis, ChartData, ChartLayout, Dataset, MappedPoint, cascade, cascade_optional,
    map_dataset_points, project_path_segments,
};
use crate::render::{
    CirclePrimitive, DatasetLayer, LabelBox, LinePrimitive, LineStrokeStyle, MarkerAttributes,
    PointMarker, PointStyle, RectPrimitive, RenderFrame, TextPrimitive,
};

use super::label_formatter::format_label;
use super::tooltip_template::render_tooltip_template;
use super::{ChartOptions, PointOptions};

const INDICATOR_PILL_WIDTH: f64 = 37.0;
const INDICATOR_PILL_HEIGHT: f64 = 16.0;
const LABEL_BOX_WIDTH: f64 = 40.0;
const LABEL_BOX_HEIGHT: f64 = 16.0;
const LABEL_FONT_SIZE_PX: f64 = 9.0;
const INDICATOR_DASH_PX: f64 = 4.0;

/// Resolves a CSS class for a marker from its JSON tag bundle.
pub type PointClassResolver = dyn Fn(&Value) -> Option<String>;

/// Builds the full draw frame for one pass.
///
/// Decorations come first, then one layer per dataset holding its path
/// segments and markers. Nothing here touches selection state.
#[must_use]
pub fn build_render_frame(
    options: &ChartOptions,
    data: &ChartData,
    layout: &ChartLayout,
    class_resolver: Option<&PointClassResolver>,
) -> RenderFrame {
    let plot = layout.plot;
    let axis = BucketAxis::new(plot, data.bucket_count());
    let graph = &options.graph;
    let indicators = &options.indicators;

    let mut frame = RenderFrame::new(layout.outer).with_rect(RectPrimitive::new(
        0.0,
        0.0,
        layout.outer.width,
        layout.outer.height,
        options.background_color,
    ));

    let mut plot_rect = RectPrimitive::new(
        plot.x,
        plot.y,
        plot.width,
        plot.height,
        graph.background_color,
    );
    if graph.border {
        plot_rect = plot_rect.with_border(graph.border_color, graph.border_width);
    }
    frame.rects.push(plot_rect);

    // The dash starts at the pill's right edge so it never crosses the pill.
    let dash_start = (INDICATOR_PILL_WIDTH / 2.0 + INDICATOR_PILL_WIDTH).max(plot.x);
    let mut seen = Vec::with_capacity(data.indicators.len());
    for &value in &data.indicators {
        if !value.is_finite() || seen.contains(&value.to_bits()) {
            debug!(value, "skipping indicator");
            continue;
        }
        seen.push(value.to_bits());

        let y = axis.value_to_y(value);
        let pill_x = INDICATOR_PILL_WIDTH / 2.0;
        let pill_y = y - INDICATOR_PILL_HEIGHT / 2.0;
        frame.rects.push(
            RectPrimitive::new(
                pill_x,
                pill_y,
                INDICATOR_PILL_WIDTH,
                INDICATOR_PILL_HEIGHT,
                indicators.background_color,
            )
            .with_border(indicators.border_color, indicators.border_width)
            .with_corner_radius(INDICATOR_PILL_HEIGHT / 2.0),
        );
        frame.texts.push(
            TextPrimitive::new(
                value.to_string(),
                pill_x,
                pill_y,
                INDICATOR_PILL_WIDTH,
                INDICATOR_PILL_HEIGHT,
                indicators.font_size,
                indicators.font_color,
            )
            .with_letter_spacing(indicators.letter_spacing),
        );
        frame.lines.push(
            LinePrimitive::new(
                dash_start,
                y,
                plot.right(),
                y,
                indicators.border_width,
                indicators.border_color,
            )
            .with_stroke_style(LineStrokeStyle::Dashed(INDICATOR_DASH_PX)),
        );
    }

    for (bucket, label) in data.labels.iter().enumerate() {
        let text = format_label(label, &options.labels);
        let lines = text.split('\n').count() as f64;
        frame.texts.push(TextPrimitive::new(
            text,
            axis.bucket_left(bucket),
            plot.bottom(),
            axis.bucket_width(),
            LABEL_FONT_SIZE_PX / 2.0 + LABEL_FONT_SIZE_PX * lines,
            LABEL_FONT_SIZE_PX,
            options.labels.text_color,
        ));
    }

    for bucket in 1..axis.bucket_count() {
        let x = axis.bucket_left(bucket);
        frame.lines.push(LinePrimitive::new(
            x,
            plot.y,
            x,
            plot.bottom(),
            graph.border_width,
            graph.border_color,
        ));
    }

    for (bucket, text) in data.label_box.iter().enumerate().take(axis.bucket_count()) {
        let Some(text) = text.as_deref().filter(|text| !text.is_empty()) else {
            continue;
        };
        let x = axis.bucket_left(bucket) + LABEL_BOX_WIDTH - LABEL_BOX_HEIGHT / 2.0;
        let y = plot.bottom() - LABEL_BOX_HEIGHT - LABEL_BOX_HEIGHT / 4.0;
        frame.label_boxes.push(LabelBox {
            rect: RectPrimitive::new(
                x,
                y,
                LABEL_BOX_WIDTH,
                LABEL_BOX_HEIGHT,
                indicators.background_color,
            )
            .with_border(indicators.border_color, indicators.border_width)
            .with_corner_radius(LABEL_BOX_HEIGHT / 2.0),
            text: TextPrimitive::new(
                text,
                x,
                y,
                LABEL_BOX_WIDTH,
                LABEL_BOX_HEIGHT,
                indicators.font_size,
                indicators.font_color,
            )
            .with_letter_spacing(indicators.letter_spacing),
        });
    }

    for (index, dataset) in data.datasets.iter().enumerate() {
        let points = map_dataset_points(axis, index, &dataset.data);
        let mut layer = DatasetLayer::new(index);

        layer.segments = project_path_segments(&points)
            .into_iter()
            .map(|segment| {
                LinePrimitive::new(
                    segment.x1,
                    segment.y1,
                    segment.x2,
                    segment.y2,
                    graph.path.border_width,
                    graph.path.border_color,
                )
            })
            .collect();

        for point in &points {
            if graph.point.backdrop_point {
                layer.backdrops.push(CirclePrimitive {
                    cx: point.x,
                    cy: point.y,
                    radius: graph.point.radius,
                    fill_color: graph.point.point_color,
                    stroke_color: graph.point.stroke_color,
                    stroke_width: graph.point.stroke_width,
                });
            }
            layer
                .markers
                .push(build_marker(options, data, dataset, point, class_resolver));
        }

        debug!(
            dataset = index,
            points = layer.markers.len(),
            segments = layer.segments.len(),
            "dataset geometry built"
        );
        frame.datasets.push(layer);
    }

    frame
}

/// Resolves the cascaded base style of one point.
#[must_use]
pub fn resolve_point_style(
    point_options: &PointOptions,
    dataset: &Dataset,
    bucket: usize,
    sub: usize,
) -> PointStyle {
    let (fill, _) = cascade(
        dataset.point_color.as_ref(),
        bucket,
        sub,
        &point_options.point_color,
    );
    let (stroke, _) = cascade(
        dataset.stroke_color.as_ref(),
        bucket,
        sub,
        &point_options.stroke_color,
    );
    let (stroke_width, _) = cascade(
        dataset.stroke_width.as_ref(),
        bucket,
        sub,
        &point_options.stroke_width,
    );
    PointStyle {
        fill: *fill,
        stroke: *stroke,
        stroke_width: *stroke_width,
    }
}

fn build_marker(
    options: &ChartOptions,
    data: &ChartData,
    dataset: &Dataset,
    point: &MappedPoint,
    class_resolver: Option<&PointClassResolver>,
) -> PointMarker {
    let id = point.id;
    let point_options = &options.graph.point;

    let tooltip = cascade_optional(dataset.tooltip.as_ref(), id.bucket, id.sub)
        .cloned()
        .or_else(|| {
            data.tooltip_template
                .as_deref()
                .map(|template| render_tooltip_template(template, data, id))
        });

    let mut tags = Map::new();
    for key in &point_options.data_attributes {
        let value = cascade_optional(dataset.tags.get(key), id.bucket, id.sub)
            .cloned()
            .unwrap_or(Value::Null);
        tags.insert(key.clone(), value);
    }
    let tags = Value::Object(tags);
    let class_name = class_resolver.and_then(|resolve| resolve(&tags));

    PointMarker {
        id,
        cx: point.x,
        cy: point.y,
        radius: point_options.radius,
        style: resolve_point_style(point_options, dataset, id.bucket, id.sub),
        attributes: MarkerAttributes {
            data_index: id.data_index(),
            data_value: point.value,
            tooltip,
            data: tags.to_string(),
            class_name,
        },
    }
}

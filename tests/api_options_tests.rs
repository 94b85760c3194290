use vitals_chart::api::{ChartEngine, ChartOptions, validate_chart_options};
use vitals_chart::core::{LabelKind, Padding};
use vitals_chart::interaction::SelectionMode;
use vitals_chart::render::{Color, NullRenderer};
use vitals_chart::ChartError;

#[test]
fn defaults_match_the_documented_palette() {
    let options = ChartOptions::default();
    assert_eq!(options.background_color, Color::rgba8(38, 55, 76, 1.0));
    assert_eq!(options.padding, Padding::Uniform(0.0));
    assert_eq!(options.labels.kind, LabelKind::Raw);
    assert_eq!(options.labels.text_color.to_css(), "rgba(141, 171, 196, 1)");
    assert!(options.graph.border);
    assert_eq!(options.graph.border_width, 1.0);
    assert_eq!(options.graph.point.radius, 5.0);
    assert!(options.graph.point.single_hover_highlight);
    assert_eq!(options.graph.point.selected.point_color, Color::TRANSPARENT);
    assert_eq!(options.graph.point.selected.stroke_width, 2.0);
    assert_eq!(options.graph.path.border_width, 2.0);
    assert_eq!(options.indicators.font_size, 9.0);
    assert_eq!(options.indicators.letter_spacing, 0.5);
    assert_eq!(options.tooltip.padding, 4.0);
    assert_eq!(options.selection_mode(), SelectionMode::SinglePoint);
}

#[test]
fn partial_json_merges_over_defaults_at_every_depth() {
    let options = ChartOptions::from_json_str(
        r##"{
            "padding": [10, 20],
            "labels": { "type": "date", "format": "ddd\nM/DD" },
            "graph": {
                "borderColor": "#3f536e",
                "point": {
                    "singleHoverHighlight": false,
                    "selected": { "strokeWidth": 3 },
                    "dataAttributes": ["alertId"]
                }
            }
        }"##,
    )
    .expect("options json");

    assert_eq!(options.padding.normalize().as_array(), [10.0, 20.0, 10.0, 20.0]);
    assert_eq!(options.labels.kind, LabelKind::Date);
    assert_eq!(options.labels.format, "ddd\nM/DD");
    assert_eq!(options.labels.text_color, Color::rgba8(141, 171, 196, 1.0));
    assert_eq!(options.graph.border_color, Color::rgba8(63, 83, 110, 1.0));
    assert_eq!(options.graph.border_width, 1.0);
    assert_eq!(options.graph.point.selected.stroke_width, 3.0);
    assert_eq!(options.graph.point.selected.stroke_color, Color::WHITE);
    assert_eq!(options.graph.point.data_attributes, vec!["alertId".to_owned()]);
    assert_eq!(options.selection_mode(), SelectionMode::LockStep);
    assert_eq!(options.background_color, ChartOptions::default().background_color);
}

#[test]
fn options_round_trip_through_json() {
    let options = ChartOptions::default()
        .with_padding(Padding::sides(1.0, 2.0, 3.0, 4.0))
        .with_date_labels("MMM D")
        .with_tooltip_padding(6.0);
    let json = options.to_json_pretty().expect("serialize");
    assert!(json.contains("\"backgroundColor\": \"rgba(38, 55, 76, 1)\""));
    assert_eq!(ChartOptions::from_json_str(&json).expect("parse"), options);
}

#[test]
fn invalid_color_string_is_a_serialization_error() {
    let err = ChartOptions::from_json_str(r#"{ "backgroundColor": "not-a-color" }"#)
        .expect_err("bad color");
    assert!(matches!(err, ChartError::Serialization(_)));
}

#[test]
fn validation_rejects_bad_widths_and_radius() {
    let mut options = ChartOptions::default();
    options.graph.point.radius = 0.0;
    assert!(matches!(
        validate_chart_options(&options),
        Err(ChartError::InvalidOption {
            option: "graph.point.radius",
            ..
        })
    ));

    let mut options = ChartOptions::default();
    options.graph.path.border_width = f64::NAN;
    assert!(matches!(
        ChartEngine::new(NullRenderer::default(), "bad", options),
        Err(ChartError::InvalidOption {
            option: "graph.path.borderWidth",
            ..
        })
    ));

    let mut options = ChartOptions::default();
    options.tooltip.padding = -1.0;
    assert!(validate_chart_options(&options).is_err());
}

#[test]
fn odd_padding_is_never_rejected() {
    let options = ChartOptions::default().with_padding(Padding::Sides(vec![3.0, 1.0, 4.0]));
    assert!(validate_chart_options(&options).is_ok());
}

#[test]
fn set_options_switches_selection_mode() {
    let mut engine = ChartEngine::new(NullRenderer::attached(100, 100), "c", ChartOptions::default())
        .expect("engine init");
    assert_eq!(engine.selection_mode(), SelectionMode::SinglePoint);

    engine
        .set_options(ChartOptions::default().with_single_hover_highlight(false))
        .expect("set options");
    assert_eq!(engine.selection_mode(), SelectionMode::LockStep);

    let mut invalid = ChartOptions::default();
    invalid.indicators.font_size = 0.0;
    assert!(engine.set_options(invalid).is_err());
    assert_eq!(engine.selection_mode(), SelectionMode::LockStep);
}

use approx::assert_relative_eq;
use vitals_chart::api::{ChartEngine, ChartOptions};
use vitals_chart::core::{ChartData, Dataset, Label, PlotRect, PointId, PointValue};
use vitals_chart::interaction::{TooltipSide, TooltipSize, resolve_tooltip_placement};
use vitals_chart::render::{Color, NullRenderer};

fn plot() -> PlotRect {
    PlotRect::new(20.0, 10.0, 600.0, 300.0)
}

#[test]
fn anchor_near_the_top_places_tooltip_below() {
    let size = TooltipSize::new(80.0, 30.0);
    let placement = resolve_tooltip_placement(200.0, 20.0, size, plot(), 4.0).expect("placement");

    assert_eq!(placement.side, TooltipSide::Below);
    assert!(placement.pointer_flipped);
    assert_relative_eq!(placement.x, 160.0);
    assert_relative_eq!(placement.y, 20.0 + 15.0 + 4.0);
}

#[test]
fn anchor_near_the_bottom_places_tooltip_above() {
    let size = TooltipSize::new(80.0, 30.0);
    let placement = resolve_tooltip_placement(200.0, 300.0, size, plot(), 4.0).expect("placement");

    assert_eq!(placement.side, TooltipSide::Above);
    assert!(!placement.pointer_flipped);
    assert_relative_eq!(placement.y, 300.0 - (60.0 + 8.0));
}

#[test]
fn vertical_center_goes_above_and_x_is_never_clamped() {
    let size = TooltipSize::new(120.0, 20.0);
    let placement = resolve_tooltip_placement(25.0, 160.0, size, plot(), 0.0).expect("placement");

    assert_eq!(placement.side, TooltipSide::Above);
    assert_relative_eq!(placement.x, -35.0);
}

#[test]
fn non_finite_input_is_rejected() {
    let size = TooltipSize::new(f64::NAN, 20.0);
    assert!(resolve_tooltip_placement(0.0, 0.0, size, plot(), 4.0).is_err());
    let size = TooltipSize::new(-1.0, 20.0);
    assert!(resolve_tooltip_placement(0.0, 0.0, size, plot(), 4.0).is_err());
}

#[test]
fn hover_places_tooltip_from_the_marker_and_leave_hides_it() {
    let labels = (0..3).map(|i| Label::raw(format!("d{i}")));
    let data = ChartData::new(labels).with_dataset(Dataset::from_values([290.0, 150.0, 10.0]));
    let mut engine = ChartEngine::new(
        NullRenderer::attached(300, 300),
        "hover",
        ChartOptions::default(),
    )
    .expect("engine init");
    engine.set_data(data);
    engine.render().expect("render");
    let size = TooltipSize::new(60.0, 24.0);

    let high = engine
        .pointer_enter(PointId::new(0, 0, 0), size)
        .expect("enter");
    assert_eq!(high.side, TooltipSide::Below);
    assert_relative_eq!(high.anchor_y, 10.0);
    assert_relative_eq!(high.y, 10.0 + 12.0 + 4.0);

    let low_marker = engine.marker(PointId::new(0, 2, 0)).expect("marker");
    let hover = engine
        .pointer_move(low_marker.cx, low_marker.cy + 1.0, size)
        .expect("move");
    assert_eq!(hover.hovered, Some(low_marker.id));
    assert_eq!(hover.tooltip.expect("tooltip").side, TooltipSide::Above);

    let hover = engine.pointer_move(5.0, 5.0, size).expect("move off");
    assert!(!hover.is_hovering());
    assert!(hover.tooltip.is_none());

    engine.pointer_enter(low_marker.id, size).expect("enter");
    engine.pointer_leave().expect("leave");
    assert_eq!(engine.hover_state().hovered, None);
    assert!(
        engine
            .pointer_enter(PointId::new(3, 0, 0), size)
            .is_err()
    );
}

#[test]
fn hover_draws_the_tooltip_over_the_scene_and_leave_removes_it() {
    let labels = (0..3).map(|i| Label::raw(format!("d{i}")));
    let data = ChartData::new(labels).with_dataset(
        Dataset::from_values([290.0, 150.0, 10.0]).with_tooltip(PointValue::per_bucket([
            "SYS 290".to_owned(),
            "SYS 150".to_owned(),
            "SYS 10".to_owned(),
        ])),
    );
    let options = ChartOptions::default();
    let mut engine = ChartEngine::new(NullRenderer::attached(300, 300), "hover", options.clone())
        .expect("engine init");
    engine.set_data(data);
    engine.render().expect("render");
    assert!(engine.drawn_frame().expect("frame").tooltip.is_none());

    let size = TooltipSize::new(60.0, 24.0);
    let placement = engine
        .pointer_enter(PointId::new(0, 0, 0), size)
        .expect("enter");
    {
        let frame = engine.drawn_frame().expect("frame");
        let tooltip = frame.tooltip.as_ref().expect("tooltip drawn");
        assert_relative_eq!(tooltip.x, placement.x);
        assert_relative_eq!(tooltip.y, placement.y);
        assert_relative_eq!(tooltip.width, 60.0);
        assert_relative_eq!(tooltip.height, 24.0);
        assert!(tooltip.pointer_flipped);
        assert_eq!(tooltip.text.as_deref(), Some("SYS 290"));
        assert_eq!(tooltip.fill_color, options.tooltip.background_color);
    }
    assert_eq!(engine.renderer().render_count, 1);
    assert_eq!(engine.renderer().repaint_count, 1);

    engine.render().expect("re-render");
    assert!(engine.drawn_frame().expect("frame").tooltip.is_some());

    engine.pointer_leave().expect("leave");
    assert!(engine.drawn_frame().expect("frame").tooltip.is_none());
    assert_eq!(engine.renderer().repaint_count, 2);

    engine.pointer_leave().expect("leave again");
    assert_eq!(engine.renderer().repaint_count, 2, "unchanged frame is not redrawn");
}

#[test]
fn tooltip_style_follows_the_options() {
    let mut options = ChartOptions::default();
    options.tooltip.font_size = 14.0;
    options.tooltip.border_color = Color::WHITE;
    let style = options.tooltip_style();
    assert_relative_eq!(style.font_size_px, 14.0);
    assert_eq!(style.border_color, Color::WHITE);
    assert_relative_eq!(style.padding, 4.0);

    options.tooltip.font_size = 0.0;
    assert!(ChartEngine::new(NullRenderer::detached(), "bad", options).is_err());
}

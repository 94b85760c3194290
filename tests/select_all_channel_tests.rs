use std::cell::Cell;
use std::rc::Rc;

use serde_json::Value;
use vitals_chart::api::{ChartEngine, ChartOptions, select_all_topic};
use vitals_chart::core::{ChartData, Dataset, Label};
use vitals_chart::extensions::EventBus;
use vitals_chart::render::{Color, NullRenderer};

fn mounted_engine(chart_id: &str) -> ChartEngine<NullRenderer> {
    let labels = (0..3).map(|i| Label::raw(format!("d{i}")));
    let data = ChartData::new(labels)
        .with_dataset(Dataset::from_values([110.0, 115.0, 120.0]))
        .with_dataset(Dataset::from_values([70.0, 75.0, 72.0]));
    let mut engine = ChartEngine::new(
        NullRenderer::attached(300, 200),
        chart_id,
        ChartOptions::default(),
    )
    .expect("engine init");
    engine.set_data(data);
    engine.render().expect("render");
    engine
}

#[test]
fn topic_is_keyed_by_chart_id() {
    assert_eq!(select_all_topic("bp-chart"), "bp-chart-selectAll");
}

#[test]
fn broadcast_selects_every_marker_of_the_mounted_chart() {
    let bus = EventBus::new();
    let mut engine = mounted_engine("bp");
    let other = mounted_engine("hr");
    let clicks = Rc::new(Cell::new(0));
    let sink = Rc::clone(&clicks);
    engine.set_on_point_click(move |_| sink.set(sink.get() + 1));

    engine.mount_on(&bus);
    assert!(engine.is_mounted());
    assert_eq!(bus.listener_count("bp-selectAll"), 1);

    assert_eq!(bus.dispatch("bp-selectAll", &Value::Null), 1);
    assert_eq!(engine.selected_points().len(), 6);
    assert_eq!(clicks.get(), 6);
    assert!(other.selected_points().is_empty());
}

#[test]
fn unmount_removes_the_listener() {
    let bus = EventBus::new();
    let mut engine = mounted_engine("bp");
    engine.mount_on(&bus);
    engine.unmount();

    assert!(!engine.is_mounted());
    assert_eq!(bus.listener_count("bp-selectAll"), 0);
    assert_eq!(bus.dispatch("bp-selectAll", &Value::Null), 0);
    assert!(engine.selected_points().is_empty());
}

#[test]
fn remounting_keeps_a_single_listener() {
    let bus = EventBus::new();
    let mut engine = mounted_engine("bp");
    engine.mount_on(&bus);
    engine.mount_on(&bus);

    assert_eq!(bus.listener_count("bp-selectAll"), 1);
    bus.dispatch("bp-selectAll", &Value::Null);
    assert_eq!(engine.selected_points().len(), 6);
}

#[test]
fn dropping_the_engine_tears_down_its_subscription() {
    let bus = EventBus::new();
    {
        let mut engine = mounted_engine("bp");
        engine.mount_on(&bus);
        assert_eq!(bus.listener_count("bp-selectAll"), 1);
    }
    assert_eq!(bus.listener_count("bp-selectAll"), 0);
    assert_eq!(bus.dispatch("bp-selectAll", &Value::Null), 0);
}

#[test]
fn into_renderer_also_tears_down_the_subscription() {
    let bus = EventBus::new();
    let mut engine = mounted_engine("bp");
    engine.mount_on(&bus);
    let renderer = engine.into_renderer().expect("sole owner of the scene");

    assert_eq!(renderer.render_count, 1);
    assert_eq!(bus.listener_count("bp-selectAll"), 0);
}

#[test]
fn mount_uses_the_process_wide_bus() {
    let mut engine = mounted_engine("global-chart");
    engine.mount();
    let bus = EventBus::global();
    assert_eq!(bus.listener_count("global-chart-selectAll"), 1);

    bus.dispatch("global-chart-selectAll", &Value::Null);
    assert_eq!(engine.selected_points().len(), 6);

    engine.unmount();
    assert_eq!(bus.listener_count("global-chart-selectAll"), 0);
}

#[test]
fn callback_may_query_the_engine_scene_during_broadcast() {
    let bus = EventBus::new();
    let mut engine = mounted_engine("bp");
    let observed = Rc::new(Cell::new(0));
    let sink = Rc::clone(&observed);
    engine.set_on_point_click(move |click| {
        if click.selected {
            sink.set(sink.get() + 1);
        }
    });
    engine.mount_on(&bus);

    bus.dispatch("bp-selectAll", &Value::Null);
    assert_eq!(observed.get(), 6);
}

#[test]
fn broadcast_repaints_the_drawn_scene_once() {
    let bus = EventBus::new();
    let mut engine = mounted_engine("bp");
    engine.mount_on(&bus);

    bus.dispatch("bp-selectAll", &Value::Null);

    let renderer = engine.renderer();
    assert_eq!(renderer.render_count, 1);
    assert_eq!(renderer.repaint_count, 1);
    let frame = renderer.last_frame.as_ref().expect("frame");
    assert_eq!(frame.marker_count(), 6);
    assert!(frame.markers().all(|marker| marker.style.stroke == Color::WHITE));
}
